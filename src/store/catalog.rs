//! In-memory catalog of recipes, techniques and kitchen reference data

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::error::{Error, Result};
use crate::search::RecipeFilter;
use crate::types::{
    normalize_key, CommonSubstitute, CookingTime, IngredientInfo, Recipe, Technique,
};

/// Catalog shipped inside the binary
const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.json");

/// Serialized form of the catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub recipes: Vec<Recipe>,
    #[serde(default)]
    pub techniques: Vec<Technique>,
    #[serde(default)]
    pub ingredients: Vec<IngredientInfo>,
    #[serde(default)]
    pub substitutes: Vec<CommonSubstitute>,
    #[serde(default)]
    pub cooking_times: Vec<CookingTime>,
}

/// Immutable record store, populated once at startup.
///
/// Recipes keep their catalog order; every listing and search result
/// follows it.
#[derive(Debug)]
pub struct RecipeStore {
    catalog: Catalog,
    recipe_index: HashMap<String, usize>,
    technique_index: HashMap<String, usize>,
}

impl RecipeStore {
    /// Build a store from the catalog embedded at compile time
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Load a JSON catalog file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let store = Self::from_json(&content)?;
        tracing::info!("Loaded catalog from {:?}", path);
        Ok(store)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let catalog: Catalog = serde_json::from_str(json)?;
        Self::from_catalog(catalog)
    }

    pub fn from_catalog(catalog: Catalog) -> Result<Self> {
        let mut recipe_index = HashMap::with_capacity(catalog.recipes.len());
        for (pos, recipe) in catalog.recipes.iter().enumerate() {
            if recipe.id.trim().is_empty() {
                return Err(Error::Catalog(format!("recipe '{}' has an empty id", recipe.name)));
            }
            if recipe_index.insert(recipe.id.clone(), pos).is_some() {
                return Err(Error::Catalog(format!("duplicate recipe id '{}'", recipe.id)));
            }
        }

        let mut technique_index = HashMap::with_capacity(catalog.techniques.len());
        for (pos, technique) in catalog.techniques.iter().enumerate() {
            if technique_index.insert(technique.id.clone(), pos).is_some() {
                return Err(Error::Catalog(format!(
                    "duplicate technique id '{}'",
                    technique.id
                )));
            }
        }

        tracing::debug!(
            recipes = catalog.recipes.len(),
            techniques = catalog.techniques.len(),
            ingredients = catalog.ingredients.len(),
            "Catalog indexed"
        );

        Ok(Self {
            catalog,
            recipe_index,
            technique_index,
        })
    }

    /// Get a recipe by exact ID
    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.recipe_index.get(id).map(|&pos| &self.catalog.recipes[pos])
    }

    /// Get a recipe by ID, falling back to a partial match on ID or name
    pub fn find(&self, needle: &str) -> Option<&Recipe> {
        if let Some(recipe) = self.get(needle) {
            return Some(recipe);
        }

        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }

        self.catalog
            .recipes
            .iter()
            .find(|r| r.id.contains(&needle) || r.name.to_lowercase().contains(&needle))
    }

    /// All recipes in catalog order
    pub fn recipes(&self) -> &[Recipe] {
        &self.catalog.recipes
    }

    pub fn len(&self) -> usize {
        self.catalog.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.recipes.is_empty()
    }

    /// Recipes matching every supplied criterion, in catalog order
    pub fn search(&self, filter: &RecipeFilter) -> Vec<&Recipe> {
        filter.apply(&self.catalog.recipes)
    }

    /// Recipes with an ingredient whose name contains `ingredient`
    pub fn recipes_with_ingredient(&self, ingredient: &str) -> Vec<&Recipe> {
        self.catalog
            .recipes
            .iter()
            .filter(|r| r.uses_ingredient(ingredient))
            .collect()
    }

    pub fn techniques(&self) -> &[Technique] {
        &self.catalog.techniques
    }

    /// Look up a technique by key ("stir-fry", "Stir Fry") or display name ("Sauté")
    pub fn technique(&self, name: &str) -> Option<&Technique> {
        let key = normalize_key(name);
        if let Some(&pos) = self.technique_index.get(&key) {
            return Some(&self.catalog.techniques[pos]);
        }

        let lowered = name.trim().to_lowercase();
        self.catalog
            .techniques
            .iter()
            .find(|t| t.name.to_lowercase() == lowered)
    }

    pub fn ingredients(&self) -> &[IngredientInfo] {
        &self.catalog.ingredients
    }

    /// Look up pantry reference data by key ("soy sauce" -> "soy_sauce")
    pub fn ingredient_info(&self, name: &str) -> Option<&IngredientInfo> {
        let key = normalize_key(name);
        self.catalog.ingredients.iter().find(|i| i.key == key)
    }

    pub fn common_substitutes(&self) -> &[CommonSubstitute] {
        &self.catalog.substitutes
    }

    pub fn cooking_times(&self) -> &[CookingTime] {
        &self.catalog.cooking_times
    }

    /// Distinct cuisines present in the catalog
    pub fn cuisine_count(&self) -> usize {
        self.catalog
            .recipes
            .iter()
            .map(|r| r.cuisine)
            .collect::<HashSet<_>>()
            .len()
    }
}
