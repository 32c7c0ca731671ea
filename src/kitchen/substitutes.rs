//! Ingredient substitution lookup

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{Error, Result};
use crate::store::RecipeStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SubstituteSource {
    /// Pantry reference data
    Pantry,
    /// An ingredient line of a recipe
    Recipe,
    /// Generic substitution list
    Common,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Substitutes {
    pub ingredient: String,
    pub substitutes: Vec<String>,
    pub source: SubstituteSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_tips: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_recipe: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Substitutes from the pantry data, then recipe ingredient lines, then the
/// common list
pub fn find_substitutes(store: &RecipeStore, ingredient: &str) -> Result<Substitutes> {
    let needle = ingredient.trim().to_lowercase();
    if needle.is_empty() {
        return Err(Error::validation("ingredient", "must not be empty"));
    }

    if let Some(info) = store.ingredient_info(&needle) {
        return Ok(Substitutes {
            ingredient: info.name.clone(),
            substitutes: info.substitutes.clone(),
            source: SubstituteSource::Pantry,
            storage_tips: Some(info.storage.clone()),
            from_recipe: None,
            note: None,
        });
    }

    for recipe in store.recipes() {
        let hit = recipe
            .ingredients
            .iter()
            .find(|ing| !ing.substitutes.is_empty() && ing.name.to_lowercase().contains(&needle));
        if let Some(ing) = hit {
            return Ok(Substitutes {
                ingredient: ing.name.clone(),
                substitutes: ing.substitutes.clone(),
                source: SubstituteSource::Recipe,
                storage_tips: None,
                from_recipe: Some(recipe.name.clone()),
                note: None,
            });
        }
    }

    if let Some(common) = store
        .common_substitutes()
        .iter()
        .find(|c| needle.contains(&c.ingredient))
    {
        return Ok(Substitutes {
            ingredient: ingredient.trim().to_string(),
            substitutes: common.substitutes.clone(),
            source: SubstituteSource::Common,
            storage_tips: None,
            from_recipe: None,
            note: Some("Amounts may need adjustment".into()),
        });
    }

    Err(Error::IngredientNotFound(ingredient.to_string()))
}
