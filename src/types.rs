//! Core types for the recipe catalog

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::error::Error;

/// Cuisine a recipe belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Cuisine {
    Korean,
    Japanese,
    Chinese,
    Italian,
    Mexican,
    American,
    French,
    Thai,
    Indian,
    Mediterranean,
}

impl Cuisine {
    pub const ALL: [Cuisine; 10] = [
        Cuisine::Korean,
        Cuisine::Japanese,
        Cuisine::Chinese,
        Cuisine::Italian,
        Cuisine::Mexican,
        Cuisine::American,
        Cuisine::French,
        Cuisine::Thai,
        Cuisine::Indian,
        Cuisine::Mediterranean,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Cuisine::Korean => "korean",
            Cuisine::Japanese => "japanese",
            Cuisine::Chinese => "chinese",
            Cuisine::Italian => "italian",
            Cuisine::Mexican => "mexican",
            Cuisine::American => "american",
            Cuisine::French => "french",
            Cuisine::Thai => "thai",
            Cuisine::Indian => "indian",
            Cuisine::Mediterranean => "mediterranean",
        }
    }
}

/// How hard a recipe is to make
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

/// Dietary property a recipe satisfies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DietaryTag {
    Vegetarian,
    Vegan,
    GlutenFree,
    DairyFree,
    LowCarb,
    HighProtein,
    Keto,
    Paleo,
}

impl DietaryTag {
    pub const ALL: [DietaryTag; 8] = [
        DietaryTag::Vegetarian,
        DietaryTag::Vegan,
        DietaryTag::GlutenFree,
        DietaryTag::DairyFree,
        DietaryTag::LowCarb,
        DietaryTag::HighProtein,
        DietaryTag::Keto,
        DietaryTag::Paleo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DietaryTag::Vegetarian => "vegetarian",
            DietaryTag::Vegan => "vegan",
            DietaryTag::GlutenFree => "gluten_free",
            DietaryTag::DairyFree => "dairy_free",
            DietaryTag::LowCarb => "low_carb",
            DietaryTag::HighProtein => "high_protein",
            DietaryTag::Keto => "keto",
            DietaryTag::Paleo => "paleo",
        }
    }
}

impl FromStr for Cuisine {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize_key(s);
        Cuisine::ALL
            .into_iter()
            .find(|c| c.as_str() == key)
            .ok_or_else(|| unknown_variant("cuisine", s, Cuisine::ALL.iter().map(|c| c.as_str())))
    }
}

impl FromStr for Difficulty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize_key(s);
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str() == key)
            .ok_or_else(|| {
                unknown_variant("difficulty", s, Difficulty::ALL.iter().map(|d| d.as_str()))
            })
    }
}

impl FromStr for DietaryTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize_key(s);
        DietaryTag::ALL
            .into_iter()
            .find(|t| t.as_str() == key)
            .ok_or_else(|| {
                unknown_variant("dietary_tags", s, DietaryTag::ALL.iter().map(|t| t.as_str()))
            })
    }
}

impl fmt::Display for Cuisine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for DietaryTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recipe ingredient line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Ingredient {
    pub name: String,
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub substitutes: Vec<String>,
}

impl Ingredient {
    /// Render as "3 cups Cooked rice (Cold rice works best)"
    pub fn display_line(&self) -> String {
        let mut line = [self.amount.as_str(), self.unit.as_str(), self.name.as_str()]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ");
        if let Some(notes) = self.notes.as_deref().filter(|n| !n.is_empty()) {
            line.push_str(&format!(" ({})", notes));
        }
        line
    }
}

/// Nutrition per serving
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NutritionInfo {
    pub calories: u32,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    #[serde(default)]
    pub fiber_g: f64,
    #[serde(default)]
    pub sodium_mg: u32,
}

/// A complete recipe record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub description: String,
    pub cuisine: Cuisine,
    pub difficulty: Difficulty,
    pub prep_time_min: u32,
    pub cook_time_min: u32,
    pub servings: u32,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
    #[serde(default)]
    pub tips: Vec<String>,
    #[serde(default)]
    pub dietary_tags: Vec<DietaryTag>,
    #[serde(default)]
    pub nutrition: Option<NutritionInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Recipe {
    pub fn total_time_min(&self) -> u32 {
        self.prep_time_min.saturating_add(self.cook_time_min)
    }

    pub fn has_tag(&self, tag: DietaryTag) -> bool {
        self.dietary_tags.contains(&tag)
    }

    /// Case-insensitive substring match against ingredient names
    pub fn uses_ingredient(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.ingredients
            .iter()
            .any(|ing| ing.name.to_lowercase().contains(&needle))
    }
}

/// Recipe metadata for listing (without ingredients and steps)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecipeSummary {
    pub id: String,
    pub name: String,
    pub cuisine: Cuisine,
    pub difficulty: Difficulty,
    pub prep_time: u32,
    pub cook_time: u32,
    pub total_time: u32,
    pub servings: u32,
    pub dietary_tags: Vec<DietaryTag>,
}

impl From<&Recipe> for RecipeSummary {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id.clone(),
            name: recipe.name.clone(),
            cuisine: recipe.cuisine,
            difficulty: recipe.difficulty,
            prep_time: recipe.prep_time_min,
            cook_time: recipe.cook_time_min,
            total_time: recipe.total_time_min(),
            servings: recipe.servings,
            dietary_tags: recipe.dietary_tags.clone(),
        }
    }
}

/// A cooking technique
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Technique {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Ingredients and dishes the technique suits
    pub best_for: Vec<String>,
    #[serde(default)]
    pub tips: Vec<String>,
}

/// Reference data for a single pantry ingredient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct IngredientInfo {
    pub key: String,
    pub name: String,
    pub category: String,
    pub storage: String,
    pub substitutes: Vec<String>,
    pub nutrition_per_100g: MacroNutrients,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MacroNutrients {
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

/// Generic substitutions keyed by an ingredient keyword
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CommonSubstitute {
    pub ingredient: String,
    pub substitutes: Vec<String>,
}

/// Cooking times for one food, keyed by method then by detail label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CookingTime {
    pub food: String,
    pub methods: BTreeMap<String, BTreeMap<String, String>>,
}

/// Normalize a user-supplied key: trimmed, lower-case, spaces and hyphens as underscores
pub fn normalize_key(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}

/// Turn a snake_case value into a title, e.g. "gluten_free" -> "Gluten Free"
pub fn title_case(s: &str) -> String {
    s.split(|c: char| c == '_' || c == ' ')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn unknown_variant<'a>(field: &str, value: &str, allowed: impl Iterator<Item = &'a str>) -> Error {
    Error::validation(
        field,
        format!(
            "unknown value '{}', expected one of: {}",
            value,
            allowed.collect::<Vec<_>>().join(", ")
        ),
    )
}
