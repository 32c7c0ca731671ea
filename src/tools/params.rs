//! Tool parameter types

use schemars::JsonSchema;
use serde::Deserialize;

use crate::error::Result;
use crate::search::RecipeFilter;
use crate::types::{Cuisine, DietaryTag, Difficulty};

#[derive(Debug, Default, Clone, Deserialize, JsonSchema)]
pub struct RecipeSearchParams {
    /// Search term for recipe name, description or ingredients
    pub query: Option<String>,
    /// Cuisine type (korean, italian, mexican, ...)
    pub cuisine: Option<String>,
    /// Difficulty level (easy, medium, hard)
    pub difficulty: Option<String>,
    /// Dietary requirements that must all hold (vegetarian, vegan, gluten_free, ...)
    pub dietary_tags: Option<Vec<String>>,
    /// Maximum total cooking time in minutes
    pub max_time_min: Option<u32>,
    /// Ingredient the recipe must use
    pub ingredient: Option<String>,
}

impl RecipeSearchParams {
    /// Parse enum-valued fields into a filter, naming the field on failure
    pub fn to_filter(&self) -> Result<RecipeFilter> {
        let dietary_tags = self
            .dietary_tags
            .iter()
            .flatten()
            .filter(|t| !t.trim().is_empty())
            .map(|t| t.parse::<DietaryTag>())
            .collect::<Result<Vec<_>>>()?;

        Ok(RecipeFilter {
            query: self.query.clone(),
            cuisine: non_blank(&self.cuisine).map(str::parse::<Cuisine>).transpose()?,
            difficulty: non_blank(&self.difficulty)
                .map(str::parse::<Difficulty>)
                .transpose()?,
            dietary_tags,
            max_time_min: self.max_time_min,
            ingredient: self.ingredient.clone(),
        })
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RecipeDetailParams {
    /// Recipe ID, or part of a recipe ID or name
    pub recipe_id: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct IngredientSubstituteParams {
    /// Ingredient to find substitutes for
    pub ingredient: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CookingTechniqueParams {
    /// Technique name (saute, braise, roast, stir-fry, poach)
    pub technique: String,
}

#[derive(Debug, Default, Clone, Deserialize, JsonSchema)]
pub struct MealPlanParams {
    /// Number of days to plan for (default: 7)
    pub days: Option<u32>,
    /// Dietary preferences; recipes with any of them are preferred
    pub preferences: Option<Vec<String>>,
    /// Prefer a different cuisine each day (default: true)
    pub cuisine_variety: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UnitConversionParams {
    /// Amount to convert
    pub amount: f64,
    /// Unit to convert from (cup, tbsp, ml, g, oz, celsius, ...)
    pub from_unit: String,
    /// Unit to convert to
    pub to_unit: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct NutritionCalculatorParams {
    /// Recipe ID
    pub recipe_id: String,
    /// Number of servings (default: 1)
    pub servings: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TimerCalculatorParams {
    /// Food item (chicken breast, steak, eggs, pasta, rice, vegetables, fish)
    pub food_item: String,
    /// Cooking method (bake, boil, grill, pan fry, ...)
    pub cooking_method: String,
    /// Weight or size description
    pub weight_or_size: Option<String>,
}
