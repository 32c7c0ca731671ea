//! Nutrition scaling

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{Error, Result};
use crate::store::RecipeStore;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ScaledNutrition {
    pub calories: u32,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub fiber_g: f64,
    pub sodium_mg: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NutritionReport {
    pub recipe_id: String,
    pub recipe: String,
    pub servings_calculated: u32,
    /// Absent when the recipe carries no nutrition data
    pub nutrition: Option<ScaledNutrition>,
    pub note: String,
}

/// Nutrition of `servings` portions of a recipe
pub fn scale_nutrition(store: &RecipeStore, recipe_id: &str, servings: u32) -> Result<NutritionReport> {
    if servings == 0 {
        return Err(Error::validation("servings", "must be at least 1"));
    }

    let recipe = store
        .get(recipe_id)
        .ok_or_else(|| Error::RecipeNotFound(recipe_id.to_string()))?;

    let nutrition = recipe
        .nutrition
        .as_ref()
        .map(|n| -> Result<ScaledNutrition> {
            let factor = servings as f64;
            Ok(ScaledNutrition {
                calories: scale_count(n.calories, servings)?,
                protein_g: round1(n.protein_g * factor),
                carbs_g: round1(n.carbs_g * factor),
                fat_g: round1(n.fat_g * factor),
                fiber_g: round1(n.fiber_g * factor),
                sodium_mg: scale_count(n.sodium_mg, servings)?,
            })
        })
        .transpose()?;

    let note = if nutrition.is_some() {
        "Based on 2000 calorie diet".to_string()
    } else {
        "Nutrition information not available for this recipe".to_string()
    };

    Ok(NutritionReport {
        recipe_id: recipe.id.clone(),
        recipe: recipe.name.clone(),
        servings_calculated: servings,
        nutrition,
        note,
    })
}

fn scale_count(per_serving: u32, servings: u32) -> Result<u32> {
    per_serving
        .checked_mul(servings)
        .ok_or_else(|| Error::validation("servings", "too large"))
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
