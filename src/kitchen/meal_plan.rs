//! Multi-day meal planning

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use utoipa::ToSchema;

use crate::error::{Error, Result};
use crate::store::RecipeStore;
use crate::types::{Cuisine, DietaryTag, Difficulty, Recipe};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PlannedRecipe {
    pub id: String,
    pub name: String,
    pub cuisine: Cuisine,
    pub total_time: u32,
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MealPlanDay {
    pub day: u32,
    pub recipe: PlannedRecipe,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MealPlan {
    pub meal_plan: Vec<MealPlanDay>,
    pub total_days: usize,
}

/// Plan one recipe per day.
///
/// Candidates are the recipes carrying any of `preferences`, or every recipe
/// when none do. With `cuisine_variety` each day prefers a cuisine not used
/// yet; once every cuisine is used the rotation starts over.
pub fn plan_meals(
    store: &RecipeStore,
    days: u32,
    max_days: u32,
    preferences: &[DietaryTag],
    cuisine_variety: bool,
) -> Result<MealPlan> {
    if days == 0 {
        return Err(Error::validation("days", "must be at least 1"));
    }

    let all: Vec<&Recipe> = store.recipes().iter().collect();
    let mut candidates = all.clone();
    if !preferences.is_empty() {
        let preferred: Vec<&Recipe> = all
            .iter()
            .copied()
            .filter(|r| preferences.iter().any(|p| r.has_tag(*p)))
            .collect();
        if !preferred.is_empty() {
            candidates = preferred;
        }
    }

    let mut cuisines_used: HashSet<Cuisine> = HashSet::new();
    let mut plan = Vec::new();

    for day in 1..=days.min(max_days) {
        let mut available = candidates.clone();

        if cuisine_variety && cuisines_used.len() < candidates.len() {
            available = candidates
                .iter()
                .copied()
                .filter(|r| !cuisines_used.contains(&r.cuisine))
                .collect();
            if available.is_empty() {
                available = candidates.clone();
                cuisines_used.clear();
            }
        }

        if available.is_empty() {
            break;
        }

        let recipe = available[day as usize % available.len()];
        cuisines_used.insert(recipe.cuisine);

        plan.push(MealPlanDay {
            day,
            recipe: PlannedRecipe {
                id: recipe.id.clone(),
                name: recipe.name.clone(),
                cuisine: recipe.cuisine,
                total_time: recipe.total_time_min(),
                difficulty: recipe.difficulty,
            },
        });
    }

    tracing::debug!(days = plan.len(), "Meal plan generated");

    Ok(MealPlan {
        total_days: plan.len(),
        meal_plan: plan,
    })
}
