//! Cooking time lookup

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

use crate::error::{Error, Result};
use crate::store::RecipeStore;
use crate::types::normalize_key;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum CookingTimeAnswer {
    /// Food and method both known
    Timing {
        food: String,
        method: String,
        cooking_info: BTreeMap<String, String>,
    },
    /// Food known, method not listed for it
    Methods {
        food: String,
        available_methods: Vec<String>,
        tip: String,
    },
}

/// Timing for a food cooked a given way.
///
/// The food matches when its table key contains the normalized input or the
/// other way around ("chicken breast" and "chicken" both hit
/// `chicken_breast`); the first table entry wins.
pub fn lookup_cooking_time(
    store: &RecipeStore,
    food_item: &str,
    cooking_method: &str,
) -> Result<CookingTimeAnswer> {
    let food_key = normalize_key(food_item);
    if food_key.is_empty() {
        return Err(Error::validation("food_item", "must not be empty"));
    }
    let method_key = normalize_key(cooking_method);

    let entry = store
        .cooking_times()
        .iter()
        .find(|t| t.food.contains(&food_key) || food_key.contains(&t.food))
        .ok_or_else(|| Error::FoodNotFound(food_item.to_string()))?;

    match entry.methods.get(&method_key) {
        Some(info) => Ok(CookingTimeAnswer::Timing {
            food: food_item.to_string(),
            method: cooking_method.to_string(),
            cooking_info: info.clone(),
        }),
        None => Ok(CookingTimeAnswer::Methods {
            food: food_item.to_string(),
            available_methods: entry.methods.keys().cloned().collect(),
            tip: format!("Try one of these methods for {}", food_item),
        }),
    }
}
