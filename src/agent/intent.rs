//! Keyword intent classification for chat messages

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// What a chat message is asking for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Find or show recipes
    Recipe,
    /// Replace an ingredient
    Substitution,
    /// Explain a cooking technique
    Technique,
    /// Convert a measurement
    Conversion,
    /// Plan several days of meals
    MealPlan,
    /// Calories and macros
    Nutrition,
    /// Cooking times and temperatures
    Timing,
    /// Recipes for a diet
    Dietary,
    /// Anything else
    General,
}

/// Rules in priority order; the first rule with a keyword in the message wins
const RULES: &[(Intent, &[&str])] = &[
    (Intent::Recipe, &["recipe", "cook", "make", "prepare", "dish"]),
    (
        Intent::Substitution,
        &["substitute", "replace", "instead of", "alternative"],
    ),
    (
        Intent::Technique,
        &["how to", "technique", "method", "sauté", "saute", "braise", "roast", "grill"],
    ),
    (
        Intent::Conversion,
        &["convert", "cups to", "grams to", "tablespoon", "teaspoon", "ml", "ounce"],
    ),
    (
        Intent::MealPlan,
        &["meal plan", "weekly", "plan meals", "what to cook"],
    ),
    (
        Intent::Nutrition,
        &["calories", "nutrition", "protein", "carbs", "healthy"],
    ),
    (
        Intent::Timing,
        &["how long", "time", "minutes", "temperature", "done"],
    ),
    (
        Intent::Dietary,
        &["vegetarian", "vegan", "gluten", "dairy", "keto", "low carb"],
    ),
];

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Recipe => "recipe",
            Intent::Substitution => "substitution",
            Intent::Technique => "technique",
            Intent::Conversion => "conversion",
            Intent::MealPlan => "meal_plan",
            Intent::Nutrition => "nutrition",
            Intent::Timing => "timing",
            Intent::Dietary => "dietary",
            Intent::General => "general",
        }
    }

    /// Classify a message by substring keyword match
    pub fn classify(message: &str) -> Self {
        let lower = message.to_lowercase();
        RULES
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
            .map(|(intent, _)| *intent)
            .unwrap_or(Intent::General)
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
