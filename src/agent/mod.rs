//! Chat agent: keyword intent classification plus Markdown responders
//!
//! Each message is answered on its own. Responders go through the same
//! [`CookingTools`] used by the HTTP and MCP surfaces.

mod format;
mod intent;

pub use intent::Intent;

use std::sync::Arc;

use crate::config::Config;
use crate::search::RecipeFilter;
use crate::tools::{
    CookingTechniqueParams, CookingTools, IngredientSubstituteParams, MealPlanParams,
    NutritionCalculatorParams, RecipeDetailParams, TimerCalculatorParams, UnitConversionParams,
};
use crate::types::{title_case, Cuisine, DietaryTag, Difficulty, Recipe};

/// Ingredients the recipe responder recognizes in free text
const COMMON_INGREDIENTS: &[&str] = &[
    "chicken",
    "beef",
    "pork",
    "tofu",
    "rice",
    "pasta",
    "noodle",
    "vegetable",
    "egg",
];

/// Dietary keywords in free text and the tag each one selects
const DIETARY_KEYWORDS: &[(&str, DietaryTag)] = &[
    ("vegetarian", DietaryTag::Vegetarian),
    ("vegan", DietaryTag::Vegan),
    ("gluten", DietaryTag::GlutenFree),
    ("dairy", DietaryTag::DairyFree),
    ("keto", DietaryTag::Keto),
    ("low carb", DietaryTag::LowCarb),
];

/// Reference conversions shown when a message has no parsable conversion
const REFERENCE_CONVERSIONS: &[(&str, &[(f64, &str, &str)])] = &[
    (
        "Volume",
        &[
            (1.0, "cup", "ml"),
            (1.0, "cup", "tbsp"),
            (1.0, "tbsp", "ml"),
            (1.0, "tbsp", "tsp"),
            (1.0, "tsp", "ml"),
            (1.0, "fl_oz", "ml"),
        ],
    ),
    (
        "Weight",
        &[(1.0, "oz", "g"), (1.0, "lb", "g"), (1.0, "kg", "lb")],
    ),
    (
        "Temperature",
        &[
            (325.0, "fahrenheit", "celsius"),
            (350.0, "fahrenheit", "celsius"),
            (375.0, "fahrenheit", "celsius"),
            (400.0, "fahrenheit", "celsius"),
            (425.0, "fahrenheit", "celsius"),
        ],
    ),
];

pub struct CookingAgent {
    tools: Arc<CookingTools>,
    list_limit: usize,
}

impl CookingAgent {
    pub fn new(tools: Arc<CookingTools>, config: &Config) -> Self {
        Self {
            tools,
            list_limit: config.chat.list_limit,
        }
    }

    /// Answer a message with Markdown
    pub fn chat(&self, message: &str) -> String {
        let intent = Intent::classify(message);
        tracing::debug!(%intent, "Classified chat message");

        let lower = message.to_lowercase();
        match intent {
            Intent::Recipe => self.recipe_reply(&lower),
            Intent::Substitution => self.substitution_reply(&lower),
            Intent::Technique => self.technique_reply(&lower),
            Intent::Conversion => self.conversion_reply(&lower),
            Intent::MealPlan => self.meal_plan_reply(&lower),
            Intent::Nutrition => self.nutrition_reply(&lower),
            Intent::Timing => self.timing_reply(&lower),
            Intent::Dietary => self.dietary_reply(&lower),
            Intent::General => general_reply(),
        }
    }

    fn recipe_reply(&self, lower: &str) -> String {
        let store = self.tools.store();

        if let Some(id) = mentioned_recipe(store.recipes(), lower).map(|r| r.id.clone()) {
            if let Ok(recipe) = self.tools.recipe_detail(RecipeDetailParams { recipe_id: id }) {
                return format::recipe(&recipe);
            }
        }

        if let Some(cuisine) = Cuisine::ALL.iter().find(|c| lower.contains(c.as_str())) {
            let recipes = store.search(&RecipeFilter::new().cuisine(*cuisine));
            let title = format!("{} Recipes", title_case(cuisine.as_str()));
            return format::recipe_list(&recipes, &title, self.list_limit);
        }

        for ingredient in COMMON_INGREDIENTS {
            if lower.contains(ingredient) {
                let recipes = store.recipes_with_ingredient(ingredient);
                if !recipes.is_empty() {
                    let title = format!("Recipes with {}", title_case(ingredient));
                    return format::recipe_list(&recipes, &title, self.list_limit);
                }
            }
        }

        if ["easy", "simple", "quick"].iter().any(|w| lower.contains(w)) {
            let recipes = store.search(&RecipeFilter::new().difficulty(Difficulty::Easy));
            return format::recipe_list(&recipes, "Easy Recipes", self.list_limit);
        }

        let all: Vec<&Recipe> = store.recipes().iter().collect();
        format::recipe_list(&all, "Available Recipes", self.list_limit)
    }

    fn substitution_reply(&self, lower: &str) -> String {
        let mut out = String::from("# Ingredient Substitutions\n\n");
        let common = self.tools.store().common_substitutes();

        let mut found = false;
        for entry in common.iter().filter(|c| lower.contains(&c.ingredient)) {
            let params = IngredientSubstituteParams {
                ingredient: entry.ingredient.clone(),
            };
            if let Ok(subs) = self.tools.ingredient_substitute(params) {
                out.push_str(&format::substitutes(&subs));
                found = true;
            }
        }

        if !found {
            out.push_str("Here are some common ingredient substitutions:\n\n");
            for entry in common.iter().take(5) {
                let first_two: Vec<&str> = entry.substitutes.iter().take(2).map(String::as_str).collect();
                out.push_str(&format!(
                    "**{}:** {}\n",
                    title_case(&entry.ingredient),
                    first_two.join(", ")
                ));
            }
            out.push_str("\n*Ask about a specific ingredient for more options!*");
        }

        out
    }

    fn technique_reply(&self, lower: &str) -> String {
        let store = self.tools.store();

        let mentioned = store.techniques().iter().find(|t| {
            lower.contains(&t.id)
                || lower.contains(&t.id.replace('_', " "))
                || lower.contains(&t.name.to_lowercase())
        });

        if let Some(t) = mentioned {
            let params = CookingTechniqueParams {
                technique: t.id.clone(),
            };
            if let Ok(technique) = self.tools.cooking_technique(params) {
                return format::technique(&technique);
            }
        }

        format::technique_list(store.techniques())
    }

    fn conversion_reply(&self, lower: &str) -> String {
        if let Some(params) = parse_conversion(lower) {
            match self.tools.unit_conversion(params) {
                Ok(c) => return format!("# Conversion\n\n{}", format::conversion(&c)),
                Err(e) => tracing::warn!(error = %e, "Chat conversion rejected"),
            }
        }

        let mut out = String::from("# Cooking Measurement Conversions\n\n");
        for (section, rows) in REFERENCE_CONVERSIONS {
            out.push_str(&format!("## {}\n| Measurement | Equivalent |\n|---|---|\n", section));
            for (amount, from, to) in rows.iter() {
                let params = UnitConversionParams {
                    amount: *amount,
                    from_unit: from.to_string(),
                    to_unit: to.to_string(),
                };
                if let Ok(c) = self.tools.unit_conversion(params) {
                    out.push_str(&format!(
                        "| {} {} | {} {} |\n",
                        c.original.amount, c.original.unit, c.converted.amount, c.converted.unit
                    ));
                }
            }
            out.push('\n');
        }
        out.push_str("*Need a specific conversion? Try \"convert 2 cups to ml\"*");
        out
    }

    fn meal_plan_reply(&self, lower: &str) -> String {
        let preferences: Vec<String> = DIETARY_KEYWORDS
            .iter()
            .filter(|(keyword, _)| lower.contains(keyword))
            .map(|(_, tag)| tag.as_str().to_string())
            .collect();

        let params = MealPlanParams {
            days: parse_days(lower),
            preferences: (!preferences.is_empty()).then_some(preferences),
            cuisine_variety: None,
        };

        match self.tools.meal_plan(params) {
            Ok(plan) => format::meal_plan(&plan),
            Err(e) => format!("# Meal Plan\n\n{}", e),
        }
    }

    fn nutrition_reply(&self, lower: &str) -> String {
        let store = self.tools.store();

        if let Some(recipe) = mentioned_recipe(store.recipes(), lower) {
            let params = NutritionCalculatorParams {
                recipe_id: recipe.id.clone(),
                servings: None,
            };
            if let Ok(report) = self.tools.nutrition_calculator(params) {
                return format::nutrition(&report);
            }
        }

        format::nutrition_overview(store.recipes())
    }

    fn timing_reply(&self, lower: &str) -> String {
        let store = self.tools.store();

        for entry in store.cooking_times() {
            if !mentions_food(lower, &entry.food) {
                continue;
            }
            if let Some(method) = entry.methods.keys().find(|m| mentions_method(lower, m)) {
                let params = TimerCalculatorParams {
                    food_item: entry.food.replace('_', " "),
                    cooking_method: method.clone(),
                    weight_or_size: None,
                };
                if let Ok(answer) = self.tools.timer_calculator(params) {
                    return format::cooking_time(&answer);
                }
            }
        }

        format::timing_guide(store.cooking_times())
    }

    fn dietary_reply(&self, lower: &str) -> String {
        if let Some((_, tag)) = DIETARY_KEYWORDS.iter().find(|(k, _)| lower.contains(k)) {
            let recipes = self
                .tools
                .store()
                .search(&RecipeFilter::new().dietary_tag(*tag));
            let title = format!("{} Recipes", title_case(tag.as_str()));
            return format::recipe_list(&recipes, &title, self.list_limit);
        }

        let mut out = String::from("# Dietary Options\n\nI can find recipes for these dietary needs:\n\n");
        for tag in DietaryTag::ALL {
            out.push_str(&format!("- **{}**\n", title_case(tag.as_str())));
        }
        out.push_str("\n*Just tell me your dietary needs!*");
        out
    }
}

/// First recipe whose spaced ID or name appears in the message
fn mentioned_recipe<'a>(recipes: &'a [Recipe], lower: &str) -> Option<&'a Recipe> {
    recipes
        .iter()
        .find(|r| lower.contains(&r.id.replace('_', " ")) || lower.contains(&r.name.to_lowercase()))
}

/// "chicken_breast" is mentioned by "chicken breast" or "chicken"; "eggs" by "egg"
fn mentions_food(lower: &str, food: &str) -> bool {
    let spaced = food.replace('_', " ");
    let first = spaced.split(' ').next().unwrap_or(&spaced);
    lower.contains(&spaced) || lower.contains(first) || lower.contains(spaced.trim_end_matches('s'))
}

/// "bake" is mentioned by "bake", "baked" or "baking"; "pan_fry" by "pan fry"
fn mentions_method(lower: &str, method: &str) -> bool {
    let spaced = method.replace('_', " ");
    lower.contains(spaced.trim_end_matches('e'))
}

/// Parse "<amount> <unit> to|in|into <unit>" out of free text
fn parse_conversion(lower: &str) -> Option<UnitConversionParams> {
    let tokens: Vec<&str> = lower
        .split_whitespace()
        .map(|t| t.trim_matches(|c: char| matches!(c, '?' | '!' | ',' | '.' | '"' | '\'')))
        .filter(|t| !t.is_empty())
        .collect();

    tokens.windows(4).find_map(|w| {
        let amount = parse_amount(w[0])?;
        if !matches!(w[2], "to" | "in" | "into") {
            return None;
        }
        Some(UnitConversionParams {
            amount,
            from_unit: w[1].to_string(),
            to_unit: w[3].to_string(),
        })
    })
}

/// "2", "1.5" or "1/2"
fn parse_amount(token: &str) -> Option<f64> {
    if let Some((num, den)) = token.split_once('/') {
        let num: f64 = num.parse().ok()?;
        let den: f64 = den.parse().ok()?;
        return (den != 0.0).then(|| num / den);
    }
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// "5 days" or "5-day"
fn parse_days(lower: &str) -> Option<u32> {
    let tokens: Vec<&str> = lower
        .split(|c: char| c.is_whitespace() || c == '-')
        .filter(|t| !t.is_empty())
        .collect();

    tokens
        .windows(2)
        .find(|w| w[1].starts_with("day"))
        .and_then(|w| w[0].parse::<u32>().ok())
        .filter(|days| *days > 0)
}

fn general_reply() -> String {
    let mut out = String::from("# Cooking Assistant\n\n");
    out.push_str("Hello! I'm your cooking companion. I can help you with:\n\n");
    out.push_str("**Recipes**\n- Search recipes by cuisine, ingredient, or dietary needs\n- Get step-by-step cooking instructions\n\n");
    out.push_str("**Substitutions**\n- Find alternatives for ingredients you don't have\n\n");
    out.push_str("**Conversions**\n- Convert between cups, grams, tablespoons, etc.\n\n");
    out.push_str("**Timing**\n- Get cooking times for meats, eggs, and more\n\n");
    out.push_str("**Nutrition**\n- Check calories and macros for recipes\n\n");
    out.push_str("**Meal Planning**\n- Create weekly meal plans\n\n");
    out.push_str("---\n**Try asking:**\n");
    out.push_str("- *\"Show me Italian recipes\"*\n");
    out.push_str("- *\"How do I make kimchi fried rice?\"*\n");
    out.push_str("- *\"What can I substitute for eggs?\"*\n");
    out.push_str("- *\"How long should I bake chicken?\"*\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_conversion() {
        let p = parse_conversion("can you convert 2 cups to ml?").unwrap();
        assert_eq!(p.amount, 2.0);
        assert_eq!(p.from_unit, "cups");
        assert_eq!(p.to_unit, "ml");

        let p = parse_conversion("1/2 cup in tbsp").unwrap();
        assert_eq!(p.amount, 0.5);

        assert!(parse_conversion("convert cups to ml").is_none());
    }

    #[test]
    fn test_parse_days() {
        assert_eq!(parse_days("plan meals for 3 days"), Some(3));
        assert_eq!(parse_days("a 5-day meal plan"), Some(5));
        assert_eq!(parse_days("weekly meal plan"), None);
        assert_eq!(parse_days("0 days"), None);
    }

    #[test]
    fn test_mentions_food_and_method() {
        assert!(mentions_food("how long to bake chicken", "chicken_breast"));
        assert!(mentions_food("boiled egg", "eggs"));
        assert!(!mentions_food("boiled egg", "pasta"));
        assert!(mentions_method("baking chicken", "bake"));
        assert!(mentions_method("pan fry it", "pan_fry"));
        assert!(!mentions_method("grill it", "bake"));
    }
}
