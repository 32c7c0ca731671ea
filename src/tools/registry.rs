//! Tool dispatch

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use utoipa::ToSchema;

use super::params::{
    CookingTechniqueParams, IngredientSubstituteParams, MealPlanParams, NutritionCalculatorParams,
    RecipeDetailParams, RecipeSearchParams, TimerCalculatorParams, UnitConversionParams,
};
use super::schema::parse_input;
use crate::config::Config;
use crate::convert::{self, Conversion};
use crate::error::{Error, Result};
use crate::kitchen::{self, CookingTimeAnswer, MealPlan, NutritionReport, Substitutes};
use crate::store::RecipeStore;
use crate::types::{DietaryTag, Recipe, RecipeSummary, Technique};

/// Name, description and input schema of a callable tool
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecipeSearchOutput {
    /// Total number of matching recipes
    pub found: usize,
    /// The first matches, capped by the configured maximum
    pub recipes: Vec<RecipeSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// The cooking tools, bound to a read-only catalog
#[derive(Debug, Clone)]
pub struct CookingTools {
    store: Arc<RecipeStore>,
    max_results: usize,
    default_plan_days: u32,
    max_plan_days: u32,
}

impl CookingTools {
    pub fn new(store: Arc<RecipeStore>, config: &Config) -> Self {
        Self {
            store,
            max_results: config.search.max_results,
            default_plan_days: config.meal_plan.default_days,
            max_plan_days: config.meal_plan.max_days,
        }
    }

    pub fn store(&self) -> &RecipeStore {
        &self.store
    }

    pub fn store_handle(&self) -> Arc<RecipeStore> {
        self.store.clone()
    }

    /// Every tool with its input schema
    pub fn specs() -> Vec<ToolSpec> {
        vec![
            spec::<RecipeSearchParams>(
                "recipe_search",
                "Search for recipes by name, cuisine, difficulty, dietary requirements, ingredient or cooking time",
            ),
            spec::<RecipeDetailParams>(
                "recipe_detail",
                "Get the full recipe with ingredients and step-by-step instructions",
            ),
            spec::<IngredientSubstituteParams>(
                "ingredient_substitute",
                "Find substitutes for a specific ingredient",
            ),
            spec::<CookingTechniqueParams>(
                "cooking_technique",
                "Get information about cooking techniques like saute, braise, roast, etc.",
            ),
            spec::<MealPlanParams>(
                "meal_plan",
                "Generate a meal plan for multiple days with recipe suggestions",
            ),
            spec::<UnitConversionParams>(
                "unit_conversion",
                "Convert between cooking measurements (cups, tbsp, ml, g, oz, celsius, fahrenheit)",
            ),
            spec::<NutritionCalculatorParams>(
                "nutrition_calculator",
                "Calculate nutritional information for a recipe",
            ),
            spec::<TimerCalculatorParams>(
                "timer_calculator",
                "Get recommended cooking times for different foods and methods",
            ),
        ]
    }

    /// Validate `input` against the named tool's schema and run it
    pub fn invoke(&self, name: &str, input: Value) -> Result<Value> {
        tracing::debug!(tool = name, "Invoking tool");

        let output = match name {
            "recipe_search" => to_json(self.recipe_search(parse_input(input)?)?)?,
            "recipe_detail" => to_json(self.recipe_detail(parse_input(input)?)?)?,
            "ingredient_substitute" => to_json(self.ingredient_substitute(parse_input(input)?)?)?,
            "cooking_technique" => to_json(self.cooking_technique(parse_input(input)?)?)?,
            "meal_plan" => to_json(self.meal_plan(parse_input(input)?)?)?,
            "unit_conversion" => to_json(self.unit_conversion(parse_input(input)?)?)?,
            "nutrition_calculator" => to_json(self.nutrition_calculator(parse_input(input)?)?)?,
            "timer_calculator" => to_json(self.timer_calculator(parse_input(input)?)?)?,
            _ => return Err(Error::ToolNotFound(name.to_string())),
        };

        Ok(output)
    }

    pub fn recipe_search(&self, params: RecipeSearchParams) -> Result<RecipeSearchOutput> {
        let filter = params.to_filter()?;
        let results = self.store.search(&filter);

        let message = results
            .is_empty()
            .then(|| "No recipes found matching your criteria. Try removing some filters.".to_string());

        Ok(RecipeSearchOutput {
            found: results.len(),
            recipes: results
                .into_iter()
                .take(self.max_results)
                .map(RecipeSummary::from)
                .collect(),
            message,
        })
    }

    pub fn recipe_detail(&self, params: RecipeDetailParams) -> Result<Recipe> {
        self.store
            .find(&params.recipe_id)
            .cloned()
            .ok_or(Error::RecipeNotFound(params.recipe_id))
    }

    pub fn ingredient_substitute(&self, params: IngredientSubstituteParams) -> Result<Substitutes> {
        kitchen::find_substitutes(&self.store, &params.ingredient)
    }

    pub fn cooking_technique(&self, params: CookingTechniqueParams) -> Result<Technique> {
        self.store
            .technique(&params.technique)
            .cloned()
            .ok_or(Error::TechniqueNotFound(params.technique))
    }

    pub fn meal_plan(&self, params: MealPlanParams) -> Result<MealPlan> {
        let preferences = params
            .preferences
            .iter()
            .flatten()
            .map(|p| p.parse::<DietaryTag>().map_err(|e| rename_field(e, "preferences")))
            .collect::<Result<Vec<_>>>()?;

        kitchen::plan_meals(
            &self.store,
            params.days.unwrap_or(self.default_plan_days),
            self.max_plan_days,
            &preferences,
            params.cuisine_variety.unwrap_or(true),
        )
    }

    pub fn unit_conversion(&self, params: UnitConversionParams) -> Result<Conversion> {
        convert::convert(params.amount, &params.from_unit, &params.to_unit)
    }

    pub fn nutrition_calculator(&self, params: NutritionCalculatorParams) -> Result<NutritionReport> {
        kitchen::scale_nutrition(&self.store, &params.recipe_id, params.servings.unwrap_or(1))
    }

    pub fn timer_calculator(&self, params: TimerCalculatorParams) -> Result<CookingTimeAnswer> {
        kitchen::lookup_cooking_time(&self.store, &params.food_item, &params.cooking_method)
    }
}

fn spec<T: JsonSchema>(name: &'static str, description: &'static str) -> ToolSpec {
    let input_schema = serde_json::to_value(schemars::schema_for!(T)).unwrap_or(Value::Null);
    ToolSpec {
        name: name.to_string(),
        description: description.to_string(),
        input_schema,
    }
}

fn to_json<T: Serialize>(value: T) -> Result<Value> {
    Ok(serde_json::to_value(value)?)
}

fn rename_field(err: Error, field: &str) -> Error {
    match err {
        Error::Validation { message, .. } => Error::validation(field, message),
        other => other,
    }
}
