//! Schema-validated tool adapter shared by the chat agent, the REST API and MCP

mod params;
mod registry;
mod schema;

pub use params::{
    CookingTechniqueParams, IngredientSubstituteParams, MealPlanParams, NutritionCalculatorParams,
    RecipeDetailParams, RecipeSearchParams, TimerCalculatorParams, UnitConversionParams,
};
pub use registry::{CookingTools, RecipeSearchOutput, ToolSpec};
pub use schema::{parse_input, validate_input};
