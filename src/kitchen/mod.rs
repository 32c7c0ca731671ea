//! Kitchen helpers built on the recipe catalog

mod meal_plan;
mod nutrition;
mod substitutes;
mod timing;

pub use meal_plan::{plan_meals, MealPlan, MealPlanDay, PlannedRecipe};
pub use nutrition::{scale_nutrition, NutritionReport, ScaledNutrition};
pub use substitutes::{find_substitutes, SubstituteSource, Substitutes};
pub use timing::{lookup_cooking_time, CookingTimeAnswer};
