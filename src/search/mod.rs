//! Recipe filtering

mod filter;

pub use filter::RecipeFilter;
