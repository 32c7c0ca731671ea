//! Read-only recipe catalog storage

mod catalog;

pub use catalog::{Catalog, RecipeStore};
