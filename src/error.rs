//! Error types for the cooking assistant

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Recipe not found: {0}")]
    RecipeNotFound(String),

    #[error("Technique not found: {0}")]
    TechniqueNotFound(String),

    #[error("No substitutes found for ingredient: {0}")]
    IngredientNotFound(String),

    #[error("No cooking times found for: {0}")]
    FoodNotFound(String),

    #[error("Unknown tool: {0}")]
    ToolNotFound(String),

    #[error("Invalid `{field}`: {message}")]
    Validation { field: String, message: String },

    #[error("Cannot convert from {from} to {to}")]
    UnsupportedConversion { from: String, to: String },

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// True for lookups of identifiers that do not exist
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::RecipeNotFound(_)
                | Error::TechniqueNotFound(_)
                | Error::IngredientNotFound(_)
                | Error::FoodNotFound(_)
                | Error::ToolNotFound(_)
        )
    }

    /// True for errors caused by the caller's input
    pub fn is_bad_input(&self) -> bool {
        matches!(
            self,
            Error::Validation { .. } | Error::UnsupportedConversion { .. }
        )
    }

    /// Name of the offending input field, when there is one
    pub fn field(&self) -> Option<&str> {
        match self {
            Error::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}
