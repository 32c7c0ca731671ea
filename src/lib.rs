//! Cooking Assistant - recipe catalog, kitchen tools and a chat agent over REST and MCP

pub mod config;
pub mod error;
pub mod types;

pub mod store;
pub mod search;
pub mod convert;
pub mod kitchen;
pub mod tools;
pub mod agent;
pub mod mcp;
pub mod api;

pub use config::Config;
pub use error::{Error, Result};
pub use types::*;
