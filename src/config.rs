//! Configuration for the cooking assistant

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server port
    #[serde(default = "default_http_port")]
    pub http_port: u16,

    /// MCP server port (for HTTP transport)
    #[serde(default = "default_mcp_port")]
    pub mcp_port: u16,

    /// JSON catalog to load instead of the built-in one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,

    /// Search settings
    #[serde(default)]
    pub search: SearchConfig,

    /// Meal planning settings
    #[serde(default)]
    pub meal_plan: MealPlanConfig,

    /// Chat agent settings
    #[serde(default)]
    pub chat: ChatConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Maximum number of recipes a search tool call lists
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealPlanConfig {
    /// Days planned when the caller does not say
    #[serde(default = "default_plan_days")]
    pub default_days: u32,

    /// Upper bound on planned days
    #[serde(default = "default_max_plan_days")]
    pub max_days: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Maximum recipes shown in a chat list
    #[serde(default = "default_list_limit")]
    pub list_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_port: default_http_port(),
            mcp_port: default_mcp_port(),
            catalog_path: None,
            search: SearchConfig::default(),
            meal_plan: MealPlanConfig::default(),
            chat: ChatConfig::default(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
        }
    }
}

impl Default for MealPlanConfig {
    fn default() -> Self {
        Self {
            default_days: default_plan_days(),
            max_days: default_max_plan_days(),
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            list_limit: default_list_limit(),
        }
    }
}

impl Config {
    /// Load config from the default location or fall back to defaults
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from a specific file; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to a file, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Get the default config path
    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::Config("Could not find home directory".into()))?;
        Ok(home.join(".cooking-assistant").join("config.toml"))
    }

    fn validate(&self) -> Result<()> {
        if self.meal_plan.max_days == 0 {
            return Err(Error::Config("meal_plan.max_days must be at least 1".into()));
        }
        if self.meal_plan.default_days == 0 {
            return Err(Error::Config("meal_plan.default_days must be at least 1".into()));
        }
        if self.search.max_results == 0 {
            return Err(Error::Config("search.max_results must be at least 1".into()));
        }
        if self.chat.list_limit == 0 {
            return Err(Error::Config("chat.list_limit must be at least 1".into()));
        }
        Ok(())
    }
}

// Default value functions

fn default_http_port() -> u16 {
    5000
}

fn default_mcp_port() -> u16 {
    5001
}

fn default_max_results() -> usize {
    10
}

fn default_plan_days() -> u32 {
    7
}

fn default_max_plan_days() -> u32 {
    7
}

fn default_list_limit() -> usize {
    10
}
