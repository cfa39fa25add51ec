//! Layered configuration for the roost console using figment.
//!
//! Sources, highest priority first:
//! 1. Environment variables (`ROOST_*`, `__` separates nested sections —
//!    `ROOST_STORE__PATH` maps to `store.path`)
//! 2. Project-local `.roost/config.toml`
//! 3. User-global `~/.config/roost/config.toml`
//! 4. Built-in defaults

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment extraction or merge error.
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),
}

/// Store file settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Path of the JSON store file.
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

fn default_store_path() -> PathBuf {
    PathBuf::from("file.json")
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

/// Interactive session settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReplConfig {
    /// Prompt printed before each command line.
    #[serde(default = "default_prompt")]
    pub prompt: String,
}

fn default_prompt() -> String {
    String::from("(roost) ")
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RoostConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub repl: ReplConfig,
}

impl RoostConfig {
    /// Load configuration from all sources (TOML files + environment).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when extraction fails (e.g. a malformed config
    /// file or an env value of the wrong shape).
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Calls dotenvy before building the figment; the typical entry point
    /// for the binary.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can layer additional providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".roost/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("ROOST_").split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("roost").join("config.toml"))
    }
}
