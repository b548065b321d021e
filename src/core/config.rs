use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::api::GenerationParameters;
use crate::core::constants::{
    DEFAULT_ENDPOINT_BASE, DEFAULT_MAX_NEW_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE,
};

/// Optional settings from the TOML config file. Every field has a default,
/// so a missing file behaves the same as an empty one.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    /// Full endpoint URL. When unset, derived from the model name.
    pub endpoint: Option<String>,
    pub model: Option<String>,
    /// Gate questions through the farming keyword filter before spending an
    /// inference call. On by default.
    pub topic_filter: Option<bool>,
    pub temperature: Option<f64>,
    pub max_new_tokens: Option<u32>,
}

impl Config {
    pub fn load() -> Result<Config, Box<dyn std::error::Error>> {
        let config_path = Self::get_config_path();
        Self::load_from_path(&config_path)
    }

    pub fn load_from_path(config_path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
        if config_path.exists() {
            let contents = fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    fn get_config_path() -> PathBuf {
        let proj_dirs = ProjectDirs::from("org", "kisan", "kisan")
            .expect("Failed to determine config directory");
        proj_dirs.config_dir().join("config.toml")
    }

    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    /// Endpoint for the given model, honoring an explicit `endpoint` override.
    pub fn endpoint_for(&self, model: &str) -> String {
        match &self.endpoint {
            Some(endpoint) => endpoint.clone(),
            None => format!("{DEFAULT_ENDPOINT_BASE}/{model}"),
        }
    }

    pub fn topic_filter(&self) -> bool {
        self.topic_filter.unwrap_or(true)
    }

    pub fn generation_parameters(&self) -> GenerationParameters {
        GenerationParameters {
            temperature: self.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            max_new_tokens: self.max_new_tokens.unwrap_or(DEFAULT_MAX_NEW_TOKENS),
            return_full_text: false,
        }
    }
}
