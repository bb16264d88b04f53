//! ArLens config — translation endpoint, ассеты, язык, log level
//!
//! Источники (по приоритету): env overrides > JSON файл > defaults.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::logger::LogLevel;
use crate::renderable::AssetManifest;

pub const ENV_TRANSLATE_API_KEY: &str = "ARLENS_TRANSLATE_API_KEY";
pub const ENV_ASSET_ROOT: &str = "ARLENS_ASSET_ROOT";

pub const DEFAULT_TRANSLATE_ENDPOINT: &str = "https://translation.googleapis.com/language/translate/v2";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("asset manifest lists {models} content models but the menu has {items} items")]
    ContentMismatch { models: usize, items: usize },
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArLensConfig {
    pub translate_endpoint: String,
    /// Без ключа translation round-trip не стартует (warning в лог)
    pub translate_api_key: Option<String>,
    pub asset_root: PathBuf,
    pub assets: AssetManifest,
    pub default_language: String,
    pub log_level: LogLevel,
}

impl Default for ArLensConfig {
    fn default() -> Self {
        Self {
            translate_endpoint: DEFAULT_TRANSLATE_ENDPOINT.to_string(),
            translate_api_key: None,
            asset_root: PathBuf::from("assets"),
            assets: AssetManifest::default(),
            default_language: crate::content::DEFAULT_LANGUAGE.to_string(),
            log_level: LogLevel::Info,
        }
    }
}

impl ArLensConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Env overrides (API key не должен жить в config файле)
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Overrides из произвольного источника (env, тесты)
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(key) = lookup(ENV_TRANSLATE_API_KEY).filter(|key| !key.is_empty()) {
            self.translate_api_key = Some(key);
        }
        if let Some(root) = lookup(ENV_ASSET_ROOT).filter(|root| !root.is_empty()) {
            self.asset_root = PathBuf::from(root);
        }
        self
    }

    /// Каждой кнопке нужна своя модель блюда
    pub fn validate(&self, item_count: usize) -> Result<(), ConfigError> {
        let models = self.assets.content_models.len();
        if models != item_count {
            return Err(ConfigError::ContentMismatch {
                models,
                items: item_count,
            });
        }
        Ok(())
    }
}
