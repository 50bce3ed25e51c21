//! Runtime configuration, read from the environment.

use crate::api::{SpoonacularConfig, YoutubeConfig};
use crate::favorites::FileStorage;
use crate::search::QuotaPolicy;
use camino::Utf8PathBuf;
use std::env;
use thiserror::Error;

pub const SPOONACULAR_API_KEY: &str = "SPOONACULAR_API_KEY";
pub const YOUTUBE_API_KEY: &str = "YOUTUBE_API_KEY";
pub const SPOONACULAR_BASE_URL: &str = "SPOONACULAR_BASE_URL";
pub const YOUTUBE_BASE_URL: &str = "YOUTUBE_BASE_URL";
pub const DATA_DIR: &str = "CHEFBOT_DATA_DIR";
pub const QUOTA_FALLBACK: &str = "CHEFBOT_QUOTA_FALLBACK";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing environment variable {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {name}: {message}")]
    InvalidVar { name: &'static str, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChefbotConfig {
    pub spoonacular_api_key: String,
    pub youtube_api_key: String,
    pub spoonacular_base_url: String,
    pub youtube_base_url: String,
    /// Directory holding saved recipes and the local session
    pub data_dir: Utf8PathBuf,
    /// Serve the bundled sample recipes when the recipe quota is exhausted
    pub quota_fallback: bool,
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        Ok(_) | Err(env::VarError::NotPresent) => Err(ConfigError::MissingVar(name)),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::InvalidVar {
            name,
            message: "not valid UTF-8".to_string(),
        }),
    }
}

fn optional(name: &'static str) -> Result<Option<String>, ConfigError> {
    match env::var(name) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(value.trim().to_string())),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::InvalidVar {
            name,
            message: "not valid UTF-8".to_string(),
        }),
    }
}

fn parse_flag(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(ConfigError::InvalidVar {
            name,
            message: format!("expected true, false, 1 or 0, got {other:?}"),
        }),
    }
}

fn default_data_dir() -> Result<Utf8PathBuf, ConfigError> {
    let base = dirs::data_dir().ok_or(ConfigError::MissingVar(DATA_DIR))?;
    Utf8PathBuf::from_path_buf(base.join("chefbot")).map_err(|path| ConfigError::InvalidVar {
        name: DATA_DIR,
        message: format!("default data directory {} is not UTF-8", path.display()),
    })
}

/// Resolves the data directory alone, for commands that need no API keys.
pub fn data_dir_from_env() -> Result<Utf8PathBuf, ConfigError> {
    match optional(DATA_DIR)? {
        Some(dir) => Ok(Utf8PathBuf::from(dir)),
        None => default_data_dir(),
    }
}

impl ChefbotConfig {
    pub fn new(
        spoonacular_api_key: impl Into<String>,
        youtube_api_key: impl Into<String>,
        data_dir: impl Into<Utf8PathBuf>,
    ) -> Self {
        ChefbotConfig {
            spoonacular_api_key: spoonacular_api_key.into(),
            youtube_api_key: youtube_api_key.into(),
            spoonacular_base_url: SpoonacularConfig::DEFAULT_BASE_URL.to_string(),
            youtube_base_url: YoutubeConfig::DEFAULT_BASE_URL.to_string(),
            data_dir: data_dir.into(),
            quota_fallback: false,
        }
    }

    /// Loads the configuration from environment variables.
    ///
    /// Both API keys are required. Base URLs default to the public
    /// services and the data directory to the platform data dir.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = ChefbotConfig::new(
            required(SPOONACULAR_API_KEY)?,
            required(YOUTUBE_API_KEY)?,
            data_dir_from_env()?,
        );
        if let Some(url) = optional(SPOONACULAR_BASE_URL)? {
            config.spoonacular_base_url = url;
        }
        if let Some(url) = optional(YOUTUBE_BASE_URL)? {
            config.youtube_base_url = url;
        }
        if let Some(flag) = optional(QUOTA_FALLBACK)? {
            config.quota_fallback = parse_flag(QUOTA_FALLBACK, &flag)?;
        }
        Ok(config)
    }

    pub fn with_quota_fallback(mut self, enabled: bool) -> Self {
        self.quota_fallback = enabled;
        self
    }

    pub fn spoonacular(&self) -> SpoonacularConfig {
        SpoonacularConfig {
            api_key: self.spoonacular_api_key.clone(),
            base_url: self.spoonacular_base_url.clone(),
        }
    }

    pub fn youtube(&self) -> YoutubeConfig {
        YoutubeConfig {
            api_key: self.youtube_api_key.clone(),
            base_url: self.youtube_base_url.clone(),
        }
    }

    pub fn quota_policy(&self) -> QuotaPolicy {
        if self.quota_fallback {
            QuotaPolicy::SampleRecipes
        } else {
            QuotaPolicy::Fail
        }
    }

    /// File storage rooted at the data directory.
    pub fn storage(&self) -> FileStorage {
        FileStorage::new(self.data_dir.clone())
    }
}
