//! TOML configuration.
//!
//! ```toml
//! openai_api_key = "sk-..."   # optional, falls back to `OPENAI_API_KEY`
//! model = "gpt-4.1-mini"      # optional
//! name = "Junea"              # optional
//! goal = "weight_loss"
//! meals_csv = "nutrition.csv" # optional
//!
//! [profile]
//! age = 30
//! weight_kg = 70.0
//! height_cm = 170.0
//! sex = "male"
//! activity_tier = "sedentary"
//! ```

use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::{
    Api,
    profile::{Goal, Profile},
};

/// Environment variable consulted when the configuration carries no API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("no API key configured and OPENAI_API_KEY is not set")]
    MissingApiKey,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API key for the completion service.
    pub openai_api_key: Option<String>,
    /// Model override.
    pub model: Option<String>,
    /// Endpoint host override, without protocol or path.
    pub endpoint_host: Option<String>,
    /// Maximum number of tokens per reply.
    pub max_tokens: Option<u32>,
    /// The user's name, used in the introduction and farewell.
    pub name: Option<String>,
    pub goal: Goal,
    pub profile: Profile,
    /// Nutrition table for meal suggestions.
    pub meals_csv: Option<PathBuf>,
}

impl Config {
    /// Parses a configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Loads a configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Returns the configured API key, falling back to the environment.
    pub fn api_key(&self) -> Result<String, ConfigError> {
        resolve_api_key(self.openai_api_key.as_deref(), env::var(API_KEY_ENV).ok())
    }

    /// Creates an [`Api`] with all configured overrides applied.
    pub fn api(&self) -> Result<Api, ConfigError> {
        let mut api = Api::new(self.api_key()?);
        if let Some(model) = &self.model {
            api = api.default_model(model.as_str());
        }
        if let Some(host) = &self.endpoint_host {
            api = api.endpoint_host(host.as_str());
        }
        if let Some(max_tokens) = self.max_tokens {
            api = api.default_max_tokens(max_tokens);
        }
        Ok(api)
    }
}

fn resolve_api_key(
    configured: Option<&str>,
    from_env: Option<String>,
) -> Result<String, ConfigError> {
    configured
        .map(str::to_owned)
        .or(from_env)
        .map(|key| key.trim().to_owned())
        .filter(|key| !key.is_empty())
        .ok_or(ConfigError::MissingApiKey)
}
