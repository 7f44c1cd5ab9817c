use std::{env, path::PathBuf};

use crate::error::{AirQualityError, Result};

/// Environment variable holding the weatherapi.com API key.
pub const API_KEY_VAR: &str = "WEATHER_API_KEY";

/// Environment variable overriding the history file location.
pub const HISTORY_FILE_VAR: &str = "AIRQ_HISTORY_FILE";

/// Default history file, relative to the working directory.
pub const DEFAULT_HISTORY_FILE: &str = "history.json";

/// Runtime configuration, snapshotted from the environment once at
/// invocation time.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// weatherapi.com API key; only required when fetching.
    pub api_key: Option<String>,

    /// Where readings are stored. `AIRQ_HISTORY_FILE` overrides the
    /// default `history.json` so tests and scripts can redirect storage.
    pub history_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        let api_key = env::var(API_KEY_VAR).ok().filter(|key| !key.is_empty());

        let history_path = env::var(HISTORY_FILE_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_HISTORY_FILE));

        Self { api_key, history_path }
    }

    /// The API key, or [`AirQualityError::MissingApiKey`] if unset.
    ///
    /// History mode never calls this, so printing stored readings works
    /// without any credentials.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or(AirQualityError::MissingApiKey)
    }
}
