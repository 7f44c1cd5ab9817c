use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Errors surfaced by the core library.
///
/// A missing `air_quality` field on a 200 response is deliberately *not*
/// represented here: "no data" is a valid outcome and is modeled as
/// `Option::None` by the provider instead.
#[derive(Debug, Error)]
pub enum AirQualityError {
    /// Network/DNS/connection failure before any HTTP status was obtained.
    #[error("failed to reach weatherapi.com ({endpoint}): {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The upstream API answered with a non-200 status.
    #[error("weatherapi.com {endpoint} request failed with status {status}: {body}")]
    Upstream {
        endpoint: &'static str,
        status: StatusCode,
        body: String,
    },

    /// 200 response whose body could not be parsed as the expected JSON.
    #[error("failed to decode weatherapi.com {endpoint} response: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The history file exists but does not contain a valid JSON array.
    #[error("history file {} is not valid JSON: {source}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Reading or writing the history file failed at the filesystem level.
    #[error("failed to {action} history file {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "WEATHER_API_KEY environment variable is not set.\n\
         Hint: export WEATHER_API_KEY=<your weatherapi.com key> and retry."
    )]
    MissingApiKey,
}

pub type Result<T> = std::result::Result<T, AirQualityError>;
