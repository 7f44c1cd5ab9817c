//! Core library for the `airq` CLI.
//!
//! This crate defines:
//! - Configuration from the environment (API key, history file path)
//! - The PM2.5 severity classifier
//! - The weatherapi.com client behind the [`AirQualityProvider`] seam
//! - The on-disk history store
//! - Report orchestration (fetch, classify, record)
//!
//! It is used by `airq-cli`, but can also be reused by other binaries or services.

pub mod classify;
pub mod config;
pub mod error;
pub mod history;
pub mod model;
pub mod provider;
pub mod report;

pub use classify::Severity;
pub use config::Config;
pub use error::{AirQualityError, Result};
pub use history::{HistoryStore, filter_by_location};
pub use model::{AirQualityReading, HistoryRecord};
pub use provider::{AirQualityProvider, weatherapi::WeatherApiProvider};
pub use report::{AirQualityReport, collect_report};
