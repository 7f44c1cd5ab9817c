use std::fmt::Debug;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{error::Result, model::AirQualityReading};

pub mod weatherapi;

/// Source of PM2.5 readings.
///
/// `Ok(None)` means the upstream answered successfully but carried no
/// air-quality data for the location; callers render it as "not
/// available" rather than treating it as a failure. The two operations
/// fail independently of each other.
#[async_trait]
pub trait AirQualityProvider: Send + Sync + Debug {
    /// Current conditions for a free-text location query.
    async fn fetch_current(&self, location: &str) -> Result<Option<AirQualityReading>>;

    /// Forecast reading for `when`. Whatever timestamp is sent upstream,
    /// the value consulted is always the first hourly slot of the first
    /// forecast day in the response.
    async fn fetch_forecast(
        &self,
        location: &str,
        when: DateTime<Utc>,
    ) -> Result<Option<AirQualityReading>>;
}
