use chrono::{Duration, Utc};
use tracing::warn;

use crate::{
    error::Result,
    history::HistoryStore,
    model::{AirQualityReading, HistoryRecord},
    provider::AirQualityProvider,
};

/// Everything the CLI needs to render one invocation.
#[derive(Debug, Clone)]
pub struct AirQualityReport {
    pub location: String,
    /// Current reading, if the upstream carried one.
    pub current: Option<AirQualityReading>,
    /// Reading for the first hourly slot of tomorrow's forecast.
    pub forecast: Option<AirQualityReading>,
    /// Whether the current reading made it into the history file.
    pub recorded: bool,
}

/// Fetch current and next-day readings and record the current one.
///
/// Any transport or upstream failure on either fetch aborts the whole
/// report; nothing is appended in that case. A 200 response without
/// air-quality data is not a failure: the current line renders as "not
/// available" and the append is skipped entirely, so no sentinel values
/// ever reach the history file. A failed append is logged and swallowed;
/// the fetched readings are still reported.
pub async fn collect_report(
    provider: &dyn AirQualityProvider,
    store: &HistoryStore,
    location: &str,
) -> Result<AirQualityReport> {
    let now = Utc::now();

    let current = provider.fetch_current(location).await?;
    let forecast = provider.fetch_forecast(location, now + Duration::days(1)).await?;

    let mut recorded = false;
    if let Some(reading) = current {
        let record = HistoryRecord {
            location: location.to_string(),
            pm25_value: reading.pm2_5,
            date: now,
        };

        match store.append(record) {
            Ok(()) => recorded = true,
            Err(err) => warn!(%err, "failed to record reading in history"),
        }
    }

    Ok(AirQualityReport { location: location.to_string(), current, forecast, recorded })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AirQualityError;
    use async_trait::async_trait;
    use chrono::DateTime;
    use reqwest::StatusCode;
    use tempfile::tempdir;

    #[derive(Debug, Default)]
    struct StubProvider {
        current: Option<f64>,
        forecast: Option<f64>,
        fail_current: bool,
        fail_forecast: bool,
    }

    fn upstream_error(endpoint: &'static str) -> AirQualityError {
        AirQualityError::Upstream {
            endpoint,
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "boom".to_string(),
        }
    }

    #[async_trait]
    impl AirQualityProvider for StubProvider {
        async fn fetch_current(&self, _location: &str) -> Result<Option<AirQualityReading>> {
            if self.fail_current {
                return Err(upstream_error("current.json"));
            }
            Ok(self.current.map(|pm2_5| AirQualityReading { pm2_5 }))
        }

        async fn fetch_forecast(
            &self,
            _location: &str,
            _when: DateTime<Utc>,
        ) -> Result<Option<AirQualityReading>> {
            if self.fail_forecast {
                return Err(upstream_error("forecast.json"));
            }
            Ok(self.forecast.map(|pm2_5| AirQualityReading { pm2_5 }))
        }
    }

    fn store_in(dir: &tempfile::TempDir) -> HistoryStore {
        HistoryStore::new(dir.path().join("history.json"))
    }

    #[tokio::test]
    async fn successful_report_appends_current_reading() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        let provider =
            StubProvider { current: Some(8.5), forecast: Some(42.1), ..Default::default() };

        let report = collect_report(&provider, &store, "Paris").await.unwrap();

        assert_eq!(report.current, Some(AirQualityReading { pm2_5: 8.5 }));
        assert_eq!(report.forecast, Some(AirQualityReading { pm2_5: 42.1 }));
        assert!(report.recorded);

        let records = store.read_all().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].location, "Paris");
        assert_eq!(records[0].pm25_value, 8.5);
    }

    #[tokio::test]
    async fn current_fetch_failure_aborts_without_appending() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        let provider = StubProvider { fail_current: true, ..Default::default() };

        let err = collect_report(&provider, &store, "Paris").await.unwrap_err();

        assert!(matches!(err, AirQualityError::Upstream { .. }));
        assert!(store.read_all().unwrap().is_empty());
    }

    #[tokio::test]
    async fn forecast_fetch_failure_aborts_without_appending() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        let provider =
            StubProvider { current: Some(8.5), fail_forecast: true, ..Default::default() };

        let err = collect_report(&provider, &store, "Paris").await.unwrap_err();

        assert!(matches!(err, AirQualityError::Upstream { .. }));
        assert!(store.read_all().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_current_data_skips_append_but_keeps_forecast() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        let provider = StubProvider { current: None, forecast: Some(42.1), ..Default::default() };

        let report = collect_report(&provider, &store, "Paris").await.unwrap();

        assert_eq!(report.current, None);
        assert_eq!(report.forecast, Some(AirQualityReading { pm2_5: 42.1 }));
        assert!(!report.recorded);
        assert!(store.read_all().unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_append_is_reported_but_not_fatal() {
        let dir = tempdir().unwrap();
        // A directory at the target path makes the write fail.
        let path = dir.path().join("history.json");
        std::fs::create_dir(&path).unwrap();

        let store = HistoryStore::new(&path);
        let provider = StubProvider { current: Some(8.5), ..Default::default() };

        let report = collect_report(&provider, &store, "Paris").await.unwrap();

        assert_eq!(report.current, Some(AirQualityReading { pm2_5: 8.5 }));
        assert!(!report.recorded);
    }
}
