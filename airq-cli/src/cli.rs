use anyhow::{Context, bail};
use clap::Parser;

use airq_core::{Config, HistoryStore, WeatherApiProvider, collect_report, filter_by_location};

use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "airq",
    version,
    about = "Retrieve and display current and next-day air quality for a location"
)]
pub struct Cli {
    /// Location to query: city name, coordinates or postal code.
    /// Required unless --history is given, in which case it filters
    /// the stored readings.
    pub location: Option<String>,

    /// Print stored readings as JSON instead of fetching new ones.
    #[arg(long, short = 'H')]
    pub history: bool,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::from_env();
        let store = HistoryStore::new(config.history_path.clone());

        if self.history {
            println!("{}", render_history(&store, self.location.as_deref())?);
            return Ok(());
        }

        let Some(location) = self.location else {
            bail!("a location is required unless --history is given");
        };

        let api_key = config.require_api_key()?;
        let provider = WeatherApiProvider::new(api_key.to_owned())?;

        let report = collect_report(&provider, &store, &location).await?;
        print!("{}", output::render_report(&report));

        Ok(())
    }
}

/// History mode: render stored readings, optionally filtered to an exact
/// location match, as a pretty-printed JSON array in insertion order.
fn render_history(store: &HistoryStore, location: Option<&str>) -> anyhow::Result<String> {
    let mut records = store.read_all()?;

    if let Some(location) = location {
        records = filter_by_location(records, location);
    }

    serde_json::to_string_pretty(&records).context("failed to serialize history records")
}
