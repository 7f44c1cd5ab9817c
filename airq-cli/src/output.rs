//! Human-readable rendering of an [`AirQualityReport`].
//!
//! Both lines of the report are painted in the color of the tier derived
//! from the *current* reading; the forecast line prints the forecast
//! number but reuses the current tier's emoji and color.

use colored::{ColoredString, Colorize};

use airq_core::{AirQualityReport, Severity};

pub fn render_report(report: &AirQualityReport) -> String {
    let mut out = String::new();

    let severity = report.current.map(|reading| reading.severity());

    match report.current {
        Some(reading) => {
            let tier = reading.severity();
            let line = format!("{} Current Air Quality (PM2.5): {}", tier.emoji(), reading.pm2_5);
            // Unclassified tiers have an empty emoji; drop the stray space.
            out.push_str(&format!("{}\n", paint(line.trim_start(), severity)));
        }
        None => {
            out.push_str(&format!(
                "Air quality data is not available for {}.\n",
                report.location
            ));
        }
    }

    match report.forecast {
        Some(reading) => {
            let emoji = severity.map(|s| s.emoji()).unwrap_or("");
            let line = format!("{emoji} Tomorrow's Air Quality (PM2.5): {}", reading.pm2_5);
            out.push_str(&format!("{}\n", paint(line.trim_start(), severity)));
        }
        None => {
            out.push_str("Forecast air quality data is not available.\n");
        }
    }

    out
}

/// Apply a tier's color tag, if any, to a line.
fn paint(line: &str, severity: Option<Severity>) -> ColoredString {
    match severity.and_then(|s| s.color()) {
        Some("green") => line.green(),
        Some("yellow") => line.yellow(),
        // `colored` has no named orange; use its truecolor value.
        Some("orange") => line.truecolor(255, 165, 0),
        Some("red") => line.red(),
        _ => line.normal(),
    }
}
