//! PM2.5 severity bands.
//!
//! The bands follow the US EPA PM2.5 breakpoints: inclusive lower and
//! upper bounds per tier. Values falling outside every band (NaN,
//! negatives, the narrow gaps between an upper bound and the next lower
//! bound) classify as [`Severity::Unclassified`] rather than panicking.

/// Severity tier for a PM2.5 concentration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Good,
    Moderate,
    UnhealthyForSensitiveGroups,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
    /// Input outside every defined band; rendered without emoji or color.
    Unclassified,
}

impl Severity {
    /// Map a PM2.5 value (µg/m³) onto its severity tier.
    pub fn classify(pm2_5: f64) -> Self {
        if (0.0..=12.0).contains(&pm2_5) {
            Severity::Good
        } else if (12.1..=35.4).contains(&pm2_5) {
            Severity::Moderate
        } else if (35.5..=55.4).contains(&pm2_5) {
            Severity::UnhealthyForSensitiveGroups
        } else if (55.5..=150.4).contains(&pm2_5) {
            Severity::Unhealthy
        } else if (150.5..=250.4).contains(&pm2_5) {
            Severity::VeryUnhealthy
        } else if pm2_5 >= 250.5 {
            Severity::Hazardous
        } else {
            Severity::Unclassified
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Severity::Good => "😃",
            Severity::Moderate => "😐",
            Severity::UnhealthyForSensitiveGroups => "😷",
            Severity::Unhealthy => "😨",
            Severity::VeryUnhealthy => "😷",
            Severity::Hazardous => "🚫",
            Severity::Unclassified => "",
        }
    }

    /// Color tag for terminal rendering; `None` for unclassified input.
    pub fn color(&self) -> Option<&'static str> {
        match self {
            Severity::Good => Some("green"),
            Severity::Moderate => Some("yellow"),
            Severity::UnhealthyForSensitiveGroups => Some("orange"),
            Severity::Unhealthy | Severity::VeryUnhealthy | Severity::Hazardous => Some("red"),
            Severity::Unclassified => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Good => "good",
            Severity::Moderate => "moderate",
            Severity::UnhealthyForSensitiveGroups => "unhealthy for sensitive groups",
            Severity::Unhealthy => "unhealthy",
            Severity::VeryUnhealthy => "very unhealthy",
            Severity::Hazardous => "hazardous",
            Severity::Unclassified => "unclassified",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
