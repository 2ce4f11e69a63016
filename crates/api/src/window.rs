//! Date window for the tobs and temperature routes

use chrono::{Duration, NaiveDate};
use climate_storage::{Repository, StorageError};
use tracing::{info, warn};

use crate::config::{ApiConfig, CutoffPolicy};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Cutoff dates resolved once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateWindow {
    /// Earliest date returned by the tobs route
    pub tobs_start: String,
    /// End of a temperature range when none is given
    pub range_end: String,
}

impl DateWindow {
    /// Window taken verbatim from configuration
    pub fn fixed(config: &ApiConfig) -> Self {
        Self {
            tobs_start: config.tobs_start.clone(),
            range_end: config.range_end.clone(),
        }
    }

    /// Window ending at `latest` and reaching back `lookback_days`.
    ///
    /// Returns `None` if `latest` is not a `YYYY-MM-DD` date.
    pub fn ending_at(latest: &str, lookback_days: i64) -> Option<Self> {
        let end = NaiveDate::parse_from_str(latest, DATE_FORMAT).ok()?;
        let start = end.checked_sub_signed(Duration::days(lookback_days))?;
        Some(Self {
            tobs_start: start.format(DATE_FORMAT).to_string(),
            range_end: end.format(DATE_FORMAT).to_string(),
        })
    }

    /// Resolve the window according to the configured policy.
    pub async fn resolve(config: &ApiConfig, repo: &Repository) -> Result<Self, StorageError> {
        let window = match config.cutoff_policy {
            CutoffPolicy::Fixed => Self::fixed(config),
            CutoffPolicy::Latest => match repo.latest_date().await? {
                Some(latest) => Self::ending_at(&latest, config.lookback_days).unwrap_or_else(|| {
                    warn!("Latest date {:?} is not {}, using fixed window", latest, DATE_FORMAT);
                    Self::fixed(config)
                }),
                None => {
                    warn!("No measurements found, using fixed window");
                    Self::fixed(config)
                }
            },
        };

        info!(
            tobs_start = %window.tobs_start,
            range_end = %window.range_end,
            "Date window resolved"
        );
        Ok(window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_window() {
        let window = DateWindow::fixed(&ApiConfig::default());
        assert_eq!(window.tobs_start, "2016-08-23");
        assert_eq!(window.range_end, "2017-08-23");
    }

    #[test]
    fn test_window_ending_at_latest() {
        let window = DateWindow::ending_at("2017-08-23", 365).unwrap();
        assert_eq!(window.tobs_start, "2016-08-23");
        assert_eq!(window.range_end, "2017-08-23");
    }

    #[test]
    fn test_window_across_leap_day() {
        let window = DateWindow::ending_at("2016-08-23", 365).unwrap();
        assert_eq!(window.tobs_start, "2015-08-24");
    }

    #[test]
    fn test_unparseable_latest() {
        assert!(DateWindow::ending_at("23/08/2017", 365).is_none());
    }
}
