//! Temperature aggregation over a date range

use serde::Serialize;

/// Minimum, mean and maximum of a set of temperature observations
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TemperatureSummary {
    #[serde(rename = "TMIN")]
    pub min: f64,
    #[serde(rename = "TAVG")]
    pub avg: f64,
    #[serde(rename = "TMAX")]
    pub max: f64,
}

impl TemperatureSummary {
    /// Summarize a slice of observations.
    ///
    /// Returns `None` for an empty slice; min/mean/max are undefined there.
    pub fn compute(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let mean = values.iter().sum::<f64>() / values.len() as f64;

        // Summation error can push the mean just outside [min, max]
        let avg = mean.clamp(min, max);

        Some(Self { min, avg, max })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_has_no_summary() {
        assert!(TemperatureSummary::compute(&[]).is_none());
    }

    #[test]
    fn test_known_values() {
        let summary = TemperatureSummary::compute(&[62.0, 66.0, 70.0, 68.0]).unwrap();
        assert_eq!(summary.min, 62.0);
        assert_eq!(summary.avg, 66.5);
        assert_eq!(summary.max, 70.0);
    }

    #[test]
    fn test_repeated_value_keeps_ordering() {
        let summary = TemperatureSummary::compute(&[0.1, 0.1, 0.1]).unwrap();
        assert_eq!(summary.min, 0.1);
        assert_eq!(summary.avg, 0.1);
        assert_eq!(summary.max, 0.1);
    }

    #[test]
    fn test_serialized_keys() {
        let summary = TemperatureSummary::compute(&[70.0]).unwrap();
        let json = serde_json::to_value(summary).unwrap();
        assert_eq!(json["TMIN"], 70.0);
        assert_eq!(json["TAVG"], 70.0);
        assert_eq!(json["TMAX"], 70.0);
    }

    proptest! {
        #[test]
        fn prop_min_avg_max_ordered(values in prop::collection::vec(-100.0f64..150.0, 1..200)) {
            let s = TemperatureSummary::compute(&values).unwrap();
            prop_assert!(s.min <= s.avg);
            prop_assert!(s.avg <= s.max);
        }
    }
}
