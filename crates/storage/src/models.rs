//! Record definitions for the two tables of the dataset.

use serde::ser::{Serialize, SerializeMap, Serializer};
use sqlx::FromRow;

/// One observation: a station's precipitation and temperature on a date.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Measurement {
    pub id: i64,
    pub station: String,
    /// ISO-8601 date (`YYYY-MM-DD`), compared as text
    pub date: String,
    /// Precipitation in inches
    pub prcp: Option<f64>,
    /// Temperature observation in degrees
    pub tobs: Option<f64>,
}

/// A weather-observation site.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Station {
    pub id: i64,
    pub station: String,
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation: Option<f64>,
}

/// A single value keyed by its date.
///
/// Serializes as a one-entry JSON object (`{"2017-01-01": 0.08}`). Readings
/// are always returned as a sequence of these, never folded into one map,
/// since several stations report on the same date.
#[derive(Debug, Clone, PartialEq)]
pub struct DateReading {
    pub date: String,
    pub value: Option<f64>,
}

impl DateReading {
    pub fn new(date: impl Into<String>, value: Option<f64>) -> Self {
        Self {
            date: date.into(),
            value,
        }
    }
}

impl Serialize for DateReading {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.date, &self.value)?;
        map.end()
    }
}

impl From<Measurement> for DateReading {
    /// Temperature reading of a measurement
    fn from(m: Measurement) -> Self {
        Self {
            date: m.date,
            value: m.tobs,
        }
    }
}
