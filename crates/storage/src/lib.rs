//! Storage Layer
//!
//! Read-only access to the climate observation dataset (the `measurement`
//! and `station` tables) through a pooled SQLite connection.

mod models;
mod repository;
mod stats;

pub use models::{DateReading, Measurement, Station};
pub use repository::{Repository, MEASUREMENT_TABLE, STATION_TABLE};
pub use stats::TemperatureSummary;

use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Table `{0}` not found in database")]
    MissingTable(String),
}
