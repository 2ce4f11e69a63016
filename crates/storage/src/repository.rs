//! Repository Implementation

use crate::models::{DateReading, Measurement, Station};
use crate::StorageError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::{debug, info};

pub const MEASUREMENT_TABLE: &str = "measurement";
pub const STATION_TABLE: &str = "station";

/// Read-only repository over the observation dataset.
///
/// Cloning is cheap; clones share the same connection pool.
#[derive(Debug, Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Open the database read-only and verify both tables are present.
    ///
    /// # Arguments
    /// * `database_url` - SQLite URL, e.g. `sqlite://Resources/hawaii.sqlite`
    /// * `max_connections` - Upper bound on pooled connections
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(database_url)?.read_only(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        info!("Connected to database at {}", database_url);

        let repo = Self::from_pool(pool);
        repo.verify_schema().await?;
        Ok(repo)
    }

    /// Wrap an existing pool without any checks
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Check that the `measurement` and `station` tables exist and log their sizes.
    pub async fn verify_schema(&self) -> Result<(), StorageError> {
        for table in [MEASUREMENT_TABLE, STATION_TABLE] {
            let found: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?",
            )
            .bind(table)
            .fetch_one(&self.pool)
            .await?;

            if found == 0 {
                return Err(StorageError::MissingTable(table.to_string()));
            }
        }

        let measurements = self.measurement_count().await?;
        let stations = self.station_count().await?;
        info!(measurements, stations, "Schema verified");
        Ok(())
    }

    /// Number of rows in `measurement`
    pub async fn measurement_count(&self) -> Result<i64, StorageError> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM measurement")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Number of rows in `station`
    pub async fn station_count(&self) -> Result<i64, StorageError> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM station")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Date and precipitation of every measurement, in storage order.
    pub async fn precipitation(&self) -> Result<Vec<DateReading>, StorageError> {
        let rows: Vec<(String, Option<f64>)> =
            sqlx::query_as("SELECT date, prcp FROM measurement")
                .fetch_all(&self.pool)
                .await?;

        debug!("Fetched {} precipitation rows", rows.len());
        Ok(rows
            .into_iter()
            .map(|(date, prcp)| DateReading::new(date, prcp))
            .collect())
    }

    /// Every station record
    pub async fn stations(&self) -> Result<Vec<Station>, StorageError> {
        let stations = sqlx::query_as::<_, Station>(
            "SELECT id, station, name, latitude, longitude, elevation FROM station",
        )
        .fetch_all(&self.pool)
        .await?;

        debug!("Fetched {} stations", stations.len());
        Ok(stations)
    }

    /// Measurements dated on or after `since` (string comparison).
    pub async fn measurements_since(&self, since: &str) -> Result<Vec<Measurement>, StorageError> {
        let rows = sqlx::query_as::<_, Measurement>(
            "SELECT id, station, date, prcp, tobs FROM measurement WHERE date >= ?",
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        debug!("Fetched {} measurements since {}", rows.len(), since);
        Ok(rows)
    }

    /// Temperature observations with `start <= date <= end`.
    ///
    /// Dates are compared as text, so malformed bounds simply match nothing.
    /// Null observations are skipped.
    pub async fn temperatures_between(&self, start: &str, end: &str) -> Result<Vec<f64>, StorageError> {
        let rows: Vec<Option<f64>> =
            sqlx::query_scalar("SELECT tobs FROM measurement WHERE date >= ? AND date <= ?")
                .bind(start)
                .bind(end)
                .fetch_all(&self.pool)
                .await?;

        debug!("Fetched {} temperatures between {} and {}", rows.len(), start, end);
        Ok(rows.into_iter().flatten().collect())
    }

    /// Most recent measurement date, if the table has any rows
    pub async fn latest_date(&self) -> Result<Option<String>, StorageError> {
        let latest = sqlx::query_scalar("SELECT MAX(date) FROM measurement")
            .fetch_one(&self.pool)
            .await?;
        Ok(latest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::Executor;

    const FIXTURE: &str = include_str!("../fixtures/sample.sql");

    /// In-memory repository seeded with the sample fixture.
    ///
    /// A single never-expiring connection keeps the in-memory database alive.
    async fn sample_repo() -> Repository {
        let pool = memory_pool().await;
        pool.execute(FIXTURE).await.unwrap();
        Repository::from_pool(pool)
    }

    async fn memory_pool() -> SqlitePool {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_verify_schema() {
        let repo = sample_repo().await;
        repo.verify_schema().await.unwrap();
        assert_eq!(repo.measurement_count().await.unwrap(), 11);
        assert_eq!(repo.station_count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_verify_schema_missing_table() {
        let pool = memory_pool().await;
        pool.execute("CREATE TABLE measurement (id INTEGER PRIMARY KEY, station TEXT, date TEXT, prcp FLOAT, tobs FLOAT)")
            .await
            .unwrap();
        let repo = Repository::from_pool(pool);

        match repo.verify_schema().await {
            Err(StorageError::MissingTable(table)) => assert_eq!(table, "station"),
            other => panic!("expected missing station table, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_precipitation_keeps_every_row() {
        let repo = sample_repo().await;
        let readings = repo.precipitation().await.unwrap();

        assert_eq!(readings.len(), 11);
        assert_eq!(readings[0], DateReading::new("2016-08-22", Some(0.40)));
        // Same date, different stations
        let same_day: Vec<_> = readings.iter().filter(|r| r.date == "2016-08-23").collect();
        assert_eq!(same_day.len(), 3);
        // Null precipitation survives as None
        assert_eq!(readings[5], DateReading::new("2017-01-01", None));
    }

    #[tokio::test]
    async fn test_stations() {
        let repo = sample_repo().await;
        let ids: Vec<_> = repo
            .stations()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.station)
            .collect();
        assert_eq!(ids, vec!["USC00519397", "USC00513117", "USC00519281"]);
    }

    #[tokio::test]
    async fn test_measurements_since() {
        let repo = sample_repo().await;
        let rows = repo.measurements_since("2016-08-23").await.unwrap();

        assert_eq!(rows.len(), 10);
        assert!(rows.iter().all(|m| m.date.as_str() >= "2016-08-23"));
        assert_eq!(rows[0].tobs, Some(81.0));

        // A null observation is kept as None, not decoded as 0.0
        let missing = rows.iter().find(|m| m.date == "2017-03-01").unwrap();
        assert_eq!(missing.tobs, None);
    }

    #[tokio::test]
    async fn test_temperatures_between_inclusive() {
        let repo = sample_repo().await;
        let temps = repo.temperatures_between("2017-01-01", "2017-01-31").await.unwrap();
        assert_eq!(temps, vec![62.0, 66.0, 70.0, 68.0]);
    }

    #[tokio::test]
    async fn test_temperatures_between_skips_null() {
        let repo = sample_repo().await;
        let temps = repo.temperatures_between("2017-03-01", "2017-03-01").await.unwrap();
        assert!(temps.is_empty());
    }

    #[tokio::test]
    async fn test_temperatures_between_malformed_bounds() {
        let repo = sample_repo().await;
        let temps = repo.temperatures_between("not-a-date", "also-not").await.unwrap();
        assert!(temps.is_empty());
    }

    #[tokio::test]
    async fn test_latest_date() {
        let repo = sample_repo().await;
        assert_eq!(repo.latest_date().await.unwrap().as_deref(), Some("2017-08-23"));
    }
}
