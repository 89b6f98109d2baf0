//! SQLite-based weather cache persistence
//!
//! Append-only: records are inserted without dedup and never updated or
//! deleted. Multiple rows per day accumulate when the refresh job runs more
//! than once; readers take the first in insertion order.

use std::sync::Arc;

use application::{error::ApplicationError, ports::WeatherStorePort};
use async_trait::async_trait;
use chrono::NaiveDate;
use domain::entities::WeatherRecord;
use rusqlite::{Row, params};
use tokio::task;
use tracing::{debug, instrument};

use super::connection::ConnectionPool;

/// Date format used for the date column
const DATE_FORMAT: &str = "%Y-%m-%d";

/// SQLite-based weather record store
#[derive(Debug, Clone)]
pub struct SqliteWeatherStore {
    pool: Arc<ConnectionPool>,
}

impl SqliteWeatherStore {
    /// Create a new SQLite weather store
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WeatherStorePort for SqliteWeatherStore {
    #[instrument(skip(self, record), fields(date = %record.date))]
    async fn insert(&self, record: &WeatherRecord) -> Result<(), ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let record = record.clone();

        task::spawn_blocking(move || {
            let conn = pool
                .get()
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            conn.execute(
                "INSERT INTO weather_records (date, condition, icon, temperature)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    record.date.format(DATE_FORMAT).to_string(),
                    record.condition,
                    record.icon,
                    record.temperature,
                ],
            )
            .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            debug!("Inserted weather record");
            Ok(())
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }

    #[instrument(skip(self))]
    async fn find_by_date(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<WeatherRecord>, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let date_str = date.format(DATE_FORMAT).to_string();

        task::spawn_blocking(move || {
            let conn = pool
                .get()
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            let mut stmt = conn
                .prepare(
                    "SELECT date, condition, icon, temperature
                     FROM weather_records
                     WHERE date = ?1
                     ORDER BY id ASC",
                )
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            let records: Vec<WeatherRecord> = stmt
                .query_map([&date_str], row_to_record)
                .map_err(|e| ApplicationError::Internal(e.to_string()))?
                .filter_map(Result::ok)
                .collect();

            debug!(count = records.len(), "Fetched weather records for date");
            Ok(records)
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }
}

/// Convert a database row to a WeatherRecord domain entity
fn row_to_record(row: &Row<'_>) -> rusqlite::Result<WeatherRecord> {
    let date_str: String = row.get(0)?;
    let condition: String = row.get(1)?;
    let icon: String = row.get(2)?;
    let temperature: f64 = row.get(3)?;

    let date = NaiveDate::parse_from_str(&date_str, DATE_FORMAT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(WeatherRecord {
        date,
        condition,
        icon,
        temperature,
    })
}
