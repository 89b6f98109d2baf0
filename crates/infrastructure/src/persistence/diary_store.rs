//! SQLite-based diary entry persistence

use std::sync::Arc;

use application::{error::ApplicationError, ports::DiaryStorePort};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use domain::entities::{DiaryEntry, WeatherRecord};
use domain::value_objects::{DateRange, DiaryEntryId};
use rusqlite::{OptionalExtension, Row, TransactionBehavior, params};
use tokio::task;
use tracing::{debug, instrument};
use uuid::Uuid;

use super::connection::ConnectionPool;

/// Date format used for all date columns
const DATE_FORMAT: &str = "%Y-%m-%d";

/// SQLite-based diary store
#[derive(Debug, Clone)]
pub struct SqliteDiaryStore {
    pool: Arc<ConnectionPool>,
}

impl SqliteDiaryStore {
    /// Create a new SQLite diary store
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DiaryStorePort for SqliteDiaryStore {
    #[instrument(skip(self, entry), fields(entry_id = %entry.id, date = %entry.date))]
    async fn save(&self, entry: &DiaryEntry) -> Result<(), ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let entry = entry.clone();

        task::spawn_blocking(move || {
            let mut conn = pool
                .get()
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            // Exclusive transaction: the strictest isolation SQLite offers,
            // serializing this insert against the nightly refresh writer.
            let tx = conn
                .transaction_with_behavior(TransactionBehavior::Exclusive)
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            tx.execute(
                "INSERT INTO diary_entries (
                    id, date, text, weather_date, weather_condition,
                    weather_icon, weather_temperature, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    entry.id.to_string(),
                    entry.date.format(DATE_FORMAT).to_string(),
                    entry.text,
                    entry.weather.date.format(DATE_FORMAT).to_string(),
                    entry.weather.condition,
                    entry.weather.icon,
                    entry.weather.temperature,
                    entry.created_at.to_rfc3339(),
                ],
            )
            .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            tx.commit()
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            debug!("Saved diary entry");
            Ok(())
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }

    #[instrument(skip(self))]
    async fn find_by_date(&self, date: NaiveDate) -> Result<Vec<DiaryEntry>, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let date_str = date.format(DATE_FORMAT).to_string();

        task::spawn_blocking(move || {
            let conn = pool
                .get()
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            let mut stmt = conn
                .prepare(
                    "SELECT id, date, text, weather_date, weather_condition,
                        weather_icon, weather_temperature, created_at
                     FROM diary_entries
                     WHERE date = ?1
                     ORDER BY rowid ASC",
                )
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            let entries: Vec<DiaryEntry> = stmt
                .query_map([&date_str], row_to_entry)
                .map_err(|e| ApplicationError::Internal(e.to_string()))?
                .filter_map(Result::ok)
                .collect();

            debug!(count = entries.len(), "Fetched diary entries for date");
            Ok(entries)
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }

    #[instrument(skip(self))]
    async fn find_in_range(&self, range: DateRange) -> Result<Vec<DiaryEntry>, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let start = range.start.format(DATE_FORMAT).to_string();
        let end = range.end.format(DATE_FORMAT).to_string();

        task::spawn_blocking(move || {
            let conn = pool
                .get()
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            let mut stmt = conn
                .prepare(
                    "SELECT id, date, text, weather_date, weather_condition,
                        weather_icon, weather_temperature, created_at
                     FROM diary_entries
                     WHERE date >= ?1 AND date <= ?2
                     ORDER BY date ASC, rowid ASC",
                )
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            let entries: Vec<DiaryEntry> = stmt
                .query_map(params![start, end], row_to_entry)
                .map_err(|e| ApplicationError::Internal(e.to_string()))?
                .filter_map(Result::ok)
                .collect();

            debug!(count = entries.len(), "Fetched diary entries for range");
            Ok(entries)
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }

    #[instrument(skip(self))]
    async fn first_by_date(
        &self,
        date: NaiveDate,
    ) -> Result<Option<DiaryEntry>, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let date_str = date.format(DATE_FORMAT).to_string();

        task::spawn_blocking(move || {
            let conn = pool
                .get()
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            let result = conn
                .query_row(
                    "SELECT id, date, text, weather_date, weather_condition,
                        weather_icon, weather_temperature, created_at
                     FROM diary_entries
                     WHERE date = ?1
                     ORDER BY rowid ASC
                     LIMIT 1",
                    [&date_str],
                    row_to_entry,
                )
                .optional()
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            Ok(result)
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }

    #[instrument(skip(self, text), fields(entry_id = %id))]
    async fn update_text(
        &self,
        id: &DiaryEntryId,
        text: &str,
    ) -> Result<(), ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let id_str = id.to_string();
        let text = text.to_string();

        task::spawn_blocking(move || {
            let conn = pool
                .get()
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            let affected = conn
                .execute(
                    "UPDATE diary_entries SET text = ?1 WHERE id = ?2",
                    params![text, id_str],
                )
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            if affected == 0 {
                return Err(ApplicationError::NotFound(format!(
                    "diary entry {id_str} not found"
                )));
            }

            debug!("Updated diary entry text");
            Ok(())
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }

    #[instrument(skip(self))]
    async fn delete_by_date(&self, date: NaiveDate) -> Result<u64, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let date_str = date.format(DATE_FORMAT).to_string();

        task::spawn_blocking(move || {
            let conn = pool
                .get()
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            let deleted = conn
                .execute("DELETE FROM diary_entries WHERE date = ?1", [&date_str])
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            debug!(deleted, "Deleted diary entries");
            #[allow(clippy::cast_sign_loss)] // DELETE count is always non-negative
            Ok(deleted as u64)
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }
}

/// Convert a database row to a DiaryEntry domain entity
fn row_to_entry(row: &Row<'_>) -> rusqlite::Result<DiaryEntry> {
    let id_str: String = row.get(0)?;
    let date_str: String = row.get(1)?;
    let text: String = row.get(2)?;
    let weather_date_str: String = row.get(3)?;
    let weather_condition: String = row.get(4)?;
    let weather_icon: String = row.get(5)?;
    let weather_temperature: f64 = row.get(6)?;
    let created_at_str: String = row.get(7)?;

    let id = DiaryEntryId::parse(&id_str).unwrap_or_else(|_| DiaryEntryId::from(Uuid::new_v4()));

    let date = parse_date(&date_str, 1)?;
    let weather_date = parse_date(&weather_date_str, 3)?;

    let created_at = DateTime::parse_from_rfc3339(&created_at_str)
        .map_or_else(|_| Utc::now(), |dt| dt.with_timezone(&Utc));

    Ok(DiaryEntry {
        id,
        date,
        text,
        weather: WeatherRecord {
            date: weather_date,
            condition: weather_condition,
            icon: weather_icon,
            temperature: weather_temperature,
        },
        created_at,
    })
}

/// Parse a date column, converting failures into a column error
fn parse_date(s: &str, column: usize) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            column,
            rusqlite::types::Type::Text,
            Box::new(e),
        )
    })
}
