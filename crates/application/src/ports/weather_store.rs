//! Weather cache store port
//!
//! Persistence interface for the per-day weather cache. Inserts are
//! unconditional: no per-date uniqueness is enforced, duplicate rows for a
//! day are expected over time and readers take the first in insertion order.

use async_trait::async_trait;
use chrono::NaiveDate;
use domain::entities::WeatherRecord;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for weather record persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherStorePort: Send + Sync {
    /// Insert a weather record; never deduplicates
    async fn insert(&self, record: &WeatherRecord) -> Result<(), ApplicationError>;

    /// All records labeled with this date, in insertion order
    async fn find_by_date(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<WeatherRecord>, ApplicationError>;
}
