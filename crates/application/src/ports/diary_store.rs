//! Diary store port
//!
//! Defines the persistence interface for diary entries. Entries are keyed by
//! calendar date for every external operation; the id only matters internally.

use async_trait::async_trait;
use chrono::NaiveDate;
use domain::entities::DiaryEntry;
use domain::value_objects::{DateRange, DiaryEntryId};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for diary entry persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DiaryStorePort: Send + Sync {
    /// Persist a new diary entry
    async fn save(&self, entry: &DiaryEntry) -> Result<(), ApplicationError>;

    /// All entries with exactly this date, in storage order
    async fn find_by_date(&self, date: NaiveDate) -> Result<Vec<DiaryEntry>, ApplicationError>;

    /// All entries whose date falls within the range (bounds inclusive)
    async fn find_in_range(&self, range: DateRange) -> Result<Vec<DiaryEntry>, ApplicationError>;

    /// The first entry (storage order) with this date, if any
    async fn first_by_date(
        &self,
        date: NaiveDate,
    ) -> Result<Option<DiaryEntry>, ApplicationError>;

    /// Overwrite the text of one entry
    async fn update_text(
        &self,
        id: &DiaryEntryId,
        text: &str,
    ) -> Result<(), ApplicationError>;

    /// Delete all entries with this date, returning how many were removed
    async fn delete_by_date(&self, date: NaiveDate) -> Result<u64, ApplicationError>;
}
