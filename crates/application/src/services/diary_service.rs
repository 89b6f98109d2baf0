//! Diary service
//!
//! Orchestrates diary CRUD: weather resolution on create, date and range
//! reads, first-match text updates, and delete-all-for-date.

use std::sync::Arc;

use chrono::NaiveDate;
use domain::entities::DiaryEntry;
use domain::value_objects::DateRange;
use tracing::{debug, info, instrument};

use crate::{
    error::ApplicationError,
    ports::DiaryStorePort,
    services::WeatherService,
};

/// Service for diary entry management
pub struct DiaryService {
    diary_store: Arc<dyn DiaryStorePort>,
    weather: Arc<WeatherService>,
}

impl std::fmt::Debug for DiaryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiaryService").finish_non_exhaustive()
    }
}

impl DiaryService {
    /// Create a new diary service
    #[must_use]
    pub fn new(diary_store: Arc<dyn DiaryStorePort>, weather: Arc<WeatherService>) -> Self {
        Self {
            diary_store,
            weather,
        }
    }

    /// Create a diary entry for a date
    ///
    /// Resolves the weather snapshot first (cache hit or live fallback), then
    /// persists the entry with it embedded. If resolution fails nothing is
    /// written.
    #[instrument(skip(self, text))]
    pub async fn create_diary(
        &self,
        date: NaiveDate,
        text: &str,
    ) -> Result<DiaryEntry, ApplicationError> {
        info!(%date, "Creating diary entry");

        let weather = self.weather.resolve_for_date(date).await?;
        let entry = DiaryEntry::new(date, text, weather);
        self.diary_store.save(&entry).await?;

        debug!(id = %entry.id, "Diary entry created");
        Ok(entry)
    }

    /// All diary entries for a single date, storage order
    #[instrument(skip(self))]
    pub async fn read_diary(&self, date: NaiveDate) -> Result<Vec<DiaryEntry>, ApplicationError> {
        self.diary_store.find_by_date(date).await
    }

    /// All diary entries within `[start_date, end_date]`, bounds inclusive
    #[instrument(skip(self))]
    pub async fn read_diaries(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<DiaryEntry>, ApplicationError> {
        self.diary_store
            .find_in_range(DateRange::new(start_date, end_date))
            .await
    }

    /// Overwrite the text of the first entry for a date
    ///
    /// Fails when no entry exists for the date. Only the text changes; the
    /// embedded weather snapshot stays as it was at creation time.
    #[instrument(skip(self, text))]
    pub async fn update_diary(
        &self,
        date: NaiveDate,
        text: &str,
    ) -> Result<DiaryEntry, ApplicationError> {
        let Some(mut entry) = self.diary_store.first_by_date(date).await? else {
            return Err(ApplicationError::NotFound(format!(
                "no diary entry for {date}"
            )));
        };

        entry.update_text(text);
        self.diary_store.update_text(&entry.id, text).await?;

        debug!(id = %entry.id, "Diary entry updated");
        Ok(entry)
    }

    /// Delete all entries for a date
    ///
    /// Deleting a date with no entries is not an error; it simply removes
    /// nothing.
    #[instrument(skip(self))]
    pub async fn delete_diary(&self, date: NaiveDate) -> Result<u64, ApplicationError> {
        let deleted = self.diary_store.delete_by_date(date).await?;
        info!(%date, deleted, "Deleted diary entries");
        Ok(deleted)
    }
}
