//! Diary entry - a user-authored text note attached to a date and a weather snapshot

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::WeatherRecord;
use crate::value_objects::DiaryEntryId;

/// A diary entry
///
/// The weather snapshot is resolved once, when the entry is created, and
/// embedded into the entry; updating an entry rewrites only its text and
/// never re-resolves the weather. Several entries may share a date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiaryEntry {
    /// Unique identifier
    pub id: DiaryEntryId,
    /// The day this entry was written about
    pub date: NaiveDate,
    /// Free-form entry content
    pub text: String,
    /// Weather snapshot fixed at creation time
    pub weather: WeatherRecord,
    /// When this entry was created
    pub created_at: DateTime<Utc>,
}

impl DiaryEntry {
    /// Create a new diary entry for a date with an already-resolved weather snapshot
    #[must_use]
    pub fn new(date: NaiveDate, text: impl Into<String>, weather: WeatherRecord) -> Self {
        Self {
            id: DiaryEntryId::new(),
            date,
            text: text.into(),
            weather,
            created_at: Utc::now(),
        }
    }

    /// Overwrite the entry text; the weather snapshot is left untouched
    pub fn update_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl std::fmt::Display for DiaryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {} ({})", self.date, self.text, self.weather.condition)
    }
}
