//! Weather record - a cached snapshot of one day's weather conditions

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Offset between Kelvin and Celsius
const KELVIN_OFFSET: f64 = 273.15;

/// A snapshot of weather conditions for a calendar day
///
/// Records are written by the nightly refresh job, or constructed transiently
/// when a diary entry is created for a date with no cached row. Once written
/// they are never updated or deleted. More than one record may exist for the
/// same day; readers take the first in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    /// The day this snapshot is labeled with
    pub date: NaiveDate,
    /// Short condition category from the provider (e.g. "Clear", "Rain")
    pub condition: String,
    /// Provider-specific icon code
    pub icon: String,
    /// Temperature in the provider's native unit (Kelvin)
    pub temperature: f64,
}

impl WeatherRecord {
    /// Create a weather record for a specific date
    #[must_use]
    pub fn new(
        date: NaiveDate,
        condition: impl Into<String>,
        icon: impl Into<String>,
        temperature: f64,
    ) -> Self {
        Self {
            date,
            condition: condition.into(),
            icon: icon.into(),
            temperature,
        }
    }

    /// Create a weather record stamped with the current local date
    ///
    /// This is the label used for live observations: whatever date was being
    /// resolved, a freshly fetched snapshot always carries today's date.
    #[must_use]
    pub fn stamped_today(
        condition: impl Into<String>,
        icon: impl Into<String>,
        temperature: f64,
    ) -> Self {
        Self::new(Local::now().date_naive(), condition, icon, temperature)
    }

    /// Temperature converted to Celsius
    #[must_use]
    pub fn temperature_celsius(&self) -> f64 {
        self.temperature - KELVIN_OFFSET
    }
}

impl std::fmt::Display for WeatherRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} ({:.1}K)",
            self.date, self.condition, self.temperature
        )
    }
}
