//! Weather resolution and cache refresh
//!
//! Implements the date-scoped weather policy: a lookup against the per-day
//! cache, with a live fetch as the fallback. The fallback snapshot is labeled
//! with the CURRENT date, whatever date was asked for; resolving a past day
//! that was never cached yields a record stamped "today". That labeling is
//! intentional and load-bearing; callers and tests rely on it.

use std::sync::Arc;

use chrono::NaiveDate;
use domain::entities::WeatherRecord;
use tracing::{debug, info, instrument};

use crate::{
    error::ApplicationError,
    ports::{WeatherProviderPort, WeatherStorePort},
};

/// Service for resolving and refreshing per-day weather records
pub struct WeatherService {
    weather_store: Arc<dyn WeatherStorePort>,
    provider: Arc<dyn WeatherProviderPort>,
}

impl std::fmt::Debug for WeatherService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherService").finish_non_exhaustive()
    }
}

impl WeatherService {
    /// Create a new weather service
    #[must_use]
    pub fn new(
        weather_store: Arc<dyn WeatherStorePort>,
        provider: Arc<dyn WeatherProviderPort>,
    ) -> Self {
        Self {
            weather_store,
            provider,
        }
    }

    /// Resolve the weather record to associate with `date`
    ///
    /// Returns the first cached record for that exact date if one exists.
    /// Otherwise fetches current conditions and returns a record stamped with
    /// today's date; that record is NOT written to the cache. Only the
    /// scheduled refresh populates it.
    #[instrument(skip(self))]
    pub async fn resolve_for_date(
        &self,
        date: NaiveDate,
    ) -> Result<WeatherRecord, ApplicationError> {
        let cached = self.weather_store.find_by_date(date).await?;
        if let Some(record) = cached.into_iter().next() {
            debug!(%date, "Resolved weather from cache");
            return Ok(record);
        }

        debug!(%date, "No cached weather, falling back to live conditions");
        let observation = self.provider.current_observation().await?;
        Ok(WeatherRecord::stamped_today(
            observation.condition,
            observation.icon,
            observation.temperature,
        ))
    }

    /// Fetch current conditions and append them to the cache
    ///
    /// Runs from the nightly scheduled job. The insert is unconditional: no
    /// check whether today already has a record, so repeated runs accumulate
    /// duplicate rows. A fetch or parse failure fails this call; there is no
    /// retry.
    #[instrument(skip(self))]
    pub async fn refresh_current(&self) -> Result<WeatherRecord, ApplicationError> {
        let observation = self.provider.current_observation().await?;
        let record = WeatherRecord::stamped_today(
            observation.condition,
            observation.icon,
            observation.temperature,
        );

        self.weather_store.insert(&record).await?;
        info!(date = %record.date, condition = %record.condition, "Weather cache refreshed");
        Ok(record)
    }
}
