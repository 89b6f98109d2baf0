//! Factory functions for scheduled tasks
//!
//! Provides the pre-built task closure for the nightly weather cache refresh.

use std::sync::Arc;

use application::WeatherService;
use futures::future::BoxFuture;
use tracing::{debug, error, info};

/// Task name for the weather cache refresh
pub const WEATHER_REFRESH_TASK: &str = "weather_refresh";

/// Create the weather refresh task closure
///
/// Each firing fetches current conditions and appends them to the weather
/// cache, without checking whether a record for the day already exists.
/// A failed fetch fails the run; the next attempt is the next firing.
pub fn create_weather_refresh_task(
    weather_service: Arc<WeatherService>,
) -> impl Fn() -> BoxFuture<'static, Result<(), String>> + Send + Sync + 'static {
    move || {
        let service = Arc::clone(&weather_service);

        Box::pin(async move {
            debug!("Refreshing weather cache");

            match service.refresh_current().await {
                Ok(record) => {
                    info!(
                        date = %record.date,
                        condition = %record.condition,
                        "Weather cache refresh complete"
                    );
                    Ok(())
                },
                Err(e) => {
                    error!(error = %e, "Weather cache refresh failed");
                    Err(format!("Weather refresh failed: {e}"))
                },
            }
        })
    }
}
