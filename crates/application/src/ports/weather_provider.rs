//! Weather provider port
//!
//! Defines the interface for fetching current conditions from the outbound
//! weather API. The provider knows nothing about dates: it reports what the
//! sky looks like right now, and callers decide how to label it.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// A current-conditions observation as reported by the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    /// Short condition category (e.g. "Clear", "Rain")
    pub condition: String,
    /// Provider-specific icon code
    pub icon: String,
    /// Temperature in the provider's native unit (Kelvin)
    pub temperature: f64,
}

/// Port for the outbound weather provider
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherProviderPort: Send + Sync {
    /// Fetch and decode the provider's current conditions
    ///
    /// One synchronous round-trip, no retry. Transport failures and malformed
    /// payloads both surface as errors here; callers treat them as aborting
    /// the operation in progress.
    async fn current_observation(&self) -> Result<WeatherObservation, ApplicationError>;
}
