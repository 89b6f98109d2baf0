//! OpenWeatherMap HTTP client
//!
//! One fixed-location GET per call. The raw body is handed back as-is; any
//! transport failure collapses to [`FETCH_FAILED_SENTINEL`], which is not
//! valid JSON and therefore fails in the parser rather than here.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Fixed sentinel returned in place of a body when the request cannot be
/// completed at the transport level. Deliberately not valid JSON.
pub const FETCH_FAILED_SENTINEL: &str = "failed to get response";

/// Weather client errors
#[derive(Debug, Error)]
pub enum WeatherApiError {
    /// HTTP client could not be initialized
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Response body was not valid JSON
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Payload decoded but carried no weather conditions
    #[error("Weather payload contained no conditions")]
    EmptyConditions,
}

/// Weather API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherApiConfig {
    /// OpenWeatherMap API base URL (default: <https://api.openweathermap.org/data/2.5>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// City queried for every request (default: seoul)
    #[serde(default = "default_city")]
    pub city: String,

    /// API key, provisioned at startup and never mutated afterwards
    #[serde(default)]
    pub api_key: String,
}

fn default_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_city() -> String {
    "seoul".to_string()
}

impl Default for WeatherApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            city: default_city(),
            api_key: String::new(),
        }
    }
}

/// OpenWeatherMap HTTP client
#[derive(Debug, Clone)]
pub struct OpenWeatherMapClient {
    client: Client,
    config: WeatherApiConfig,
}

impl OpenWeatherMapClient {
    /// Create a new client with the given configuration
    ///
    /// No request timeout is configured: a slow provider blocks the caller
    /// for as long as it takes.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: WeatherApiConfig) -> Result<Self, WeatherApiError> {
        let client = Client::builder()
            .build()
            .map_err(|e| WeatherApiError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Build the current-weather URL for the configured city and key
    fn build_current_url(&self) -> String {
        format!(
            "{}/weather?q={}&appid={}",
            self.config.base_url, self.config.city, self.config.api_key
        )
    }

    /// Fetch the raw current-weather response body
    ///
    /// The body is read whatever the HTTP status is: a 401 or 500 error body
    /// comes back just like a 200 body, and it is the parser's job to reject
    /// it. Transport failures (refused connection, I/O error, unreadable
    /// body) return [`FETCH_FAILED_SENTINEL`] instead of propagating.
    #[instrument(skip(self))]
    pub async fn fetch_current_raw(&self) -> String {
        let url = self.build_current_url();
        debug!(city = %self.config.city, "Fetching current weather");

        match self.client.get(&url).send().await {
            Ok(response) => {
                let status = response.status();
                match response.text().await {
                    Ok(body) => {
                        debug!(status = %status, bytes = body.len(), "Weather response received");
                        body
                    },
                    Err(e) => {
                        warn!(error = %e, "Failed to read weather response body");
                        FETCH_FAILED_SENTINEL.to_string()
                    },
                }
            },
            Err(e) => {
                warn!(error = %e, "Weather request failed");
                FETCH_FAILED_SENTINEL.to_string()
            },
        }
    }
}
