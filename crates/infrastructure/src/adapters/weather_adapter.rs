//! Weather adapter - implements WeatherProviderPort using integration_weather

use application::error::ApplicationError;
use application::ports::{WeatherObservation, WeatherProviderPort};
use async_trait::async_trait;
use integration_weather::{
    OpenWeatherMapClient, WeatherApiConfig, WeatherApiError, parse_observation,
};
use tracing::{debug, instrument};

use crate::config::WeatherProviderConfig;

/// Adapter for the OpenWeatherMap API
///
/// Runs the fetch-then-parse pipeline: the client swallows transport failures
/// into a sentinel body, and the parse step is where such failures (and any
/// malformed payload) become errors.
pub struct OpenWeatherMapAdapter {
    client: OpenWeatherMapClient,
}

impl std::fmt::Debug for OpenWeatherMapAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherMapAdapter")
            .field("client", &"OpenWeatherMapClient")
            .finish()
    }
}

impl OpenWeatherMapAdapter {
    /// Create a new adapter from the application weather configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new(config: &WeatherProviderConfig) -> Result<Self, ApplicationError> {
        let client = OpenWeatherMapClient::new(WeatherApiConfig {
            base_url: config.base_url.clone(),
            city: config.city.clone(),
            api_key: config.api_key.clone(),
        })
        .map_err(|e| ApplicationError::Internal(e.to_string()))?;

        Ok(Self { client })
    }

    /// Map integration weather error to application error
    fn map_error(err: WeatherApiError) -> ApplicationError {
        match err {
            WeatherApiError::ConnectionFailed(e) => ApplicationError::Internal(e),
            WeatherApiError::ParseError(e) => {
                ApplicationError::ExternalService(format!("weather payload not parseable: {e}"))
            },
            WeatherApiError::EmptyConditions => ApplicationError::ExternalService(
                "weather payload contained no conditions".to_string(),
            ),
        }
    }
}

#[async_trait]
impl WeatherProviderPort for OpenWeatherMapAdapter {
    #[instrument(skip(self))]
    async fn current_observation(&self) -> Result<WeatherObservation, ApplicationError> {
        let raw = self.client.fetch_current_raw().await;
        let observation = parse_observation(&raw).map_err(Self::map_error)?;

        debug!(
            condition = %observation.condition,
            temperature = observation.temperature,
            "Retrieved current weather observation"
        );

        Ok(WeatherObservation {
            condition: observation.condition,
            icon: observation.icon,
            temperature: observation.temperature,
        })
    }
}
