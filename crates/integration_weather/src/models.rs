//! OpenWeatherMap response payload types and decoding

use serde::{Deserialize, Serialize};

use crate::client::WeatherApiError;

/// A decoded current-conditions observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    /// Short condition category (e.g. "Clear", "Rain")
    pub condition: String,
    /// Provider icon code (e.g. "01d")
    pub icon: String,
    /// Temperature in Kelvin, the provider's native unit
    pub temperature: f64,
}

/// Raw API payload; only the fields this system reads are modeled
#[derive(Debug, Deserialize)]
struct ApiPayload {
    main: MainData,
    #[serde(default)]
    weather: Vec<ConditionData>,
}

/// The `main` object carrying the temperature
#[derive(Debug, Deserialize)]
struct MainData {
    temp: f64,
}

/// One element of the `weather` array
#[derive(Debug, Deserialize)]
struct ConditionData {
    main: String,
    icon: String,
}

/// Decode a raw response body into an observation
///
/// Fails when the text is not valid JSON, when `main.temp` is absent, or when
/// the `weather` array is missing or empty; never returns a partially
/// populated observation. The client's transport-failure sentinel lands in
/// the not-valid-JSON branch by construction.
pub fn parse_observation(raw: &str) -> Result<WeatherObservation, WeatherApiError> {
    let payload: ApiPayload =
        serde_json::from_str(raw).map_err(|e| WeatherApiError::ParseError(e.to_string()))?;

    let first = payload
        .weather
        .into_iter()
        .next()
        .ok_or(WeatherApiError::EmptyConditions)?;

    Ok(WeatherObservation {
        condition: first.main,
        icon: first.icon,
        temperature: payload.main.temp,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::FETCH_FAILED_SENTINEL;

    fn sample_payload() -> String {
        serde_json::json!({
            "coord": {"lon": 126.9778, "lat": 37.5683},
            "weather": [
                {"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}
            ],
            "base": "stations",
            "main": {
                "temp": 293.55,
                "feels_like": 293.13,
                "temp_min": 292.15,
                "temp_max": 295.37,
                "pressure": 1016,
                "humidity": 60
            },
            "name": "Seoul"
        })
        .to_string()
    }

    #[test]
    fn parses_condition_icon_and_temperature() {
        let observation = parse_observation(&sample_payload()).unwrap();
        assert_eq!(observation.condition, "Clear");
        assert_eq!(observation.icon, "01d");
        assert!((observation.temperature - 293.55).abs() < f64::EPSILON);
    }

    #[test]
    fn uses_first_element_of_weather_array() {
        let raw = serde_json::json!({
            "weather": [
                {"main": "Rain", "icon": "10d"},
                {"main": "Mist", "icon": "50d"}
            ],
            "main": {"temp": 285.0}
        })
        .to_string();

        let observation = parse_observation(&raw).unwrap();
        assert_eq!(observation.condition, "Rain");
        assert_eq!(observation.icon, "10d");
    }

    #[test]
    fn fails_on_invalid_json() {
        let result = parse_observation("not json at all");
        assert!(matches!(result, Err(WeatherApiError::ParseError(_))));
    }

    #[test]
    fn fails_on_fetch_sentinel() {
        let result = parse_observation(FETCH_FAILED_SENTINEL);
        assert!(matches!(result, Err(WeatherApiError::ParseError(_))));
    }

    #[test]
    fn fails_on_missing_weather_array() {
        let raw = serde_json::json!({"main": {"temp": 290.0}}).to_string();
        let result = parse_observation(&raw);
        assert!(matches!(result, Err(WeatherApiError::EmptyConditions)));
    }

    #[test]
    fn fails_on_empty_weather_array() {
        let raw = serde_json::json!({"weather": [], "main": {"temp": 290.0}}).to_string();
        let result = parse_observation(&raw);
        assert!(matches!(result, Err(WeatherApiError::EmptyConditions)));
    }

    #[test]
    fn fails_on_missing_temp() {
        let raw = serde_json::json!({
            "weather": [{"main": "Clear", "icon": "01d"}],
            "main": {"humidity": 60}
        })
        .to_string();
        let result = parse_observation(&raw);
        assert!(matches!(result, Err(WeatherApiError::ParseError(_))));
    }

    #[test]
    fn fails_on_missing_main_object() {
        let raw = serde_json::json!({
            "weather": [{"main": "Clear", "icon": "01d"}]
        })
        .to_string();
        let result = parse_observation(&raw);
        assert!(matches!(result, Err(WeatherApiError::ParseError(_))));
    }

    #[test]
    fn observation_serialization_roundtrip() {
        let observation = WeatherObservation {
            condition: "Snow".to_string(),
            icon: "13d".to_string(),
            temperature: 263.15,
        };
        let json = serde_json::to_string(&observation).unwrap();
        let back: WeatherObservation = serde_json::from_str(&json).unwrap();
        assert_eq!(observation, back);
    }
}
