//! OpenWeatherMap weather integration
//!
//! Client for the OpenWeatherMap current-weather API
//! (<https://openweathermap.org/current>). Fetching and decoding are split:
//! the client returns raw response text (with a fixed sentinel on transport
//! failure), and the parser turns that text into an observation.

pub mod client;
mod models;

pub use client::{FETCH_FAILED_SENTINEL, OpenWeatherMapClient, WeatherApiConfig, WeatherApiError};
pub use models::{WeatherObservation, parse_observation};
