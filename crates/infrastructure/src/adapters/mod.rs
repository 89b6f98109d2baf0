//! Adapters implementing application ports over external systems

mod weather_adapter;

pub use weather_adapter::OpenWeatherMapAdapter;
