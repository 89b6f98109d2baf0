//! Infrastructure layer for Weather Diary
//!
//! Implements the application ports: configuration loading, SQLite
//! persistence, the OpenWeatherMap provider adapter, and the cron scheduler
//! that drives the nightly weather refresh.

pub mod adapters;
pub mod config;
pub mod persistence;
pub mod scheduled_tasks;
pub mod scheduler;

pub use adapters::OpenWeatherMapAdapter;
pub use config::{AppConfig, DatabaseConfig, ServerConfig, WeatherProviderConfig};
pub use persistence::{
    ConnectionPool, DatabaseError, SqliteDiaryStore, SqliteWeatherStore, create_pool,
};
pub use scheduled_tasks::{WEATHER_REFRESH_TASK, create_weather_refresh_task};
pub use scheduler::{SchedulerConfig, SchedulerError, TaskScheduler, schedules};
