//! SQLite persistence layer

mod connection;
mod diary_store;
mod migrations;
mod weather_store;

pub use connection::{ConnectionPool, DatabaseError, PooledConn, create_pool};
pub use diary_store::SqliteDiaryStore;
pub use migrations::run_migrations;
pub use weather_store::SqliteWeatherStore;
