//! Database migrations
//!
//! Manages database schema versioning and migrations.
//!
//! ## Migration Files
//!
//! SQL migration files are stored in the `/migrations` directory at the
//! project root. These files serve as documentation and can be used for
//! manual database setup. The actual migration code is embedded in this
//! module for runtime execution.
//!
//! ## Adding New Migrations
//!
//! 1. Create a new SQL file: `migrations/VXXX__description.sql`
//! 2. Increment `SCHEMA_VERSION` constant
//! 3. Add a new `migrate_vX` function
//! 4. Update `run_migrations` to call the new function

use rusqlite::Connection;
use tracing::{debug, error, info};

use super::connection::DatabaseError;

/// Current schema version
const SCHEMA_VERSION: i32 = 1;

/// Run all pending migrations
pub fn run_migrations(conn: &Connection) -> Result<(), DatabaseError> {
    let current_version = get_schema_version(conn)?;

    if current_version < SCHEMA_VERSION {
        info!(
            from_version = current_version,
            to_version = SCHEMA_VERSION,
            "Running database migrations"
        );

        if current_version < 1 {
            if let Err(e) = migrate_v1(conn) {
                error!(
                    version = 1,
                    error = %e,
                    "Migration V001 (initial schema) failed. Check migrations/V001__initial_schema.sql for the expected schema."
                );
                return Err(e);
            }
        }

        set_schema_version(conn, SCHEMA_VERSION)?;
        info!(version = SCHEMA_VERSION, "Database migrations complete");
    } else {
        debug!(version = current_version, "Database schema is up to date");
    }

    Ok(())
}

/// Get current schema version
fn get_schema_version(conn: &Connection) -> Result<i32, DatabaseError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        )",
        [],
    )?;

    let version: i32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);

    Ok(version)
}

/// Set schema version
fn set_schema_version(conn: &Connection, version: i32) -> Result<(), DatabaseError> {
    conn.execute("DELETE FROM schema_version", [])?;
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    Ok(())
}

/// Migration to version 1: Initial schema
/// See: migrations/V001__initial_schema.sql
fn migrate_v1(conn: &Connection) -> Result<(), DatabaseError> {
    debug!("Applying migration V001: Initial schema");

    conn.execute_batch(
        "
        -- Per-day weather cache. No uniqueness on date: the nightly refresh
        -- inserts unconditionally and duplicate rows per day are expected.
        CREATE TABLE IF NOT EXISTS weather_records (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT NOT NULL,
            condition TEXT NOT NULL,
            icon TEXT NOT NULL,
            temperature REAL NOT NULL
        );

        -- Diary entries. The weather snapshot is embedded because the
        -- resolver's live fallback is never written to weather_records.
        CREATE TABLE IF NOT EXISTS diary_entries (
            id TEXT PRIMARY KEY,
            date TEXT NOT NULL,
            text TEXT NOT NULL,
            weather_date TEXT NOT NULL,
            weather_condition TEXT NOT NULL,
            weather_icon TEXT NOT NULL,
            weather_temperature REAL NOT NULL,
            created_at TEXT NOT NULL
        );

        -- Indexes
        CREATE INDEX IF NOT EXISTS idx_weather_records_date ON weather_records(date);
        CREATE INDEX IF NOT EXISTS idx_diary_entries_date ON diary_entries(date);
        ",
    )?;

    Ok(())
}
