//! Diary CRUD handlers
//!
//! All operations are keyed by calendar date, passed as an ISO-8601 query
//! parameter; create and update carry the entry text as a raw request body.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use chrono::{DateTime, NaiveDate, Utc};
use domain::entities::{DiaryEntry, WeatherRecord};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

/// Query parameters carrying a single date
#[derive(Debug, Deserialize)]
pub struct DateQuery {
    /// ISO-8601 date, e.g. 2024-09-25
    pub date: NaiveDate,
}

/// Query parameters carrying a date range
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeQuery {
    /// First day of the range (inclusive)
    pub start_date: NaiveDate,
    /// Last day of the range (inclusive)
    pub end_date: NaiveDate,
}

/// Weather snapshot in responses
#[derive(Debug, Serialize)]
pub struct WeatherData {
    /// Day the snapshot is labeled with
    pub date: NaiveDate,
    /// Condition category
    pub condition: String,
    /// Provider icon code
    pub icon: String,
    /// Temperature in Kelvin
    pub temperature: f64,
}

impl From<WeatherRecord> for WeatherData {
    fn from(record: WeatherRecord) -> Self {
        Self {
            date: record.date,
            condition: record.condition,
            icon: record.icon,
            temperature: record.temperature,
        }
    }
}

/// Diary entry in responses
#[derive(Debug, Serialize)]
pub struct DiaryEntryResponse {
    /// Entry identifier
    pub id: String,
    /// Day the entry was written about
    pub date: NaiveDate,
    /// Entry content
    pub text: String,
    /// Weather snapshot fixed at creation time
    pub weather: WeatherData,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<DiaryEntry> for DiaryEntryResponse {
    fn from(entry: DiaryEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            date: entry.date,
            text: entry.text,
            weather: WeatherData::from(entry.weather),
            created_at: entry.created_at,
        }
    }
}

/// Create a diary entry
///
/// POST /create/diary?date=YYYY-MM-DD (body: raw text)
#[instrument(skip(state, text), fields(date = %query.date))]
pub async fn create_diary(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
    text: String,
) -> Result<StatusCode, ApiError> {
    state.diary_service.create_diary(query.date, &text).await?;
    Ok(StatusCode::OK)
}

/// Read all diary entries for one date
///
/// GET /read/diary?date=YYYY-MM-DD
#[instrument(skip(state), fields(date = %query.date))]
pub async fn read_diary(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<Vec<DiaryEntryResponse>>, ApiError> {
    let entries = state.diary_service.read_diary(query.date).await?;
    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

/// Read all diary entries within an inclusive date range
///
/// GET /read/diaries?startDate=YYYY-MM-DD&endDate=YYYY-MM-DD
#[instrument(skip(state), fields(start = %query.start_date, end = %query.end_date))]
pub async fn read_diaries(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<Vec<DiaryEntryResponse>>, ApiError> {
    let entries = state
        .diary_service
        .read_diaries(query.start_date, query.end_date)
        .await?;
    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

/// Update the first diary entry for a date
///
/// PUT /update/diary?date=YYYY-MM-DD (body: raw text)
#[instrument(skip(state, text), fields(date = %query.date))]
pub async fn update_diary(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
    text: String,
) -> Result<StatusCode, ApiError> {
    state.diary_service.update_diary(query.date, &text).await?;
    Ok(StatusCode::OK)
}

/// Delete all diary entries for a date
///
/// DELETE /delete/diary?date=YYYY-MM-DD
#[instrument(skip(state), fields(date = %query.date))]
pub async fn delete_diary(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<StatusCode, ApiError> {
    state.diary_service.delete_diary(query.date).await?;
    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn date_query_parses_iso_date() {
        let query: DateQuery = serde_json::from_str(r#"{"date":"2024-09-25"}"#).unwrap();
        assert_eq!(query.date, date(2024, 9, 25));
    }

    #[test]
    fn date_query_rejects_garbage() {
        assert!(serde_json::from_str::<DateQuery>(r#"{"date":"yesterday"}"#).is_err());
    }

    #[test]
    fn range_query_uses_camel_case_names() {
        let query: RangeQuery =
            serde_json::from_str(r#"{"startDate":"2024-09-01","endDate":"2024-09-30"}"#).unwrap();
        assert_eq!(query.start_date, date(2024, 9, 1));
        assert_eq!(query.end_date, date(2024, 9, 30));
    }

    #[test]
    fn diary_entry_response_from_entry() {
        let weather = WeatherRecord::new(date(2024, 9, 25), "Clear", "01d", 293.15);
        let entry = DiaryEntry::new(date(2024, 9, 25), "a fine day", weather);
        let id = entry.id.to_string();

        let response = DiaryEntryResponse::from(entry);
        assert_eq!(response.id, id);
        assert_eq!(response.text, "a fine day");
        assert_eq!(response.weather.condition, "Clear");
        assert!((response.weather.temperature - 293.15).abs() < 0.001);
    }

    #[test]
    fn response_serialization_shape() {
        let weather = WeatherRecord::new(date(2024, 9, 25), "Rain", "10d", 285.0);
        let entry = DiaryEntry::new(date(2024, 9, 25), "rainy", weather);
        let response = DiaryEntryResponse::from(entry);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["date"], "2024-09-25");
        assert_eq!(json["text"], "rainy");
        assert_eq!(json["weather"]["condition"], "Rain");
        assert_eq!(json["weather"]["icon"], "10d");
    }
}
