//! End-to-end tests for the HTTP handlers
//!
//! Each test runs the real router over an in-memory SQLite database, with a
//! wiremock server standing in for OpenWeatherMap.
#![allow(clippy::expect_used)]

use std::sync::Arc;

use application::ports::{DiaryStorePort, WeatherStorePort};
use application::{DiaryService, WeatherService};
use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::{Local, NaiveDate};
use domain::entities::WeatherRecord;
use infrastructure::{
    DatabaseConfig, OpenWeatherMapAdapter, SqliteDiaryStore, SqliteWeatherStore,
    WeatherProviderConfig, create_pool,
};
use presentation_http::{routes::create_router, state::AppState};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sample_weather_response() -> serde_json::Value {
    serde_json::json!({
        "weather": [
            {"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}
        ],
        "main": {"temp": 293.55, "pressure": 1016, "humidity": 60},
        "name": "Seoul"
    })
}

struct TestApp {
    server: TestServer,
    weather_store: Arc<SqliteWeatherStore>,
    _mock_server: MockServer,
}

/// Spin up the full stack with the given weather API behavior
async fn spawn_app_with(mock: Mock) -> TestApp {
    let mock_server = MockServer::start().await;
    mock.mount(&mock_server).await;

    let config = DatabaseConfig {
        path: ":memory:".to_string(),
        max_connections: 1,
        run_migrations: true,
    };
    let pool = Arc::new(create_pool(&config).expect("pool"));

    let diary_store = Arc::new(SqliteDiaryStore::new(Arc::clone(&pool)));
    let weather_store = Arc::new(SqliteWeatherStore::new(pool));

    let adapter = OpenWeatherMapAdapter::new(&WeatherProviderConfig {
        api_key: "test-key".to_string(),
        base_url: mock_server.uri(),
        ..Default::default()
    })
    .expect("adapter");

    let weather_service = Arc::new(WeatherService::new(
        Arc::clone(&weather_store) as Arc<dyn WeatherStorePort>,
        Arc::new(adapter),
    ));
    let diary_service = Arc::new(DiaryService::new(
        diary_store as Arc<dyn DiaryStorePort>,
        weather_service,
    ));

    let app = create_router(AppState { diary_service });
    let server = TestServer::new(app).expect("test server");

    TestApp {
        server,
        weather_store,
        _mock_server: mock_server,
    }
}

/// Stack with a healthy weather API
async fn spawn_app() -> TestApp {
    spawn_app_with(
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample_weather_response())),
    )
    .await
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let app = spawn_app().await;

    let response = app.server.get("/health").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn create_then_read_roundtrip() {
    let app = spawn_app().await;

    let create = app
        .server
        .post("/create/diary")
        .add_query_param("date", "2024-09-25")
        .text("wrote integration tests")
        .await;
    create.assert_status_ok();

    let read = app
        .server
        .get("/read/diary")
        .add_query_param("date", "2024-09-25")
        .await;
    read.assert_status_ok();

    let entries: serde_json::Value = read.json();
    let list = entries.as_array().expect("array");
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["text"], "wrote integration tests");
    assert_eq!(list[0]["date"], "2024-09-25");
    assert_eq!(list[0]["weather"]["condition"], "Clear");
}

#[tokio::test]
async fn create_prefers_cached_weather_over_live_fetch() {
    // The weather API would fail if called; the cached record must win.
    let app = spawn_app_with(
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(0),
    )
    .await;

    let target = date(2024, 9, 25);
    app.weather_store
        .insert(&WeatherRecord::new(target, "Rain", "10d", 285.0))
        .await
        .expect("insert");

    let create = app
        .server
        .post("/create/diary")
        .add_query_param("date", "2024-09-25")
        .text("under an umbrella")
        .await;
    create.assert_status_ok();

    let read = app
        .server
        .get("/read/diary")
        .add_query_param("date", "2024-09-25")
        .await;
    let entries: serde_json::Value = read.json();
    assert_eq!(entries[0]["weather"]["condition"], "Rain");
}

#[tokio::test]
async fn create_for_uncached_date_labels_weather_today() {
    let app = spawn_app().await;

    let create = app
        .server
        .post("/create/diary")
        .add_query_param("date", "2019-06-01")
        .text("backfilled")
        .await;
    create.assert_status_ok();

    let read = app
        .server
        .get("/read/diary")
        .add_query_param("date", "2019-06-01")
        .await;
    let entries: serde_json::Value = read.json();
    assert_eq!(entries[0]["date"], "2019-06-01");
    assert_eq!(
        entries[0]["weather"]["date"],
        Local::now().date_naive().to_string()
    );
}

#[tokio::test]
async fn create_fails_when_weather_api_unusable() {
    let app = spawn_app_with(
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error")),
    )
    .await;

    let create = app
        .server
        .post("/create/diary")
        .add_query_param("date", "2024-09-25")
        .text("doomed")
        .await;
    assert!(create.status_code().is_server_error());

    // No partial write
    let read = app
        .server
        .get("/read/diary")
        .add_query_param("date", "2024-09-25")
        .await;
    let entries: serde_json::Value = read.json();
    assert!(entries.as_array().expect("array").is_empty());
}

#[tokio::test]
async fn range_read_includes_bounds_and_excludes_neighbors() {
    let app = spawn_app().await;

    for (d, text) in [
        ("2024-09-09", "before"),
        ("2024-09-10", "on start"),
        ("2024-09-15", "inside"),
        ("2024-09-20", "on end"),
        ("2024-09-21", "after"),
    ] {
        app.server
            .post("/create/diary")
            .add_query_param("date", d)
            .text(text)
            .await
            .assert_status_ok();
    }

    let read = app
        .server
        .get("/read/diaries")
        .add_query_param("startDate", "2024-09-10")
        .add_query_param("endDate", "2024-09-20")
        .await;
    read.assert_status_ok();

    let entries: serde_json::Value = read.json();
    let texts: Vec<&str> = entries
        .as_array()
        .expect("array")
        .iter()
        .map(|e| e["text"].as_str().expect("text"))
        .collect();
    assert_eq!(texts, vec!["on start", "inside", "on end"]);
}

#[tokio::test]
async fn update_rewrites_text_and_keeps_weather() {
    let app = spawn_app().await;

    app.server
        .post("/create/diary")
        .add_query_param("date", "2024-09-25")
        .text("draft")
        .await
        .assert_status_ok();

    let update = app
        .server
        .put("/update/diary")
        .add_query_param("date", "2024-09-25")
        .text("final")
        .await;
    update.assert_status_ok();

    let read = app
        .server
        .get("/read/diary")
        .add_query_param("date", "2024-09-25")
        .await;
    let entries: serde_json::Value = read.json();
    assert_eq!(entries[0]["text"], "final");
    assert_eq!(entries[0]["weather"]["condition"], "Clear");
}

#[tokio::test]
async fn update_missing_date_is_a_server_error() {
    let app = spawn_app().await;

    let update = app
        .server
        .put("/update/diary")
        .add_query_param("date", "2024-09-25")
        .text("nothing to update")
        .await;

    // No 404 here: a missing entry surfaces as a generic server failure
    update.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn delete_removes_all_entries_for_date() {
    let app = spawn_app().await;

    for text in ["one", "two"] {
        app.server
            .post("/create/diary")
            .add_query_param("date", "2024-09-25")
            .text(text)
            .await
            .assert_status_ok();
    }

    app.server
        .delete("/delete/diary")
        .add_query_param("date", "2024-09-25")
        .await
        .assert_status_ok();

    let read = app
        .server
        .get("/read/diary")
        .add_query_param("date", "2024-09-25")
        .await;
    let entries: serde_json::Value = read.json();
    assert!(entries.as_array().expect("array").is_empty());
}

#[tokio::test]
async fn delete_on_empty_date_succeeds() {
    let app = spawn_app().await;

    app.server
        .delete("/delete/diary")
        .add_query_param("date", "2024-09-25")
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn malformed_date_is_rejected() {
    let app = spawn_app().await;

    let response = app
        .server
        .get("/read/diary")
        .add_query_param("date", "not-a-date")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_date_parameter_is_rejected() {
    let app = spawn_app().await;

    let response = app.server.get("/read/diary").await;
    response.assert_status(StatusCode::BAD_REQUEST);
}
