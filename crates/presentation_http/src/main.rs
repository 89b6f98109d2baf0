//! Weather Diary HTTP Server
//!
//! Main entry point for the HTTP API server.

use std::{sync::Arc, time::Duration};

use application::{DiaryService, WeatherService};
use application::ports::{DiaryStorePort, WeatherStorePort};
use infrastructure::{
    AppConfig, OpenWeatherMapAdapter, SchedulerConfig, SqliteDiaryStore, SqliteWeatherStore,
    TaskScheduler, WEATHER_REFRESH_TASK, create_pool, create_weather_refresh_task,
};
use presentation_http::{routes, state::AppState};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weatherdiary=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Weather Diary v{} starting...", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {}", e);
        AppConfig::default()
    });

    info!(
        host = %config.server.host,
        port = %config.server.port,
        city = %config.weather.city,
        "Configuration loaded"
    );

    // Initialize persistence
    let pool = Arc::new(create_pool(&config.database)?);
    let diary_store: Arc<dyn DiaryStorePort> = Arc::new(SqliteDiaryStore::new(Arc::clone(&pool)));
    let weather_store: Arc<dyn WeatherStorePort> = Arc::new(SqliteWeatherStore::new(pool));

    // Initialize the weather provider
    let weather_adapter = OpenWeatherMapAdapter::new(&config.weather)
        .map_err(|e| anyhow::anyhow!("Failed to initialize weather provider: {e}"))?;

    // Initialize services
    let weather_service = Arc::new(WeatherService::new(weather_store, Arc::new(weather_adapter)));
    let diary_service = Arc::new(DiaryService::new(
        diary_store,
        Arc::clone(&weather_service),
    ));

    // Schedule the nightly weather cache refresh
    let scheduler = TaskScheduler::new(SchedulerConfig::default())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to start scheduler: {e}"))?;
    scheduler
        .add_task(
            WEATHER_REFRESH_TASK,
            &config.weather.refresh_cron,
            create_weather_refresh_task(Arc::clone(&weather_service)),
        )
        .await
        .map_err(|e| anyhow::anyhow!("Failed to schedule weather refresh: {e}"))?;

    // Create app state and build router
    let state = AppState { diary_service };
    let app = routes::create_router(state);

    // Configure CORS layer
    let cors_layer = if config.server.allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use axum::http::{HeaderValue, Method};
        let origins: Vec<HeaderValue> = config
            .server
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers(Any)
    };

    // Add middleware (order matters: first added = outermost)
    let app = app.layer(TraceLayer::new_for_http()).layer(cors_layer);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;

    info!("Server listening on http://{}", addr);

    // Graceful shutdown configuration
    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs.unwrap_or(30));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    if let Err(e) = scheduler.stop().await {
        tracing::warn!("Scheduler shutdown failed: {}", e);
    }

    info!("Server shutdown complete");

    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM) and handle graceful shutdown
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        // Log error but continue waiting - this is a best-effort signal handler
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }

    info!("Waiting up to {:?} for connections to close...", timeout);
    // The actual connection draining is handled by axum's graceful_shutdown
}
