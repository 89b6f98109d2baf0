//! Route definitions

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoint
        .route("/health", get(handlers::health::health_check))
        // Diary API
        .route("/create/diary", post(handlers::diary::create_diary))
        .route("/read/diary", get(handlers::diary::read_diary))
        .route("/read/diaries", get(handlers::diary::read_diaries))
        .route("/update/diary", put(handlers::diary::update_diary))
        .route("/delete/diary", delete(handlers::diary::delete_diary))
        // Attach state
        .with_state(state)
}
