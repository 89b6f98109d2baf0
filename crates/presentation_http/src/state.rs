//! Application state shared across handlers

use std::sync::Arc;

use application::DiaryService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Diary service for CRUD orchestration
    pub diary_service: Arc<DiaryService>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
