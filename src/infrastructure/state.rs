//! Application state containing repositories and shared resources

use std::sync::Arc;

use crate::domain::BookRepository;
use crate::infrastructure::InMemoryBookRepository;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Book repository
    pub book_repo: Arc<dyn BookRepository>,
}

impl AppState {
    /// Create a new AppState backed by an empty in-memory catalog
    pub fn new() -> Self {
        Self::with_repository(Arc::new(InMemoryBookRepository::new()))
    }

    /// Create an AppState around an existing repository
    pub fn with_repository(book_repo: Arc<dyn BookRepository>) -> Self {
        Self { book_repo }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
