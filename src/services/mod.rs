//! Services Layer
//!
//! This module contains pure business logic extracted from HTTP handlers.

pub mod book_service;

// Re-export for convenience
pub use book_service::*;
