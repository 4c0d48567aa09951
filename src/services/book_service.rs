//! Book Service - Pure business logic without HTTP layer
//!
//! This module contains all catalog operations extracted from Axum handlers.
//! Every function works against an injected `BookRepository`.

use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};

use crate::domain::{BookFilter, BookRepository, DomainError};
use crate::models::{Book, BookPayload, BookSummary};
use crate::utils::id::generate_id;

/// Fresh ids drawn before an insert is reported as failed
const MAX_ID_ATTEMPTS: usize = 5;

/// Current time as RFC 3339 UTC with millisecond precision
pub fn timestamp() -> String {
    format_timestamp(Utc::now())
}

/// A timestamp strictly later than `previous` at millisecond precision.
///
/// When the clock has not moved past `previous` yet, `previous + 1ms` is used.
pub fn next_timestamp(previous: &str) -> String {
    let now = Utc::now();
    match DateTime::parse_from_rfc3339(previous) {
        Ok(prev) if now.timestamp_millis() <= prev.timestamp_millis() => {
            format_timestamp(prev.with_timezone(&Utc) + TimeDelta::milliseconds(1))
        }
        _ => format_timestamp(now),
    }
}

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Create a new book and return its generated id
pub async fn create_book(
    repo: &dyn BookRepository,
    payload: BookPayload,
) -> Result<String, DomainError> {
    let input = payload.validate().inspect_err(|e| {
        tracing::warn!("Rejected new book: {}", e);
    })?;

    let now = timestamp();

    for _ in 0..MAX_ID_ATTEMPTS {
        let book = Book::new(generate_id(), input.clone(), now.clone());
        let id = book.id.clone();

        match repo.create(book).await {
            Ok(_) => {}
            Err(DomainError::Conflict(msg)) => {
                tracing::warn!("Generated id collided, retrying: {}", msg);
                continue;
            }
            Err(e) => return Err(e),
        }

        if !repo.exists(&id).await? {
            tracing::error!("Book {} missing right after insert", id);
            return Err(DomainError::Internal("Book was not stored".to_string()));
        }

        tracing::info!("Added book {} ({})", id, input.name);
        return Ok(id);
    }

    Err(DomainError::Internal(
        "Could not allocate a unique book id".to_string(),
    ))
}

/// List book summaries matching the filter, in insertion order
pub async fn list_books(
    repo: &dyn BookRepository,
    filter: BookFilter,
) -> Result<Vec<BookSummary>, DomainError> {
    tracing::debug!("List books - Filter: {:?}", filter);

    let books = repo.find_all(&filter).await?;

    tracing::debug!("Returning {} books after filters", books.len());
    Ok(books.iter().map(BookSummary::from).collect())
}

/// Get a single book by ID
pub async fn get_book(repo: &dyn BookRepository, id: &str) -> Result<Book, DomainError> {
    repo.find_by_id(id).await?.ok_or(DomainError::NotFound)
}

/// Replace an existing book. Validation runs before the lookup.
pub async fn update_book(
    repo: &dyn BookRepository,
    id: &str,
    payload: BookPayload,
) -> Result<Book, DomainError> {
    let input = payload.validate().inspect_err(|e| {
        tracing::warn!("Rejected update of book {}: {}", id, e);
    })?;

    let mut book = repo.find_by_id(id).await?.ok_or(DomainError::NotFound)?;
    let updated_at = next_timestamp(&book.updated_at);
    book.apply(input, updated_at);

    let book = repo.update(id, book).await?;
    tracing::info!("Updated book {}", id);
    Ok(book)
}

/// Delete a book by ID
pub async fn delete_book(repo: &dyn BookRepository, id: &str) -> Result<(), DomainError> {
    repo.delete(id).await?;
    tracing::info!("Deleted book {}", id);
    Ok(())
}
