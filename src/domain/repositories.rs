//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.

use async_trait::async_trait;
use regex::{Regex, RegexBuilder};

use super::DomainError;
use crate::models::book::Book;

/// Filter criteria for book listings.
///
/// Only one criterion applies per query. When several query parameters are
/// supplied, `name` wins over `reading`, which wins over `finished`.
#[derive(Debug, Default, Clone)]
pub enum BookFilter {
    #[default]
    All,
    /// Case-insensitive pattern match on the book name. `None` when the
    /// query could not be compiled even as a literal.
    Name(Option<Regex>),
    /// Numeric comparison against `reading` as 0/1
    Reading(Option<f64>),
    /// Numeric comparison against `finished` as 0/1
    Finished(Option<f64>),
}

impl BookFilter {
    /// Build a filter from raw query values. Empty values count as absent.
    pub fn from_query(name: Option<&str>, reading: Option<&str>, finished: Option<&str>) -> Self {
        let present = |v: Option<&str>| v.filter(|s| !s.is_empty()).map(str::to_owned);

        if let Some(name) = present(name) {
            return BookFilter::Name(name_pattern(&name));
        }
        if let Some(reading) = present(reading) {
            return BookFilter::Reading(coerce_number(&reading));
        }
        if let Some(finished) = present(finished) {
            return BookFilter::Finished(coerce_number(&finished));
        }
        BookFilter::All
    }

    pub fn matches(&self, book: &Book) -> bool {
        match self {
            BookFilter::All => true,
            BookFilter::Name(pattern) => pattern.as_ref().is_some_and(|p| p.is_match(&book.name)),
            BookFilter::Reading(value) => *value == Some(flag_value(book.reading)),
            BookFilter::Finished(value) => *value == Some(flag_value(book.finished)),
        }
    }
}

/// Compile the name query as a case-insensitive regex, falling back to a
/// literal match when the query is not a valid pattern.
fn name_pattern(query: &str) -> Option<Regex> {
    RegexBuilder::new(query)
        .case_insensitive(true)
        .build()
        .or_else(|_| {
            RegexBuilder::new(&regex::escape(query))
                .case_insensitive(true)
                .build()
        })
        .ok()
}

/// Numeric coercion of a query flag: whitespace-only is zero, unsigned
/// `0x`/`0o`/`0b` literals are read in their radix, anything else that does
/// not parse as a decimal number matches nothing.
fn coerce_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }

    let radix = match trimmed.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return u64::from_str_radix(&trimmed[2..], radix)
            .ok()
            .map(|v| v as f64);
    }

    trimmed.parse::<f64>().ok().filter(|v| !v.is_nan())
}

fn flag_value(flag: bool) -> f64 {
    if flag { 1.0 } else { 0.0 }
}

/// Repository trait for Book entity
///
/// Implementations keep records in insertion order.
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Find all books matching the filter, in insertion order
    async fn find_all(&self, filter: &BookFilter) -> Result<Vec<Book>, DomainError>;

    /// Find a single book by ID
    async fn find_by_id(&self, id: &str) -> Result<Option<Book>, DomainError>;

    /// Whether a book with this ID is stored
    async fn exists(&self, id: &str) -> Result<bool, DomainError>;

    /// Append a new book. Fails with `Conflict` if the ID is taken.
    async fn create(&self, book: Book) -> Result<Book, DomainError>;

    /// Replace an existing book
    async fn update(&self, id: &str, book: Book) -> Result<Book, DomainError>;

    /// Delete a book by ID
    async fn delete(&self, id: &str) -> Result<(), DomainError>;
}
