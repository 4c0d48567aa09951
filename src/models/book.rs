use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::DomainError;

/// A stored catalog record
#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub name: String,
    pub year: i32,
    pub author: String,
    pub summary: String,
    pub publisher: String,
    pub page_count: u32,
    pub read_page: u32,
    /// Derived: `page_count == read_page`
    pub finished: bool,
    pub reading: bool,
    pub inserted_at: String,
    pub updated_at: String,
}

impl Book {
    /// Build a new record from validated input. Both timestamps are `now`.
    pub fn new(id: String, input: ValidatedBook, now: String) -> Self {
        let finished = input.is_finished();
        Self {
            id,
            name: input.name,
            year: input.year,
            author: input.author,
            summary: input.summary,
            publisher: input.publisher,
            page_count: input.page_count,
            read_page: input.read_page,
            finished,
            reading: input.reading,
            inserted_at: now.clone(),
            updated_at: now,
        }
    }

    /// Replace every caller-editable field, keeping `id` and `inserted_at`.
    pub fn apply(&mut self, input: ValidatedBook, now: String) {
        self.finished = input.is_finished();
        self.name = input.name;
        self.year = input.year;
        self.author = input.author;
        self.summary = input.summary;
        self.publisher = input.publisher;
        self.page_count = input.page_count;
        self.read_page = input.read_page;
        self.reading = input.reading;
        self.updated_at = now;
    }
}

/// Projection returned by list queries
#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
pub struct BookSummary {
    pub id: String,
    pub name: String,
    pub publisher: String,
}

impl From<&Book> for BookSummary {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.clone(),
            name: book.name.clone(),
            publisher: book.publisher.clone(),
        }
    }
}

/// Request body for create and update.
///
/// Only `name` and the page relation are validated; the remaining keys fall
/// back to their defaults when absent.
#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct BookPayload {
    pub name: Option<String>,
    pub year: i32,
    pub author: String,
    pub summary: String,
    pub publisher: String,
    pub page_count: u32,
    pub read_page: u32,
    pub reading: bool,
}

pub const NAME_REQUIRED: &str = "Please fill in the book name";
pub const READ_PAGE_EXCEEDS: &str = "readPage must not be greater than pageCount";

impl BookPayload {
    /// Check the write-time invariants. The name check runs first.
    pub fn validate(self) -> Result<ValidatedBook, DomainError> {
        let name = match self.name {
            Some(name) if !name.is_empty() => name,
            _ => return Err(DomainError::Validation(NAME_REQUIRED.to_string())),
        };

        if self.read_page > self.page_count {
            return Err(DomainError::Validation(READ_PAGE_EXCEEDS.to_string()));
        }

        Ok(ValidatedBook {
            name,
            year: self.year,
            author: self.author,
            summary: self.summary,
            publisher: self.publisher,
            page_count: self.page_count,
            read_page: self.read_page,
            reading: self.reading,
        })
    }
}

/// Payload that passed validation: non-empty name, `read_page <= page_count`
#[derive(Clone, Debug, PartialEq)]
pub struct ValidatedBook {
    pub name: String,
    pub year: i32,
    pub author: String,
    pub summary: String,
    pub publisher: String,
    pub page_count: u32,
    pub read_page: u32,
    pub reading: bool,
}

impl ValidatedBook {
    pub fn is_finished(&self) -> bool {
        self.page_count == self.read_page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: Option<&str>, page_count: u32, read_page: u32) -> BookPayload {
        BookPayload {
            name: name.map(str::to_string),
            page_count,
            read_page,
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_or_empty_name_is_rejected() {
        for p in [payload(None, 10, 0), payload(Some(""), 10, 0)] {
            assert_eq!(
                p.validate(),
                Err(DomainError::Validation(NAME_REQUIRED.to_string()))
            );
        }
    }

    #[test]
    fn test_name_is_checked_before_pages() {
        let err = payload(None, 1, 5).validate().unwrap_err();
        assert_eq!(err, DomainError::Validation(NAME_REQUIRED.to_string()));
    }

    #[test]
    fn test_read_page_over_page_count_is_rejected() {
        let err = payload(Some("Dune"), 10, 11).validate().unwrap_err();
        assert_eq!(err, DomainError::Validation(READ_PAGE_EXCEEDS.to_string()));
    }

    #[test]
    fn test_missing_keys_default() {
        let p: BookPayload = serde_json::from_str(r#"{"name":"Dune"}"#).unwrap();
        let valid = p.validate().unwrap();
        assert_eq!(valid.page_count, 0);
        assert!(valid.is_finished());
        assert!(!valid.reading);
    }

    #[test]
    fn test_apply_keeps_identity() {
        let input = payload(Some("Dune"), 500, 100).validate().unwrap();
        let mut book = Book::new("abc".to_string(), input, "t0".to_string());
        assert!(!book.finished);
        assert_eq!(book.inserted_at, book.updated_at);

        let edit = payload(Some("Dune Messiah"), 300, 300).validate().unwrap();
        book.apply(edit, "t1".to_string());

        assert_eq!(book.id, "abc");
        assert_eq!(book.inserted_at, "t0");
        assert_eq!(book.updated_at, "t1");
        assert_eq!(book.name, "Dune Messiah");
        assert!(book.finished);
    }

    #[test]
    fn test_serializes_camel_case() {
        let input = payload(Some("Dune"), 5, 5).validate().unwrap();
        let book = Book::new("abc".to_string(), input, "t0".to_string());
        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(json["pageCount"], 5);
        assert_eq!(json["readPage"], 5);
        assert_eq!(json["insertedAt"], "t0");
        assert_eq!(json["finished"], true);
    }
}
