//! Book API handlers using the repository pattern

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::Response,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::IntoParams;

use crate::api::response::{Envelope, fail, success};
use crate::domain::{BookFilter, DomainError};
use crate::infrastructure::AppState;
use crate::models::BookPayload;
use crate::services::book_service;

/// Query parameters for listing books. Only the first non-empty one applies,
/// in the order `name`, `reading`, `finished`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListBooksQuery {
    /// Case-insensitive pattern matched against the book name
    pub name: Option<String>,
    /// `1` for books being read, `0` otherwise
    pub reading: Option<String>,
    /// `1` for finished books, `0` otherwise
    pub finished: Option<String>,
}

impl ListBooksQuery {
    fn into_filter(self) -> BookFilter {
        BookFilter::from_query(
            self.name.as_deref(),
            self.reading.as_deref(),
            self.finished.as_deref(),
        )
    }
}

#[utoipa::path(
    post,
    path = "/books",
    request_body = BookPayload,
    responses(
        (status = 201, description = "Book added", body = Envelope),
        (status = 400, description = "Missing name or readPage > pageCount", body = Envelope),
        (status = 500, description = "Book could not be stored", body = Envelope)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(p) => p,
        Err(rejection) => {
            return fail(
                StatusCode::BAD_REQUEST,
                format!("Failed to add book. {}", rejection.body_text()),
            );
        }
    };

    match book_service::create_book(state.book_repo.as_ref(), payload).await {
        Ok(id) => success(
            StatusCode::CREATED,
            Some("Book added successfully"),
            Some(json!({ "bookId": id })),
        ),
        Err(DomainError::Validation(msg)) => fail(
            StatusCode::BAD_REQUEST,
            format!("Failed to add book. {}", msg),
        ),
        Err(e) => {
            tracing::error!("Failed to add book: {}", e);
            fail(StatusCode::INTERNAL_SERVER_ERROR, "Failed to add book")
        }
    }
}

#[utoipa::path(
    get,
    path = "/books",
    params(ListBooksQuery),
    responses(
        (status = 200, description = "Summaries of matching books", body = Envelope)
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    Query(query): Query<ListBooksQuery>,
) -> Response {
    match book_service::list_books(state.book_repo.as_ref(), query.into_filter()).await {
        Ok(books) => success(StatusCode::OK, None, Some(json!({ "books": books }))),
        Err(e) => {
            tracing::error!("Failed to list books: {}", e);
            fail(StatusCode::INTERNAL_SERVER_ERROR, "Failed to list books")
        }
    }
}

#[utoipa::path(
    get,
    path = "/books/{id}",
    params(("id" = String, Path, description = "Book id")),
    responses(
        (status = 200, description = "Full book record", body = Envelope),
        (status = 404, description = "No book with this id", body = Envelope)
    )
)]
pub async fn get_book(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match book_service::get_book(state.book_repo.as_ref(), &id).await {
        Ok(book) => success(StatusCode::OK, None, Some(json!({ "book": book }))),
        Err(DomainError::NotFound) => fail(StatusCode::NOT_FOUND, "Book not found"),
        Err(e) => {
            tracing::error!("Failed to get book {}: {}", id, e);
            fail(StatusCode::INTERNAL_SERVER_ERROR, "Failed to get book")
        }
    }
}

#[utoipa::path(
    put,
    path = "/books/{id}",
    request_body = BookPayload,
    params(("id" = String, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book updated", body = Envelope),
        (status = 400, description = "Missing name or readPage > pageCount", body = Envelope),
        (status = 404, description = "No book with this id", body = Envelope)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(p) => p,
        Err(rejection) => {
            return fail(
                StatusCode::BAD_REQUEST,
                format!("Failed to update book. {}", rejection.body_text()),
            );
        }
    };

    match book_service::update_book(state.book_repo.as_ref(), &id, payload).await {
        Ok(_) => success(StatusCode::OK, Some("Book updated successfully"), None),
        Err(DomainError::Validation(msg)) => fail(
            StatusCode::BAD_REQUEST,
            format!("Failed to update book. {}", msg),
        ),
        Err(DomainError::NotFound) => fail(
            StatusCode::NOT_FOUND,
            "Failed to update book. Id not found",
        ),
        Err(e) => {
            tracing::error!("Failed to update book {}: {}", id, e);
            fail(StatusCode::INTERNAL_SERVER_ERROR, "Failed to update book")
        }
    }
}

#[utoipa::path(
    delete,
    path = "/books/{id}",
    params(("id" = String, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book deleted", body = Envelope),
        (status = 404, description = "No book with this id", body = Envelope)
    )
)]
pub async fn delete_book(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match book_service::delete_book(state.book_repo.as_ref(), &id).await {
        Ok(()) => success(StatusCode::OK, Some("Book deleted successfully"), None),
        Err(DomainError::NotFound) => fail(
            StatusCode::NOT_FOUND,
            "Failed to delete book. Id not found",
        ),
        Err(e) => {
            tracing::error!("Failed to delete book {}: {}", id, e);
            fail(StatusCode::INTERNAL_SERVER_ERROR, "Failed to delete book")
        }
    }
}
