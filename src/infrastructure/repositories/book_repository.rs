//! In-memory implementation of BookRepository

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{BookFilter, BookRepository, DomainError};
use crate::models::Book;

/// `Vec`-backed implementation of BookRepository.
///
/// Records keep insertion order. Each call takes the lock for a single pass.
#[derive(Default)]
pub struct InMemoryBookRepository {
    books: RwLock<Vec<Book>>,
}

impl InMemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn find_all(&self, filter: &BookFilter) -> Result<Vec<Book>, DomainError> {
        let books = self.books.read().await;
        Ok(books.iter().filter(|b| filter.matches(b)).cloned().collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Book>, DomainError> {
        let books = self.books.read().await;
        Ok(books.iter().find(|b| b.id == id).cloned())
    }

    async fn exists(&self, id: &str) -> Result<bool, DomainError> {
        let books = self.books.read().await;
        Ok(books.iter().any(|b| b.id == id))
    }

    async fn create(&self, book: Book) -> Result<Book, DomainError> {
        let mut books = self.books.write().await;

        if books.iter().any(|b| b.id == book.id) {
            return Err(DomainError::Conflict(format!("id {} already in use", book.id)));
        }

        books.push(book.clone());
        Ok(book)
    }

    async fn update(&self, id: &str, book: Book) -> Result<Book, DomainError> {
        let mut books = self.books.write().await;

        let slot = books
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(DomainError::NotFound)?;
        *slot = book.clone();

        Ok(book)
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let mut books = self.books.write().await;

        let index = books
            .iter()
            .position(|b| b.id == id)
            .ok_or(DomainError::NotFound)?;
        books.remove(index);

        Ok(())
    }
}
