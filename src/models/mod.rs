pub mod book;

pub use book::{Book, BookPayload, BookSummary, ValidatedBook};
