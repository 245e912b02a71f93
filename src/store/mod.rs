//! Persistence of books.
//!
//! Handlers only see the [`BookStore`] trait. [`memory::InMemoryBookStore`] is the shipped
//! implementation and the fake used by tests.

use axum::async_trait;

use crate::types::book::{Book, BookId, NewBook};

pub mod memory;

#[derive(Debug, thiserror::Error)]
pub enum BookStoreError {
    #[error("No book ids left to assign")]
    IdSpaceExhausted,
}

#[async_trait]
pub trait BookStore: Send + Sync {
    /// Returns every book in store order.
    async fn find_all(&self) -> Result<Vec<Book>, BookStoreError>;

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, BookStoreError>;

    /// Persists a new book and returns it with its assigned id.
    async fn save(&self, new_book: NewBook) -> Result<Book, BookStoreError>;

    /// Removes the book and returns it, or `None` if no book has this id. Removing a missing id is not an error.
    async fn delete(&self, id: BookId) -> Result<Option<Book>, BookStoreError>;
}
