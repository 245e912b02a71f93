use std::collections::BTreeMap;

use axum::async_trait;
use tokio::sync::RwLock;

use crate::types::book::{Book, BookId, NewBook};

use super::{BookStore, BookStoreError};

/// A [`BookStore`] keeping books in memory.
///
/// Ids start at 1, grow monotonically and are never reused.
/// Since ids only grow, id order is insertion order.
#[derive(Debug, Default)]
pub struct InMemoryBookStore {
    holder: RwLock<BookHolder>,
}

#[derive(Debug)]
struct BookHolder {
    next_id: BookId,
    books: BTreeMap<BookId, Book>,
}

impl Default for BookHolder {
    fn default() -> Self {
        BookHolder {
            next_id: 1,
            books: BTreeMap::new(),
        }
    }
}

impl BookHolder {
    fn insert(&mut self, new_book: NewBook) -> Result<Book, BookStoreError> {
        let id = self.next_id;
        self.next_id = id.checked_add(1).ok_or(BookStoreError::IdSpaceExhausted)?;

        let book = Book::new(id, new_book);
        self.books.insert(id, book.clone());

        Ok(book)
    }
}

impl InMemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `books`, with ids assigned in iteration order.
    pub fn with_books(books: impl IntoIterator<Item = NewBook>) -> Result<Self, BookStoreError> {
        let mut holder = BookHolder::default();

        for new_book in books {
            holder.insert(new_book)?;
        }

        Ok(InMemoryBookStore {
            holder: RwLock::new(holder),
        })
    }

    pub async fn len(&self) -> usize {
        self.holder.read().await.books.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl BookStore for InMemoryBookStore {
    #[tracing::instrument(skip_all)]
    async fn find_all(&self) -> Result<Vec<Book>, BookStoreError> {
        Ok(self.holder.read().await.books.values().cloned().collect())
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, BookStoreError> {
        Ok(self.holder.read().await.books.get(&id).cloned())
    }

    #[tracing::instrument(skip(self))]
    async fn save(&self, new_book: NewBook) -> Result<Book, BookStoreError> {
        let book = self.holder.write().await.insert(new_book)?;

        tracing::trace!(id = book.id, "Saved");

        Ok(book)
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: BookId) -> Result<Option<Book>, BookStoreError> {
        Ok(self.holder.write().await.books.remove(&id))
    }
}
