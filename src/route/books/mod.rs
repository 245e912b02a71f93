pub mod app;
pub mod create_book;
pub mod delete_book;
pub mod get_book;
pub mod list_books;

/// Route of the book collection.
pub const BOOKS_PATH: &str = "/api/books/";

/// Route of a single book, keyed by its id.
pub const BOOK_PATH: &str = "/api/books/:id";
