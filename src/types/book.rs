use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Store-assigned book identifier.
pub type BookId = i64;

/// A persisted book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Book {
    /// Assigned by the store on creation.
    pub id: BookId,
    pub title: String,
    pub description: String,
}

impl Book {
    pub fn new(id: BookId, new_book: NewBook) -> Self {
        Book {
            id,
            title: new_book.title,
            description: new_book.description,
        }
    }
}

/// The body of a create request.
///
/// An `id` sent by the client is not part of this type and is dropped during deserialization.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, ToSchema, Validate)]
pub struct NewBook {
    #[validate(length(min = 1, message = "Must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "Must not be empty"))]
    pub description: String,
}

impl NewBook {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        NewBook {
            title: title.into(),
            description: description.into(),
        }
    }
}
