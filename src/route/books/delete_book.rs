use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};

use crate::{
    error::ApiError,
    extractor::path::ApiPath,
    server_error,
    state::ApiState,
    types::{
        book::{Book, BookId},
        identity::Identity,
    },
};

/// The removed book, or nothing if no book had the id.
#[derive(Debug)]
pub struct DeleteBookResponse {
    pub book: Option<Book>,
}

impl IntoResponse for DeleteBookResponse {
    fn into_response(self) -> Response {
        match self.book {
            Some(book) => (StatusCode::OK, Json(book)).into_response(),
            None => StatusCode::OK.into_response(),
        }
    }
}

/// Removes a book. Admin only.
///
/// Deleting an id no book has is a no-op.
#[utoipa::path(
    delete,
    path = "/api/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book id")),
    security(("basic_auth" = [])),
    responses(
        (status = 200, description = "The removed book, or an empty body if no book had this id", body = Book),
        (status = 400, description = "The id is not an integer"),
        (status = 401, description = "Missing or invalid credentials"),
        (status = 403, description = "The user is not an admin"),
    )
)]
#[tracing::instrument(skip_all, fields(username = %identity.username, id))]
pub async fn delete_book(
    State(state): State<ApiState>,
    Extension(identity): Extension<Identity>,
    ApiPath(id): ApiPath<BookId>,
) -> Result<DeleteBookResponse, ApiError> {
    tracing::Span::current().record("id", id);

    let book = state
        .books()
        .delete(id)
        .await
        .map_err(server_error!(state))?;

    match book {
        Some(_) => tracing::info!("Book deleted"),
        None => tracing::debug!("No book to delete"),
    }

    Ok(DeleteBookResponse { book })
}
