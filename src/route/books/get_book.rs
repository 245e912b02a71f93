use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    error::{ApiError, BookNotFoundError, ErrorVerbosityProvider},
    extractor::path::ApiPath,
    server_error,
    state::ApiState,
    types::book::{Book, BookId},
};

#[derive(Debug)]
pub struct GetBookResponse {
    pub book: Book,
}

impl IntoResponse for GetBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self.book)).into_response()
    }
}

#[utoipa::path(
    get,
    path = "/api/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book id")),
    responses(
        (status = 200, description = "The book", body = Book),
        (status = 400, description = "The id is not an integer"),
        (status = 404, description = "No book has this id"),
    )
)]
#[tracing::instrument(skip_all, fields(id))]
pub async fn get_book(
    State(state): State<ApiState>,
    ApiPath(id): ApiPath<BookId>,
) -> Result<GetBookResponse, ApiError> {
    tracing::Span::current().record("id", id);

    let book = state
        .books()
        .find_by_id(id)
        .await
        .map_err(server_error!(state))?
        .ok_or_else(|| {
            tracing::debug!("Book not found");

            BookNotFoundError::new(state.error_verbosity(), id)
        })?;

    Ok(GetBookResponse { book })
}
