use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::{error::ApiError, server_error, state::ApiState, types::book::Book};

#[derive(Debug)]
pub struct ListBooksResponse {
    pub books: Vec<Book>,
}

impl IntoResponse for ListBooksResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self.books)).into_response()
    }
}

/// Lists all books in store order.
#[utoipa::path(
    get,
    path = "/api/books/",
    tag = "books",
    responses(
        (status = 200, description = "All books in store order", body = [Book]),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_books(State(state): State<ApiState>) -> Result<ListBooksResponse, ApiError> {
    let books = state.books().find_all().await.map_err(server_error!(state))?;

    tracing::debug!(count = books.len(), "Listed books");

    Ok(ListBooksResponse { books })
}
