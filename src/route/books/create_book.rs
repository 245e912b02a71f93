use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};

use crate::{
    error::ApiError,
    extractor::{json::ApiJson, validated::Validated},
    server_error,
    state::ApiState,
    types::{
        book::{Book, NewBook},
        identity::Identity,
    },
};

#[derive(Debug)]
pub struct CreateBookResponse {
    pub book: Book,
}

impl IntoResponse for CreateBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self.book)).into_response()
    }
}

/// Persists a new book. The id is assigned by the store.
#[utoipa::path(
    post,
    path = "/api/books/",
    tag = "books",
    request_body = NewBook,
    security(("basic_auth" = [])),
    responses(
        (status = 201, description = "The persisted book", body = Book),
        (status = 400, description = "The body is malformed or a field is empty"),
        (status = 401, description = "Missing or invalid credentials"),
    )
)]
#[tracing::instrument(skip_all, fields(username = %identity.username))]
pub async fn create_book(
    State(state): State<ApiState>,
    Extension(identity): Extension<Identity>,
    Validated(ApiJson(new_book)): Validated<ApiJson<NewBook>>,
) -> Result<CreateBookResponse, ApiError> {
    let book = state
        .books()
        .save(new_book)
        .await
        .map_err(server_error!(state))?;

    tracing::info!(id = book.id, "Book created");

    Ok(CreateBookResponse { book })
}
