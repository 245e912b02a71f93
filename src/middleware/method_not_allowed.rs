use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{
    error::{ApiError, ErrorVerbosityProvider, MethodNotAllowedError},
    state::ApiState,
};

/// Middleware to map axum's `MethodNotAllowed` rejection to our [`ApiError`].
pub async fn method_not_allowed(
    State(state): State<ApiState>,
    req: Request,
    next: Next,
) -> Response {
    let resp = next.run(req).await;

    match resp.status() {
        StatusCode::METHOD_NOT_ALLOWED => {
            tracing::warn!("Method not allowed");

            ApiError::from(MethodNotAllowedError::new(state.error_verbosity())).into_response()
        }
        _ => resp,
    }
}
