use axum::{extract::Request, middleware::Next, response::Response};

/// Middlware to trace incoming and outgoing headers.
///
/// `Authorization` is redacted.
pub async fn trace_headers(req: Request, next: Next) -> Response {
    let mut incoming_headers = req.headers().clone();
    if incoming_headers.contains_key(http::header::AUTHORIZATION) {
        incoming_headers.insert(
            http::header::AUTHORIZATION,
            http::HeaderValue::from_static("..."),
        );
    }
    tracing::trace!(?incoming_headers, "Headers");

    let response = next.run(req).await;

    let outgoing_headers = response.headers();
    tracing::trace!(?outgoing_headers, "Headers");

    response
}
