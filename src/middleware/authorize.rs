use axum::{
    extract::{FromRequestParts, MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};

use crate::{
    auth::policy::{self, Access},
    error::{ApiError, ErrorVerbosityProvider, ForbiddenError},
    extractor::authenticated::Authenticated,
    state::ApiState,
};

/// Enforces the authorization table on the matched route.
///
/// Must be applied with [`axum::Router::route_layer`] so the [`MatchedPath`] is known.
/// On success the resolved [`Identity`](crate::types::identity::Identity) is put as an extension for the handlers.
#[tracing::instrument(name = "authorize", skip_all, fields(method = %req.method(), path = %matched_path.as_str()))]
pub async fn authorize(
    State(state): State<ApiState>,
    matched_path: MatchedPath,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let access = policy::required_access(req.method(), matched_path.as_str());

    if access == Access::Anonymous {
        tracing::trace!("Anonymous access");

        return Ok(next.run(req).await);
    }

    let (mut parts, body) = req.into_parts();

    let Authenticated(identity) = Authenticated::from_request_parts(&mut parts, &state).await?;

    if let Some(required_role) = access.missing_role(&identity) {
        tracing::warn!(username = %identity.username, %required_role, "Rejection. Missing role");

        return Err(ForbiddenError::new(state.error_verbosity(), required_role).into());
    }

    tracing::trace!(username = %identity.username, ?access, "Authorized");

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}
