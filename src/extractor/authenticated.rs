use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::{
    auth::provider::BasicAuthProvider,
    error::{ApiError, BasicAuthError, BasicAuthErrorType, ErrorVerbosityProvider},
    types::{identity::Identity, used_basic_auth::UsedBasicAuth},
};

use super::basic_auth::ApiBasicAuth;

/// Extracts the basic auth from the request headers and resolves it to an [`Identity`].
#[derive(Debug, Clone)]
pub struct Authenticated(pub Identity);

#[async_trait]
impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync + BasicAuthProvider + ErrorVerbosityProvider,
{
    type Rejection = ApiError;

    #[tracing::instrument(name = "basic_auth_authenticator", skip_all)]
    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let verbosity = state.error_verbosity();

        let ApiBasicAuth(UsedBasicAuth { username, password }) =
            ApiBasicAuth::from_request_parts(parts, state).await?;

        let identity = state
            .authenticate(&username, password.as_deref())
            .await
            .ok_or_else(|| {
                tracing::warn!(%username, "Rejection. Invalid basic auth");

                BasicAuthError::new(verbosity, BasicAuthErrorType::Invalid)
            })?;

        tracing::trace!(%username, roles = ?identity.roles, "Authenticated");

        Ok(Authenticated(identity))
    }
}
