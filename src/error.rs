use std::borrow::Cow;

use axum::{
    http::{header::WWW_AUTHENTICATE, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use derive_more::From;
use serde::{Deserialize, Serialize};

use crate::types::{book::BookId, identity::Role};

/// Provides the [`ErrorVerbosity`] errors are rendered with.
pub trait ErrorVerbosityProvider {
    fn error_verbosity(&self) -> ErrorVerbosity;
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub enum ErrorVerbosity {
    /// Server returns the appropriate status code and headers with an empty body. Nothing is generated for the error.
    None,
    /// Server returns only the appropriate status code.
    StatusCode,
    /// Server returns only the message with the appropriate status code.
    Message,
    /// Server returns the message, the error type with cleared error content and the appropriate status code.
    Type,
    /// Server returns the message, the error type with the error content and the appropriate status code.
    Full,
}

impl ErrorVerbosity {
    pub fn should_generate_message(&self) -> bool {
        matches!(
            self,
            ErrorVerbosity::Message | ErrorVerbosity::Type | ErrorVerbosity::Full
        )
    }

    pub fn should_generate_error_reason(&self) -> bool {
        matches!(self, ErrorVerbosity::Full)
    }
}

/// Maps an error into an [`ApiError::InternalServerError`] using the verbosity of the given state.
///
/// ```ignore
/// state.books().find_all().await.map_err(server_error!(state))?;
/// ```
#[macro_export]
macro_rules! server_error {
    ($state:expr) => {
        |err| {
            $crate::error::ApiError::from(
                $crate::error::InternalServerError::from_generic_error(
                    $crate::error::ErrorVerbosityProvider::error_verbosity(&$state),
                    err,
                ),
            )
        }
    };
}

#[derive(Debug, Serialize)]
struct ApiErrorResponse {
    #[serde(flatten)]
    error: ApiError,
    message: &'static str,
}

#[derive(Debug, Serialize)]
struct ApiErrorMessage {
    message: &'static str,
}

impl From<ApiErrorResponse> for ApiErrorMessage {
    fn from(response: ApiErrorResponse) -> Self {
        ApiErrorMessage {
            message: response.message,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        let headers = self.error.headers();
        let status_code = self.error.status_code();

        match self.error.verbosity() {
            ErrorVerbosity::None | ErrorVerbosity::StatusCode => {
                (status_code, headers).into_response()
            }
            ErrorVerbosity::Message => {
                (status_code, headers, Json(ApiErrorMessage::from(self))).into_response()
            }
            ErrorVerbosity::Type | ErrorVerbosity::Full => {
                (status_code, headers, Json(self)).into_response()
            }
        }
    }
}

#[derive(Debug, From, Serialize)]
#[serde(tag = "error_type", content = "error")]
/// API error
pub enum ApiError {
    /// Internal server error
    ///
    /// This error is returned when an internal server error occurs.
    InternalServerError(InternalServerError),
    /// Body error
    ///
    /// This error is returned when the body is not as expected.
    Body(BodyError),
    /// Path error
    ///
    /// This error is returned when the path is not as expected.
    Path(PathError),
    /// Validation error
    ///
    /// This error is returned when the extracted data violates its constraints.
    Validation(ValidationError),
    /// Method not allowed
    ///
    /// This error is returned when the method is not allowed.
    MethodNotAllowed(MethodNotAllowedError),
    /// Not found error
    ///
    /// This error is returned when the requested route does not exist.
    NotFound(NotFoundError),
    /// Book not found error
    ///
    /// This error is returned when no book exists with the requested id.
    BookNotFound(BookNotFoundError),
    /// Basic auth error
    ///
    /// This error is returned when the credentials are missing, malformed or wrong.
    BasicAuth(BasicAuthError),
    /// Forbidden error
    ///
    /// This error is returned when the authenticated user lacks the required role.
    Forbidden(ForbiddenError),
}

impl ApiError {
    fn verbosity(&self) -> ErrorVerbosity {
        match self {
            ApiError::InternalServerError(err) => err.verbosity,
            ApiError::Body(err) => err.verbosity,
            ApiError::Path(err) => err.verbosity,
            ApiError::Validation(err) => err.verbosity,
            ApiError::MethodNotAllowed(err) => err.verbosity,
            ApiError::NotFound(err) => err.verbosity,
            ApiError::BookNotFound(err) => err.verbosity,
            ApiError::BasicAuth(err) => err.verbosity,
            ApiError::Forbidden(err) => err.verbosity,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            ApiError::InternalServerError(_) => "An internal server error has occurred",
            ApiError::Body(_) => "Failed to parse request body",
            ApiError::Path(_) => "Failed to parse path parameters",
            ApiError::Validation(_) => "Validation failed",
            ApiError::MethodNotAllowed(_) => "Method not allowed",
            ApiError::NotFound(_) => "The requested resource was not found",
            ApiError::BookNotFound(_) => "Book not found",
            ApiError::BasicAuth(_) => "Basic auth error",
            ApiError::Forbidden(_) => "Access denied",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Body(_) | ApiError::Path(_) | ApiError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::NotFound(_) | ApiError::BookNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BasicAuth(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
        }
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();

        if let ApiError::BasicAuth(_) = self {
            headers.insert(WWW_AUTHENTICATE, HeaderValue::from_static("Basic"));
        }

        headers
    }
}

impl From<ApiError> for ApiErrorResponse {
    fn from(error: ApiError) -> Self {
        let message = match error.verbosity().should_generate_message() {
            true => error.message(),
            false => "",
        };

        ApiErrorResponse { error, message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        ApiErrorResponse::from(self).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct InternalServerError {
    #[serde(skip)]
    verbosity: ErrorVerbosity,
    internal_server_error: Option<String>,
}

impl InternalServerError {
    pub fn from_generic_error<E: Into<anyhow::Error>>(verbosity: ErrorVerbosity, err: E) -> Self {
        let err: anyhow::Error = err.into();
        let err = format!("{err:#}");
        tracing::error!(%err, "Internal server error");

        let internal_server_error = verbosity.should_generate_error_reason().then_some(err);

        InternalServerError {
            verbosity,
            internal_server_error,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BodyError {
    #[serde(skip)]
    verbosity: ErrorVerbosity,
    body_error_reason: Option<String>,
    body_expected_schema: Option<String>,
}

impl BodyError {
    pub fn new(
        verbosity: ErrorVerbosity,
        body_error_reason: String,
        body_expected_schema: String,
    ) -> Self {
        let (body_error_reason, body_expected_schema) =
            match verbosity.should_generate_error_reason() {
                true => (Some(body_error_reason), Some(body_expected_schema)),
                false => (None, None),
            };

        BodyError {
            verbosity,
            body_error_reason,
            body_expected_schema,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PathError {
    #[serde(skip)]
    verbosity: ErrorVerbosity,
    path_error_reason: Option<String>,
}

impl PathError {
    pub fn new(verbosity: ErrorVerbosity, path_error_reason: String) -> Self {
        let path_error_reason = verbosity
            .should_generate_error_reason()
            .then_some(path_error_reason);

        PathError {
            verbosity,
            path_error_reason,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ValidationError {
    #[serde(skip)]
    verbosity: ErrorVerbosity,
    validation_error_reason: Option<String>,
}

impl ValidationError {
    pub fn from_validation_errors(
        verbosity: ErrorVerbosity,
        errors: validator::ValidationErrors,
    ) -> Self {
        let validation_error_reason = verbosity
            .should_generate_error_reason()
            .then(|| errors.to_string());

        ValidationError {
            verbosity,
            validation_error_reason,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MethodNotAllowedError {
    #[serde(skip)]
    verbosity: ErrorVerbosity,
}

impl MethodNotAllowedError {
    pub fn new(verbosity: ErrorVerbosity) -> Self {
        MethodNotAllowedError { verbosity }
    }
}

#[derive(Debug, Serialize)]
pub struct NotFoundError {
    #[serde(skip)]
    verbosity: ErrorVerbosity,
}

impl NotFoundError {
    pub fn new(verbosity: ErrorVerbosity) -> Self {
        NotFoundError { verbosity }
    }
}

#[derive(Debug, Serialize)]
pub struct BookNotFoundError {
    #[serde(skip)]
    verbosity: ErrorVerbosity,
    book_id: Option<BookId>,
}

impl BookNotFoundError {
    pub fn new(verbosity: ErrorVerbosity, book_id: BookId) -> Self {
        let book_id = verbosity.should_generate_error_reason().then_some(book_id);

        BookNotFoundError { verbosity, book_id }
    }
}

#[derive(Debug, Serialize)]
pub enum BasicAuthErrorType {
    Missing,
    InvalidChars {
        #[serde(skip)]
        reason: String,
    },
    Decode {
        #[serde(skip)]
        reason: String,
    },
    NotBasic,
    Invalid,
}

#[derive(Debug, Serialize)]
pub struct BasicAuthError {
    #[serde(skip)]
    verbosity: ErrorVerbosity,
    basic_auth_error_type: BasicAuthErrorType,
    basic_auth_error_reason: Option<Cow<'static, str>>,
}

impl BasicAuthError {
    pub fn new(verbosity: ErrorVerbosity, basic_auth_error_type: BasicAuthErrorType) -> Self {
        let basic_auth_error_reason = verbosity
            .should_generate_error_reason()
            .then(|| Self::reason(&basic_auth_error_type));

        BasicAuthError {
            verbosity,
            basic_auth_error_type,
            basic_auth_error_reason,
        }
    }

    fn reason(basic_auth_error_type: &BasicAuthErrorType) -> Cow<'static, str> {
        match basic_auth_error_type {
            BasicAuthErrorType::Missing => Cow::Borrowed("`Authorization` header is missing"),
            BasicAuthErrorType::InvalidChars { reason } => Cow::Owned(format!(
                "`Authorization` header contains invalid characters: {reason}"
            )),
            BasicAuthErrorType::Decode { reason } => Cow::Owned(format!(
                "`Authorization` header could not be decoded: {reason}"
            )),
            BasicAuthErrorType::NotBasic => Cow::Borrowed("`Authorization` header must be `Basic`"),
            BasicAuthErrorType::Invalid => Cow::Borrowed("Invalid username or password"),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ForbiddenError {
    #[serde(skip)]
    verbosity: ErrorVerbosity,
    required_role: Option<Role>,
}

impl ForbiddenError {
    pub fn new(verbosity: ErrorVerbosity, required_role: Role) -> Self {
        let required_role = verbosity
            .should_generate_error_reason()
            .then_some(required_role);

        ForbiddenError {
            verbosity,
            required_role,
        }
    }
}
