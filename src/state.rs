use std::{ops::Deref, sync::Arc};

use axum::async_trait;

use crate::{
    auth::provider::BasicAuthProvider,
    error::{ErrorVerbosity, ErrorVerbosityProvider},
    store::BookStore,
    types::identity::Identity,
};

#[derive(Clone)]
pub struct ApiState {
    inner: Arc<ApiStateInner>,
}

impl ApiState {
    pub fn new(
        error_verbosity: ErrorVerbosity,
        books: Arc<dyn BookStore>,
        users: Arc<dyn BasicAuthProvider>,
    ) -> Self {
        Self {
            inner: Arc::new(ApiStateInner {
                error_verbosity,
                books,
                users,
            }),
        }
    }
}

impl Deref for ApiState {
    type Target = ApiStateInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

pub struct ApiStateInner {
    error_verbosity: ErrorVerbosity,
    books: Arc<dyn BookStore>,
    users: Arc<dyn BasicAuthProvider>,
}

impl ApiStateInner {
    pub fn books(&self) -> &dyn BookStore {
        self.books.as_ref()
    }
}

impl ErrorVerbosityProvider for ApiState {
    fn error_verbosity(&self) -> ErrorVerbosity {
        self.error_verbosity
    }
}

#[async_trait]
impl BasicAuthProvider for ApiState {
    async fn authenticate(&self, username: &str, password: Option<&str>) -> Option<Identity> {
        self.users.authenticate(username, password).await
    }
}
