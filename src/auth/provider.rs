use std::collections::HashMap;

use axum::async_trait;

use crate::{config::UserConfig, types::identity::Identity};

/// Resolves basic auth credentials to an [`Identity`].
#[async_trait]
pub trait BasicAuthProvider: Send + Sync {
    /// Returns the identity if the credentials are valid.
    async fn authenticate(&self, username: &str, password: Option<&str>) -> Option<Identity>;
}

/// A [`BasicAuthProvider`] backed by the users of the configuration file.
#[derive(Debug, Default)]
pub struct InMemoryUsers {
    users: HashMap<String, UserConfig>,
}

impl InMemoryUsers {
    pub fn new(users: impl IntoIterator<Item = UserConfig>) -> Self {
        let users = users
            .into_iter()
            .map(|user| (user.username.clone(), user))
            .collect();

        InMemoryUsers { users }
    }
}

#[async_trait]
impl BasicAuthProvider for InMemoryUsers {
    async fn authenticate(&self, username: &str, password: Option<&str>) -> Option<Identity> {
        let user = self.users.get(username)?;

        if password != Some(user.password.as_str()) {
            return None;
        }

        Some(Identity::new(user.username.clone(), user.roles.iter().copied()))
    }
}
