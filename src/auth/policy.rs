//! The authorization table.
//!
//! Every route is keyed by its method and its matched path (as registered on the router)
//! and maps to the minimum [`Access`] a request needs.

use http::Method;

use crate::{
    route::books::{BOOKS_PATH, BOOK_PATH},
    types::identity::{Identity, Role},
};

/// The minimum access a route requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// No credentials required. Credentials, if sent, are not inspected.
    Anonymous,
    /// Valid credentials with any role.
    Authenticated,
    /// Valid credentials carrying the given role.
    Role(Role),
}

impl Access {
    /// Returns the role the identity is missing, if any.
    ///
    /// Must only be called for an authenticated identity.
    pub fn missing_role(&self, identity: &Identity) -> Option<Role> {
        match self {
            Access::Anonymous | Access::Authenticated => None,
            Access::Role(role) => (!identity.has_role(*role)).then_some(*role),
        }
    }
}

struct Rule {
    method: Method,
    path: &'static str,
    access: Access,
}

static RULES: [Rule; 4] = [
    Rule {
        method: Method::GET,
        path: BOOKS_PATH,
        access: Access::Anonymous,
    },
    Rule {
        method: Method::GET,
        path: BOOK_PATH,
        access: Access::Anonymous,
    },
    Rule {
        method: Method::POST,
        path: BOOKS_PATH,
        access: Access::Authenticated,
    },
    Rule {
        method: Method::DELETE,
        path: BOOK_PATH,
        access: Access::Role(Role::Admin),
    },
];

/// Unlisted routes require the highest access level.
const FALLBACK: Access = Access::Role(Role::Admin);

/// Looks up the access required for `method` on the route matched as `path`.
pub fn required_access(method: &Method, path: &str) -> Access {
    let method = if *method == Method::HEAD {
        &Method::GET
    } else {
        method
    };

    RULES
        .iter()
        .find(|rule| rule.method == *method && rule.path == path)
        .map(|rule| rule.access)
        .unwrap_or(FALLBACK)
}
