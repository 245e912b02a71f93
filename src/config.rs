use std::{net::SocketAddr, path::PathBuf};

use derivative::Derivative;
use serde::Deserialize;

use crate::{
    error::ErrorVerbosity,
    types::{book::NewBook, identity::Role},
};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// The content of the YAML configuration file.
#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    pub socket_address: SocketAddr,
    pub error_verbosity: ErrorVerbosity,
    pub users: Vec<UserConfig>,
    /// Books the store starts with.
    #[serde(default)]
    pub books: Vec<NewBook>,
    /// Serves HTTPS instead of plain HTTP when set.
    #[serde(default)]
    pub tls: Option<TlsConfig>,
}

impl ConfigFile {
    #[tracing::instrument]
    pub async fn from_path(path: &str) -> Result<Self, ConfigError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.into(),
                source,
            })?;

        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.into(),
            source,
        })
    }
}

/// PEM files of the server certificate chain and its private key.
#[derive(Debug, Clone, Deserialize)]
pub struct TlsConfig {
    pub cert_path: PathBuf,
    pub key_path: PathBuf,
}

impl TlsConfig {
    pub fn new(cert_path: impl Into<PathBuf>, key_path: impl Into<PathBuf>) -> Self {
        TlsConfig {
            cert_path: cert_path.into(),
            key_path: key_path.into(),
        }
    }
}

/// A user allowed to authenticate with basic auth.
#[derive(Derivative, Clone, Deserialize)]
#[derivative(Debug)]
pub struct UserConfig {
    pub username: String,
    #[derivative(Debug(format_with = "crate::utils::mask_fmt"))]
    pub password: String,
    pub roles: Vec<Role>,
}

impl UserConfig {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        roles: impl IntoIterator<Item = Role>,
    ) -> Self {
        UserConfig {
            username: username.into(),
            password: password.into(),
            roles: roles.into_iter().collect(),
        }
    }
}
