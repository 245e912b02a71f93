use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Context;
use axum::{middleware, Router};
use axum_server::{tls_rustls::RustlsConfig, Handle};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    decompression::RequestDecompressionLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};

use crate::{
    auth::provider::InMemoryUsers,
    config::{ConfigError, ConfigFile, TlsConfig, UserConfig},
    error::ErrorVerbosity,
    middleware::{
        method_not_allowed::method_not_allowed, not_found::not_found,
        trace_headers::trace_headers, trace_response_body::trace_response_body,
    },
    state::ApiState,
    store::{memory::InMemoryBookStore, BookStoreError},
    types::book::NewBook,
};

pub struct ServerConfig {
    socket_address: SocketAddr,
    error_verbosity: ErrorVerbosity,
    users: Vec<UserConfig>,
    books: Vec<NewBook>,
    tls: Option<TlsConfig>,
}

/// Time in-flight requests get to finish once a TLS server is shutting down.
const TLS_GRACEFUL_SHUTDOWN: Duration = Duration::from_secs(10);

impl ServerConfig {
    pub fn new(
        socket_address: SocketAddr,
        error_verbosity: ErrorVerbosity,
        users: Vec<UserConfig>,
        books: Vec<NewBook>,
    ) -> Self {
        Self {
            socket_address,
            error_verbosity,
            users,
            books,
            tls: None,
        }
    }

    pub async fn from_config_file(path: &str) -> Result<Self, ConfigError> {
        let ConfigFile {
            socket_address,
            error_verbosity,
            users,
            books,
            tls,
        } = ConfigFile::from_path(path).await?;

        let config = Self::new(socket_address, error_verbosity, users, books);

        Ok(match tls {
            Some(tls) => config.with_tls(tls),
            None => config,
        })
    }

    pub fn with_tls(mut self, tls: TlsConfig) -> Self {
        self.tls = Some(tls);
        self
    }

    pub fn with_socket_address(mut self, socket_address: SocketAddr) -> Self {
        self.socket_address = socket_address;
        self
    }

    pub fn socket_address(&self) -> SocketAddr {
        self.socket_address
    }

    /// Builds the state backed by the in-memory store and users.
    pub fn into_state(self) -> Result<ApiState, BookStoreError> {
        let books = InMemoryBookStore::with_books(self.books)?;
        let users = InMemoryUsers::new(self.users);

        Ok(ApiState::new(
            self.error_verbosity,
            Arc::new(books),
            Arc::new(users),
        ))
    }
}

/// Assembles the router of the whole API.
pub fn app(state: ApiState) -> Router {
    Router::new()
        .merge(crate::route::books::app::app(state.clone()))
        .merge(crate::openapi::app())
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            method_not_allowed,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            trace_response_body,
        ))
        .layer(middleware::from_fn(trace_headers))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(tracing::Level::INFO))
                        .on_request(DefaultOnRequest::new().level(tracing::Level::INFO))
                        .on_response(DefaultOnResponse::new().level(tracing::Level::INFO)),
                )
                .layer(RequestDecompressionLayer::new())
                .layer(CompressionLayer::new())
                .layer(CorsLayer::permissive()),
        )
}

pub struct Server {
    config: ServerConfig,
}

impl Server {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let socket_address = self.config.socket_address;

        tracing::info!(addr = %socket_address, "Starting server");

        let listener = TcpListener::bind(&socket_address)
            .await
            .context("Bind failed")?;

        self.serve(listener).await
    }

    /// Serves on an already bound listener until a shutdown signal is received.
    ///
    /// Serves HTTPS if TLS is configured, plain HTTP otherwise.
    pub async fn serve(mut self, listener: TcpListener) -> anyhow::Result<()> {
        let tls = self.config.tls.take();

        let state = self
            .config
            .into_state()
            .context("Failed to seed the book store")?;

        let make_service = app(state).into_make_service_with_connect_info::<SocketAddr>();

        let Some(tls) = tls else {
            axum::serve(listener, make_service)
                .with_graceful_shutdown(shutdown_signal())
                .await
                .context("Server failed")?;

            return Ok(());
        };

        tracing::info!(cert_path = %tls.cert_path.display(), "Serving with TLS");

        let rustls_config = RustlsConfig::from_pem_file(&tls.cert_path, &tls.key_path)
            .await
            .context("Failed to load TLS certificate or key")?;

        let listener = listener
            .into_std()
            .context("Failed to convert the listener")?;

        let handle = Handle::new();
        tokio::spawn({
            let handle = handle.clone();

            async move {
                shutdown_signal().await;

                handle.graceful_shutdown(Some(TLS_GRACEFUL_SHUTDOWN));
            }
        });

        axum_server::from_tcp_rustls(listener, rustls_config)
            .handle(handle)
            .serve(make_service)
            .await
            .context("Server failed")?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("CTRL+C received"),
            Err(err) => {
                tracing::error!(%err, "Failed to install CTRL+C signal handler");

                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;

                tracing::info!("SIGTERM received");
            }
            Err(err) => {
                tracing::error!(%err, "Failed to install SIGTERM signal handler");

                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutting down");
}
