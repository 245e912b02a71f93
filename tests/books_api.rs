//! End-to-end tests against a server listening on a real socket.

use std::net::SocketAddr;

use library_api::{
    config::{TlsConfig, UserConfig},
    error::ErrorVerbosity,
    server::{Server, ServerConfig},
    types::{
        book::{Book, NewBook},
        identity::Role,
    },
};
use rcgen::{CertificateParams, KeyPair};
use reqwest::StatusCode;
use tempfile::TempDir;
use tokio::net::TcpListener;

const SEEDED_TITLES: [&str; 5] = [
    "SUEÑOS DE ACERO Y NEON",
    "LA VIDA SECRETA DE LA MENTE",
    "CASI SIN QUERER",
    "TERMINAMOS Y OTROS POEMAS SIN TERMINAR",
    "LA LEGIÓN PERDIDA",
];

struct RunningServer {
    base_url: String,
    client: reqwest::Client,
    handle: tokio::task::JoinHandle<anyhow::Result<()>>,
    _tls_dir: Option<TempDir>,
}

impl Drop for RunningServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Writes a fresh self-signed certificate for `localhost` and `127.0.0.1`.
fn generate_self_signed_tls() -> (TempDir, TlsConfig) {
    let dir = tempfile::Builder::new()
        .prefix("library-api-tls")
        .tempdir()
        .expect("Temp dir could not be created");

    let key_pair = KeyPair::generate().expect("Key could not be generated");
    let cert = CertificateParams::new(vec!["localhost".to_string(), "127.0.0.1".to_string()])
        .expect("Invalid certificate params")
        .self_signed(&key_pair)
        .expect("Certificate could not be signed");

    let cert_path = dir.path().join("server.pem");
    let key_path = dir.path().join("server.key");

    std::fs::write(&cert_path, cert.pem()).expect("Certificate could not be written");
    std::fs::write(&key_path, key_pair.serialize_pem()).expect("Key could not be written");

    (dir, TlsConfig::new(cert_path, key_path))
}

impl RunningServer {
    async fn start() -> Self {
        Self::start_with(None).await
    }

    async fn start_with_tls() -> Self {
        let (dir, tls) = generate_self_signed_tls();

        Self::start_with(Some((dir, tls))).await
    }

    async fn start_with(tls: Option<(TempDir, TlsConfig)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Bind failed");
        let socket_address: SocketAddr = listener.local_addr().expect("No local address");

        let books = SEEDED_TITLES
            .iter()
            .map(|title| NewBook::new(*title, format!("Description of {title}")))
            .collect();

        let users = vec![
            UserConfig::new("user", "pass", [Role::User]),
            UserConfig::new("admin", "pass", [Role::User, Role::Admin]),
        ];

        let config = ServerConfig::new(socket_address, ErrorVerbosity::Full, users, books);

        let (config, scheme, client, tls_dir) = match tls {
            Some((dir, tls)) => {
                let client = reqwest::Client::builder()
                    .danger_accept_invalid_certs(true)
                    .danger_accept_invalid_hostnames(true)
                    .build()
                    .expect("Client could not be built");

                (config.with_tls(tls), "https", client, Some(dir))
            }
            None => (config, "http", reqwest::Client::new(), None),
        };

        let handle = tokio::spawn(Server::new(config).serve(listener));

        RunningServer {
            base_url: format!("{scheme}://{socket_address}"),
            client,
            handle,
            _tls_dir: tls_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn create_book(&self, username: &str) -> reqwest::Response {
        self.client
            .post(self.url("/api/books/"))
            .basic_auth(username, Some("pass"))
            .json(&NewBook::new("Test title", "test description"))
            .send()
            .await
            .expect("Request failed")
    }
}

async fn assert_lists_seeded_books(server: &RunningServer, username: Option<&str>) {
    let mut request = server.client.get(server.url("/api/books/"));
    if let Some(username) = username {
        request = request.basic_auth(username, Some("pass"));
    }

    let response = request.send().await.expect("Request failed");
    assert_eq!(response.status(), StatusCode::OK);

    let books: Vec<Book> = response.json().await.expect("Body is not a book list");

    for (id, title) in (1..).zip(SEEDED_TITLES) {
        let book = books
            .iter()
            .find(|book| book.id == id)
            .unwrap_or_else(|| panic!("Book {id} is missing"));

        assert_eq!(book.title, title);
    }
}

#[tokio::test]
async fn anonymous_user_lists_all_books() {
    let server = RunningServer::start().await;

    assert_lists_seeded_books(&server, None).await;
}

#[tokio::test]
async fn logged_user_lists_all_books() {
    let server = RunningServer::start().await;

    assert_lists_seeded_books(&server, Some("user")).await;
}

#[tokio::test]
async fn anonymous_user_cannot_add_book() {
    let server = RunningServer::start().await;

    let response = server
        .client
        .post(server.url("/api/books/"))
        .json(&NewBook::new("Test title", "test description"))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logged_user_adds_book() {
    let server = RunningServer::start().await;

    let response = server.create_book("user").await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let book: Book = response.json().await.expect("Body is not a book");
    assert_eq!(book.title, "Test title");
    assert_eq!(book.description, "test description");
    assert_eq!(book.id, 6);
}

#[tokio::test]
async fn anonymous_user_cannot_delete_book() {
    let server = RunningServer::start().await;

    let response = server
        .client
        .delete(server.url("/api/books/8271"))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logged_user_cannot_delete_book() {
    let server = RunningServer::start().await;

    let response = server
        .client
        .delete(server.url("/api/books/8373"))
        .basic_auth("user", Some("pass"))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_deletes_book() {
    let server = RunningServer::start().await;

    let created: Book = server
        .create_book("admin")
        .await
        .json()
        .await
        .expect("Body is not a book");

    let response = server
        .client
        .delete(server.url(&format!("/api/books/{}", created.id)))
        .basic_auth("admin", Some("pass"))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::OK);

    let books: Vec<Book> = server
        .client
        .get(server.url("/api/books/"))
        .send()
        .await
        .expect("Request failed")
        .json()
        .await
        .expect("Body is not a book list");

    assert!(books.iter().all(|book| book.id != created.id));
    assert_eq!(books.len(), SEEDED_TITLES.len());
}

#[tokio::test]
async fn authorization_matrix_holds_over_tls() {
    let server = RunningServer::start_with_tls().await;
    assert!(server.base_url.starts_with("https://"));

    assert_lists_seeded_books(&server, None).await;

    let response = server
        .client
        .post(server.url("/api/books/"))
        .json(&NewBook::new("Test title", "test description"))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = server.create_book("user").await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Book = response.json().await.expect("Body is not a book");

    let response = server
        .client
        .delete(server.url(&format!("/api/books/{}", created.id)))
        .basic_auth("user", Some("pass"))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = server
        .client
        .delete(server.url(&format!("/api/books/{}", created.id)))
        .basic_auth("admin", Some("pass"))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn admin_deletes_missing_book_as_no_op() {
    let server = RunningServer::start().await;

    let response = server
        .client
        .delete(server.url("/api/books/54"))
        .basic_auth("admin", Some("pass"))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::OK);
}
