pub mod auth;
pub mod cli_args;
pub mod config;
pub mod error;
mod extractor;
mod middleware;
pub mod openapi;
pub mod route;
pub mod server;
pub mod state;
pub mod store;
pub mod types;
mod utils;
