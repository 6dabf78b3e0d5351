//! HTTP server for Larder.
//!
//! Serves the leftover-food list as a small JSON API over a prefix-namespaced
//! key-value table, with optional bearer-token authentication.

pub mod auth;
pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;

pub use auth::Credentials;
pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use router::build_router;
pub use server::LarderServer;
pub use state::AppState;
