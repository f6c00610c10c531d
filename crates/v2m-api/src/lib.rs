//! Axum HTTP gateway.
//!
//! This crate provides:
//! - Bearer-token authorization via the identity service
//! - Video upload into the blob store plus transcode job publish
//! - MP3 download by stored object key
//! - Dependency health reporting

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod state;

#[cfg(test)]
pub(crate) mod testutil;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
