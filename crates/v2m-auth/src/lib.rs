//! Identity service HTTP client.
//!
//! The gateway never verifies or issues tokens itself. Login forwards Basic
//! credentials to the identity service; validation forwards the bearer token
//! and decodes the returned access claim.

pub mod client;
pub mod error;

pub use client::{IdentityClient, IdentityConfig};
pub use error::{AuthError, AuthResult};
