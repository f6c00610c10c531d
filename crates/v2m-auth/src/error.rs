//! Auth error types.

use thiserror::Error;

pub type AuthResult<T> = Result<T, AuthError>;

/// Failure modes of the identity service round trip.
///
/// `InvalidCredentials` and `InvalidToken` are the caller's fault;
/// `MalformedClaim` and `Unavailable` are not. The distinction drives the
/// 401-vs-500 split at the API boundary.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Malformed access claim: {0}")]
    MalformedClaim(String),

    #[error("Identity service unavailable: {0}")]
    Unavailable(String),
}

impl AuthError {
    /// True when the failure is the caller's fault (reject with 401).
    pub fn is_client_fault(&self) -> bool {
        matches!(self, Self::InvalidCredentials | Self::InvalidToken(_))
    }
}
