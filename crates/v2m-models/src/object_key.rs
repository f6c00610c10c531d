//! Stored object identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Identifier assigned by the blob store when an object is written.
///
/// Keys are minted by the storage layer on put, never by request handlers.
/// The string form is what callers pass back as `fid` on download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectKey(Uuid);

/// Error returned when a string is not a valid object key.
#[derive(Debug, Error)]
#[error("invalid object key: {0}")]
pub struct ParseKeyError(String);

impl ObjectKey {
    /// Mint a fresh key. Only the storage layer should call this.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a caller-supplied key string, validating the format.
    pub fn parse(s: &str) -> Result<Self, ParseKeyError> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| ParseKeyError(s.to_string()))
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ObjectKey {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
