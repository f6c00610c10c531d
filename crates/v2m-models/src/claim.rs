//! Access claims decoded from validated bearer tokens.

use serde::{Deserialize, Serialize};

/// Authorization payload returned by the identity service for a valid token.
///
/// Lives for the duration of one request and is never persisted. Both `sub`
/// and `admin` are required: a verified token whose claim body is missing
/// either field is treated as malformed by the auth client, not defaulted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaim {
    /// Subject the token was issued to.
    #[serde(alias = "username")]
    pub sub: String,
    /// Coarse authorization flag: upload and download require `true`.
    pub admin: bool,
}
