//! Identity service client.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use v2m_models::AccessClaim;

use crate::error::{AuthError, AuthResult};

/// Configuration for the identity client.
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    /// Base URL of the identity service
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl IdentityConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("AUTH_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:5000".to_string()),
            timeout: Duration::from_secs(
                std::env::var("AUTH_SERVICE_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
            ),
        }
    }
}

/// Client for the identity service.
pub struct IdentityClient {
    http: Client,
    config: IdentityConfig,
}

impl IdentityClient {
    /// Create a new identity client.
    pub fn new(config: IdentityConfig) -> AuthResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AuthError::Unavailable(e.to_string()))?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> AuthResult<Self> {
        Self::new(IdentityConfig::from_env())
    }

    /// Exchange Basic credentials for a bearer token.
    ///
    /// The credentials are forwarded verbatim; an identity-side rejection is
    /// passed through as `InvalidCredentials`.
    pub async fn login(&self, username: &str, password: &str) -> AuthResult<String> {
        let url = format!("{}/login", self.config.base_url);
        debug!(user = %username, "Forwarding login to identity service");

        let response = self
            .http
            .post(&url)
            .basic_auth(username, Some(password))
            .send()
            .await
            .map_err(|e| AuthError::Unavailable(e.to_string()))?;

        match response.status() {
            status if status.is_success() => response
                .text()
                .await
                .map_err(|e| AuthError::Unavailable(e.to_string())),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(AuthError::InvalidCredentials),
            status => {
                warn!("Identity service returned {status} on login");
                Err(AuthError::Unavailable(format!(
                    "identity service returned {status}"
                )))
            }
        }
    }

    /// Validate a bearer token and decode the access claim it carries.
    ///
    /// A verified token always carries a well-formed claim; a decode failure
    /// here indicates dependency skew and is reported as `MalformedClaim`,
    /// not as a caller error.
    pub async fn validate(&self, token: &str) -> AuthResult<AccessClaim> {
        let url = format!("{}/validate", self.config.base_url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AuthError::Unavailable(e.to_string()))?;

        match response.status() {
            status if status.is_success() => {
                let body = response
                    .text()
                    .await
                    .map_err(|e| AuthError::Unavailable(e.to_string()))?;
                serde_json::from_str(&body).map_err(|e| {
                    warn!("Identity service returned an undecodable claim: {e}");
                    AuthError::MalformedClaim(e.to_string())
                })
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(AuthError::InvalidToken("token rejected".to_string()))
            }
            status => {
                warn!("Identity service returned {status} on validate");
                Err(AuthError::Unavailable(format!(
                    "identity service returned {status}"
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = IdentityConfig::default();
        assert_eq!(config.base_url, "http://localhost:5000");
        assert_eq!(config.timeout, Duration::from_secs(10));
    }
}
