//! Bearer-token authorization gate.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use v2m_models::AccessClaim;

use crate::error::ApiError;
use crate::metrics;
use crate::state::AppState;

/// Authenticated admin extracted from the request.
///
/// Extraction runs the full gate: bearer token presence, identity-service
/// validation, claim decode, and the admin check. Handlers that take an
/// `AdminUser` cannot run without it.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub claim: AccessClaim,
}

fn require_admin(claim: AccessClaim) -> Result<AdminUser, ApiError> {
    if !claim.admin {
        metrics::record_auth_rejection("not_admin");
        return Err(ApiError::forbidden("not authorized"));
    }
    Ok(AdminUser { claim })
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Token presence is checked before any downstream call.
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                metrics::record_auth_rejection("missing_token");
                ApiError::unauthorized("Missing Authorization header")
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            metrics::record_auth_rejection("missing_token");
            ApiError::unauthorized("Invalid Authorization header format")
        })?;

        let claim = state.identity.validate(token).await.map_err(|e| {
            let reason = if e.is_client_fault() {
                "invalid_token"
            } else {
                "identity_failure"
            };
            metrics::record_auth_rejection(reason);
            ApiError::Auth(e)
        })?;

        require_admin(claim)
    }
}
