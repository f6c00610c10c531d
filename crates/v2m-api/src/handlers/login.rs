//! Login handler.

use axum::extract::State;
use axum_extra::headers::authorization::Basic;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Exchange Basic credentials for a bearer token.
///
/// The gateway does not issue tokens; the credentials are forwarded to the
/// identity service and its verdict is passed through.
pub async fn login(
    State(state): State<AppState>,
    credentials: Option<TypedHeader<Authorization<Basic>>>,
) -> ApiResult<String> {
    let TypedHeader(Authorization(basic)) =
        credentials.ok_or_else(|| ApiError::unauthorized("missing credentials"))?;

    let token = state
        .identity
        .login(basic.username(), basic.password())
        .await?;

    info!(user = %basic.username(), "Login successful");
    Ok(token)
}
