//! Bearer token middleware
//!
//! Applied to mutating routes only. Runs before any handler logic, so a
//! request without a valid token never has its body read. Verified
//! [`Claims`](podlog_common::api::Claims) are inserted into the request extensions.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use podlog_common::api::{parse_bearer, ApiAuthError};
use tracing::warn;

use crate::error::ApiError;
use crate::AppState;

/// Reject the request with 401 unless it carries a valid bearer token
pub async fn require_bearer(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = {
        let header = request
            .headers()
            .get(AUTHORIZATION)
            .ok_or(ApiAuthError::MissingHeader)?
            .to_str()
            .map_err(|_| ApiAuthError::MalformedHeader)?;

        let token = parse_bearer(header)?;

        state.tokens.verify(token).map_err(|e| {
            warn!(
                "Rejected bearer token for {} {}: {:?}",
                request.method(),
                request.uri().path(),
                e
            );
            e
        })?
    };

    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}
