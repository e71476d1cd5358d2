//! Account registration and login
//!
//! Login is the only place bearer tokens are issued over HTTP.

use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use podlog_common::api::{
    generate_salt, hash_password, verify_password, MessageResponse, TokenResponse,
};
use podlog_common::db::users;
use tracing::{info, warn};

use crate::error::ApiError;
use crate::validation::{parse_payload, validate_credentials, CredentialsPayload};
use crate::AppState;

/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let credentials = validate_credentials(&parse_payload::<CredentialsPayload>(&body)?)?;

    let salt = generate_salt();
    let password_hash = hash_password(&credentials.password, &salt);

    match users::insert_user(&state.db, &credentials.username, &password_hash, &salt).await? {
        Some(id) => {
            info!("User {} registered: {}", id, credentials.username);
            Ok((
                StatusCode::CREATED,
                Json(MessageResponse::new("User registered successfully")),
            ))
        }
        None => Err(ApiError::Conflict("Username already exists".to_string())),
    }
}

/// POST /auth/login
///
/// Unknown user and wrong password get the same answer.
pub async fn login(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<TokenResponse>, ApiError> {
    let credentials = validate_credentials(&parse_payload::<CredentialsPayload>(&body)?)?;

    let user = users::find_user_by_username(&state.db, &credentials.username).await?;

    match user {
        Some(user)
            if verify_password(&credentials.password, &user.password_salt, &user.password_hash) =>
        {
            info!("User {} logged in", user.username);
            Ok(Json(TokenResponse {
                access_token: state.tokens.issue(&user.username),
            }))
        }
        _ => {
            warn!("Failed login for {}", credentials.username);
            Err(ApiError::Unauthorized("Invalid credentials".to_string()))
        }
    }
}
