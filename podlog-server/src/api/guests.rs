//! Guest endpoints

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    Json,
};
use podlog_common::api::MessageResponse;
use podlog_common::db::{guests, Guest};
use tracing::info;

use super::params::IdPath;
use crate::error::ApiError;
use crate::validation::{parse_payload, validate_guest, GuestPayload, GUEST_NOT_FOUND};
use crate::AppState;

/// GET /guests
pub async fn list_guests(State(state): State<AppState>) -> Result<Json<Vec<Guest>>, ApiError> {
    Ok(Json(guests::list_guests(&state.db).await?))
}

/// GET /guests/:id
pub async fn get_guest(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<Guest>, ApiError> {
    guests::get_guest(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(GUEST_NOT_FOUND))
}

/// POST /guests (bearer token required)
pub async fn create_guest(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let guest = validate_guest(&parse_payload::<GuestPayload>(&body)?)?;

    let mut tx = state.db.begin().await?;
    let id = guests::insert_guest(&mut *tx, &guest).await?;
    tx.commit().await?;

    info!("Guest {} created: {}", id, guest.name);

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Guest created successfully")),
    ))
}

/// DELETE /guests/:id (bearer token required)
///
/// The guest's appearances are removed with it.
pub async fn delete_guest(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<MessageResponse>, ApiError> {
    let mut tx = state.db.begin().await?;
    if !guests::delete_guest(&mut *tx, id).await? {
        return Err(ApiError::not_found(GUEST_NOT_FOUND));
    }
    tx.commit().await?;

    info!("Guest {} deleted", id);

    Ok(Json(MessageResponse::new("Guest deleted successfully")))
}
