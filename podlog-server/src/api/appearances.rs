//! Appearance endpoints
//!
//! `POST /appearances` is the one write path for appearances: the payload is
//! validated against the store inside the same transaction that inserts the
//! row, so the references it checked are the ones it commits against.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    Extension, Json,
};
use podlog_common::api::{Claims, MessageResponse};
use podlog_common::db::{appearances, Appearance};
use tracing::{debug, info};

use super::params::IdPath;
use crate::error::ApiError;
use crate::validation::{parse_payload, validate_appearance, AppearancePayload};
use crate::AppState;

/// POST /appearances (bearer token required)
///
/// 201 on success; 400 for missing fields or a rating outside [1,5];
/// 404 when the guest or episode does not exist.
pub async fn create_appearance(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    body: Bytes,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let payload: AppearancePayload = parse_payload(&body)?;

    // Rolled back on drop for every early return below
    let mut tx = state.db.begin().await?;

    let appearance = validate_appearance(&payload, &mut *tx)
        .await
        .map_err(|e| {
            debug!("Appearance rejected: {}", e);
            e
        })?;

    let id = appearances::insert_appearance(&mut *tx, &appearance).await?;
    tx.commit().await?;

    info!(
        "Appearance {} created by {} (guest {}, episode {}, rating {})",
        id, claims.sub, appearance.guest_id, appearance.episode_id, appearance.rating
    );

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Appearance created successfully")),
    ))
}

/// GET /appearances
pub async fn list_appearances(
    State(state): State<AppState>,
) -> Result<Json<Vec<Appearance>>, ApiError> {
    Ok(Json(appearances::list_appearances(&state.db).await?))
}

/// GET /appearances/:id
pub async fn get_appearance(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<Appearance>, ApiError> {
    appearances::get_appearance(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Appearance not found"))
}
