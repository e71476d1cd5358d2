//! Episode endpoints

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    Json,
};
use podlog_common::api::MessageResponse;
use podlog_common::db::{appearances, episodes, Episode, EpisodeDetail};
use tracing::info;

use super::params::IdPath;
use crate::error::ApiError;
use crate::validation::{parse_payload, validate_episode, EpisodePayload, EPISODE_NOT_FOUND};
use crate::AppState;

/// GET /episodes
pub async fn list_episodes(
    State(state): State<AppState>,
) -> Result<Json<Vec<Episode>>, ApiError> {
    Ok(Json(episodes::list_episodes(&state.db).await?))
}

/// GET /episodes/:id
///
/// Includes the appearances recorded for the episode.
pub async fn get_episode(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<EpisodeDetail>, ApiError> {
    // One connection for both reads
    let mut conn = state.db.acquire().await?;

    let episode = episodes::get_episode(&mut *conn, id)
        .await?
        .ok_or_else(|| ApiError::not_found(EPISODE_NOT_FOUND))?;
    let appearances = appearances::list_appearances_for_episode(&mut *conn, id).await?;

    Ok(Json(EpisodeDetail {
        episode,
        appearances,
    }))
}

/// POST /episodes (bearer token required)
pub async fn create_episode(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let episode = validate_episode(&parse_payload::<EpisodePayload>(&body)?)?;

    let mut tx = state.db.begin().await?;
    let id = episodes::insert_episode(&mut *tx, &episode).await?;
    tx.commit().await?;

    info!("Episode {} created: #{} on {}", id, episode.number, episode.date);

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Episode created successfully")),
    ))
}

/// DELETE /episodes/:id (bearer token required)
///
/// The episode's appearances are removed with it.
pub async fn delete_episode(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<MessageResponse>, ApiError> {
    let mut tx = state.db.begin().await?;
    if !episodes::delete_episode(&mut *tx, id).await? {
        return Err(ApiError::not_found(EPISODE_NOT_FOUND));
    }
    tx.commit().await?;

    info!("Episode {} deleted", id);

    Ok(Json(MessageResponse::new("Episode deleted successfully")))
}
