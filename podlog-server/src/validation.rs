//! Request payload validation
//!
//! Payload structs keep every field as `Option<Value>` so that an absent key
//! (`None`) can be told apart from a key present with a wrong type or `null`
//! (`Some(..)`). Checks run in a fixed order and the first failure wins:
//! presence, then types and ranges, then references to other entities.

use axum::async_trait;
use podlog_common::db::{episodes, guests, NewAppearance, NewEpisode, NewGuest};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use sqlx::SqliteConnection;

use crate::error::ApiError;

pub const MISSING_FIELDS: &str = "Missing required fields";
pub const INVALID_FIELD_TYPES: &str = "Invalid field types";
pub const RATING_OUT_OF_RANGE: &str = "Rating must be between 1 and 5";
pub const GUEST_NOT_FOUND: &str = "Guest not found";
pub const EPISODE_NOT_FOUND: &str = "Episode not found";

pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;

/// Keep a present `null` as `Some(Value::Null)` instead of `None`
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Parse a request body into a payload struct
///
/// A body that is not valid JSON, or is valid JSON but not an object, is
/// treated as carrying none of the required fields.
pub fn parse_payload<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|_| ApiError::bad_request(MISSING_FIELDS))?;

    if !value.is_object() {
        return Err(ApiError::bad_request(MISSING_FIELDS));
    }

    serde_json::from_value(value).map_err(|_| ApiError::bad_request(MISSING_FIELDS))
}

// ============================================================================
// Appearance
// ============================================================================

/// Body of `POST /appearances`
#[derive(Debug, Default, Deserialize)]
pub struct AppearancePayload {
    #[serde(default, deserialize_with = "present")]
    pub rating: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub guest_id: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub episode_id: Option<Value>,
}

/// Read-only existence checks used by appearance validation
#[async_trait]
pub trait EntityLookup: Send {
    async fn guest_exists(&mut self, id: i64) -> podlog_common::Result<bool>;
    async fn episode_exists(&mut self, id: i64) -> podlog_common::Result<bool>;
}

#[async_trait]
impl EntityLookup for SqliteConnection {
    async fn guest_exists(&mut self, id: i64) -> podlog_common::Result<bool> {
        guests::guest_exists(&mut *self, id).await
    }

    async fn episode_exists(&mut self, id: i64) -> podlog_common::Result<bool> {
        episodes::episode_exists(&mut *self, id).await
    }
}

/// Validate an appearance payload
///
/// Order: missing fields, rating range, guest, episode. Structural checks
/// never touch `lookup`. An id that is not a JSON integer cannot resolve and
/// yields the matching not-found rejection.
pub async fn validate_appearance<L>(
    payload: &AppearancePayload,
    lookup: &mut L,
) -> Result<NewAppearance, ApiError>
where
    L: EntityLookup + ?Sized,
{
    let (Some(rating), Some(guest_ref), Some(episode_ref)) =
        (&payload.rating, &payload.guest_id, &payload.episode_id)
    else {
        return Err(ApiError::bad_request(MISSING_FIELDS));
    };

    let rating = rating
        .as_i64()
        .filter(|r| (MIN_RATING..=MAX_RATING).contains(r))
        .ok_or_else(|| ApiError::bad_request(RATING_OUT_OF_RANGE))?;

    let guest_id = match guest_ref.as_i64() {
        Some(id) if lookup.guest_exists(id).await? => id,
        _ => return Err(ApiError::not_found(GUEST_NOT_FOUND)),
    };

    let episode_id = match episode_ref.as_i64() {
        Some(id) if lookup.episode_exists(id).await? => id,
        _ => return Err(ApiError::not_found(EPISODE_NOT_FOUND)),
    };

    Ok(NewAppearance {
        rating,
        guest_id,
        episode_id,
    })
}

// ============================================================================
// Guest / Episode
// ============================================================================

/// Body of `POST /guests`
#[derive(Debug, Default, Deserialize)]
pub struct GuestPayload {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub occupation: Option<Value>,
}

/// Body of `POST /episodes`
#[derive(Debug, Default, Deserialize)]
pub struct EpisodePayload {
    #[serde(default, deserialize_with = "present")]
    pub date: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub number: Option<Value>,
}

/// Non-empty string, or the invalid-types rejection
fn non_empty_str(value: &Value) -> Result<String, ApiError> {
    match value.as_str().map(str::trim) {
        Some(s) if !s.is_empty() => Ok(s.to_string()),
        _ => Err(ApiError::bad_request(INVALID_FIELD_TYPES)),
    }
}

pub fn validate_guest(payload: &GuestPayload) -> Result<NewGuest, ApiError> {
    let Some(name) = &payload.name else {
        return Err(ApiError::bad_request(MISSING_FIELDS));
    };

    let name = non_empty_str(name)?;
    let occupation = match &payload.occupation {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => return Err(ApiError::bad_request(INVALID_FIELD_TYPES)),
    };

    Ok(NewGuest { name, occupation })
}

pub fn validate_episode(payload: &EpisodePayload) -> Result<NewEpisode, ApiError> {
    let (Some(date), Some(number)) = (&payload.date, &payload.number) else {
        return Err(ApiError::bad_request(MISSING_FIELDS));
    };

    let date = non_empty_str(date)?;
    let number = number
        .as_i64()
        .ok_or_else(|| ApiError::bad_request(INVALID_FIELD_TYPES))?;

    Ok(NewEpisode { date, number })
}

// ============================================================================
// Credentials
// ============================================================================

/// Body of `POST /auth/register` and `POST /auth/login`
#[derive(Debug, Default, Deserialize)]
pub struct CredentialsPayload {
    #[serde(default, deserialize_with = "present")]
    pub username: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub password: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

pub fn validate_credentials(payload: &CredentialsPayload) -> Result<Credentials, ApiError> {
    let (Some(username), Some(password)) = (&payload.username, &payload.password) else {
        return Err(ApiError::bad_request(MISSING_FIELDS));
    };

    let username = non_empty_str(username)?;
    // Passwords are taken verbatim, surrounding whitespace included
    let password = match password.as_str() {
        Some(p) if !p.is_empty() => p.to_string(),
        _ => return Err(ApiError::bad_request(INVALID_FIELD_TYPES)),
    };

    Ok(Credentials { username, password })
}
