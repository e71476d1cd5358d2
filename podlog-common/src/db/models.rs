//! Database models

use serde::{Deserialize, Serialize};

/// A podcast guest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Guest {
    pub id: i64,
    pub name: String,
    pub occupation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGuest {
    pub name: String,
    pub occupation: Option<String>,
}

/// A single podcast episode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Episode {
    pub id: i64,
    pub date: String,
    pub number: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEpisode {
    pub date: String,
    pub number: i64,
}

/// Join record: a guest appeared in an episode with a rating in [1,5]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Appearance {
    pub id: i64,
    pub rating: i64,
    pub guest_id: i64,
    pub episode_id: i64,
}

/// Validated appearance, ready to insert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewAppearance {
    pub rating: i64,
    pub guest_id: i64,
    pub episode_id: i64,
}

/// Episode together with the appearances recorded for it
#[derive(Debug, Clone, Serialize)]
pub struct EpisodeDetail {
    #[serde(flatten)]
    pub episode: Episode,
    pub appearances: Vec<Appearance>,
}

/// Account allowed to obtain bearer tokens
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub password_salt: String,
}
