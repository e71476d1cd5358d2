//! Appearance queries

use super::models::{Appearance, NewAppearance};
use crate::Result;
use sqlx::{Executor, Sqlite};

/// Insert an appearance, returning its assigned id
///
/// Callers validate the rating and both references first; the schema's
/// CHECK and foreign-key constraints are the last line only.
pub async fn insert_appearance<'e, E>(executor: E, appearance: &NewAppearance) -> Result<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result =
        sqlx::query("INSERT INTO appearances (rating, guest_id, episode_id) VALUES (?, ?, ?)")
            .bind(appearance.rating)
            .bind(appearance.guest_id)
            .bind(appearance.episode_id)
            .execute(executor)
            .await?;

    Ok(result.last_insert_rowid())
}

pub async fn get_appearance<'e, E>(executor: E, id: i64) -> Result<Option<Appearance>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let appearance = sqlx::query_as::<_, Appearance>(
        "SELECT id, rating, guest_id, episode_id FROM appearances WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(appearance)
}

pub async fn list_appearances<'e, E>(executor: E) -> Result<Vec<Appearance>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let appearances = sqlx::query_as::<_, Appearance>(
        "SELECT id, rating, guest_id, episode_id FROM appearances ORDER BY id",
    )
    .fetch_all(executor)
    .await?;

    Ok(appearances)
}

pub async fn list_appearances_for_episode<'e, E>(
    executor: E,
    episode_id: i64,
) -> Result<Vec<Appearance>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let appearances = sqlx::query_as::<_, Appearance>(
        "SELECT id, rating, guest_id, episode_id FROM appearances WHERE episode_id = ? ORDER BY id",
    )
    .bind(episode_id)
    .fetch_all(executor)
    .await?;

    Ok(appearances)
}
