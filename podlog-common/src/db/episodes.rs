//! Episode queries

use super::models::{Episode, NewEpisode};
use crate::Result;
use sqlx::{Executor, Sqlite};

/// Insert an episode, returning its assigned id
pub async fn insert_episode<'e, E>(executor: E, episode: &NewEpisode) -> Result<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("INSERT INTO episodes (date, number) VALUES (?, ?)")
        .bind(&episode.date)
        .bind(episode.number)
        .execute(executor)
        .await?;

    Ok(result.last_insert_rowid())
}

pub async fn get_episode<'e, E>(executor: E, id: i64) -> Result<Option<Episode>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let episode = sqlx::query_as::<_, Episode>("SELECT id, date, number FROM episodes WHERE id = ?")
        .bind(id)
        .fetch_optional(executor)
        .await?;

    Ok(episode)
}

pub async fn episode_exists<'e, E>(executor: E, id: i64) -> Result<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM episodes WHERE id = ?")
        .bind(id)
        .fetch_optional(executor)
        .await?;

    Ok(found.is_some())
}

pub async fn list_episodes<'e, E>(executor: E) -> Result<Vec<Episode>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let episodes = sqlx::query_as::<_, Episode>("SELECT id, date, number FROM episodes ORDER BY id")
        .fetch_all(executor)
        .await?;

    Ok(episodes)
}

/// Delete an episode and, by cascade, its appearances
pub async fn delete_episode<'e, E>(executor: E, id: i64) -> Result<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM episodes WHERE id = ?")
        .bind(id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected() > 0)
}
