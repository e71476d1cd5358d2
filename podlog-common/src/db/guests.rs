//! Guest queries

use super::models::{Guest, NewGuest};
use crate::Result;
use sqlx::{Executor, Sqlite};

/// Insert a guest, returning its assigned id
pub async fn insert_guest<'e, E>(executor: E, guest: &NewGuest) -> Result<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("INSERT INTO guests (name, occupation) VALUES (?, ?)")
        .bind(&guest.name)
        .bind(&guest.occupation)
        .execute(executor)
        .await?;

    Ok(result.last_insert_rowid())
}

pub async fn get_guest<'e, E>(executor: E, id: i64) -> Result<Option<Guest>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let guest = sqlx::query_as::<_, Guest>("SELECT id, name, occupation FROM guests WHERE id = ?")
        .bind(id)
        .fetch_optional(executor)
        .await?;

    Ok(guest)
}

pub async fn guest_exists<'e, E>(executor: E, id: i64) -> Result<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM guests WHERE id = ?")
        .bind(id)
        .fetch_optional(executor)
        .await?;

    Ok(found.is_some())
}

pub async fn list_guests<'e, E>(executor: E) -> Result<Vec<Guest>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let guests = sqlx::query_as::<_, Guest>("SELECT id, name, occupation FROM guests ORDER BY id")
        .fetch_all(executor)
        .await?;

    Ok(guests)
}

/// Delete a guest and, by cascade, its appearances
///
/// Returns false when no guest had that id.
pub async fn delete_guest<'e, E>(executor: E, id: i64) -> Result<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM guests WHERE id = ?")
        .bind(id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected() > 0)
}
