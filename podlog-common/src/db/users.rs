//! User account queries

use super::models::User;
use crate::Result;
use sqlx::{Executor, Sqlite};

/// Insert a user; returns None if the username is already taken
pub async fn insert_user<'e, E>(
    executor: E,
    username: &str,
    password_hash: &str,
    password_salt: &str,
) -> Result<Option<i64>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        "INSERT INTO users (username, password_hash, password_salt) VALUES (?, ?, ?)
         ON CONFLICT(username) DO NOTHING",
    )
    .bind(username)
    .bind(password_hash)
    .bind(password_salt)
    .execute(executor)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    Ok(Some(result.last_insert_rowid()))
}

pub async fn find_user_by_username<'e, E>(executor: E, username: &str) -> Result<Option<User>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let user = sqlx::query_as::<_, User>(
        "SELECT id, username, password_hash, password_salt FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(executor)
    .await?;

    Ok(user)
}
