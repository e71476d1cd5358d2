//! Key/value runtime settings

use crate::Result;
use sqlx::{Executor, Sqlite};

pub async fn get_setting<'e, E>(executor: E, key: &str) -> Result<Option<String>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let value: Option<Option<String>> =
        sqlx::query_scalar("SELECT value FROM settings WHERE key = ?")
            .bind(key)
            .fetch_optional(executor)
            .await?;

    Ok(value.flatten())
}

pub async fn set_setting<'e, E>(executor: E, key: &str, value: &str) -> Result<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        "INSERT OR REPLACE INTO settings (key, value, updated_at) VALUES (?, ?, CURRENT_TIMESTAMP)",
    )
    .bind(key)
    .bind(value)
    .execute(executor)
    .await?;

    Ok(())
}
