//! Database models and queries
//!
//! Query functions take any `sqlx::Executor`, so the same call works against
//! the pool or inside a handler's transaction.

pub mod appearances;
pub mod episodes;
pub mod guests;
pub mod init;
pub mod models;
pub mod settings;
pub mod users;

pub use init::*;
pub use models::*;
