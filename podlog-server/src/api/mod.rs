//! HTTP API handlers for podlog-server

pub mod appearances;
pub mod auth;
pub mod episodes;
pub mod guests;
pub mod health;
pub mod params;
pub mod users;

pub use appearances::{create_appearance, get_appearance, list_appearances};
pub use auth::require_bearer;
pub use episodes::{create_episode, delete_episode, get_episode, list_episodes};
pub use guests::{create_guest, delete_guest, get_guest, list_guests};
pub use health::health_routes;
pub use params::IdPath;
pub use users::{login, register};
