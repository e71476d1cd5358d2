//! Shared HTTP API functionality
//!
//! Pure functions and types only; each HTTP layer wraps these with its own
//! framework-specific middleware.

pub mod auth;
pub mod password;
pub mod types;

pub use auth::{load_or_create_token_secret, parse_bearer, ApiAuthError, Claims, TokenSigner};
pub use password::{generate_salt, hash_password, verify_password};
pub use types::{HealthResponse, MessageResponse, TokenResponse};
