//! Bearer token signing and verification
//!
//! # Token format
//!
//! Three base64url (no padding) segments joined by `.`:
//! - header: `{"alg":"SHA256","typ":"JWT"}`
//! - claims: `{"sub":..,"iat":..,"exp":..}` (Unix seconds)
//! - signature: SHA-256 of `"<header>.<claims>"` with the secret appended
//!
//! # Pure Functions
//!
//! No HTTP framework dependencies here. The axum middleware lives in
//! podlog-server and only calls [`TokenSigner::verify`].

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use sqlx::SqlitePool;
use subtle::ConstantTimeEq;

use crate::db::settings::{get_setting, set_setting};

/// Settings table key holding the generated signing secret
pub const TOKEN_SECRET_SETTING: &str = "jwt_secret_key";

const TOKEN_HEADER: &str = r#"{"alg":"SHA256","typ":"JWT"}"#;

// ========================================
// Error Types
// ========================================

/// Token verification failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiAuthError {
    /// No Authorization header on the request
    MissingHeader,

    /// Authorization header present but not `Bearer <token>`
    MalformedHeader,

    /// Token structure, encoding or signature is wrong
    InvalidToken(String),

    /// Token signature is valid but `exp` has passed
    Expired { exp: i64, now: i64 },
}

impl std::fmt::Display for ApiAuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiAuthError::MissingHeader => write!(f, "Missing Authorization Header"),
            ApiAuthError::MalformedHeader => write!(f, "Invalid Authorization Header"),
            ApiAuthError::InvalidToken(_) => write!(f, "Invalid token"),
            ApiAuthError::Expired { .. } => write!(f, "Token has expired"),
        }
    }
}

impl std::error::Error for ApiAuthError {}

// ========================================
// Claims and Signer
// ========================================

/// Claims carried by a bearer token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,
    /// Issued at, Unix seconds
    pub iat: i64,
    /// Expires at, Unix seconds
    pub exp: i64,
}

/// Issues and verifies bearer tokens with a shared secret
#[derive(Clone)]
pub struct TokenSigner {
    secret: String,
    ttl_secs: i64,
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

impl TokenSigner {
    pub fn new(secret: impl Into<String>, ttl_secs: i64) -> Self {
        Self {
            secret: secret.into(),
            ttl_secs,
        }
    }

    pub fn ttl_secs(&self) -> i64 {
        self.ttl_secs
    }

    /// Issue a token for `subject`, valid from now for the configured lifetime
    pub fn issue(&self, subject: &str) -> String {
        self.issue_at(subject, chrono::Utc::now().timestamp())
    }

    /// Issue a token as if the current time were `now`
    pub fn issue_at(&self, subject: &str, now: i64) -> String {
        let claims = Claims {
            sub: subject.to_string(),
            iat: now,
            exp: now.saturating_add(self.ttl_secs),
        };

        // Claims holds only strings and integers; serialization cannot fail
        let claims_json = serde_json::to_vec(&claims).unwrap_or_default();

        let signing_input = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(TOKEN_HEADER),
            URL_SAFE_NO_PAD.encode(claims_json)
        );
        let signature = self.sign(&signing_input);

        format!("{}.{}", signing_input, signature)
    }

    /// Verify signature and expiry against the current time
    pub fn verify(&self, token: &str) -> Result<Claims, ApiAuthError> {
        self.verify_at(token, chrono::Utc::now().timestamp())
    }

    /// Verify signature and expiry as if the current time were `now`
    pub fn verify_at(&self, token: &str, now: i64) -> Result<Claims, ApiAuthError> {
        let mut segments = token.split('.');
        let (header, claims, signature) = match (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) {
            (Some(h), Some(c), Some(s), None) => (h, c, s),
            _ => {
                return Err(ApiAuthError::InvalidToken(
                    "expected three segments".to_string(),
                ))
            }
        };

        let expected = self.sign(&format!("{}.{}", header, claims));
        if !bool::from(signature.as_bytes().ct_eq(expected.as_bytes())) {
            return Err(ApiAuthError::InvalidToken(
                "signature mismatch".to_string(),
            ));
        }

        let header_bytes = URL_SAFE_NO_PAD
            .decode(header)
            .map_err(|e| ApiAuthError::InvalidToken(format!("header encoding: {}", e)))?;
        if header_bytes != TOKEN_HEADER.as_bytes() {
            return Err(ApiAuthError::InvalidToken(
                "unsupported header".to_string(),
            ));
        }

        let claims_bytes = URL_SAFE_NO_PAD
            .decode(claims)
            .map_err(|e| ApiAuthError::InvalidToken(format!("claims encoding: {}", e)))?;
        let claims: Claims = serde_json::from_slice(&claims_bytes)
            .map_err(|e| ApiAuthError::InvalidToken(format!("claims: {}", e)))?;

        if now >= claims.exp {
            return Err(ApiAuthError::Expired {
                exp: claims.exp,
                now,
            });
        }

        Ok(claims)
    }

    fn sign(&self, signing_input: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(signing_input.as_bytes());
        hasher.update(self.secret.as_bytes());
        URL_SAFE_NO_PAD.encode(hasher.finalize())
    }
}

/// Extract the token from an `Authorization` header value
pub fn parse_bearer(header_value: &str) -> Result<&str, ApiAuthError> {
    let token = header_value
        .strip_prefix("Bearer ")
        .ok_or(ApiAuthError::MalformedHeader)?
        .trim();

    if token.is_empty() {
        return Err(ApiAuthError::MalformedHeader);
    }

    Ok(token)
}

// ========================================
// Secret Management
// ========================================

/// Generate a random 32-byte secret, hex encoded
pub fn generate_secret() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Load the signing secret from settings, generating and storing it if absent
pub async fn load_or_create_token_secret(db: &SqlitePool) -> crate::Result<String> {
    if let Some(secret) = get_setting(db, TOKEN_SECRET_SETTING).await? {
        if !secret.is_empty() {
            return Ok(secret);
        }
    }

    let secret = generate_secret();
    set_setting(db, TOKEN_SECRET_SETTING, &secret).await?;
    tracing::info!("Generated new token signing secret");

    Ok(secret)
}

// ========================================
// Tests
// ========================================
