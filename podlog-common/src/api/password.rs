//! Password hashing for user accounts
//!
//! Stored hash is SHA-256 of `salt + password`, hex encoded. Each user gets
//! a fresh 16-byte random salt.

use rand::RngCore;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Generate a random 16-byte salt, hex encoded
pub fn generate_salt() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

pub fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

pub fn verify_password(password: &str, salt: &str, expected_hash: &str) -> bool {
    let actual = hash_password(password, salt);
    actual.as_bytes().ct_eq(expected_hash.as_bytes()).into()
}
