//! # podlog Common Library
//!
//! Shared code for the podlog backend:
//! - Database initialization, models and queries
//! - Bearer token signing and password hashing
//! - Shared API response types
//! - Configuration loading

pub mod api;
pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
