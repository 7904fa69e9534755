//! # Wedlist Common Library
//!
//! Shared code for the wedlist guest-list service:
//! - Error type used across crates
//! - Configuration loading (CLI > environment > TOML > defaults)
//! - Database initialization and row models
//! - RSVP code generation and RSVP statistics

pub mod config;
pub mod db;
pub mod error;
pub mod rsvp_code;
pub mod stats;

pub use error::{Error, Result};
