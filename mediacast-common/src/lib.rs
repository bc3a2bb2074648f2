//! # Mediacast Common Library
//!
//! Shared code for the mediacast services including:
//! - Database models and queries
//! - Configuration and data folder resolution
//! - Slug generation and uniqueness helpers
//! - Text cleanup for admin-submitted content

pub mod config;
pub mod db;
pub mod error;
pub mod slug;
pub mod text;

pub use error::{Error, Result};
