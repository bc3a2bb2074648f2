//! Mediacast admin service
//!
//! HTTP admin surface for the mediacast CMS: podcast CRUD, thumbnail
//! upload/resize, and storage backend configuration.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod forms;
pub mod thumbs;

pub use error::{Error, Result};
