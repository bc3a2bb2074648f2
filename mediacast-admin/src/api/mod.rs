//! HTTP API for the mediacast admin service

pub mod auth;
pub mod podcasts;
pub mod server;
pub mod storage;
pub mod thumbs;

pub use server::AppContext;
