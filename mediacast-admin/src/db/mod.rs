//! Admin-side database queries

pub mod podcasts;
pub mod storage;
