//! Storage engine configuration forms
//!
//! Each storage backend exposes a form that knows how to seed its fields
//! from the engine's settings and how to map validated submissions back.
//! Field names and setting keys differ, so the mapping is explicit in each
//! implementation rather than derived.

pub mod ftp;

use super::FormErrors;
use crate::db::storage::StorageEngine;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A configuration form for one storage engine type
pub trait StorageForm {
    /// Form value structure exchanged with the client
    type Values: Serialize + DeserializeOwned;

    /// The `engine_type` this form handles
    fn engine_type(&self) -> &'static str;

    /// Produce form values seeded with the engine's current settings
    fn display(&self, engine: &StorageEngine) -> Self::Values;

    /// Map validated form values back into the engine's settings.
    ///
    /// Does not persist; the caller saves the engine afterwards.
    fn save_engine_params(
        &self,
        engine: &mut StorageEngine,
        values: Self::Values,
    ) -> Result<(), FormErrors>;
}
