use crate::errors::CoreError;
use crate::models::preferences::Preferences;

use super::store::{self, PreferenceStore};

/// In-memory store: the blob lives in a buffer for the lifetime of the
/// store. Used by tests and by hosts that bridge to their own key-value
/// storage (e.g., browser local storage on WASM).
#[derive(Debug, Default)]
pub struct MemoryStore {
    blob: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with a raw blob, as if a previous session had written
    /// it. Accepts arbitrary text so corrupt-storage behavior is testable.
    pub fn with_raw(blob: impl Into<String>) -> Self {
        Self {
            blob: Some(blob.into()),
        }
    }

    /// The raw persisted blob, if any.
    #[must_use]
    pub fn raw(&self) -> Option<&str> {
        self.blob.as_deref()
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self) -> Result<Option<Preferences>, CoreError> {
        Ok(self.blob.as_deref().and_then(store::read_blob))
    }

    fn save(&mut self, prefs: &Preferences) -> Result<(), CoreError> {
        self.blob = Some(store::write_blob(prefs)?);
        Ok(())
    }
}
