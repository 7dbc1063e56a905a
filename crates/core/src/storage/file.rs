use std::path::PathBuf;

use crate::errors::CoreError;
use crate::models::preferences::Preferences;

use super::store::{self, PreferenceStore};

/// File-backed store (native only): the envelope is written as pretty JSON
/// to a single file, replaced wholesale on every save.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl PreferenceStore for FileStore {
    fn load(&self) -> Result<Option<Preferences>, CoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let text = std::fs::read_to_string(&self.path)?;
        Ok(store::read_blob(&text))
    }

    fn save(&mut self, prefs: &Preferences) -> Result<(), CoreError> {
        let blob = store::write_blob(prefs)?;
        std::fs::write(&self.path, blob)?;
        Ok(())
    }
}
