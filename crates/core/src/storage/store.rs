use serde_json::Value;

use crate::errors::CoreError;
use crate::models::preferences::Preferences;

/// Fixed key the preference blob lives under, both in the persisted JSON
/// envelope and in any host key-value storage.
pub const STORAGE_KEY: &str = "cryptoPreferences";

/// Key-value boundary for persisted preferences.
///
/// The host decides where the blob lives (a file, browser local storage, a
/// test buffer); the library only loads it at initialization and rewrites it
/// after every preference change.
pub trait PreferenceStore: Send {
    /// Read the persisted preferences. `Ok(None)` when nothing usable is
    /// stored — a missing or corrupt blob is not an error, the caller falls
    /// back to defaults.
    fn load(&self) -> Result<Option<Preferences>, CoreError>;

    /// Persist the preferences, replacing any previous blob.
    fn save(&mut self, prefs: &Preferences) -> Result<(), CoreError>;
}

/// Serialize preferences into the storage envelope:
/// `{ "cryptoPreferences": { "baseCurrency": ..., ... } }`.
pub fn write_blob(prefs: &Preferences) -> Result<String, CoreError> {
    let inner = serde_json::to_value(prefs)
        .map_err(|e| CoreError::Serialization(format!("Failed to serialize preferences: {e}")))?;
    let mut root = serde_json::Map::new();
    root.insert(STORAGE_KEY.to_string(), inner);
    serde_json::to_string_pretty(&Value::Object(root))
        .map_err(|e| CoreError::Serialization(format!("Failed to serialize preferences: {e}")))
}

/// Parse a storage envelope back into preferences.
///
/// Lenient on purpose: malformed JSON, a missing key, or a blob with the
/// wrong shape all yield `None` so the session starts from defaults instead
/// of failing.
#[must_use]
pub fn read_blob(text: &str) -> Option<Preferences> {
    let root: Value = match serde_json::from_str(text) {
        Ok(v) => v,
        Err(e) => {
            log::warn!("Discarding corrupt preference blob: {e}");
            return None;
        }
    };
    let inner = root.get(STORAGE_KEY)?;
    match serde_json::from_value(inner.clone()) {
        Ok(prefs) => Some(prefs),
        Err(e) => {
            log::warn!("Discarding malformed preferences under {STORAGE_KEY}: {e}");
            None
        }
    }
}
