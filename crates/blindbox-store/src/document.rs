//! JSON document persistence.
//!
//! Every store keeps its whole state in one human-diffable JSON file and
//! overwrites it in full on mutation. Reads recover from missing or corrupt
//! files by substituting the default value; a broken document must never
//! surface to the user as an error.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use blindbox_core::Result;

/// Load a JSON document from `path`.
///
/// Returns an error if the file cannot be read or parsed.
pub fn load<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Load a JSON document, substituting `T::default()` when the file is
/// missing, unreadable, or corrupt. Failures are logged as warnings.
pub fn load_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    if !path.exists() {
        return T::default();
    }
    match load(path) {
        Ok(value) => value,
        Err(e) => {
            warn!("Failed to read {}: {}. Using default.", path.display(), e);
            T::default()
        }
    }
}

/// Save a JSON document to `path`, creating parent directories as needed.
///
/// The document is pretty-printed so administrators can diff and hand-edit
/// it; non-ASCII text is written literally.
pub fn save<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(value)?;
    std::fs::write(path, content)?;
    Ok(())
}
