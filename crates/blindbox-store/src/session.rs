//! Per-identity category selections.
//!
//! A session remembers which category a (room, user) pair is currently
//! drawing from. Sessions persist across restarts and never expire; a new
//! selection overwrites the old one.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use blindbox_core::{BlindBoxError, CategoryId, Result, SessionKey};

use crate::document;

/// File name of the session document under the data directory.
pub const SESSION_FILE: &str = "sessions.json";

/// Compose the session key for a caller identity.
///
/// Present-but-empty identities count as absent, so a direct message without
/// a room becomes `private:{user}` and an anonymous caller `{room}:unknown`.
pub fn session_key(room: Option<&str>, user: Option<&str>) -> SessionKey {
    let room = room.filter(|r| !r.is_empty()).unwrap_or("private");
    let user = user.filter(|u| !u.is_empty()).unwrap_or("unknown");
    format!("{}:{}", room, user)
}

/// Manager of the selected-category sessions.
pub struct SessionManager {
    path: PathBuf,
    sessions: HashMap<SessionKey, CategoryId>,
}

impl SessionManager {
    /// Open the session document under `data_dir`. Missing or corrupt
    /// documents degrade to an empty session map.
    pub fn open(data_dir: &Path) -> Self {
        let path = data_dir.join(SESSION_FILE);
        let sessions = document::load_or_default(&path);
        Self { path, sessions }
    }

    /// The category currently selected for this session key, if any.
    pub fn selected(&self, key: &str) -> Option<&str> {
        self.sessions.get(key).map(String::as_str)
    }

    /// Record a selection, overwriting any prior one, and persist.
    pub fn select(&mut self, key: &str, category_id: &str) -> Result<()> {
        self.sessions
            .insert(key.to_string(), category_id.to_string());
        self.persist()
    }

    /// Write the current sessions to the backing document.
    pub fn flush(&self) -> Result<()> {
        self.persist()
    }

    /// Path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<()> {
        document::save(&self.path, &self.sessions)
            .map_err(|e| BlindBoxError::Storage(format!("Failed to save sessions: {}", e)))
    }
}
