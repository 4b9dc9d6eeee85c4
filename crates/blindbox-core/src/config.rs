use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;

/// Top-level configuration for the blind box plugin.
///
/// Loaded from `blindbox.toml` by default. The state documents themselves
/// live under `general.data_dir`; this file only carries deployment knobs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlindBoxConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub command: CommandConfig,
}

impl BlindBoxConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: BlindBoxConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Directory holding the catalog, pool, and session documents.
    pub data_dir: String,
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Command surface settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandConfig {
    /// The entry command name users type (with or without a leading `/`).
    pub name: String,
    /// Whether the hosting adapter offers a dedicated image-reply primitive.
    ///
    /// When false, image references are appended to the text reply instead
    /// of being delivered as separate units.
    pub image_replies: bool,
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            name: "方舟盲盒".to_string(),
            image_replies: true,
        }
    }
}
