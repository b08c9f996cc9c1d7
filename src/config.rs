/// Backend credential configuration
///
/// The managed backend needs a project id and an API key before any
/// store or identity call can be made. Both come from a JSON file in
/// the user's config directory:
/// - Linux: ~/.config/gallery-sync/config.json
/// - macOS: ~/Library/Application Support/gallery-sync/config.json
/// - Windows: %APPDATA%\gallery-sync\config.json

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::GalleryError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GalleryConfig {
    /// Backend project identifier
    pub project_id: String,
    /// Client API key for the backend
    pub api_key: String,
}

impl GalleryConfig {
    /// Get the path where the config file is expected
    pub fn default_path() -> PathBuf {
        let mut path = dirs::config_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        path.push("gallery-sync");
        path.push("config.json");
        path
    }

    /// Load and validate the config from the default location
    pub fn load() -> Result<Self, GalleryError> {
        Self::load_from(&Self::default_path())
    }

    /// Load and validate the config from an explicit path
    pub fn load_from(path: &Path) -> Result<Self, GalleryError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            GalleryError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: GalleryConfig = serde_json::from_str(&raw)
            .map_err(|e| GalleryError::Config(format!("cannot parse {}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject empty credentials. A blank key would make every backend
    /// call fail later with a much less helpful message.
    pub fn validate(&self) -> Result<(), GalleryError> {
        if self.project_id.trim().is_empty() {
            return Err(GalleryError::Config("project_id is empty".into()));
        }
        if self.api_key.trim().is_empty() {
            return Err(GalleryError::Config("api_key is empty".into()));
        }
        Ok(())
    }
}
