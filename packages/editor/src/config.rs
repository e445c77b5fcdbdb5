use crate::errors::EditorError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_NAME: &str = "sitebuilder.config.json";

/// Builder configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Quiet period before an autosave write
    #[serde(default = "default_autosave_ms")]
    pub autosave_ms: u64,

    /// Key of the local persistence slot
    #[serde(default = "default_local_slot_key")]
    pub local_slot_key: String,

    /// Published snapshots are stored under this prefix + website id
    #[serde(default = "default_published_key_prefix")]
    pub published_key_prefix: String,

    /// Directory for file-backed stores
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Name given to a site created from scratch
    #[serde(default = "default_site_name")]
    pub default_site_name: String,
}

fn default_autosave_ms() -> u64 {
    1000
}

fn default_local_slot_key() -> String {
    "website-builder-data".to_string()
}

fn default_published_key_prefix() -> String {
    "published-website-".to_string()
}

fn default_data_dir() -> String {
    ".sitebuilder".to_string()
}

fn default_site_name() -> String {
    "My Website".to_string()
}

impl EditorConfig {
    /// Load config from a directory; defaults when no file exists
    pub fn load(dir: &Path) -> Result<Self, EditorError> {
        let config_path = dir.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            serde_json::from_str(&content).map_err(|e| EditorError::Config(e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    pub fn autosave_delay(&self) -> Duration {
        Duration::from_millis(self.autosave_ms)
    }

    pub fn published_key(&self, website_id: &str) -> String {
        format!("{}{}", self.published_key_prefix, website_id)
    }

    /// Absolute data directory
    pub fn data_dir(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.data_dir)
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            autosave_ms: default_autosave_ms(),
            local_slot_key: default_local_slot_key(),
            published_key_prefix: default_published_key_prefix(),
            data_dir: default_data_dir(),
            default_site_name: default_site_name(),
        }
    }
}
