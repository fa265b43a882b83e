use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Storage configuration for the archive collaborator, loaded from
/// `vegas.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    /// Directory the storage namespace lives under.
    pub storage_dir: String,
    /// Subdirectory isolating this app's documents from anything else in
    /// `storage_dir`.
    pub namespace: String,
    /// Archived summaries kept in the in-memory listing before the oldest
    /// are evicted. Documents on disk are not evicted.
    pub max_archived: usize,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            storage_dir: ".".to_string(),
            namespace: "vegas".to_string(),
            max_archived: 100,
        }
    }
}

impl ArchiveConfig {
    /// Load config from a TOML file if it exists, falling back to defaults.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<ArchiveConfig>(&content) {
                Ok(cfg) => {
                    tracing::info!(path = %path.display(), "loaded archive configuration");
                    cfg
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "invalid archive config, using defaults");
                    ArchiveConfig::default()
                }
            },
            Err(_) => ArchiveConfig::default(),
        }
    }

    /// Root directory all documents live under.
    pub fn root(&self) -> PathBuf {
        Path::new(&self.storage_dir).join(&self.namespace)
    }
}
