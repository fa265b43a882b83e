use std::fs;
use std::path::PathBuf;

use vegas_core::SavedRoundSummary;

use crate::config::ArchiveConfig;

/// File name of the single suspended-round slot.
const CURRENT_SLOT: &str = "current-round.bin";

/// Durable document storage for the archive: one JSON document per archived
/// summary plus a single current-round blob slot. Failures come back as
/// strings for the archiver to log; nothing here is fatal to the round.
pub trait ArchiveBackend: Send {
    fn persist_summary(&self, summary: &SavedRoundSummary) -> Result<(), String>;
    /// All archived summaries, oldest first by save timestamp.
    fn load_summaries(&self) -> Result<Vec<SavedRoundSummary>, String>;
    fn save_current(&self, blob: &[u8]) -> Result<(), String>;
    fn load_current(&self) -> Result<Option<Vec<u8>>, String>;
    fn clear_current(&self) -> Result<(), String>;
}

/// JSON-documents-on-disk backend under `<storage_dir>/<namespace>/`.
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    pub fn new(config: &ArchiveConfig) -> Self {
        Self {
            root: config.root(),
        }
    }

    fn ensure_root(&self) -> Result<(), String> {
        fs::create_dir_all(&self.root)
            .map_err(|e| format!("cannot create {}: {e}", self.root.display()))
    }

    fn summary_path(&self, id: &str) -> PathBuf {
        self.root.join(format!("round-{id}.json"))
    }

    fn current_path(&self) -> PathBuf {
        self.root.join(CURRENT_SLOT)
    }
}

impl ArchiveBackend for FileBackend {
    fn persist_summary(&self, summary: &SavedRoundSummary) -> Result<(), String> {
        self.ensure_root()?;
        let doc = serde_json::to_vec_pretty(summary)
            .map_err(|e| format!("cannot serialize summary {}: {e}", summary.id))?;
        let path = self.summary_path(&summary.id);
        fs::write(&path, doc).map_err(|e| format!("cannot write {}: {e}", path.display()))
    }

    fn load_summaries(&self) -> Result<Vec<SavedRoundSummary>, String> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            // A missing namespace directory just means nothing archived yet.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(format!("cannot read {}: {e}", self.root.display())),
        };

        let mut summaries = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| e.to_string())?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let raw =
                fs::read(&path).map_err(|e| format!("cannot read {}: {e}", path.display()))?;
            match serde_json::from_slice::<SavedRoundSummary>(&raw) {
                Ok(summary) => summaries.push(summary),
                Err(e) => {
                    // A corrupt document loses one round, not the archive.
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable summary");
                }
            }
        }
        summaries.sort_by(|a, b| a.saved_at.cmp(&b.saved_at));
        Ok(summaries)
    }

    fn save_current(&self, blob: &[u8]) -> Result<(), String> {
        self.ensure_root()?;
        let path = self.current_path();
        fs::write(&path, blob).map_err(|e| format!("cannot write {}: {e}", path.display()))
    }

    fn load_current(&self) -> Result<Option<Vec<u8>>, String> {
        let path = self.current_path();
        match fs::read(&path) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(format!("cannot read {}: {e}", path.display())),
        }
    }

    fn clear_current(&self) -> Result<(), String> {
        let path = self.current_path();
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(format!("cannot remove {}: {e}", path.display())),
        }
    }
}
