use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use vegas_core::SavedRoundSummary;

use crate::backend::ArchiveBackend;

/// Commands accepted by the archiver task.
#[derive(Debug)]
pub enum ArchiveCommand {
    /// Persist a round summary document.
    Archive(SavedRoundSummary),
    /// Persist the suspended-round blob.
    SaveCurrent(Vec<u8>),
    /// Drop the suspended-round blob (round finished or abandoned).
    ClearCurrent,
    /// Drain the queue and exit.
    Shutdown,
}

/// Spawn the archive task. Returns the command sender and task handle.
///
/// Sends are fire and forget: callers never await completion, a backend
/// failure only logs a warning and drops that write, and in-memory round
/// state is never rolled back because of storage.
pub fn spawn_archiver(
    backend: Box<dyn ArchiveBackend>,
) -> (mpsc::UnboundedSender<ArchiveCommand>, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let handle = tokio::spawn(async move {
        while let Some(cmd) = rx.recv().await {
            match cmd {
                ArchiveCommand::Archive(summary) => {
                    if let Err(e) = backend.persist_summary(&summary) {
                        tracing::warn!(id = %summary.id, error = %e, "failed to archive round summary");
                    }
                }
                ArchiveCommand::SaveCurrent(blob) => {
                    if let Err(e) = backend.save_current(&blob) {
                        tracing::warn!(error = %e, "failed to save suspended round");
                    }
                }
                ArchiveCommand::ClearCurrent => {
                    if let Err(e) = backend.clear_current() {
                        tracing::warn!(error = %e, "failed to clear suspended round");
                    }
                }
                ArchiveCommand::Shutdown => break,
            }
        }
        tracing::debug!("archiver task exited");
    });
    (tx, handle)
}

/// Returns a simple ISO 8601 timestamp (Unix epoch seconds with Z suffix)
/// for stamping summaries on their way into the archive.
pub fn now_iso() -> String {
    let dur = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}Z", dur.as_secs())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use vegas_core::MatchSettings;
    use vegas_core::test_helpers::started_round;

    #[derive(Default)]
    struct Recording {
        summaries: Vec<String>,
        current: Option<Vec<u8>>,
    }

    struct RecordingBackend {
        inner: Arc<Mutex<Recording>>,
        fail_summaries: bool,
    }

    impl ArchiveBackend for RecordingBackend {
        fn persist_summary(&self, summary: &SavedRoundSummary) -> Result<(), String> {
            if self.fail_summaries {
                return Err("disk on fire".to_string());
            }
            self.inner.lock().unwrap().summaries.push(summary.id.clone());
            Ok(())
        }

        fn load_summaries(&self) -> Result<Vec<SavedRoundSummary>, String> {
            Ok(Vec::new())
        }

        fn save_current(&self, blob: &[u8]) -> Result<(), String> {
            self.inner.lock().unwrap().current = Some(blob.to_vec());
            Ok(())
        }

        fn load_current(&self) -> Result<Option<Vec<u8>>, String> {
            Ok(self.inner.lock().unwrap().current.clone())
        }

        fn clear_current(&self) -> Result<(), String> {
            self.inner.lock().unwrap().current = None;
            Ok(())
        }
    }

    #[tokio::test]
    async fn archiver_drains_commands_in_order() {
        let inner = Arc::new(Mutex::new(Recording::default()));
        let backend = RecordingBackend {
            inner: Arc::clone(&inner),
            fail_summaries: false,
        };
        let (tx, handle) = spawn_archiver(Box::new(backend));

        let round = started_round(MatchSettings::default());
        let summary = round.snapshot(now_iso());
        let id = summary.id.clone();

        tx.send(ArchiveCommand::SaveCurrent(round.encode_state())).unwrap();
        tx.send(ArchiveCommand::Archive(summary)).unwrap();
        tx.send(ArchiveCommand::ClearCurrent).unwrap();
        tx.send(ArchiveCommand::Shutdown).unwrap();
        handle.await.unwrap();

        let recorded = inner.lock().unwrap();
        assert_eq!(recorded.summaries, vec![id]);
        assert!(recorded.current.is_none());
    }

    #[tokio::test]
    async fn backend_failure_does_not_kill_the_task() {
        let inner = Arc::new(Mutex::new(Recording::default()));
        let backend = RecordingBackend {
            inner: Arc::clone(&inner),
            fail_summaries: true,
        };
        let (tx, handle) = spawn_archiver(Box::new(backend));

        let round = started_round(MatchSettings::default());
        tx.send(ArchiveCommand::Archive(round.snapshot("1Z"))).unwrap();
        // The failed archive is dropped; later commands still process.
        tx.send(ArchiveCommand::SaveCurrent(vec![1, 2, 3])).unwrap();
        tx.send(ArchiveCommand::Shutdown).unwrap();
        handle.await.unwrap();

        let recorded = inner.lock().unwrap();
        assert!(recorded.summaries.is_empty());
        assert_eq!(recorded.current.as_deref(), Some(&[1u8, 2, 3][..]));
    }

    #[test]
    fn now_iso_is_epoch_seconds() {
        let stamp = now_iso();
        assert!(stamp.ends_with('Z'));
        assert!(stamp[..stamp.len() - 1].parse::<u64>().is_ok());
    }
}
