//! Storage collaborator for Vegas rounds.
//!
//! The engine in `vegas-core` never touches storage; this crate consumes
//! its [`vegas_core::SavedRoundSummary`] and suspended-round blobs and
//! persists them as opaque documents. Everything here is fire and forget
//! from the engine's point of view: a storage failure is logged and the
//! round plays on.

pub mod archiver;
pub mod backend;
pub mod config;
pub mod store;

pub use archiver::{ArchiveCommand, now_iso, spawn_archiver};
pub use backend::{ArchiveBackend, FileBackend};
pub use config::ArchiveConfig;
pub use store::{ArchiveStats, ArchiveStore};
