use std::collections::VecDeque;

use vegas_core::{RoundStatus, SavedRoundSummary};

/// Default number of summaries kept in the listing before eviction.
const DEFAULT_MAX_ARCHIVED: usize = 100;

/// Aggregate statistics about the archive listing.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ArchiveStats {
    pub total_stored: usize,
    pub finished: usize,
    pub in_progress: usize,
}

/// In-memory, bounded listing of archived round summaries, newest last.
/// Backs the round-history browser; durable copies live with the backend.
pub struct ArchiveStore {
    summaries: VecDeque<SavedRoundSummary>,
    max_archived: usize,
}

impl Default for ArchiveStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveStore {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_ARCHIVED)
    }

    /// Create a store with a configurable listing bound.
    pub fn with_capacity(max_archived: usize) -> Self {
        Self {
            summaries: VecDeque::new(),
            max_archived,
        }
    }

    /// Insert a summary. Evicts the oldest entry if at capacity.
    pub fn insert(&mut self, summary: SavedRoundSummary) {
        self.summaries.push_back(summary);
        while self.summaries.len() > self.max_archived {
            self.summaries.pop_front();
        }
    }

    /// Look up a summary by id.
    pub fn get(&self, id: &str) -> Option<&SavedRoundSummary> {
        self.summaries.iter().find(|s| s.id == id)
    }

    /// The most recent `count` summaries, newest first.
    pub fn recent(&self, count: usize) -> Vec<&SavedRoundSummary> {
        self.summaries.iter().rev().take(count).collect()
    }

    pub fn len(&self) -> usize {
        self.summaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }

    /// Aggregate statistics for the history browser header.
    pub fn stats(&self) -> ArchiveStats {
        let finished = self
            .summaries
            .iter()
            .filter(|s| s.status == RoundStatus::Finished)
            .count();
        ArchiveStats {
            total_stored: self.summaries.len(),
            finished,
            in_progress: self.summaries.len() - finished,
        }
    }
}
