use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::hole::HoleResult;
use crate::player::{Player, PlayerId};
use crate::round::RoundStatus;

/// Archival snapshot of a finished or in-progress round, produced by
/// [`crate::round::Round::snapshot`] and handed to the storage
/// collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedRoundSummary {
    pub id: String,
    /// Timestamp string supplied by the caller; the engine never reads a
    /// clock itself.
    pub saved_at: String,
    pub match_name: String,
    pub players: Vec<Player>,
    pub history: BTreeMap<u8, HoleResult>,
    pub total_points: BTreeMap<PlayerId, i32>,
    pub current_hole: u8,
    pub status: RoundStatus,
}
