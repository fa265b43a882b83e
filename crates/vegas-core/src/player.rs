use serde::{Deserialize, Serialize};

/// Unique identifier for a player within a round.
pub type PlayerId = u64;

/// Which nine of the round a hole belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Half {
    Front9,
    Back9,
}

impl Half {
    /// The half that `hole_number` (1..=18) falls in.
    pub fn of_hole(hole_number: u8) -> Self {
        if hole_number <= 9 {
            Half::Front9
        } else {
            Half::Back9
        }
    }

    /// Whether `hole_number` is the last hole of its half.
    /// Unspent pushes are force-consumed on these holes.
    pub fn is_closing_hole(hole_number: u8) -> bool {
        hole_number == 9 || hole_number == 18
    }
}

/// Pushes a player has already consumed, tracked per half.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushUsage {
    pub front9: u32,
    pub back9: u32,
}

impl PushUsage {
    pub fn in_half(&self, half: Half) -> u32 {
        match half {
            Half::Front9 => self.front9,
            Half::Back9 => self.back9,
        }
    }

    pub(crate) fn add(&mut self, half: Half, count: u32) {
        match half {
            Half::Front9 => self.front9 += count,
            Half::Back9 => self.back9 += count,
        }
    }
}

/// A player participating in a Vegas round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Mutated only by the round aggregate when a hole is finalized.
    pub push_usage: PushUsage,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            push_usage: PushUsage::default(),
        }
    }
}
