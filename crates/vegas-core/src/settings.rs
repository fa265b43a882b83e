use serde::{Deserialize, Serialize};

/// Which nine the group tees off on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StartingNine {
    Front,
    Back,
}

impl StartingNine {
    /// Opening hole for this starting nine.
    pub fn first_hole(self) -> u8 {
        match self {
            StartingNine::Front => 1,
            StartingNine::Back => 10,
        }
    }
}

/// Match configuration chosen at setup time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchSettings {
    /// Currency value of one point, for the money projection.
    pub point_rate: f64,
    /// Push quota per player per nine.
    pub max_push_per_half: u32,
    pub match_name: String,
    /// Carried for the UI shell; the engine never interprets it.
    pub display_language: String,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            point_rate: 1.0,
            max_push_per_half: 1,
            match_name: "Vegas match".to_string(),
            display_language: "en".to_string(),
        }
    }
}
