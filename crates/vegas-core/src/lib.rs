//! Scoring engine for four-player Vegas-rules golf betting.
//!
//! Embedded library: the UI shell collects strokes, birdie flags and push
//! declarations, submits them here, and renders the returned results. All
//! round state lives in [`round::Round`]; persistence is a separate
//! collaborator fed by [`round::Round::snapshot`] and
//! [`round::Round::encode_state`].

pub mod hole;
pub mod pairing;
pub mod player;
pub mod round;
pub mod settings;
pub mod summary;

pub use hole::{HoleResult, ScoreInput, ScoringError, TeamPair, resolve_hole};
pub use player::{Half, Player, PlayerId, PushUsage};
pub use round::{
    HOLES_PER_ROUND, HistoryWrite, HoleSubmission, PLAYERS_PER_ROUND, Round, RoundError,
    RoundStatus,
};
pub use settings::{MatchSettings, StartingNine};
pub use summary::SavedRoundSummary;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use std::collections::BTreeMap;

    use crate::hole::{ScoreInput, TeamPair};
    use crate::player::{Player, PlayerId};
    use crate::round::{HoleSubmission, Round};
    use crate::settings::{MatchSettings, StartingNine};

    /// Four test players with sequential ids starting at 1.
    pub fn make_players() -> Vec<Player> {
        (1..=4)
            .map(|i| Player::new(i, format!("Player{i}")))
            .collect()
    }

    /// The standard test split: (1,2) vs (3,4).
    pub fn default_teams() -> (TeamPair, TeamPair) {
        ((1, 2), (3, 4))
    }

    /// Score map for players 1..=4 from (strokes, birdie, push) triples.
    pub fn make_scores(entries: [(u32, bool, u32); 4]) -> BTreeMap<PlayerId, ScoreInput> {
        entries
            .iter()
            .enumerate()
            .map(|(i, &(strokes, birdie, push))| {
                (i as PlayerId + 1, ScoreInput::new(strokes, birdie, push))
            })
            .collect()
    }

    /// Par-4 submission for `hole_number` with the standard teams.
    pub fn make_submission(hole_number: u8, entries: [(u32, bool, u32); 4]) -> HoleSubmission {
        let (team_a, team_b) = default_teams();
        HoleSubmission {
            hole_number,
            par: 4,
            team_a,
            team_b,
            scores: make_scores(entries),
        }
    }

    /// A four-player round already started on the front nine.
    pub fn started_round(settings: MatchSettings) -> Round {
        let mut round = Round::new(make_players(), settings).expect("four distinct players");
        round.start(StartingNine::Front);
        round
    }
}
