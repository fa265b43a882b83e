//! The round aggregate: sequences hole resolution across 18 holes, owns the
//! push quotas and the running carry-over multiplier, and is the only place
//! round state is mutated. UI layers submit [`HoleSubmission`]s and read
//! projections; they never touch fields directly.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::hole::{HoleResult, ScoreInput, ScoringError, TeamPair, resolve_hole};
use crate::player::{Half, Player, PlayerId, PushUsage};
use crate::settings::{MatchSettings, StartingNine};
use crate::summary::SavedRoundSummary;

pub const HOLES_PER_ROUND: u8 = 18;
pub const PLAYERS_PER_ROUND: usize = 4;

/// Where a round is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundStatus {
    Setup,
    InProgress,
    Finished,
}

/// A hole submission from the UI shell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoleSubmission {
    pub hole_number: u8,
    pub par: u8,
    pub team_a: TeamPair,
    pub team_b: TeamPair,
    pub scores: BTreeMap<PlayerId, ScoreInput>,
}

/// Whether a completed hole was new history or replaced an earlier entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryWrite {
    Appended,
    Replaced,
}

/// Errors from round construction and state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundError {
    /// The round has not been started yet.
    NotStarted,
    WrongPlayerCount(usize),
    DuplicatePlayer(PlayerId),
    /// A submitted team references a player not in this round.
    UnknownPlayer(PlayerId),
    HoleOutOfRange(u8),
    Scoring(ScoringError),
}

impl std::fmt::Display for RoundError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotStarted => write!(f, "round has not been started"),
            Self::WrongPlayerCount(n) => {
                write!(f, "a Vegas round takes exactly {PLAYERS_PER_ROUND} players, got {n}")
            }
            Self::DuplicatePlayer(id) => write!(f, "player {id} listed twice"),
            Self::UnknownPlayer(id) => write!(f, "player {id} is not in this round"),
            Self::HoleOutOfRange(n) => {
                write!(f, "hole {n} is outside 1..={HOLES_PER_ROUND}")
            }
            Self::Scoring(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for RoundError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Scoring(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ScoringError> for RoundError {
    fn from(e: ScoringError) -> Self {
        Self::Scoring(e)
    }
}

/// The Vegas round aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Round {
    players: Vec<Player>,
    settings: MatchSettings,
    /// Resolved holes keyed by hole number; iteration is sorted.
    history: BTreeMap<u8, HoleResult>,
    current_hole: u8,
    /// Carry-over multiplier the next fresh hole starts from.
    next_multiplier: u32,
    status: RoundStatus,
}

impl Round {
    /// Create a round in `Setup` with exactly four distinct players.
    pub fn new(players: Vec<Player>, settings: MatchSettings) -> Result<Self, RoundError> {
        if players.len() != PLAYERS_PER_ROUND {
            return Err(RoundError::WrongPlayerCount(players.len()));
        }
        for (i, player) in players.iter().enumerate() {
            if players[..i].iter().any(|p| p.id == player.id) {
                return Err(RoundError::DuplicatePlayer(player.id));
            }
        }
        Ok(Self {
            players,
            settings,
            history: BTreeMap::new(),
            current_hole: 1,
            next_multiplier: 1,
            status: RoundStatus::Setup,
        })
    }

    /// Begin play: fresh push quotas, empty history, cursor on the opening
    /// hole. Also restarts an abandoned in-progress round.
    pub fn start(&mut self, starting_nine: StartingNine) {
        for player in &mut self.players {
            player.push_usage = PushUsage::default();
        }
        self.history.clear();
        self.current_hole = starting_nine.first_hole();
        self.next_multiplier = 1;
        self.status = RoundStatus::InProgress;
        tracing::info!(
            match_name = %self.settings.match_name,
            first_hole = self.current_hole,
            "round started"
        );
    }

    /// Wipe back to `Setup`. Archived summaries are untouched; archival
    /// lives with the storage collaborator, not here.
    pub fn reset(&mut self) {
        for player in &mut self.players {
            player.push_usage = PushUsage::default();
        }
        self.history.clear();
        self.current_hole = 1;
        self.next_multiplier = 1;
        self.status = RoundStatus::Setup;
        tracing::info!("round reset");
    }

    /// Finalize a hole. When the hole number already has an entry this is
    /// an edit and replaces that entry wholesale.
    ///
    /// Edits reuse the carry-over multiplier recorded when the hole was
    /// first scored and do NOT cascade into later holes: their recorded
    /// carry-over inputs can go stale after an edit upstream of them.
    pub fn complete_hole(
        &mut self,
        submission: &HoleSubmission,
    ) -> Result<(HoleResult, HistoryWrite), RoundError> {
        if self.status == RoundStatus::Setup {
            return Err(RoundError::NotStarted);
        }
        let hole = submission.hole_number;
        if !(1..=HOLES_PER_ROUND).contains(&hole) {
            return Err(RoundError::HoleOutOfRange(hole));
        }
        for id in [
            submission.team_a.0,
            submission.team_a.1,
            submission.team_b.0,
            submission.team_b.1,
        ] {
            if !self.players.iter().any(|p| p.id == id) {
                return Err(RoundError::UnknownPlayer(id));
            }
        }

        let carry_in = self
            .history
            .get(&hole)
            .map(|r| r.carry_over_multiplier_in)
            .unwrap_or(self.next_multiplier);

        let scores = self.apply_forced_push(hole, &submission.scores);

        let result = resolve_hole(
            hole,
            submission.par,
            &scores,
            submission.team_a,
            submission.team_b,
            carry_in,
        )?;

        self.consume_pushes(hole, &scores);
        let write = self.record(result.clone());
        self.advance(&result);

        tracing::debug!(
            hole,
            applied_multiplier = result.applied_multiplier,
            is_draw = result.is_draw,
            "hole resolved"
        );
        Ok((result, write))
    }

    /// Move the display cursor. Pure navigation; resolves nothing and
    /// mutates no history.
    pub fn go_to_hole(&mut self, hole_number: u8) -> Result<(), RoundError> {
        if !(1..=HOLES_PER_ROUND).contains(&hole_number) {
            return Err(RoundError::HoleOutOfRange(hole_number));
        }
        self.current_hole = hole_number;
        Ok(())
    }

    /// Sum of a player's point deltas over all resolved holes.
    pub fn player_total_points(&self, id: PlayerId) -> i32 {
        self.history
            .values()
            .filter_map(|r| r.points.get(&id))
            .sum()
    }

    /// Money projection: total points at the configured rate.
    pub fn money_total(&self, id: PlayerId) -> f64 {
        f64::from(self.player_total_points(id)) * self.settings.point_rate
    }

    /// Archival projection of the current state.
    pub fn snapshot(&self, saved_at: impl Into<String>) -> SavedRoundSummary {
        SavedRoundSummary {
            id: uuid::Uuid::new_v4().to_string(),
            saved_at: saved_at.into(),
            match_name: self.settings.match_name.clone(),
            players: self.players.clone(),
            history: self.history.clone(),
            total_points: self
                .players
                .iter()
                .map(|p| (p.id, self.player_total_points(p.id)))
                .collect(),
            current_hole: self.current_hole,
            status: self.status,
        }
    }

    /// Serialize the round for the storage collaborator's current-round
    /// slot. Opaque bytes from the collaborator's point of view.
    pub fn encode_state(&self) -> Vec<u8> {
        rmp_serde::to_vec(self).unwrap_or_default()
    }

    /// Restore a round previously produced by [`Round::encode_state`].
    pub fn decode_state(bytes: &[u8]) -> Option<Round> {
        rmp_serde::from_slice(bytes).ok()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn settings(&self) -> &MatchSettings {
        &self.settings
    }

    pub fn history(&self) -> &BTreeMap<u8, HoleResult> {
        &self.history
    }

    pub fn hole_result(&self, hole_number: u8) -> Option<&HoleResult> {
        self.history.get(&hole_number)
    }

    pub fn current_hole(&self) -> u8 {
        self.current_hole
    }

    pub fn status(&self) -> RoundStatus {
        self.status
    }

    /// Carry-over multiplier the next fresh hole will start from.
    pub fn carry_over_multiplier(&self) -> u32 {
        self.next_multiplier
    }

    /// On a half's closing hole (9 or 18), every player still under quota
    /// has their submitted push count overridden with the full remaining
    /// quota. Works on a copy so the resolver stays free of hole-number
    /// special cases.
    fn apply_forced_push(
        &self,
        hole_number: u8,
        scores: &BTreeMap<PlayerId, ScoreInput>,
    ) -> BTreeMap<PlayerId, ScoreInput> {
        let mut scores = scores.clone();
        if !Half::is_closing_hole(hole_number) {
            return scores;
        }
        let half = Half::of_hole(hole_number);
        let max = self.settings.max_push_per_half;
        for player in &self.players {
            let used = player.push_usage.in_half(half);
            if used < max
                && let Some(input) = scores.get_mut(&player.id)
            {
                input.push_count = max - used;
            }
        }
        scores
    }

    /// Book effective (post-override) pushes against the hole's half.
    fn consume_pushes(&mut self, hole_number: u8, scores: &BTreeMap<PlayerId, ScoreInput>) {
        let half = Half::of_hole(hole_number);
        for player in &mut self.players {
            if let Some(input) = scores.get(&player.id)
                && input.push_count > 0
            {
                player.push_usage.add(half, input.push_count);
            }
        }
    }

    /// Keyed upsert: same hole number replaces the entry wholesale.
    fn record(&mut self, result: HoleResult) -> HistoryWrite {
        let hole = result.hole_number;
        match self.history.insert(hole, result) {
            Some(_) => {
                tracing::info!(hole, "replaced hole result");
                HistoryWrite::Replaced
            }
            None => HistoryWrite::Appended,
        }
    }

    /// Cursor and running-multiplier updates apply only when the completed
    /// hole is the frontier (highest-numbered) entry; editing an earlier
    /// hole moves neither.
    fn advance(&mut self, result: &HoleResult) {
        let hole = result.hole_number;
        if self.history.keys().next_back() != Some(&hole) {
            return;
        }
        self.next_multiplier = result.next_hole_multiplier;
        if hole == HOLES_PER_ROUND {
            self.status = RoundStatus::Finished;
            self.current_hole = HOLES_PER_ROUND;
            tracing::info!("round finished");
        } else {
            self.current_hole = hole + 1;
        }
    }
}
