//! Single-hole resolution for Vegas scoring.
//!
//! The resolver is a pure function: identical inputs always produce an
//! identical [`HoleResult`], which is what makes replaying an edited hole
//! safe for the round aggregate.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::player::PlayerId;

/// The two members of a betting team.
pub type TeamPair = (PlayerId, PlayerId);

/// One player's entered result for a single hole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreInput {
    pub strokes: u32,
    /// Captured as a flag at input time so later par edits cannot
    /// retroactively change an already-scored hole.
    pub is_birdie: bool,
    /// Push units declared for this hole (0 when unused).
    pub push_count: u32,
}

impl ScoreInput {
    pub fn new(strokes: u32, is_birdie: bool, push_count: u32) -> Self {
        Self {
            strokes,
            is_birdie,
            push_count,
        }
    }

    /// Build an input with the birdie flag derived from par.
    pub fn from_par(strokes: u32, par: u8) -> Self {
        Self {
            strokes,
            is_birdie: strokes < u32::from(par),
            push_count: 0,
        }
    }

    /// Same input with a push declared on it.
    pub fn with_push(self, push_count: u32) -> Self {
        Self { push_count, ..self }
    }
}

/// Immutable record of a resolved hole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoleResult {
    pub hole_number: u8,
    pub par: u8,
    pub scores: BTreeMap<PlayerId, ScoreInput>,
    pub team_a: TeamPair,
    pub team_b: TeamPair,
    /// Multiplier carried into this hole; 1 means no standing carry-over.
    pub carry_over_multiplier_in: u32,
    pub is_draw: bool,
    /// Stake rate actually applied to the point difference.
    pub applied_multiplier: u32,
    /// Signed point delta per player; sums to zero across the four.
    pub points: BTreeMap<PlayerId, i32>,
    /// Multiplier the next hole starts from.
    pub next_hole_multiplier: u32,
}

/// Caller-contract violations rejected by [`resolve_hole`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoringError {
    /// A player id appears on both teams (or twice on one).
    TeamsNotDisjoint(PlayerId),
    /// A team member has no score entry.
    MissingScore(PlayerId),
    /// The score map holds entries beyond the four team members.
    ExtraScores { expected: usize, got: usize },
    /// Strokes must be positive.
    ZeroStrokes(PlayerId),
}

impl std::fmt::Display for ScoringError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TeamsNotDisjoint(id) => {
                write!(f, "player {id} appears in more than one team slot")
            }
            Self::MissingScore(id) => write!(f, "no score entered for player {id}"),
            Self::ExtraScores { expected, got } => {
                write!(f, "expected {expected} score entries, got {got}")
            }
            Self::ZeroStrokes(id) => write!(f, "player {id} has zero strokes"),
        }
    }
}

impl std::error::Error for ScoringError {}

/// Raw Vegas team number: better score in the tens place.
fn team_raw(s1: u32, s2: u32) -> u32 {
    let (low, high) = if s1 <= s2 { (s1, s2) } else { (s2, s1) };
    low * 10 + high
}

/// Flipped Vegas team number: worse score in the tens place.
fn team_flipped(s1: u32, s2: u32) -> u32 {
    let (low, high) = if s1 <= s2 { (s1, s2) } else { (s2, s1) };
    high * 10 + low
}

fn validate(
    scores: &BTreeMap<PlayerId, ScoreInput>,
    members: &[PlayerId; 4],
) -> Result<(), ScoringError> {
    for (i, id) in members.iter().enumerate() {
        if members[..i].contains(id) {
            return Err(ScoringError::TeamsNotDisjoint(*id));
        }
    }
    for id in members {
        let input = scores.get(id).ok_or(ScoringError::MissingScore(*id))?;
        if input.strokes == 0 {
            return Err(ScoringError::ZeroStrokes(*id));
        }
    }
    if scores.len() != members.len() {
        return Err(ScoringError::ExtraScores {
            expected: members.len(),
            got: scores.len(),
        });
    }
    Ok(())
}

/// Resolve a completed hole.
///
/// Scoring rules:
/// - A team's raw number concatenates its two scores, better one in the
///   tens place.
/// - A birdie on the opposing team reverses the digits (both reverse when
///   both teams hold a birdie).
/// - The lower final number wins the difference; equal numbers draw.
/// - The difference is multiplied by the applied rate: double the combined
///   count of carried-over draws, declared pushes, and a single birdie
///   bonus; rate 1 when that count is zero.
/// - A draw escalates the carry-over multiplier by one; a decided hole
///   resets it to 1.
pub fn resolve_hole(
    hole_number: u8,
    par: u8,
    scores: &BTreeMap<PlayerId, ScoreInput>,
    team_a: TeamPair,
    team_b: TeamPair,
    carry_over_multiplier_in: u32,
) -> Result<HoleResult, ScoringError> {
    let members = [team_a.0, team_a.1, team_b.0, team_b.1];
    validate(scores, &members)?;

    let input = |id: PlayerId| scores[&id];
    let (a1, a2) = (input(team_a.0), input(team_a.1));
    let (b1, b2) = (input(team_b.0), input(team_b.1));

    let a_has_birdie = a1.is_birdie || a2.is_birdie;
    let b_has_birdie = b1.is_birdie || b2.is_birdie;

    // A team flips only when its *opponents* birdied.
    let final_a = if b_has_birdie {
        team_flipped(a1.strokes, a2.strokes)
    } else {
        team_raw(a1.strokes, a2.strokes)
    };
    let final_b = if a_has_birdie {
        team_flipped(b1.strokes, b2.strokes)
    } else {
        team_raw(b1.strokes, b2.strokes)
    };

    // A carry-over of 1 is "nothing standing" and contributes no count.
    let carry_over_count = carry_over_multiplier_in.saturating_sub(1);
    let total_push_count: u32 = members.iter().map(|id| input(*id).push_count).sum();
    let birdie_bonus = u32::from(a_has_birdie || b_has_birdie);
    let count = carry_over_count + total_push_count + birdie_bonus;
    let applied_multiplier = if count == 0 { 1 } else { count * 2 };

    let diff = final_a.abs_diff(final_b);
    let is_draw = diff == 0;
    let swing = (diff * applied_multiplier) as i32;

    let mut points = BTreeMap::new();
    if is_draw {
        for id in members {
            points.insert(id, 0);
        }
    } else {
        let (winners, losers) = if final_a < final_b {
            (team_a, team_b)
        } else {
            (team_b, team_a)
        };
        points.insert(winners.0, swing);
        points.insert(winners.1, swing);
        points.insert(losers.0, -swing);
        points.insert(losers.1, -swing);
    }

    let next_hole_multiplier = if is_draw {
        carry_over_multiplier_in + 1
    } else {
        1
    };

    Ok(HoleResult {
        hole_number,
        par,
        scores: scores.clone(),
        team_a,
        team_b,
        carry_over_multiplier_in,
        is_draw,
        applied_multiplier,
        points,
        next_hole_multiplier,
    })
}
