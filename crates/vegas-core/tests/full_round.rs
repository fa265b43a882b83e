//! Full-round walkthrough: 18 holes through the aggregate, exercising
//! draws, declared pushes, forced end-of-half pushes, and suspend/resume.

use std::collections::BTreeMap;

use vegas_core::pairing::suggest_teams;
use vegas_core::test_helpers::{make_submission, started_round};
use vegas_core::{MatchSettings, Round, RoundStatus};

const PLAIN_WIN: [(u32, bool, u32); 4] =
    [(4, false, 0), (5, false, 0), (5, false, 0), (6, false, 0)];
const TIE: [(u32, bool, u32); 4] = [(4, false, 0), (5, false, 0), (4, false, 0), (5, false, 0)];

fn play(round: &mut Round, hole: u8, entries: [(u32, bool, u32); 4]) -> i32 {
    let (result, _) = round.complete_hole(&make_submission(hole, entries)).unwrap();
    result.points[&1]
}

#[test]
fn eighteen_hole_walkthrough() {
    let mut round = started_round(MatchSettings {
        point_rate: 2.0,
        max_push_per_half: 1,
        ..MatchSettings::default()
    });

    assert_eq!(play(&mut round, 1, PLAIN_WIN), 11);
    assert_eq!(play(&mut round, 2, PLAIN_WIN), 11);

    // Two draws back to back: stakes escalate.
    assert_eq!(play(&mut round, 3, TIE), 0);
    assert_eq!(play(&mut round, 4, TIE), 0);
    assert_eq!(round.carry_over_multiplier(), 3);
    assert_eq!(play(&mut round, 5, PLAIN_WIN), 44);

    assert_eq!(play(&mut round, 6, PLAIN_WIN), 11);
    // Player 3 spends their front-nine push.
    assert_eq!(
        play(&mut round, 7, [(4, false, 0), (5, false, 0), (5, false, 1), (6, false, 0)]),
        22
    );
    assert_eq!(play(&mut round, 8, PLAIN_WIN), 11);

    // Hole 9 force-spends the three remaining front-nine pushes.
    assert_eq!(play(&mut round, 9, PLAIN_WIN), 66);
    for player in round.players() {
        assert_eq!(player.push_usage.front9, 1);
    }

    for hole in 10..=17 {
        assert_eq!(play(&mut round, hole, PLAIN_WIN), 11);
    }

    // Hole 18 force-spends all four back-nine pushes and ends the round.
    assert_eq!(play(&mut round, 18, PLAIN_WIN), 88);
    assert_eq!(round.status(), RoundStatus::Finished);
    assert_eq!(round.current_hole(), 18);

    assert_eq!(round.player_total_points(1), 352);
    assert_eq!(round.player_total_points(2), 352);
    assert_eq!(round.player_total_points(3), -352);
    assert_eq!(round.player_total_points(4), -352);
    let zero_sum: i32 = (1..=4).map(|id| round.player_total_points(id)).sum();
    assert_eq!(zero_sum, 0);

    assert_eq!(round.money_total(1), 704.0);
    assert_eq!(round.money_total(4), -704.0);

    let summary = round.snapshot("1700000000Z");
    assert_eq!(summary.status, RoundStatus::Finished);
    assert_eq!(summary.history.len(), 18);
    assert_eq!(summary.total_points[&1], 352);
}

#[test]
fn suspend_and_resume_midround() {
    let mut round = started_round(MatchSettings::default());
    play(&mut round, 1, PLAIN_WIN);
    play(&mut round, 2, TIE);

    let blob = round.encode_state();
    let mut resumed = Round::decode_state(&blob).unwrap();
    assert_eq!(resumed.current_hole(), 3);
    assert_eq!(resumed.carry_over_multiplier(), 2);

    // Both copies score the next hole identically.
    let a = play(&mut round, 3, PLAIN_WIN);
    let b = play(&mut resumed, 3, PLAIN_WIN);
    assert_eq!(a, b);
    assert_eq!(round.hole_result(3), resumed.hole_result(3));
}

#[test]
fn suggested_teams_follow_the_previous_hole() {
    let mut round = started_round(MatchSettings::default());
    // Player 3 takes the best score on hole 1.
    play(&mut round, 1, [(5, false, 0), (6, false, 0), (4, false, 0), (5, false, 0)]);

    let prev: BTreeMap<_, _> = round
        .hole_result(1)
        .unwrap()
        .scores
        .iter()
        .map(|(&id, input)| (id, input.strokes))
        .collect();

    // Hole 2 pattern pairs first with third in honor order: 3 with 4.
    let (team_a, team_b) = suggest_teams(2, &[1, 2, 3, 4], Some(&prev));
    assert_eq!(team_a, (3, 4));
    assert_eq!(team_b, (1, 2));
}
