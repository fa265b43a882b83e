//! Team-pairing suggestion from honor order. A convenience for the setup
//! dialog; the engine accepts whatever split the group actually plays.

use std::collections::BTreeMap;

use crate::hole::TeamPair;
use crate::player::PlayerId;

/// Rank players for the tee by previous-hole strokes, best first. Ties keep
/// the caller's order (stable sort). With no prior hole the caller's order
/// IS the honor order.
pub fn honor_order(
    players: &[PlayerId; 4],
    previous_strokes: Option<&BTreeMap<PlayerId, u32>>,
) -> [PlayerId; 4] {
    let mut order = *players;
    if let Some(prev) = previous_strokes {
        order.sort_by_key(|id| prev.get(id).copied().unwrap_or(u32::MAX));
    }
    order
}

/// Suggest a 2v2 split for `hole_number`, rotating the pairing pattern so
/// partners change as the round goes on.
pub fn suggest_teams(
    hole_number: u8,
    players: &[PlayerId; 4],
    previous_strokes: Option<&BTreeMap<PlayerId, u32>>,
) -> (TeamPair, TeamPair) {
    let p = honor_order(players, previous_strokes);
    match hole_number % 3 {
        1 => ((p[0], p[1]), (p[2], p[3])),
        2 => ((p[0], p[2]), (p[1], p[3])),
        _ => ((p[0], p[3]), (p[1], p[2])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAYERS: [PlayerId; 4] = [10, 20, 30, 40];

    fn strokes(entries: [(PlayerId, u32); 4]) -> BTreeMap<PlayerId, u32> {
        entries.into_iter().collect()
    }

    #[test]
    fn first_hole_keeps_list_order() {
        let (a, b) = suggest_teams(1, &PLAYERS, None);
        assert_eq!(a, (10, 20));
        assert_eq!(b, (30, 40));
    }

    #[test]
    fn honor_order_ranks_by_previous_strokes() {
        let prev = strokes([(10, 6), (20, 3), (30, 5), (40, 4)]);
        assert_eq!(honor_order(&PLAYERS, Some(&prev)), [20, 40, 30, 10]);
    }

    #[test]
    fn ties_keep_relative_order() {
        let prev = strokes([(10, 4), (20, 4), (30, 3), (40, 4)]);
        assert_eq!(honor_order(&PLAYERS, Some(&prev)), [30, 10, 20, 40]);
    }

    #[test]
    fn pattern_rotates_with_hole_number() {
        let prev = strokes([(10, 1), (20, 2), (30, 3), (40, 4)]);
        // hole % 3 == 1: best two vs worst two.
        assert_eq!(suggest_teams(4, &PLAYERS, Some(&prev)), ((10, 20), (30, 40)));
        // hole % 3 == 2: first and third vs second and fourth.
        assert_eq!(suggest_teams(5, &PLAYERS, Some(&prev)), ((10, 30), (20, 40)));
        // hole % 3 == 0: best with worst.
        assert_eq!(suggest_teams(6, &PLAYERS, Some(&prev)), ((10, 40), (20, 30)));
    }
}
