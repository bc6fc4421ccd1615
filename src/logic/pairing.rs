//! Team pairing: split four players on a court into two pairs.

use crate::config::{OPPONENT_REPEAT_PENALTY, PARTNER_REPEAT_PENALTY};
use crate::models::{Pair, PlayerId, PlayerStats};
use std::collections::HashMap;

/// The three ways to split four players into two pairs, as index quadruples.
const SPLITS: [[usize; 4]; 3] = [[0, 1, 2, 3], [0, 2, 1, 3], [0, 3, 1, 2]];

/// Repetition penalty of playing `pair_a` against `pair_b`, given recent history.
pub fn split_penalty(pair_a: Pair, pair_b: Pair, stats: &HashMap<PlayerId, PlayerStats>) -> u32 {
    let partner_repeats = |pair: Pair| -> u32 {
        stats
            .get(&pair[0])
            .map_or(0, |s| s.partner_count(pair[1]) as u32)
    };
    let partner_penalty = (partner_repeats(pair_a) + partner_repeats(pair_b)) * PARTNER_REPEAT_PENALTY;

    let opponent_repeats = pair_a
        .iter()
        .flat_map(|p1| pair_b.iter().map(move |p2| (*p1, *p2)))
        .filter(|(p1, p2)| stats.get(p1).is_some_and(|s| s.has_recent_opponent(*p2)))
        .count() as u32;

    partner_penalty + opponent_repeats * OPPONENT_REPEAT_PENALTY
}

/// Choose the split with the lowest repetition penalty; the first enumerated split wins ties.
pub fn pair_court(players: [PlayerId; 4], stats: &HashMap<PlayerId, PlayerStats>) -> (Pair, Pair) {
    let mut best: Option<(u32, Pair, Pair)> = None;
    for [a0, a1, b0, b1] in SPLITS {
        let pair_a = [players[a0], players[a1]];
        let pair_b = [players[b0], players[b1]];
        let penalty = split_penalty(pair_a, pair_b, stats);
        if best.map_or(true, |(p, _, _)| penalty < p) {
            best = Some((penalty, pair_a, pair_b));
        }
    }
    match best {
        Some((_, pair_a, pair_b)) => (pair_a, pair_b),
        None => ([players[0], players[1]], [players[2], players[3]]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::compute_stats;
    use crate::models::{CourtMatch, Round};

    #[test]
    fn no_history_keeps_first_split() {
        let (a, b) = pair_court([4, 3, 2, 1], &HashMap::new());
        assert_eq!(a, [4, 3]);
        assert_eq!(b, [2, 1]);
    }

    #[test]
    fn avoids_last_rounds_partners() {
        let history = vec![Round::new(1, vec![CourtMatch::new(1, [1, 2], [3, 4])], vec![])];
        let stats = compute_stats(&[1, 2, 3, 4], &history, 5);
        assert_eq!(split_penalty([1, 2], [3, 4], &stats), 10 + 4 * 2);
        assert_eq!(split_penalty([1, 3], [2, 4], &stats), 2 * 2);

        let (a, b) = pair_court([1, 2, 3, 4], &stats);
        assert_eq!(a, [1, 3]);
        assert_eq!(b, [2, 4]);
    }

    #[test]
    fn repeated_partners_weigh_more_than_once_seen() {
        let history = vec![
            Round::new(1, vec![CourtMatch::new(1, [1, 2], [3, 4])], vec![]),
            Round::new(2, vec![CourtMatch::new(1, [1, 3], [2, 4])], vec![]),
            Round::new(3, vec![CourtMatch::new(1, [1, 2], [3, 4])], vec![]),
        ];
        let stats = compute_stats(&[1, 2, 3, 4], &history, 5);
        let (a, _) = pair_court([1, 2, 3, 4], &stats);
        assert_eq!(a, [1, 4]);
    }
}
