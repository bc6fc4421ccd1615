//! Stats aggregation: replay round history into per-player counters.

use crate::models::{PlayerId, PlayerStats, Round};
use std::collections::HashMap;

/// Derive play/rest counters and recent partner/opponent history for `player_ids`.
///
/// `history` is ordered oldest to newest. Ids in history that are not in `player_ids` are
/// ignored; a tracked player absent from a round is left unchanged for that round.
/// Recent partner/opponent FIFOs keep at most `window` entries.
pub fn compute_stats(
    player_ids: &[PlayerId],
    history: &[Round],
    window: usize,
) -> HashMap<PlayerId, PlayerStats> {
    let mut stats: HashMap<PlayerId, PlayerStats> = player_ids
        .iter()
        .map(|&id| (id, PlayerStats::new(id)))
        .collect();

    for round in history {
        for court in &round.courts {
            for id in court.players() {
                let Some(s) = stats.get_mut(&id) else {
                    continue;
                };
                if let Some((partner, opponents)) = court.partner_and_opponents(id) {
                    s.record_played(partner, opponents, window);
                }
            }
        }
        for id in &round.rests {
            if let Some(s) = stats.get_mut(id) {
                s.record_rest();
            }
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CourtMatch;

    fn round(no: u32, courts: Vec<CourtMatch>, rests: Vec<PlayerId>) -> Round {
        Round::new(no, courts, rests)
    }

    #[test]
    fn counts_plays_rests_and_history() {
        let history = vec![
            round(1, vec![CourtMatch::new(1, [1, 2], [3, 4])], vec![5]),
            round(2, vec![CourtMatch::new(1, [1, 5], [2, 3])], vec![4]),
        ];
        let stats = compute_stats(&[1, 2, 3, 4, 5], &history, 5);

        let s1 = &stats[&1];
        assert_eq!(s1.played_count, 2);
        assert_eq!(s1.rest_count, 0);
        assert_eq!(s1.recent_partners, vec![2, 5]);
        assert_eq!(s1.recent_opponents, vec![3, 4, 2, 3]);

        let s4 = &stats[&4];
        assert_eq!(s4.played_count, 1);
        assert_eq!(s4.rest_count, 1);
        assert_eq!(s4.consec_rest, 1);

        let s5 = &stats[&5];
        assert_eq!(s5.consec_rest, 0);
        assert_eq!(s5.recent_partners, vec![1]);
    }

    #[test]
    fn untracked_ids_are_ignored() {
        let history = vec![round(1, vec![CourtMatch::new(1, [1, 2], [3, 4])], vec![9])];
        let stats = compute_stats(&[1, 7], &history, 5);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[&7], PlayerStats::new(7));
        assert_eq!(stats[&1].played_count, 1);
    }
}
