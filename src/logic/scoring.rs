//! Fairness score of a candidate round (lower is better).

use crate::config::ScoreWeights;
use crate::models::{CourtMatch, PlayerId, PlayerStats};
use std::collections::HashMap;

/// Population variance; 0 for an empty slice.
fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n
}

fn stat<F: Fn(&PlayerStats) -> u32>(stats: &HashMap<PlayerId, PlayerStats>, id: PlayerId, f: F) -> f64 {
    stats.get(&id).map_or(0, f) as f64
}

fn teammates_repeat(pair: [PlayerId; 2], stats: &HashMap<PlayerId, PlayerStats>) -> bool {
    let knows = |a: PlayerId, b: PlayerId| stats.get(&a).is_some_and(|s| s.has_recent_partner(b));
    knows(pair[0], pair[1]) && knows(pair[1], pair[0])
}

/// Individual terms of the score, before weighting.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScoreBreakdown {
    pub played_variance: f64,
    pub rest_variance: f64,
    pub consecutive_rest_penalty: f64,
    pub duplicate_pair_count: f64,
    pub duplicate_match_count: f64,
}

impl ScoreBreakdown {
    pub fn weighted(&self, w: &ScoreWeights) -> f64 {
        w.played_variance * self.played_variance
            + w.rest_variance * self.rest_variance
            + w.consecutive_rest * self.consecutive_rest_penalty
            + w.duplicate_pair * self.duplicate_pair_count
            + w.duplicate_match * self.duplicate_match_count
    }
}

/// Compute each score term for `courts` + `rests` against the pre-round stats.
pub fn score_breakdown(
    courts: &[CourtMatch],
    rests: &[PlayerId],
    stats: &HashMap<PlayerId, PlayerStats>,
) -> ScoreBreakdown {
    let played: Vec<f64> = courts
        .iter()
        .flat_map(|c| c.players())
        .map(|id| stat(stats, id, |s| s.played_count))
        .collect();
    let rested: Vec<f64> = rests.iter().map(|&id| stat(stats, id, |s| s.rest_count)).collect();
    let consecutive_rest_penalty = rests.iter().map(|&id| stat(stats, id, |s| s.consec_rest)).sum();

    let mut duplicate_pair_count = 0;
    let mut duplicate_match_count = 0;
    for court in courts {
        duplicate_pair_count += teammates_repeat(court.pair_a, stats) as u32;
        duplicate_pair_count += teammates_repeat(court.pair_b, stats) as u32;
        for p1 in court.pair_a {
            for p2 in court.pair_b {
                if stats.get(&p1).is_some_and(|s| s.has_recent_opponent(p2)) {
                    duplicate_match_count += 1;
                }
            }
        }
    }

    ScoreBreakdown {
        played_variance: variance(&played),
        rest_variance: variance(&rested),
        consecutive_rest_penalty,
        duplicate_pair_count: duplicate_pair_count as f64,
        duplicate_match_count: duplicate_match_count as f64,
    }
}

/// Weighted fairness penalty of a candidate round.
pub fn score_candidate(
    courts: &[CourtMatch],
    rests: &[PlayerId],
    stats: &HashMap<PlayerId, PlayerStats>,
    weights: &ScoreWeights,
) -> f64 {
    score_breakdown(courts, rests, stats).weighted(weights)
}
