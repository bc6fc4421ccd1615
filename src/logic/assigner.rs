//! Court assignment: bounded randomized search over court fillings.

use crate::config::EngineConfig;
use crate::logic::pairing::pair_court;
use crate::logic::scoring::score_candidate;
use crate::logic::selection::select_participants;
use crate::logic::stats::compute_stats;
use crate::models::{
    ActivePlayer, CourtMatch, PlayerId, PlayerStats, Round, RoundAssignment, RotationError,
};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{HashMap, HashSet};

/// Generate one round for `active_players` on up to `courts_available` courts.
///
/// 1. Replay `history` into per-player stats.
/// 2. Select who plays (fewer than 4 players: everyone rests, not an error).
/// 3. Run `config.trials` fillings: trial 0 in priority order, the rest shuffled by `rng`;
///    each court is split by the pairer and the whole candidate is scored.
/// 4. Keep the lowest score (earlier candidate wins ties); with no trials, fill courts in
///    priority order.
///
/// Fails only on a malformed roster (duplicate ids).
pub fn generate_round<R: Rng + ?Sized>(
    active_players: &[ActivePlayer],
    courts_available: u32,
    history: &[Round],
    config: &EngineConfig,
    rng: &mut R,
) -> Result<RoundAssignment, RotationError> {
    validate_roster(active_players)?;

    let ids: Vec<PlayerId> = active_players.iter().map(|p| p.id).collect();
    let stats = compute_stats(&ids, history, config.history_window);
    let selection = select_participants(active_players, &stats, courts_available, rng);
    let rests = selection.resting;

    if selection.playing.is_empty() {
        log::debug!("{} active player(s): nobody plays this round", active_players.len());
        return Ok(RoundAssignment {
            courts: Vec::new(),
            rests,
            score: 0.0,
        });
    }

    let baseline: Vec<PlayerId> = selection.playing.iter().map(|p| p.id).collect();
    let mut best: Option<RoundAssignment> = None;
    let mut order = baseline.clone();
    for trial in 0..config.trials {
        if trial > 0 {
            order.shuffle(rng);
        }
        let courts = fill_courts(&order, &stats);
        let score = score_candidate(&courts, &rests, &stats, &config.weights);
        if best.as_ref().map_or(true, |b| score < b.score) {
            best = Some(RoundAssignment {
                courts,
                rests: rests.clone(),
                score,
            });
        }
    }

    match best {
        Some(candidate) => {
            log::debug!(
                "Generated {} court(s), {} resting, score {:.3} after {} trial(s)",
                candidate.courts.len(),
                candidate.rests.len(),
                candidate.score,
                config.trials
            );
            Ok(candidate)
        }
        None => {
            log::warn!("No search candidate produced; filling courts in priority order");
            Ok(fallback_assignment(&baseline, rests, &stats, config))
        }
    }
}

/// Reject rosters that list the same player twice.
pub fn validate_roster(active_players: &[ActivePlayer]) -> Result<(), RotationError> {
    let mut seen = HashSet::with_capacity(active_players.len());
    for p in active_players {
        if !seen.insert(p.id) {
            return Err(RotationError::DuplicatePlayer(p.id));
        }
    }
    Ok(())
}

/// Fill courts in groups of four from `order`, letting the pairer split each court.
fn fill_courts(order: &[PlayerId], stats: &HashMap<PlayerId, PlayerStats>) -> Vec<CourtMatch> {
    order
        .chunks_exact(4)
        .enumerate()
        .map(|(i, chunk)| {
            let (pair_a, pair_b) = pair_court([chunk[0], chunk[1], chunk[2], chunk[3]], stats);
            CourtMatch::new(i as u32 + 1, pair_a, pair_b)
        })
        .collect()
}

/// Unoptimized fill: courts in priority order, first two vs last two.
fn fallback_assignment(
    order: &[PlayerId],
    rests: Vec<PlayerId>,
    stats: &HashMap<PlayerId, PlayerStats>,
    config: &EngineConfig,
) -> RoundAssignment {
    let courts: Vec<CourtMatch> = order
        .chunks_exact(4)
        .enumerate()
        .map(|(i, c)| CourtMatch::new(i as u32 + 1, [c[0], c[1]], [c[2], c[3]]))
        .collect();
    let score = score_candidate(&courts, &rests, stats, &config.weights);
    RoundAssignment { courts, rests, score }
}

/// Round generator that owns its configuration and random source.
///
/// Stateless between calls apart from the rng; seed it for reproducible rounds.
pub struct CourtAssigner<R: Rng> {
    config: EngineConfig,
    rng: R,
}

impl<R: Rng> CourtAssigner<R> {
    pub fn new(config: EngineConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Stats over `player_ids` using this assigner's history window.
    pub fn compute_stats(&self, player_ids: &[PlayerId], history: &[Round]) -> HashMap<PlayerId, PlayerStats> {
        compute_stats(player_ids, history, self.config.history_window)
    }

    pub fn generate_round(
        &mut self,
        active_players: &[ActivePlayer],
        courts_available: u32,
        history: &[Round],
    ) -> Result<RoundAssignment, RotationError> {
        generate_round(active_players, courts_available, history, &self.config, &mut self.rng)
    }
}
