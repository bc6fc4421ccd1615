//! Engine configuration: search budget, history window and score weights.

use serde::{Deserialize, Serialize};

/// Randomized trials per generated round.
pub const DEFAULT_TRIALS: usize = 200;

/// Number of recent partners/opponents remembered per player.
pub const DEFAULT_HISTORY_WINDOW: usize = 5;

/// Upper bound accepted for the court count of a practice.
pub const MAX_COURTS: i64 = 64;

/// Pairer penalty per occurrence of a teammate in recent partners.
pub const PARTNER_REPEAT_PENALTY: u32 = 5;

/// Pairer penalty per opposing combination found in recent opponents.
pub const OPPONENT_REPEAT_PENALTY: u32 = 2;

/// Weights of the fairness score terms.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub played_variance: f64,
    pub rest_variance: f64,
    pub consecutive_rest: f64,
    pub duplicate_pair: f64,
    pub duplicate_match: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            played_variance: 10.0,
            rest_variance: 2.0,
            consecutive_rest: 4.0,
            duplicate_pair: 2.0,
            duplicate_match: 1.0,
        }
    }
}

/// Configuration for round generation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Shuffled trials per round; 0 skips the search and uses the fallback fill.
    pub trials: usize,
    /// Size of the recent partner/opponent FIFOs.
    pub history_window: usize,
    pub weights: ScoreWeights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            history_window: DEFAULT_HISTORY_WINDOW,
            weights: ScoreWeights::default(),
        }
    }
}

impl EngineConfig {
    /// Defaults overridden by `ROTATION_TRIALS` / `ROTATION_HISTORY_WINDOW` when set and valid.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(trials) = env_usize("ROTATION_TRIALS") {
            config.trials = trials;
        }
        if let Some(window) = env_usize("ROTATION_HISTORY_WINDOW").filter(|w| *w > 0) {
            config.history_window = window;
        }
        config
    }
}

fn env_usize(key: &str) -> Option<usize> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("Ignoring {}={:?}: not a non-negative integer", key, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"trials": 50}"#).unwrap();
        assert_eq!(config.trials, 50);
        assert_eq!(config.history_window, DEFAULT_HISTORY_WINDOW);
        assert_eq!(config.weights, ScoreWeights::default());
    }

    #[test]
    fn default_weights_favor_play_balance() {
        let w = ScoreWeights::default();
        assert_eq!(w.played_variance, 10.0);
        assert!(w.played_variance > w.rest_variance);
        assert!(w.duplicate_pair > w.duplicate_match);
    }
}
