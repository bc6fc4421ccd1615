//! CourtMatch, Round and RoundAssignment.

use crate::models::player::PlayerId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Two teammates on one side of a court.
pub type Pair = [PlayerId; 2];

/// One doubles match: two pairs on a numbered court.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CourtMatch {
    /// 1-based court number.
    pub court_no: u32,
    pub pair_a: Pair,
    pub pair_b: Pair,
}

impl CourtMatch {
    pub fn new(court_no: u32, pair_a: Pair, pair_b: Pair) -> Self {
        Self {
            court_no,
            pair_a,
            pair_b,
        }
    }

    /// All four players on this court.
    pub fn players(&self) -> [PlayerId; 4] {
        [self.pair_a[0], self.pair_a[1], self.pair_b[0], self.pair_b[1]]
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.players().contains(&id)
    }

    /// Teammate and the two opponents of `id`, if `id` is on this court.
    pub fn partner_and_opponents(&self, id: PlayerId) -> Option<(PlayerId, Pair)> {
        let [a0, a1] = self.pair_a;
        let [b0, b1] = self.pair_b;
        if id == a0 {
            Some((a1, self.pair_b))
        } else if id == a1 {
            Some((a0, self.pair_b))
        } else if id == b0 {
            Some((b1, self.pair_a))
        } else if id == b1 {
            Some((b0, self.pair_a))
        } else {
            None
        }
    }
}

/// A committed (or proposed) round: court assignments plus the players resting.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub round_no: u32,
    pub courts: Vec<CourtMatch>,
    pub rests: Vec<PlayerId>,
    /// Set when the practice confirms the round; the generator ignores it.
    #[serde(default)]
    pub confirmed_at: Option<DateTime<Utc>>,
}

impl Round {
    pub fn new(round_no: u32, courts: Vec<CourtMatch>, rests: Vec<PlayerId>) -> Self {
        Self {
            round_no,
            courts,
            rests,
            confirmed_at: None,
        }
    }

    /// Every player in the round: court players in court order, then rests.
    pub fn player_ids(&self) -> Vec<PlayerId> {
        self.courts
            .iter()
            .flat_map(|c| c.players())
            .chain(self.rests.iter().copied())
            .collect()
    }

    pub fn is_playing(&self, id: PlayerId) -> bool {
        self.courts.iter().any(|c| c.contains(id))
    }
}

/// Candidate produced by the generator: not yet a numbered round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundAssignment {
    pub courts: Vec<CourtMatch>,
    pub rests: Vec<PlayerId>,
    /// Fairness penalty of this candidate (lower is better).
    pub score: f64,
}

impl RoundAssignment {
    /// Turn the candidate into a round with the given number.
    pub fn into_round(self, round_no: u32) -> Round {
        Round::new(round_no, self.courts, self.rests)
    }
}
