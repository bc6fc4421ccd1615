//! Player, Member and PlayerStats data structures.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Identifier for a player, unique within a practice.
pub type PlayerId = u32;

/// Roster entry handed to the round generator.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActivePlayer {
    pub id: PlayerId,
    /// Stable display index; not used for fairness.
    pub sequence_number: u32,
}

impl ActivePlayer {
    pub fn new(id: PlayerId, sequence_number: u32) -> Self {
        Self { id, sequence_number }
    }
}

/// Play/rest counters and recent pairing history of one player, derived from round history.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub player_id: PlayerId,
    pub played_count: u32,
    pub rest_count: u32,
    /// Rounds rested in a row without playing in between.
    pub consec_rest: u32,
    /// Most recent teammates, oldest first, at most `window` entries.
    pub recent_partners: VecDeque<PlayerId>,
    /// Most recent opponents, oldest first, at most `window` entries.
    pub recent_opponents: VecDeque<PlayerId>,
}

impl PlayerStats {
    pub fn new(player_id: PlayerId) -> Self {
        Self {
            player_id,
            ..Self::default()
        }
    }

    /// Record a round on court with the given teammate and opponents.
    pub fn record_played(&mut self, partner: PlayerId, opponents: [PlayerId; 2], window: usize) {
        self.played_count += 1;
        self.consec_rest = 0;
        push_bounded(&mut self.recent_partners, partner, window);
        for opponent in opponents {
            push_bounded(&mut self.recent_opponents, opponent, window);
        }
    }

    /// Record a round spent resting.
    pub fn record_rest(&mut self) {
        self.rest_count += 1;
        self.consec_rest += 1;
    }

    /// How many times `other` shows up among the recent partners.
    pub fn partner_count(&self, other: PlayerId) -> usize {
        self.recent_partners.iter().filter(|&&p| p == other).count()
    }

    pub fn has_recent_partner(&self, other: PlayerId) -> bool {
        self.recent_partners.contains(&other)
    }

    pub fn has_recent_opponent(&self, other: PlayerId) -> bool {
        self.recent_opponents.contains(&other)
    }
}

fn push_bounded(fifo: &mut VecDeque<PlayerId>, id: PlayerId, window: usize) {
    fifo.push_back(id);
    while fifo.len() > window {
        fifo.pop_front();
    }
}

/// A named member of a practice roster. Only active members are scheduled.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: PlayerId,
    pub sequence_number: u32,
    pub name: String,
    pub active: bool,
}

impl Member {
    /// Create an active member.
    pub fn new(id: PlayerId, sequence_number: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            sequence_number,
            name: name.into(),
            active: true,
        }
    }

    /// Roster entry for the round generator.
    pub fn as_active_player(&self) -> ActivePlayer {
        ActivePlayer::new(self.id, self.sequence_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recent_history_is_trimmed_from_the_front() {
        let mut s = PlayerStats::new(1);
        for partner in 2..=8 {
            s.record_played(partner, [100 + partner, 200 + partner], 3);
        }
        assert_eq!(s.recent_partners, VecDeque::from(vec![6, 7, 8]));
        assert_eq!(s.recent_opponents, VecDeque::from(vec![207, 108, 208]));
        assert_eq!(s.played_count, 7);
    }

    #[test]
    fn playing_resets_consecutive_rest() {
        let mut s = PlayerStats::new(1);
        s.record_rest();
        s.record_rest();
        assert_eq!(s.consec_rest, 2);
        s.record_played(2, [3, 4], 5);
        assert_eq!(s.consec_rest, 0);
        assert_eq!(s.rest_count, 2);
    }
}
