//! Practice: one session's roster, court count and round history.

use crate::config::{EngineConfig, MAX_COURTS};
use crate::logic::compute_stats;
use crate::models::error::RotationError;
use crate::models::player::{ActivePlayer, Member, PlayerId, PlayerStats};
use crate::models::round::Round;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Unique identifier for a practice.
pub type PracticeId = Uuid;

/// Full practice state: members, confirmed rounds and the round currently proposed.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Practice {
    pub id: PracticeId,
    pub created_at: DateTime<Utc>,
    /// Everyone on the roster, active or not, in sign-up order.
    pub members: Vec<Member>,
    pub courts: u32,
    /// Confirmed rounds, oldest first.
    pub rounds: Vec<Round>,
    /// Proposed round awaiting confirmation.
    pub pending: Option<Round>,
    pub config: EngineConfig,
    next_player_id: PlayerId,
}

impl Practice {
    /// New practice with no members and the default engine config.
    pub fn new(courts: u32) -> Self {
        Self::with_config(courts, EngineConfig::default())
    }

    pub fn with_config(courts: u32, config: EngineConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            members: Vec::new(),
            courts,
            rounds: Vec::new(),
            pending: None,
            config,
            next_player_id: 1,
        }
    }

    pub fn member(&self, id: PlayerId) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    fn member_mut(&mut self, id: PlayerId) -> Result<&mut Member, RotationError> {
        self.members
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(RotationError::PlayerNotFound(id))
    }

    /// Add an active member. Names are trimmed and must be unique (case-insensitive).
    pub fn add_member(&mut self, name: &str) -> Result<PlayerId, RotationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RotationError::EmptyMemberName);
        }
        if self.members.iter().any(|m| m.name.eq_ignore_ascii_case(name)) {
            return Err(RotationError::DuplicateMemberName(name.to_string()));
        }
        let id = self.next_player_id;
        self.next_player_id += 1;
        let sequence_number = self.members.iter().map(|m| m.sequence_number).max().unwrap_or(0) + 1;
        self.members.push(Member::new(id, sequence_number, name));
        Ok(id)
    }

    /// Include or exclude a member from future rounds. History is kept either way.
    pub fn set_member_active(&mut self, id: PlayerId, active: bool) -> Result<(), RotationError> {
        self.member_mut(id)?.active = active;
        Ok(())
    }

    /// Remove a member who has never appeared in a confirmed round.
    pub fn remove_member(&mut self, id: PlayerId) -> Result<(), RotationError> {
        let idx = self
            .members
            .iter()
            .position(|m| m.id == id)
            .ok_or(RotationError::PlayerNotFound(id))?;
        if self.rounds.iter().any(|r| r.player_ids().contains(&id)) {
            return Err(RotationError::MemberHasHistory(id));
        }
        self.members.remove(idx);
        Ok(())
    }

    /// Set the number of courts; rejects negative counts and counts above `MAX_COURTS`.
    pub fn set_courts(&mut self, courts: i64) -> Result<(), RotationError> {
        if !(0..=MAX_COURTS).contains(&courts) {
            return Err(RotationError::InvalidCourtCount(courts));
        }
        self.courts = courts as u32;
        Ok(())
    }

    /// Active members as round-generator roster entries.
    pub fn active_players(&self) -> Vec<ActivePlayer> {
        self.members
            .iter()
            .filter(|m| m.active)
            .map(Member::as_active_player)
            .collect()
    }

    /// Stats of every member over the confirmed rounds.
    pub fn stats(&self) -> HashMap<PlayerId, PlayerStats> {
        let ids: Vec<PlayerId> = self.members.iter().map(|m| m.id).collect();
        compute_stats(&ids, &self.rounds, self.config.history_window)
    }

    /// Number the next round will get.
    pub fn next_round_no(&self) -> u32 {
        self.rounds.len() as u32 + 1
    }
}
