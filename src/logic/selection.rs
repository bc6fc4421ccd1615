//! Participant selection: who plays this round and who rests.

use crate::models::{ActivePlayer, PlayerId, PlayerStats};
use rand::seq::SliceRandom;
use rand::Rng;
use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};

/// Players chosen to play (priority order) and the ids resting (roster order).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Selection {
    pub playing: Vec<ActivePlayer>,
    pub resting: Vec<PlayerId>,
}

/// Sort key: fewest plays first, then most rests, then longest current rest streak.
fn priority_key(stats: &HashMap<PlayerId, PlayerStats>, id: PlayerId) -> (u32, Reverse<u32>, Reverse<u32>) {
    match stats.get(&id) {
        Some(s) => (s.played_count, Reverse(s.rest_count), Reverse(s.consec_rest)),
        None => (0, Reverse(0), Reverse(0)),
    }
}

fn played(stats: &HashMap<PlayerId, PlayerStats>, id: PlayerId) -> u32 {
    stats.get(&id).map_or(0, |s| s.played_count)
}

/// Roster sorted by play priority; ties keep roster order.
pub fn priority_order(
    active_players: &[ActivePlayer],
    stats: &HashMap<PlayerId, PlayerStats>,
) -> Vec<ActivePlayer> {
    let mut sorted = active_players.to_vec();
    sorted.sort_by_key(|p| priority_key(stats, p.id));
    sorted
}

/// Pick `min(courts * 4, floor(n / 4) * 4)` players to play.
///
/// Strict mode (play-count spread >= 2): the top of the priority order plays.
/// Flexible mode: the roster is shuffled inside each play-count tier, so nobody at the minimum
/// is passed over for someone who played more.
pub fn select_participants<R: Rng + ?Sized>(
    active_players: &[ActivePlayer],
    stats: &HashMap<PlayerId, PlayerStats>,
    courts_available: u32,
    rng: &mut R,
) -> Selection {
    let slots = (courts_available as usize * 4).min(active_players.len() / 4 * 4);
    if slots == 0 {
        return Selection {
            playing: Vec::new(),
            resting: active_players.iter().map(|p| p.id).collect(),
        };
    }

    let sorted = priority_order(active_players, stats);
    let min_played = sorted.first().map_or(0, |p| played(stats, p.id));
    let max_played = sorted.iter().map(|p| played(stats, p.id)).max().unwrap_or(0);

    let chosen: HashSet<PlayerId> = if max_played - min_played >= 2 {
        sorted.iter().take(slots).map(|p| p.id).collect()
    } else {
        // Spread below 2: every player is within one play of the minimum, so the pool is the
        // whole roster and always covers the slots.
        let mut pool = sorted.clone();
        pool.shuffle(rng);
        // Stable sort restores tier order while keeping the shuffle inside each tier.
        pool.sort_by_key(|p| played(stats, p.id));
        pool.iter().take(slots).map(|p| p.id).collect()
    };

    let playing = sorted.iter().filter(|p| chosen.contains(&p.id)).copied().collect();
    let resting = active_players
        .iter()
        .filter(|p| !chosen.contains(&p.id))
        .map(|p| p.id)
        .collect();
    Selection { playing, resting }
}
