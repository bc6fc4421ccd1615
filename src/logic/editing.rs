//! Manual round edits. Each edit returns a new round; the input is never modified.

use crate::models::{PlayerId, Round, RotationError};

/// Exchange the positions of `a` and `b` (court to court, court to rest, or rest to rest).
pub fn swap_players(round: &Round, a: PlayerId, b: PlayerId) -> Result<Round, RotationError> {
    for id in [a, b] {
        if !round.is_playing(id) && !round.rests.contains(&id) {
            return Err(RotationError::PlayerNotInRound(id));
        }
    }

    let swap = |id: PlayerId| {
        if id == a {
            b
        } else if id == b {
            a
        } else {
            id
        }
    };

    let mut edited = round.clone();
    for court in &mut edited.courts {
        court.pair_a = court.pair_a.map(swap);
        court.pair_b = court.pair_b.map(swap);
    }
    edited.rests = edited.rests.iter().map(|&id| swap(id)).collect();
    Ok(edited)
}
