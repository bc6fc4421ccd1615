//! Round workflow on a practice: propose, edit, confirm, discard, roll back.

use crate::logic::assigner::generate_round;
use crate::logic::editing::swap_players;
use crate::models::{PlayerId, Practice, Round, RotationError};
use chrono::Utc;
use rand::Rng;

/// Generate the next round from active members and confirmed history and store it as pending.
///
/// Replaces any previously proposed round.
pub fn propose_round<'a, R: Rng + ?Sized>(
    practice: &'a mut Practice,
    rng: &mut R,
) -> Result<&'a Round, RotationError> {
    let assignment = generate_round(
        &practice.active_players(),
        practice.courts,
        &practice.rounds,
        &practice.config,
        rng,
    )?;
    let round = assignment.into_round(practice.next_round_no());
    let pending: &Round = practice.pending.insert(round);
    Ok(pending)
}

/// Swap two players in the pending round.
pub fn swap_in_pending(practice: &mut Practice, a: PlayerId, b: PlayerId) -> Result<(), RotationError> {
    let pending = practice.pending.as_ref().ok_or(RotationError::NoPendingRound)?;
    let edited = swap_players(pending, a, b)?;
    practice.pending = Some(edited);
    Ok(())
}

/// Commit the pending round to history.
pub fn confirm_round(practice: &mut Practice) -> Result<(), RotationError> {
    let mut round = practice.pending.take().ok_or(RotationError::NoPendingRound)?;
    round.confirmed_at = Some(Utc::now());
    log::info!(
        "Practice {}: confirmed round {} ({} court(s), {} resting)",
        practice.id,
        round.round_no,
        round.courts.len(),
        round.rests.len()
    );
    practice.rounds.push(round);
    Ok(())
}

/// Drop the pending round without committing it.
pub fn discard_pending(practice: &mut Practice) -> Result<(), RotationError> {
    practice
        .pending
        .take()
        .map(|_| ())
        .ok_or(RotationError::NoPendingRound)
}

/// Remove the most recent confirmed round (and any pending proposal built on it).
pub fn rollback_last_round(practice: &mut Practice) -> Result<Round, RotationError> {
    let round = practice.rounds.pop().ok_or(RotationError::NoRoundsToRollback)?;
    practice.pending = None;
    log::info!("Practice {}: rolled back round {}", practice.id, round.round_no);
    Ok(round)
}
