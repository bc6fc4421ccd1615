//! Data structures for practice rotation: players, stats, rounds, practice state.

mod error;
mod player;
mod practice;
mod round;

pub use error::RotationError;
pub use player::{ActivePlayer, Member, PlayerId, PlayerStats};
pub use practice::{Practice, PracticeId};
pub use round::{CourtMatch, Pair, Round, RoundAssignment};
