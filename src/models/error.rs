//! RotationError: the one error type shared by the engine and the practice workflow.

use crate::models::player::PlayerId;

/// Errors that can occur while generating, editing or committing rounds.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RotationError {
    /// The same id appears twice in the active roster.
    DuplicatePlayer(PlayerId),
    /// Court count outside 0..=MAX_COURTS.
    InvalidCourtCount(i64),
    /// No member with this id.
    PlayerNotFound(PlayerId),
    /// Player is neither on a court nor resting in the round being edited.
    PlayerNotInRound(PlayerId),
    /// A member with this name already exists (names are unique, case-insensitive).
    DuplicateMemberName(String),
    EmptyMemberName,
    /// Member already appears in confirmed rounds; deactivate instead.
    MemberHasHistory(PlayerId),
    NoPendingRound,
    NoRoundsToRollback,
    /// Malformed CSV input or a CSV writer failure.
    Csv(String),
}

impl std::fmt::Display for RotationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RotationError::DuplicatePlayer(id) => write!(f, "Player {} is listed more than once", id),
            RotationError::InvalidCourtCount(n) => write!(f, "Invalid court count: {}", n),
            RotationError::PlayerNotFound(id) => write!(f, "Player {} not found", id),
            RotationError::PlayerNotInRound(id) => write!(f, "Player {} is not in this round", id),
            RotationError::DuplicateMemberName(name) => {
                write!(f, "A member named '{}' already exists", name)
            }
            RotationError::EmptyMemberName => write!(f, "Member name must not be empty"),
            RotationError::MemberHasHistory(id) => {
                write!(f, "Player {} has played rounds; deactivate instead of removing", id)
            }
            RotationError::NoPendingRound => write!(f, "No proposed round to act on"),
            RotationError::NoRoundsToRollback => write!(f, "No confirmed rounds to roll back"),
            RotationError::Csv(msg) => write!(f, "CSV error: {}", msg),
        }
    }
}

impl std::error::Error for RotationError {}

impl From<csv::Error> for RotationError {
    fn from(e: csv::Error) -> Self {
        RotationError::Csv(e.to_string())
    }
}
