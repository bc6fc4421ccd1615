//! Doubles practice court rotation: library with models and round-generation logic.
//!
//! The engine is pure: it takes a roster snapshot, the confirmed round history and a court
//! count, and proposes one round. Storage and presentation belong to the caller.

pub mod config;
pub mod logic;
pub mod models;

pub use config::{EngineConfig, ScoreWeights};
pub use logic::{
    compute_stats, confirm_round, discard_pending, export_roster_csv, export_rounds_csv,
    generate_round, import_roster_csv, pair_court, propose_round, rollback_last_round,
    score_candidate, select_participants, swap_in_pending, swap_players, CourtAssigner,
};
pub use models::{
    ActivePlayer, CourtMatch, Member, Pair, PlayerId, PlayerStats, Practice, PracticeId, Round,
    RoundAssignment, RotationError,
};
