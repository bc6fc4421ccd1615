//! Rotation logic: stats replay, participant selection, pairing, scoring, round workflow.

mod assigner;
mod editing;
mod pairing;
mod roster_csv;
mod scoring;
mod selection;
mod stats;
mod workflow;

pub use assigner::{generate_round, validate_roster, CourtAssigner};
pub use editing::swap_players;
pub use pairing::{pair_court, split_penalty};
pub use roster_csv::{export_roster_csv, export_rounds_csv, import_roster_csv};
pub use scoring::{score_breakdown, score_candidate, ScoreBreakdown};
pub use selection::{priority_order, select_participants, Selection};
pub use stats::compute_stats;
pub use workflow::{
    confirm_round, discard_pending, propose_round, rollback_last_round, swap_in_pending,
};
