//! Game commands and queries: setup, pairing, questions, scoring, advancement.

mod advancement;
mod pairing;
mod questions;
mod scoring;
mod setup;

pub use advancement::{advance_round, compute_round_results};
pub use pairing::{
    all_pairs_completed_for_round, available_pair_candidates, complete_match, select_pair,
    select_teams,
};
pub use questions::{advance_question, draw_bonus_question, reveal_answer};
pub use scoring::{assign_answer, award_points};
pub use setup::{initialize_teams, start_game};
