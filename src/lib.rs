//! Quiz night game-show controller: library with models, game logic and persistence.

pub mod engine;
pub mod logic;
pub mod models;
pub mod question_bank;
pub mod store;

pub use engine::Engine;
pub use logic::{
    advance_question, advance_round, all_pairs_completed_for_round, assign_answer,
    available_pair_candidates, award_points, complete_match, compute_round_results,
    draw_bonus_question, initialize_teams, reveal_answer, select_pair, select_teams, start_game,
};
pub use models::{
    Answer, Countdown, EngineError, ErrorKind, GamePhase, Matchup, Question, QuestionId,
    RoundRules, Session, Team, TeamId, DEFAULT_TIMER_SECONDS,
};
pub use question_bank::{load_questions, read_questions, BankError};
pub use store::{FileStore, KeyValueStore, MemoryStore, SessionRecord, StoreError};
