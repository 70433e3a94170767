//! Data structures for the quiz: teams, questions, timer, session state.

mod question;
mod session;
mod team;
mod timer;

pub use question::{Answer, Matchup, Question, QuestionId};
pub use session::{EngineError, ErrorKind, GamePhase, RoundRules, Session};
pub use team::{Team, TeamId};
pub use timer::{Countdown, DEFAULT_TIMER_SECONDS};
