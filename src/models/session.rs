//! Session (the whole game state), GamePhase, RoundRules and EngineError.

use crate::models::question::{Matchup, Question};
use crate::models::team::{Team, TeamId};
use crate::models::timer::{Countdown, DEFAULT_TIMER_SECONDS};
use serde::{Deserialize, Serialize};

/// Broad category of an [`EngineError`], for deciding how to surface it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// Bad input from the operator; shown inline, nothing changed.
    Validation,
    /// Command issued in a phase (or with no matchup/question) where it makes no sense.
    InvalidState,
    /// Round advancement attempted with no advancing teams; raise a blocking alert.
    AdvancementIntegrity,
}

/// Errors that can occur during game commands. A failed command never mutates the session.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EngineError {
    /// Fewer non-empty team names than the minimum.
    NotEnoughTeams { min: usize, supplied: usize },
    /// More team names than the maximum.
    TooManyTeams { max: usize, supplied: usize },
    /// No team with this id in the current teams collection.
    TeamNotFound(TeamId),
    /// The team already played its matchup this round.
    TeamAlreadyCompeted(TeamId),
    /// Both sides of a matchup are the same team.
    SameTeamTwice,
    /// A matchup needs exactly two teams.
    WrongNumberOfTeams { selected: usize },
    /// Answer index is past the end of the current question's answers.
    AnswerOutOfRange { index: usize, answers: usize },
    NoActiveMatchup,
    NoActiveQuestion,
    /// The game is not in a phase that allows this action.
    InvalidState,
    /// Round advancement with an empty advancing set, even after the stored fallback.
    NoAdvancingTeams,
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        use EngineError::*;
        match self {
            NotEnoughTeams { .. }
            | TooManyTeams { .. }
            | TeamNotFound(_)
            | TeamAlreadyCompeted(_)
            | SameTeamTwice
            | WrongNumberOfTeams { .. }
            | AnswerOutOfRange { .. } => ErrorKind::Validation,
            NoActiveMatchup | NoActiveQuestion | InvalidState => ErrorKind::InvalidState,
            NoAdvancingTeams => ErrorKind::AdvancementIntegrity,
        }
    }
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::NotEnoughTeams { min, supplied } => {
                write!(f, "Please enter at least {} team names (got {})", min, supplied)
            }
            EngineError::TooManyTeams { max, supplied } => {
                write!(f, "At most {} teams can play (got {})", max, supplied)
            }
            EngineError::TeamNotFound(_) => write!(f, "Team not found"),
            EngineError::TeamAlreadyCompeted(_) => {
                write!(f, "Team has already competed this round")
            }
            EngineError::SameTeamTwice => write!(f, "A team cannot compete against itself"),
            EngineError::WrongNumberOfTeams { selected } => {
                write!(f, "Select exactly 2 teams (selected {})", selected)
            }
            EngineError::AnswerOutOfRange { index, answers } => {
                write!(f, "Answer {} does not exist (question has {} answers)", index, answers)
            }
            EngineError::NoActiveMatchup => write!(f, "No teams are currently competing"),
            EngineError::NoActiveQuestion => write!(f, "No question is currently shown"),
            EngineError::InvalidState => write!(f, "Invalid state for this action"),
            EngineError::NoAdvancingTeams => write!(
                f,
                "No teams are marked to advance; show the round results before advancing"
            ),
        }
    }
}

impl std::error::Error for EngineError {}

/// Current phase of the game.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    /// Entering team names; not started.
    #[default]
    Setup,
    Round1,
    Round2,
    Round3,
    /// Winner decided.
    Finished,
}

impl GamePhase {
    /// Phase for a round counter: 0 is setup, 1..=3 are rounds, anything above is finished.
    pub fn for_round(round: u32) -> Self {
        match round {
            0 => GamePhase::Setup,
            1 => GamePhase::Round1,
            2 => GamePhase::Round2,
            3 => GamePhase::Round3,
            _ => GamePhase::Finished,
        }
    }

    pub fn is_playing(self) -> bool {
        matches!(self, GamePhase::Round1 | GamePhase::Round2 | GamePhase::Round3)
    }
}

/// Per-round constants. Independent of how many teams remain.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundRules {
    pub min_teams: usize,
    pub max_teams: usize,
    /// Questions each matchup plays in rounds 1, 2 and 3.
    pub questions_required: [u32; 3],
    /// Teams that survive rounds 1, 2 and 3 (the last is the winner).
    pub survivors: [usize; 3],
    pub timer_seconds: u32,
}

impl Default for RoundRules {
    fn default() -> Self {
        Self {
            min_teams: 8,
            max_teams: 10,
            questions_required: [1, 2, 3],
            survivors: [4, 2, 1],
            timer_seconds: DEFAULT_TIMER_SECONDS,
        }
    }
}

impl RoundRules {
    pub const FINAL_ROUND: u32 = 3;

    /// Questions per matchup in `round`; zero outside rounds 1..=3.
    pub fn questions_required(&self, round: u32) -> u32 {
        match round {
            1..=Self::FINAL_ROUND => self.questions_required[(round - 1) as usize],
            _ => 0,
        }
    }

    /// Survivor cutoff for `round`; zero outside rounds 1..=3.
    pub fn survivors(&self, round: u32) -> usize {
        match round {
            1..=Self::FINAL_ROUND => self.survivors[(round - 1) as usize],
            _ => 0,
        }
    }
}

/// Full game state. Mutated only through the commands in [`crate::logic`].
#[derive(Clone, Debug, Serialize)]
pub struct Session {
    /// Teams still in the game, in insertion order.
    pub teams: Vec<Team>,
    /// 0 in setup, 1..=3 while playing, 4 once finished.
    pub round: u32,
    pub phase: GamePhase,
    pub questions_required: u32,
    pub current_matchup: Option<Matchup>,
    pub current_question: Option<Question>,
    /// Answer indices revealed on the current question.
    pub revealed_answers: Vec<usize>,
    /// Which team each scored answer of the current question went to (one team per answer).
    pub assigned_answers: Vec<(usize, TeamId)>,
    pub main_pool: Vec<Question>,
    pub bonus_pool: Vec<Question>,
    pub timer: Countdown,
    /// Teams that finished their matchup this round (each at most once).
    pub completed: Vec<TeamId>,
    /// Teams picked to advance by the latest round results.
    pub advancing: Vec<TeamId>,
    /// Standings of the last round, kept once the game is finished.
    pub final_standings: Vec<Team>,
    #[serde(skip)]
    pub rules: RoundRules,
}

impl Session {
    /// New session in Setup with no teams and the given question pools.
    pub fn new(main_pool: Vec<Question>, bonus_pool: Vec<Question>) -> Self {
        Self::with_rules(RoundRules::default(), main_pool, bonus_pool)
    }

    pub fn with_rules(rules: RoundRules, main_pool: Vec<Question>, bonus_pool: Vec<Question>) -> Self {
        Self {
            teams: Vec::new(),
            round: 0,
            phase: GamePhase::Setup,
            questions_required: 0,
            current_matchup: None,
            current_question: None,
            revealed_answers: Vec::new(),
            assigned_answers: Vec::new(),
            main_pool,
            bonus_pool,
            timer: Countdown::new(rules.timer_seconds),
            completed: Vec::new(),
            advancing: Vec::new(),
            final_standings: Vec::new(),
            rules,
        }
    }

    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    pub fn team_mut(&mut self, id: TeamId) -> Option<&mut Team> {
        self.teams.iter_mut().find(|t| t.id == id)
    }

    pub fn has_completed(&self, id: TeamId) -> bool {
        self.completed.contains(&id)
    }

    /// Questions finished by the current matchup (0 when nobody is competing).
    pub fn questions_answered(&self) -> u32 {
        self.current_matchup
            .map(|m| m.questions_answered)
            .unwrap_or(0)
    }

    /// 1-based number of the question on screen, for "Question n of m".
    pub fn question_number(&self) -> u32 {
        self.questions_answered() + 1
    }

    /// Teams sorted by score, highest first. Ties keep insertion order.
    pub fn standings(&self) -> Vec<Team> {
        let mut sorted = self.teams.clone();
        sorted.sort_by(|a, b| b.score.cmp(&a.score));
        sorted
    }

    /// The last team standing, once the game is finished.
    pub fn winner(&self) -> Option<&Team> {
        if self.phase != GamePhase::Finished {
            return None;
        }
        self.teams.first()
    }

    /// Team currently holding answer `index` of the question on screen.
    pub fn answer_owner(&self, index: usize) -> Option<TeamId> {
        self.assigned_answers
            .iter()
            .find(|(i, _)| *i == index)
            .map(|(_, team)| *team)
    }

    /// Replace the question on screen; revealed and assigned answers belong to the old one
    /// and are dropped.
    pub fn set_current_question(&mut self, question: Option<Question>) {
        self.current_question = question;
        self.revealed_answers.clear();
        self.assigned_answers.clear();
    }
}
