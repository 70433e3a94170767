//! Questions, answers and the current two-team matchup.

use crate::models::team::TeamId;
use serde::{Deserialize, Serialize};

/// Opaque question identifier, taken from the question bank.
pub type QuestionId = String;

/// One answer on the board with the points it is worth.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
    pub points: u32,
}

impl Answer {
    pub fn new(text: impl Into<String>, points: u32) -> Self {
        Self {
            text: text.into(),
            points,
        }
    }
}

/// A survey-style question with ranked answers.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub prompt: String,
    pub answers: Vec<Answer>,
    /// Set once the question has been drawn this session; cleared on game start.
    pub used: bool,
}

impl Question {
    pub fn new(id: impl Into<QuestionId>, prompt: impl Into<String>, answers: Vec<Answer>) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.into(),
            answers,
            used: false,
        }
    }
}

/// The pair of teams currently competing, plus how many questions they have finished.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Matchup {
    pub team_a: TeamId,
    pub team_b: TeamId,
    pub questions_answered: u32,
}

impl Matchup {
    pub fn new(team_a: TeamId, team_b: TeamId) -> Self {
        Self {
            team_a,
            team_b,
            questions_answered: 0,
        }
    }

    pub fn team_ids(&self) -> [TeamId; 2] {
        [self.team_a, self.team_b]
    }
}
