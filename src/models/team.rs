//! Team data structure.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a team (the only join key; names may collide).
pub type TeamId = Uuid;

/// A competing team.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub score: u32,
}

impl Team {
    /// Create a new team with the given name and a fresh id. Score starts at zero.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            score: 0,
        }
    }

    /// Add points to this team's score.
    pub fn add_points(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Take back points previously added (never below zero).
    pub fn remove_points(&mut self, points: u32) {
        self.score = self.score.saturating_sub(points);
    }

    pub fn reset_score(&mut self) {
        self.score = 0;
    }
}
