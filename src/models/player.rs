//! Player model.

use serde::{Deserialize, Serialize};

use super::PlayerId;

/// A registered player with their running record.
///
/// `wins` and `matches_played` both include byes: a bye counts as an
/// automatic win and a played match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Player {
    /// Database-assigned unique identifier
    pub id: PlayerId,

    /// Display name (need not be unique)
    pub name: String,

    /// Matches won so far
    pub wins: u32,

    /// Matches played so far
    pub matches_played: u32,
}

impl Player {
    /// Create a Player with an empty record.
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            wins: 0,
            matches_played: 0,
        }
    }

    /// Create a Player with an explicit record.
    pub fn with_record(id: PlayerId, name: impl Into<String>, wins: u32, matches_played: u32) -> Self {
        Self {
            id,
            name: name.into(),
            wins,
            matches_played,
        }
    }

    /// A record is consistent when wins never exceed matches played.
    pub fn record_is_consistent(&self) -> bool {
        self.wins <= self.matches_played
    }

    /// Win rate as a fraction (0.0 to 1.0).
    pub fn win_rate(&self) -> f64 {
        if self.matches_played == 0 {
            0.0
        } else {
            self.wins as f64 / self.matches_played as f64
        }
    }
}
