//! Match records and the unordered pair key used for rematch checks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{MatchId, PlayerId};

/// Canonical unordered pair of player IDs.
///
/// Always stored low-to-high, so `MatchKey::new(a, b)` and
/// `MatchKey::new(b, a)` compare equal. A bye's key carries the same
/// player in both slots and can never collide with a real pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchKey {
    low: PlayerId,
    high: PlayerId,
}

impl MatchKey {
    /// Build the canonical key for a pair of players.
    pub fn new(a: PlayerId, b: PlayerId) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    /// Build the key for a bye awarded to `player`.
    pub fn bye(player: PlayerId) -> Self {
        Self {
            low: player,
            high: player,
        }
    }

    /// Lower of the two IDs.
    pub fn low(&self) -> PlayerId {
        self.low
    }

    /// Higher of the two IDs.
    pub fn high(&self) -> PlayerId {
        self.high
    }

    /// Whether this key records a bye rather than a real match.
    pub fn is_bye(&self) -> bool {
        self.low == self.high
    }

    /// Whether `player` took part in this match.
    pub fn involves(&self, player: PlayerId) -> bool {
        self.low == player || self.high == player
    }
}

/// A recorded match outcome.
///
/// A bye is stored with both player slots pointing at the same player
/// and no winner; standings treat it as an automatic win.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct MatchRecord {
    /// Database-assigned unique identifier
    pub id: MatchId,

    /// Lower player ID of the pair
    pub player_low: PlayerId,

    /// Higher player ID of the pair
    pub player_high: PlayerId,

    /// Winning player, unset for a bye
    pub winner: Option<PlayerId>,

    /// When this record was created
    pub created_at: DateTime<Utc>,
}

impl MatchRecord {
    /// The unordered pair key for this match.
    pub fn key(&self) -> MatchKey {
        MatchKey::new(self.player_low, self.player_high)
    }

    /// Whether this record is a bye.
    pub fn is_bye(&self) -> bool {
        self.player_low == self.player_high
    }
}
