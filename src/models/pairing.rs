//! Pairings produced for the next round.

use serde::{Deserialize, Serialize};

use super::{MatchKey, Player, PlayerId};

/// Two players matched for the next round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pairing {
    /// Higher-ranked player of the pair
    pub first: Player,

    /// Lower-ranked player of the pair
    pub second: Player,
}

impl Pairing {
    /// Create a new Pairing.
    pub fn new(first: Player, second: Player) -> Self {
        Self { first, second }
    }

    /// The unordered pair key for this pairing.
    pub fn key(&self) -> MatchKey {
        MatchKey::new(self.first.id, self.second.id)
    }

    /// Whether `player` is part of this pairing.
    pub fn involves(&self, player: PlayerId) -> bool {
        self.first.id == player || self.second.id == player
    }
}

/// The full plan for one round: an optional bye plus the table pairings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundPairings {
    /// Player receiving an automatic win this round, if the field was odd
    pub bye: Option<Player>,

    /// Pairings covering every remaining player exactly once
    pub pairings: Vec<Pairing>,
}

impl RoundPairings {
    /// Total number of players covered by this round plan.
    pub fn player_count(&self) -> usize {
        self.pairings.len() * 2 + usize::from(self.bye.is_some())
    }

    /// IDs of every player covered, bye included.
    pub fn player_ids(&self) -> Vec<PlayerId> {
        let mut ids: Vec<PlayerId> = self
            .pairings
            .iter()
            .flat_map(|p| [p.first.id, p.second.id])
            .collect();
        if let Some(bye) = &self.bye {
            ids.push(bye.id);
        }
        ids
    }
}
