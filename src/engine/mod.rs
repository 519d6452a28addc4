//! Swiss round pairing.
//!
//! Pairs adjacent-ranked players for the next round while avoiding
//! rematches. An odd field awards a bye to the lowest-ranked player
//! before the rest are paired.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::models::{MatchKey, Pairing, Player, PlayerId, RoundPairings};

/// Errors from round pairing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PairingError {
    /// The standings snapshot was empty.
    #[error("cannot pair a round with no registered players")]
    InsufficientPlayers,

    /// Every remaining opponent for a player would be a rematch and
    /// the engine is configured to reject rematches.
    #[error("no rematch-free opponent remains for player {player}")]
    NoValidPairing { player: PlayerId },
}

/// What to do when a player's only remaining opponents are rematches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RematchPolicy {
    /// Refuse to produce pairings for the round.
    #[default]
    Reject,

    /// Fall back to the nearest-ranked opponent even if the pair has
    /// already played.
    AllowNearest,
}

/// Produces the next round's pairings from a standings snapshot.
///
/// The engine never mutates its inputs; removal during pairing happens
/// on a local candidate pool, so repeated calls with the same snapshot
/// yield the same round plan.
#[derive(Debug, Clone, Copy, Default)]
pub struct PairingEngine {
    policy: RematchPolicy,
}

impl PairingEngine {
    /// Create an engine with the given rematch policy.
    pub fn new(policy: RematchPolicy) -> Self {
        Self { policy }
    }

    /// The configured rematch policy.
    pub fn policy(&self) -> RematchPolicy {
        self.policy
    }

    /// Pair the next round.
    ///
    /// `standings` must be ordered by wins descending; equal-win players
    /// keep their given order. `history` holds the key of every match
    /// already played, byes included.
    ///
    /// If the field is odd, the lowest-ranked player who has not yet
    /// had a bye receives one (falling back to the very lowest if all
    /// have). The remaining players are paired top-down, each with the
    /// nearest-ranked opponent they have not already faced.
    pub fn pair_round(
        &self,
        standings: &[Player],
        history: &HashSet<MatchKey>,
    ) -> Result<RoundPairings, PairingError> {
        if standings.is_empty() {
            return Err(PairingError::InsufficientPlayers);
        }

        let mut pool: Vec<&Player> = standings.iter().collect();

        let bye = if pool.len() % 2 == 1 {
            let idx = pool
                .iter()
                .rposition(|p| !history.contains(&MatchKey::bye(p.id)))
                .unwrap_or(pool.len() - 1);
            Some(pool.remove(idx).clone())
        } else {
            None
        };

        let mut pairings = Vec::with_capacity(pool.len() / 2);
        while !pool.is_empty() {
            let first = pool.remove(0);
            let fresh = pool
                .iter()
                .position(|cand| !history.contains(&MatchKey::new(first.id, cand.id)));

            let chosen = match fresh {
                Some(idx) => idx,
                None => match self.policy {
                    RematchPolicy::AllowNearest => {
                        debug!(player = %first.id, "only rematches remain, pairing nearest opponent");
                        0
                    }
                    RematchPolicy::Reject => {
                        return Err(PairingError::NoValidPairing { player: first.id })
                    }
                },
            };

            let second = pool.remove(chosen);
            pairings.push(Pairing::new(first.clone(), second.clone()));
        }

        Ok(RoundPairings { bye, pairings })
    }
}
