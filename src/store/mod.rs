//! Persistence for players, matches, and standings.
//!
//! The SQLite [`TournamentDb`] is the production backend. The provider
//! traits keep the pairing side decoupled from any particular database,
//! so tests can stand in a memory-backed store.

mod sqlite;

pub use sqlite::TournamentDb;

use std::collections::HashSet;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{MatchId, MatchKey, Player, PlayerId};

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("player {0} not found")]
    PlayerNotFound(PlayerId),

    #[error("a player cannot be matched against themselves")]
    SelfMatch,
}

/// Supplies the current standings, best record first.
#[async_trait]
pub trait StandingsProvider {
    /// Players ordered by wins descending; equal-win players keep a
    /// stable order across calls.
    async fn standings(&self) -> Result<Vec<Player>, StoreError>;
}

/// Supplies the key of every match already played, byes included.
#[async_trait]
pub trait MatchHistoryProvider {
    async fn match_history(&self) -> Result<HashSet<MatchKey>, StoreError>;
}

/// Records decided match outcomes.
#[async_trait]
pub trait MatchRecorder {
    /// Record a decided match between two distinct players.
    async fn record_match(&self, winner: PlayerId, loser: PlayerId) -> Result<MatchId, StoreError>;

    /// Record a bye (automatic win, no opponent) for `player`.
    async fn record_bye(&self, player: PlayerId) -> Result<MatchId, StoreError>;
}
