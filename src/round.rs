//! Single-round planning against a backing store.
//!
//! Pulls a standings snapshot and the match history, asks the engine
//! for the next round, and records the bye (if any) as an automatic
//! win. Recording the played-out results afterwards stays with the
//! caller.

use thiserror::Error;
use tracing::info;

use crate::engine::{PairingEngine, PairingError};
use crate::models::RoundPairings;
use crate::store::{MatchHistoryProvider, MatchRecorder, StandingsProvider, StoreError};

/// Errors from planning a round.
#[derive(Debug, Error)]
pub enum RoundError {
    #[error(transparent)]
    Pairing(#[from] PairingError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Plans the next round of a tournament.
pub struct RoundPlanner<S> {
    engine: PairingEngine,
    store: S,
}

impl<S> RoundPlanner<S>
where
    S: StandingsProvider + MatchHistoryProvider + MatchRecorder,
{
    /// Create a planner over the given store.
    pub fn new(engine: PairingEngine, store: S) -> Self {
        Self { engine, store }
    }

    /// Access the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Plan the next round.
    ///
    /// The bye, when the field is odd, is persisted immediately so the
    /// same player cannot receive one again next round. Store errors
    /// surface unchanged and are never retried.
    pub async fn plan_round(&self) -> Result<RoundPairings, RoundError> {
        let standings = self.store.standings().await?;
        let history = self.store.match_history().await?;

        let round = self.engine.pair_round(&standings, &history)?;
        if let Some(bye) = &round.bye {
            self.store.record_bye(bye.id).await?;
        }

        info!(
            pairings = round.pairings.len(),
            bye = round.bye.is_some(),
            "planned next round"
        );
        Ok(round)
    }
}
