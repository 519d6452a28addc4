//! Core data models for the tournament tracker.

mod game;
mod ids;
mod pairing;
mod player;
mod post;

pub use game::*;
pub use ids::*;
pub use pairing::*;
pub use player::*;
pub use post::*;
