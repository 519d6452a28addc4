//! # Swiss Tracker
//!
//! A Swiss-system tournament tracker backed by SQLite, with a small
//! forum post store on the side.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (players, matches, pairings, posts)
//! - **engine**: Swiss pairing for the next round
//! - **round**: Single-round planning against a backing store
//! - **store**: Provider traits and the SQLite tournament database
//! - **forum**: Forum post store with HTML cleaning
//! - **config**: Configuration loading and validation

pub mod config;
pub mod engine;
pub mod forum;
pub mod models;
pub mod round;
pub mod store;

pub use models::*;
