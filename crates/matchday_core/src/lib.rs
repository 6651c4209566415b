//! # matchday_core - Football Match Simulation Engine
//!
//! Simulates one 11-a-side fixture from two rosters, their tactical
//! instructions and benches, producing an ordered event log and a final score.
//!
//! ## Features
//! - Attribute × slot contribution model aggregated per lane and phase
//! - Fitness decay and break recovery feeding a performance multiplier
//! - Minute-stepped regulation, extra time and penalty shootout
//! - Logistic duels for possession, attack push, shots and penalties
//! - Reveal-time mapping for progressive "live" disclosure
//!
//! ## Example
//! ```rust,ignore
//! use matchday_core::{MatchEngine, MatchOptions, SidePlan};
//!
//! let result = MatchEngine::from_entropy(home, away, MatchOptions::knockout()).simulate()?;
//! let events = matchday_core::reveal::with_reveal_times(&result.events, kickoff, &RevealConfig::default());
//! ```

// Engine APIs pass a lot of per-event context around
#![allow(clippy::too_many_arguments)]
// Doc formatting lints - purely cosmetic
#![allow(clippy::doc_lazy_continuation)]

pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod reveal;

pub use config::RevealConfig;
pub use engine::{
    next_phase, DuelTuning, LaneStrengths, MatchEngine, MatchOptions, MatchPhase, SidePlan, Team,
    TeamSnapshot, MAX_SUBSTITUTIONS,
};
pub use error::{Result, SimError};
pub use models::*;
pub use reveal::{live_score, reveal_schedule, visible_events, with_reveal_times};
