//! Match simulation engine.
//!
//! Leaf to root: [`attribute_calc`] and [`condition`] are pure functions,
//! [`duel`] is the shared logistic contest, [`team`] owns per-match squad
//! state and [`match_engine`] drives the minute loop.

pub mod attribute_calc;
pub mod condition;
pub mod duel;
pub mod key_moments;
pub mod match_engine;
pub mod match_phase;
pub mod shootout;
pub mod team;

mod attack;
mod tactics;

#[cfg(test)]
pub(crate) mod test_fixtures;


pub use duel::DuelTuning;
pub use match_engine::{MatchEngine, SidePlan};
pub use match_phase::{next_phase, MatchOptions, MatchPhase};
pub use team::{LaneStrengths, Team, TeamSnapshot, MAX_SUBSTITUTIONS};
