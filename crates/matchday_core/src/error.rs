use thiserror::Error;

use crate::engine::match_phase::MatchPhase;
use crate::models::{PlayerId, Slot, TeamSide};

/// Defects in the input handed to the engine, or in the order the engine is driven.
///
/// Tactical instructions that cannot be applied are *not* errors; the engine
/// drops them and keeps simulating.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid team size for {side:?}: expected {expected}, found {found}")]
    InvalidTeamSize { side: TeamSide, expected: usize, found: usize },

    #[error("Player {player} appears more than once in the {side:?} lineup")]
    DuplicatePlayer { side: TeamSide, player: PlayerId },

    #[error("Slot {slot:?} is assigned more than once in the {side:?} lineup")]
    DuplicateSlot { side: TeamSide, slot: Slot },

    #[error("Cannot run {requested:?} while the match is in {current:?}")]
    PhaseOrder { current: MatchPhase, requested: MatchPhase },
}

impl SimError {
    /// Roster problems come from the caller's data, phase problems from the caller's code.
    pub fn is_input_defect(&self) -> bool {
        !matches!(self, SimError::PhaseOrder { .. })
    }
}

pub type Result<T> = std::result::Result<T, SimError>;
