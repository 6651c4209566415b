//! Match phase flow: regulation, optional extra time, optional shootout.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MatchPhase {
    /// Nothing simulated yet.
    Kickoff,
    Regulation,
    ExtraTime,
    PenaltyShootout,
    Finished,
}

/// Per-fixture switches that change the phase flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MatchOptions {
    /// Knockout tie: a level score goes to extra time, then penalties.
    #[serde(default)]
    pub must_produce_winner: bool,
}

impl MatchOptions {
    pub fn knockout() -> Self {
        Self { must_produce_winner: true }
    }
}

/// Advance to the next match phase after `current` ends.
///
/// `is_draw` reflects the score at the end of `current`.
pub fn next_phase(current: MatchPhase, options: MatchOptions, is_draw: bool) -> MatchPhase {
    match current {
        MatchPhase::Kickoff => MatchPhase::Regulation,
        MatchPhase::Regulation => {
            if is_draw && options.must_produce_winner {
                MatchPhase::ExtraTime
            } else {
                MatchPhase::Finished
            }
        }
        MatchPhase::ExtraTime => {
            if is_draw {
                MatchPhase::PenaltyShootout
            } else {
                MatchPhase::Finished
            }
        }
        MatchPhase::PenaltyShootout => MatchPhase::Finished,
        MatchPhase::Finished => MatchPhase::Finished,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_league_match_ends_after_regulation() {
        let options = MatchOptions::default();
        assert_eq!(next_phase(MatchPhase::Kickoff, options, true), MatchPhase::Regulation);
        assert_eq!(next_phase(MatchPhase::Regulation, options, true), MatchPhase::Finished);
    }

    #[test]
    fn test_knockout_draw_flow() {
        let options = MatchOptions::knockout();
        assert_eq!(next_phase(MatchPhase::Regulation, options, true), MatchPhase::ExtraTime);
        assert_eq!(next_phase(MatchPhase::ExtraTime, options, true), MatchPhase::PenaltyShootout);
        assert_eq!(next_phase(MatchPhase::PenaltyShootout, options, true), MatchPhase::Finished);
    }

    #[test]
    fn test_knockout_decided_in_time() {
        let options = MatchOptions::knockout();
        assert_eq!(next_phase(MatchPhase::Regulation, options, false), MatchPhase::Finished);
        assert_eq!(next_phase(MatchPhase::ExtraTime, options, false), MatchPhase::Finished);
        assert_eq!(next_phase(MatchPhase::Finished, options, true), MatchPhase::Finished);
    }
}
