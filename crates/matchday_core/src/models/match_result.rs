//! Match Result Data Structures
//!
//! Output of one simulation: the ordered event log plus the final score.
//! Everything downstream (persistence, commentary, progressive reveal) is
//! derived from these values without re-simulating.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::events::{EventType, MatchEvent};
use super::player::{PlayerId, TeamSide};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
pub struct Score {
    pub home: u8,
    pub away: u8,
}

impl Score {
    pub fn new(home: u8, away: u8) -> Self {
        Self { home, away }
    }

    pub fn tuple(&self) -> (u8, u8) {
        (self.home, self.away)
    }

    pub fn is_level(&self) -> bool {
        self.home == self.away
    }

    pub fn add_goal(&mut self, side: TeamSide) {
        match side {
            TeamSide::Home => self.home = self.home.saturating_add(1),
            TeamSide::Away => self.away = self.away.saturating_add(1),
        }
    }

    /// (scored, conceded) from `side`'s perspective.
    pub fn for_side(&self, side: TeamSide) -> (u8, u8) {
        match side {
            TeamSide::Home => (self.home, self.away),
            TeamSide::Away => (self.away, self.home),
        }
    }

    pub fn leader(&self) -> Option<TeamSide> {
        match self.home.cmp(&self.away) {
            Ordering::Greater => Some(TeamSide::Home),
            Ordering::Less => Some(TeamSide::Away),
            Ordering::Equal => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct PenaltyKick {
    pub round: u8,
    pub side: TeamSide,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kicker: Option<PlayerId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keeper: Option<PlayerId>,
    pub scored: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct PenaltyShootoutResult {
    pub goals: Score,
    pub kicks_taken_home: u8,
    pub kicks_taken_away: u8,
    pub winner: TeamSide,
    /// Set only when the sudden-death cap was reached level and the winner was drawn by lot.
    #[serde(default)]
    pub decided_by_lot: bool,
    #[serde(default)]
    pub kicks: Vec<PenaltyKick>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct MatchResult {
    pub score: Score,
    pub extra_time_played: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub penalty_shootout: Option<PenaltyShootoutResult>,
    pub events: Vec<MatchEvent>,
}

impl MatchResult {
    /// Winner on goals, then on penalties. `None` for a draw.
    pub fn winner(&self) -> Option<TeamSide> {
        self.score
            .leader()
            .or_else(|| self.penalty_shootout.as_ref().map(|s| s.winner))
    }

    pub fn goal_events(&self, side: TeamSide) -> usize {
        self.events
            .iter()
            .filter(|e| e.event_type == EventType::Goal && e.team == Some(side))
            .count()
    }

    pub fn events_of(&self, event_type: EventType) -> impl Iterator<Item = &MatchEvent> {
        self.events.iter().filter(move |e| e.event_type == event_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_perspective() {
        let mut score = Score::default();
        score.add_goal(TeamSide::Away);
        score.add_goal(TeamSide::Away);
        score.add_goal(TeamSide::Home);
        assert_eq!(score.tuple(), (1, 2));
        assert_eq!(score.for_side(TeamSide::Away), (2, 1));
        assert_eq!(score.leader(), Some(TeamSide::Away));
    }

    #[test]
    fn test_winner_falls_back_to_shootout() {
        let result = MatchResult {
            score: Score::new(1, 1),
            extra_time_played: true,
            penalty_shootout: Some(PenaltyShootoutResult {
                goals: Score::new(3, 4),
                kicks_taken_home: 5,
                kicks_taken_away: 5,
                winner: TeamSide::Away,
                decided_by_lot: false,
                kicks: Vec::new(),
            }),
            events: Vec::new(),
        };
        assert_eq!(result.winner(), Some(TeamSide::Away));
    }
}
