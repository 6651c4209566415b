use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::instructions::SubstituteRef;
use super::match_result::Score;
use super::player::{PlayerId, TeamSide};
use super::position::{Lane, Slot};
use crate::engine::team::TeamSnapshot;

/// One simulated occurrence. Never mutated once emitted; the reveal pass
/// produces new values via [`MatchEvent::with_reveal_at`].
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct MatchEvent {
    /// Emission order within the match (0-based).
    pub sequence: u32,
    pub minute: u8,
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<TeamSide>,
    /// Primary actor (scorer, offender, incoming substitute, kicker...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player: Option<PlayerId>,
    /// Secondary actor (assist provider, fouled player, outgoing player, keeper...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_player: Option<PlayerId>,
    pub data: EventData,
    /// Wall-clock instant at which the event becomes visible.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reveal_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    KickOff,
    Lineup,
    Goal,
    Miss,
    Save,
    Turnover,
    Foul,
    Caution,
    Dismissal,
    Substitution,
    TacticalChange,
    Snapshot,
    HalfTime,
    SecondHalf,
    /// End of 90 minutes when extra time follows.
    RegulationEnd,
    ExtraTimeKickOff,
    ShootoutStart,
    FullTime,
    PenaltyGoal,
    PenaltyMiss,
}

impl EventType {
    pub fn is_goal(&self) -> bool {
        matches!(self, EventType::Goal)
    }

    pub fn is_penalty_kick(&self) -> bool {
        matches!(self, EventType::PenaltyGoal | EventType::PenaltyMiss)
    }
}

/// Periods of play.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MatchPeriod {
    FirstHalf,
    SecondHalf,
    ExtraTimeFirstHalf,
    ExtraTimeSecondHalf,
    PenaltyShootout,
}

/// Structured payload, tagged by `kind`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum EventData {
    None,
    Lineup(LineupDetails),
    Period(PeriodDetails),
    Attack(AttackDetails),
    Foul(FoulDetails),
    Substitution(SubstitutionDetails),
    TacticalChange(TacticalChangeDetails),
    Snapshot(SnapshotDetails),
    Penalty(PenaltyDetails),
    FullTime(FullTimeDetails),
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct LineupEntry {
    pub player: PlayerId,
    pub slot: Slot,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct LineupDetails {
    pub players: Vec<LineupEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct PeriodDetails {
    pub period: MatchPeriod,
    pub score: Score,
}

/// One logistic contest, recorded from the challenger's side.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct DuelRecord {
    pub strength: f32,
    pub opposition: f32,
    /// Probability the challenger had of winning.
    pub probability: f32,
    pub won: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AttackOutcome {
    Goal,
    Save,
    Miss,
    /// The attack-push duel was lost.
    DefensiveStop,
    /// No eligible shooter was left on the pitch.
    Blocked,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ShotDetails {
    pub shooter: PlayerId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assist: Option<PlayerId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keeper: Option<PlayerId>,
    pub distance_factor: f32,
    pub duel: DuelRecord,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct AttackDetails {
    pub lane: Lane,
    pub attacking: TeamSide,
    /// Possession contest, from the attacking side's perspective.
    pub possession: DuelRecord,
    /// Attack-push contest (scaled attack vs defense).
    pub push: DuelRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shot: Option<ShotDetails>,
    pub outcome: AttackOutcome,
    /// Score after the sequence; present for goals.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<Score>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FoulSeverity {
    Plain,
    Caution,
    SecondCaution,
    StraightRed,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct FoulDetails {
    pub severity: FoulSeverity,
    /// Cautions the offender holds after this foul.
    pub cautions: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SubstitutionDetails {
    pub player_in: PlayerId,
    pub player_out: PlayerId,
    pub slot: Slot,
    pub requested: SubstituteRef,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "snake_case", tag = "change")]
pub enum TacticalChangeDetails {
    Move { player: PlayerId, from: Slot, to: Slot },
    Swap { first: PlayerId, first_slot: Slot, second: PlayerId, second_slot: Slot },
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SnapshotDetails {
    pub home: TeamSnapshot,
    pub away: TeamSnapshot,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct PenaltyDetails {
    /// 1-based round; rounds above 5 are sudden death.
    pub round: u8,
    pub sudden_death: bool,
    pub duel: DuelRecord,
    /// Shootout tally after this kick.
    pub tally: Score,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct FullTimeDetails {
    pub score: Score,
    pub extra_time_played: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shootout: Option<Score>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<TeamSide>,
}

impl MatchEvent {
    pub fn new(sequence: u32, minute: u8, event_type: EventType, data: EventData) -> Self {
        Self {
            sequence,
            minute,
            event_type,
            team: None,
            player: None,
            related_player: None,
            data,
            reveal_at: None,
        }
    }

    pub fn for_team(mut self, team: TeamSide) -> Self {
        self.team = Some(team);
        self
    }

    pub fn with_player(mut self, player: PlayerId) -> Self {
        self.player = Some(player);
        self
    }

    pub fn with_related(mut self, related: Option<PlayerId>) -> Self {
        self.related_player = related;
        self
    }

    pub fn with_reveal_at(mut self, at: DateTime<Utc>) -> Self {
        self.reveal_at = Some(at);
        self
    }

    pub fn is_visible_at(&self, now: DateTime<Utc>) -> bool {
        self.reveal_at.is_some_and(|at| at <= now)
    }
}

/// JSON schema of the event stream, for downstream consumers.
pub fn event_json_schema() -> schemars::schema::RootSchema {
    schemars::schema_for!(Vec<MatchEvent>)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serializes_with_type_tag() {
        let ev = MatchEvent::new(
            3,
            45,
            EventType::HalfTime,
            EventData::Period(PeriodDetails {
                period: MatchPeriod::FirstHalf,
                score: Score::new(1, 0),
            }),
        );
        let json = serde_json::to_value(&ev).unwrap();
        assert_eq!(json["type"], "half_time");
        assert_eq!(json["data"]["kind"], "period");
        assert_eq!(json["data"]["period"], "first_half");
        assert!(json.get("reveal_at").is_none());
    }

    #[test]
    fn test_schema_lists_event_types() {
        let schema = serde_json::to_string(&event_json_schema()).unwrap();
        assert!(schema.contains("penalty_goal"));
        assert!(schema.contains("tactical_change"));
    }
}
