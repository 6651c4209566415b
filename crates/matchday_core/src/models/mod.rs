pub mod events;
pub mod instructions;
pub mod match_result;
pub mod player;
pub mod position;

pub use events::{
    event_json_schema, AttackDetails, AttackOutcome, DuelRecord, EventData, EventType,
    FoulDetails, FoulSeverity, FullTimeDetails, LineupDetails, LineupEntry, MatchEvent,
    MatchPeriod, PenaltyDetails, PeriodDetails, ShotDetails, SnapshotDetails,
    SubstitutionDetails, TacticalChangeDetails,
};
pub use instructions::{
    Bench, BenchConfig, InstructionAction, ScoreCondition, SubstituteRef, TacticalInstruction,
};
pub use match_result::{MatchResult, PenaltyKick, PenaltyShootoutResult, Score};
pub use player::{Player, PlayerAttributes, PlayerId, TacticalPlayer, TeamSide};
pub use position::{BenchCategory, Channel, Lane, Phase, Slot, SlotRole};
