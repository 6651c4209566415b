//! Scheduled tactical instructions and the bench they draw on.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

use super::player::{Player, PlayerId};
use super::position::{BenchCategory, Slot};

/// Score state from the issuing team's point of view.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ScoreCondition {
    Leading,
    Drawing,
    Trailing,
}

impl ScoreCondition {
    pub fn from_goals(scored: u8, conceded: u8) -> Self {
        match scored.cmp(&conceded) {
            Ordering::Greater => ScoreCondition::Leading,
            Ordering::Equal => ScoreCondition::Drawing,
            Ordering::Less => ScoreCondition::Trailing,
        }
    }
}

/// Who comes on for a substitution.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "by", content = "value")]
pub enum SubstituteRef {
    /// A specific bench player.
    Player(PlayerId),
    /// The designated substitute for a category.
    Category(BenchCategory),
    /// The designated substitute for the outgoing player's slot category.
    LikeForLike,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum InstructionAction {
    /// Relocate a player to an unoccupied slot.
    Move { player: PlayerId, to: Slot },
    /// Replace an on-pitch player with a bench player.
    Substitute { player_out: PlayerId, player_in: SubstituteRef },
    /// Exchange the slots of two on-pitch players.
    Swap { first: PlayerId, second: PlayerId },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TacticalInstruction {
    pub minute: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<ScoreCondition>,
    pub action: InstructionAction,
}

impl TacticalInstruction {
    pub fn new(minute: u8, action: InstructionAction) -> Self {
        Self { minute, condition: None, action }
    }

    pub fn when(mut self, condition: ScoreCondition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Exact-minute trigger plus optional score guard.
    pub fn is_due(&self, minute: u8, scored: u8, conceded: u8) -> bool {
        self.minute == minute
            && self
                .condition
                .map_or(true, |c| c == ScoreCondition::from_goals(scored, conceded))
    }
}

/// Category → designated substitute id.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(transparent)]
pub struct BenchConfig(HashMap<BenchCategory, PlayerId>);

impl BenchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, category: BenchCategory, player: PlayerId) -> Self {
        self.0.insert(category, player);
        self
    }

    pub fn designate(&mut self, category: BenchCategory, player: PlayerId) {
        self.0.insert(category, player);
    }

    pub fn get(&self, category: BenchCategory) -> Option<PlayerId> {
        self.0.get(&category).copied()
    }
}

/// Bench player pool plus the category lookup.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Bench {
    pub players: Vec<Player>,
    #[serde(default)]
    pub config: BenchConfig,
}

impl Bench {
    pub fn new(players: Vec<Player>, config: BenchConfig) -> Self {
        Self { players, config }
    }

    pub fn find(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Resolve a substitute reference to a bench player id.
    pub fn resolve(&self, reference: SubstituteRef, outgoing_slot: Slot) -> Option<PlayerId> {
        let id = match reference {
            SubstituteRef::Player(id) => id,
            SubstituteRef::Category(category) => self.config.get(category)?,
            SubstituteRef::LikeForLike => self.config.get(outgoing_slot.bench_category())?,
        };
        self.find(id).map(|p| p.id)
    }
}
