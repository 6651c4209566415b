use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::position::Slot;

/// Stable player identity, shared with the persistence layer.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which side of the fixture a team, event or player belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TeamSide {
    Home,
    Away,
}

impl TeamSide {
    pub fn opponent(&self) -> TeamSide {
        match self {
            TeamSide::Home => TeamSide::Away,
            TeamSide::Away => TeamSide::Home,
        }
    }
}

/// Attribute set on a 1-20 scale.
///
/// `0` means "not rated": outfield players carry no goalkeeping numbers and
/// keepers may carry no outfield ones. Absent values contribute nothing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(default)]
pub struct PlayerAttributes {
    pub pace: u8,
    pub strength: u8,
    pub finishing: u8,
    pub passing: u8,
    pub dribbling: u8,
    pub defending: u8,
    pub positioning: u8,
    pub composure: u8,
    // Goalkeeper-only
    pub reflexes: u8,
    pub handling: u8,
    pub distribution: u8,
}

/// Player data for the match simulation engine.
///
/// Immutable for the duration of one simulation; live fitness is owned by
/// [`crate::engine::team::Team`].
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Natural position, used for bench-category compatibility.
    pub position: Slot,
    pub attributes: PlayerAttributes,
    /// Baseline stamina ceiling (1.0-6.0). Starting fitness equals this value.
    pub stamina: f32,
    /// Current form (1-10, 5 is neutral).
    pub form: u8,
    /// Big-match experience (1-20).
    pub experience: u8,
    pub overall: u8,
    /// Exact age in years.
    pub age: f32,
}

impl Player {
    pub fn is_goalkeeper(&self) -> bool {
        self.position.is_goalkeeper()
    }
}

/// A player bound to a pitch slot for the current match.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct TacticalPlayer {
    pub player: Player,
    pub slot: Slot,
    /// Minute the player came on (0 for starters).
    #[serde(default)]
    pub entry_minute: u8,
    #[serde(default)]
    pub sent_off: bool,
    #[serde(default)]
    pub cautions: u8,
}

impl TacticalPlayer {
    pub fn starter(player: Player, slot: Slot) -> Self {
        Self { player, slot, entry_minute: 0, sent_off: false, cautions: 0 }
    }

    pub fn substitute(player: Player, slot: Slot, minute: u8) -> Self {
        Self { player, slot, entry_minute: minute, sent_off: false, cautions: 0 }
    }

    pub fn id(&self) -> PlayerId {
        self.player.id
    }

    pub fn is_live(&self) -> bool {
        !self.sent_off
    }
}
