//! Pitch slots, lanes and phases.
//!
//! Every slot maps exhaustively onto a [`SlotRole`] (which attributes matter),
//! a [`Channel`] (which corridors it covers) and a [`BenchCategory`] (which
//! designated substitute replaces it like-for-like).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the 24 pitch slots a tactical player can occupy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Slot {
    GK,
    LB,
    LCB,
    CB,
    RCB,
    RB,
    LWB,
    RWB,
    LDM,
    CDM,
    RDM,
    LCM,
    CM,
    RCM,
    LM,
    RM,
    LAM,
    CAM,
    RAM,
    LW,
    RW,
    LS,
    ST,
    RS,
}

/// Weight profile a slot plays with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotRole {
    Goalkeeper,
    CentreBack,
    FullBack,
    WingBack,
    DefensiveMid,
    CentralMid,
    WideMid,
    AttackingMid,
    Winger,
    Forward,
}

/// Broad positional groups used for like-for-like bench replacements.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BenchCategory {
    Goalkeeper,
    CenterBack,
    Fullback,
    Winger,
    CentralMidfield,
    Forward,
}

/// Horizontal channel a slot stands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Left,
    LeftCentre,
    Centre,
    RightCentre,
    Right,
}

/// Pitch corridor in which a contest for the ball happens.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Lane {
    Left,
    Center,
    Right,
}

/// Tactical role a contribution is scored against.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Attack,
    Possession,
    Defense,
}

impl Lane {
    pub const ALL: [Lane; 3] = [Lane::Left, Lane::Center, Lane::Right];
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::Attack, Phase::Possession, Phase::Defense];
}

impl Slot {
    pub const ALL: [Slot; 24] = [
        Slot::GK,
        Slot::LB,
        Slot::LCB,
        Slot::CB,
        Slot::RCB,
        Slot::RB,
        Slot::LWB,
        Slot::RWB,
        Slot::LDM,
        Slot::CDM,
        Slot::RDM,
        Slot::LCM,
        Slot::CM,
        Slot::RCM,
        Slot::LM,
        Slot::RM,
        Slot::LAM,
        Slot::CAM,
        Slot::RAM,
        Slot::LW,
        Slot::RW,
        Slot::LS,
        Slot::ST,
        Slot::RS,
    ];

    pub fn is_goalkeeper(&self) -> bool {
        matches!(self, Slot::GK)
    }

    pub fn role(&self) -> SlotRole {
        match self {
            Slot::GK => SlotRole::Goalkeeper,
            Slot::LCB | Slot::CB | Slot::RCB => SlotRole::CentreBack,
            Slot::LB | Slot::RB => SlotRole::FullBack,
            Slot::LWB | Slot::RWB => SlotRole::WingBack,
            Slot::LDM | Slot::CDM | Slot::RDM => SlotRole::DefensiveMid,
            Slot::LCM | Slot::CM | Slot::RCM => SlotRole::CentralMid,
            Slot::LM | Slot::RM => SlotRole::WideMid,
            Slot::LAM | Slot::CAM | Slot::RAM => SlotRole::AttackingMid,
            Slot::LW | Slot::RW => SlotRole::Winger,
            Slot::LS | Slot::ST | Slot::RS => SlotRole::Forward,
        }
    }

    pub fn channel(&self) -> Channel {
        match self {
            Slot::LB | Slot::LWB | Slot::LM | Slot::LW => Channel::Left,
            Slot::LCB | Slot::LDM | Slot::LCM | Slot::LAM | Slot::LS => Channel::LeftCentre,
            Slot::GK | Slot::CB | Slot::CDM | Slot::CM | Slot::CAM | Slot::ST => Channel::Centre,
            Slot::RCB | Slot::RDM | Slot::RCM | Slot::RAM | Slot::RS => Channel::RightCentre,
            Slot::RB | Slot::RWB | Slot::RM | Slot::RW => Channel::Right,
        }
    }

    pub fn bench_category(&self) -> BenchCategory {
        self.role().bench_category()
    }

    pub fn code(&self) -> &'static str {
        match self {
            Slot::GK => "GK",
            Slot::LB => "LB",
            Slot::LCB => "LCB",
            Slot::CB => "CB",
            Slot::RCB => "RCB",
            Slot::RB => "RB",
            Slot::LWB => "LWB",
            Slot::RWB => "RWB",
            Slot::LDM => "LDM",
            Slot::CDM => "CDM",
            Slot::RDM => "RDM",
            Slot::LCM => "LCM",
            Slot::CM => "CM",
            Slot::RCM => "RCM",
            Slot::LM => "LM",
            Slot::RM => "RM",
            Slot::LAM => "LAM",
            Slot::CAM => "CAM",
            Slot::RAM => "RAM",
            Slot::LW => "LW",
            Slot::RW => "RW",
            Slot::LS => "LS",
            Slot::ST => "ST",
            Slot::RS => "RS",
        }
    }
}

impl SlotRole {
    pub fn bench_category(&self) -> BenchCategory {
        match self {
            SlotRole::Goalkeeper => BenchCategory::Goalkeeper,
            SlotRole::CentreBack => BenchCategory::CenterBack,
            SlotRole::FullBack | SlotRole::WingBack => BenchCategory::Fullback,
            SlotRole::DefensiveMid | SlotRole::CentralMid | SlotRole::AttackingMid => {
                BenchCategory::CentralMidfield
            }
            SlotRole::WideMid | SlotRole::Winger => BenchCategory::Winger,
            SlotRole::Forward => BenchCategory::Forward,
        }
    }
}

impl BenchCategory {
    pub fn is_goalkeeper(&self) -> bool {
        matches!(self, BenchCategory::Goalkeeper)
    }

    /// Keepers only replace keepers; outfield categories are interchangeable.
    pub fn is_compatible_with(&self, other: BenchCategory) -> bool {
        self.is_goalkeeper() == other.is_goalkeeper()
    }
}

impl Channel {
    /// How much a slot in this channel takes part in play down `lane` (0.0-1.0).
    pub fn presence(&self, lane: Lane) -> f32 {
        match (self, lane) {
            (Channel::Left, Lane::Left) => 1.0,
            (Channel::Left, Lane::Center) => 0.35,
            (Channel::Left, Lane::Right) => 0.05,
            (Channel::LeftCentre, Lane::Left) => 0.55,
            (Channel::LeftCentre, Lane::Center) => 0.9,
            (Channel::LeftCentre, Lane::Right) => 0.1,
            (Channel::Centre, Lane::Left) => 0.3,
            (Channel::Centre, Lane::Center) => 1.0,
            (Channel::Centre, Lane::Right) => 0.3,
            (Channel::RightCentre, Lane::Left) => 0.1,
            (Channel::RightCentre, Lane::Center) => 0.9,
            (Channel::RightCentre, Lane::Right) => 0.55,
            (Channel::Right, Lane::Left) => 0.05,
            (Channel::Right, Lane::Center) => 0.35,
            (Channel::Right, Lane::Right) => 1.0,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Slot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Slot::ALL
            .iter()
            .copied()
            .find(|slot| slot.code() == upper)
            .ok_or_else(|| format!("unknown slot code: {}", s))
    }
}

impl FromStr for BenchCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "goalkeeper" | "gk" => Ok(BenchCategory::Goalkeeper),
            "center_back" | "centre_back" | "cb" => Ok(BenchCategory::CenterBack),
            "fullback" | "full_back" | "fb" => Ok(BenchCategory::Fullback),
            "winger" | "wing" => Ok(BenchCategory::Winger),
            "central_midfield" | "midfield" | "cm" => Ok(BenchCategory::CentralMidfield),
            "forward" | "fw" => Ok(BenchCategory::Forward),
            other => Err(format!("unknown bench category: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_codes_round_trip_through_from_str() {
        for slot in Slot::ALL {
            assert_eq!(slot.code().parse::<Slot>(), Ok(slot));
        }
        assert_eq!("lcb".parse::<Slot>(), Ok(Slot::LCB));
        assert!("XX".parse::<Slot>().is_err());
    }

    #[test]
    fn test_bench_categories() {
        assert_eq!(Slot::GK.bench_category(), BenchCategory::Goalkeeper);
        assert_eq!(Slot::RCB.bench_category(), BenchCategory::CenterBack);
        assert_eq!(Slot::LWB.bench_category(), BenchCategory::Fullback);
        assert_eq!(Slot::RM.bench_category(), BenchCategory::Winger);
        assert_eq!(Slot::CAM.bench_category(), BenchCategory::CentralMidfield);
        assert_eq!(Slot::LS.bench_category(), BenchCategory::Forward);
    }

    #[test]
    fn test_keeper_compatibility() {
        assert!(BenchCategory::Goalkeeper.is_compatible_with(BenchCategory::Goalkeeper));
        assert!(!BenchCategory::Goalkeeper.is_compatible_with(BenchCategory::Forward));
        assert!(!BenchCategory::Winger.is_compatible_with(BenchCategory::Goalkeeper));
        assert!(BenchCategory::Winger.is_compatible_with(BenchCategory::Fullback));
    }

    #[test]
    fn test_presence_is_mirrored() {
        for lane in Lane::ALL {
            let mirrored = match lane {
                Lane::Left => Lane::Right,
                Lane::Center => Lane::Center,
                Lane::Right => Lane::Left,
            };
            assert_eq!(Channel::Left.presence(lane), Channel::Right.presence(mirrored));
            assert_eq!(
                Channel::LeftCentre.presence(lane),
                Channel::RightCentre.presence(mirrored)
            );
        }
    }
}
