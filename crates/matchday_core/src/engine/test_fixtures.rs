//! Test Fixtures Module
//!
//! Shared builders for engine tests.
//!
//! ## Usage
//! ```rust,ignore
//! use crate::engine::test_fixtures::*;
//! ```

use super::match_engine::SidePlan;
use super::team::Team;
use crate::models::{
    Bench, BenchCategory, BenchConfig, Player, PlayerAttributes, PlayerId, Slot, TacticalPlayer,
    TeamSide,
};

// =============================================================================
// Player Helpers
// =============================================================================

/// Goalkeeper with every goalkeeping attribute (and composure) at `rating`.
pub fn keeper(id: PlayerId, rating: u8) -> Player {
    Player {
        id,
        name: format!("Keeper {}", id.0),
        position: Slot::GK,
        attributes: PlayerAttributes {
            pace: 5,
            strength: 5,
            finishing: 5,
            passing: 5,
            dribbling: 5,
            defending: 5,
            positioning: 5,
            composure: rating,
            reflexes: rating,
            handling: rating,
            distribution: rating,
        },
        stamina: 5.0,
        form: 5,
        experience: 10,
        overall: rating.saturating_mul(5),
        age: 27.0,
    }
}

/// Outfielder with every outfield attribute at `rating` and no goalkeeping.
pub fn outfielder(id: PlayerId, position: Slot, rating: u8) -> Player {
    Player {
        id,
        name: format!("Player {}", id.0),
        position,
        attributes: PlayerAttributes {
            pace: rating,
            strength: rating,
            finishing: rating,
            passing: rating,
            dribbling: rating,
            defending: rating,
            positioning: rating,
            composure: rating,
            reflexes: 0,
            handling: 0,
            distribution: 0,
        },
        stamina: 5.0,
        form: 5,
        experience: 10,
        overall: rating.saturating_mul(5),
        age: 25.0,
    }
}

// =============================================================================
// Team Helpers
// =============================================================================

pub fn standard_442_slots() -> [Slot; 11] {
    [
        Slot::GK,
        Slot::LB,
        Slot::LCB,
        Slot::RCB,
        Slot::RB,
        Slot::LM,
        Slot::LCM,
        Slot::RCM,
        Slot::RM,
        Slot::LS,
        Slot::RS,
    ]
}

/// 4-4-2 starters with ids `first_id..first_id + 11`, keeper first.
pub fn starting_eleven(first_id: u32, rating: u8) -> Vec<TacticalPlayer> {
    standard_442_slots()
        .iter()
        .enumerate()
        .map(|(i, &slot)| {
            let id = PlayerId(first_id + i as u32);
            let player = if slot.is_goalkeeper() { keeper(id, rating) } else { outfielder(id, slot, rating) };
            TacticalPlayer::starter(player, slot)
        })
        .collect()
}

pub fn team_442(side: TeamSide, first_id: u32, rating: u8) -> Team {
    Team::new(side, starting_eleven(first_id, rating)).unwrap()
}

/// One designated substitute per category, ids `first_id..first_id + 6`.
pub fn full_bench(first_id: u32, rating: u8) -> Bench {
    let entries = [
        (BenchCategory::Goalkeeper, Slot::GK),
        (BenchCategory::CenterBack, Slot::CB),
        (BenchCategory::Fullback, Slot::LB),
        (BenchCategory::Winger, Slot::LW),
        (BenchCategory::CentralMidfield, Slot::CM),
        (BenchCategory::Forward, Slot::ST),
    ];

    let mut config = BenchConfig::new();
    let mut players = Vec::with_capacity(entries.len());
    for (i, (category, slot)) in entries.iter().enumerate() {
        let id = PlayerId(first_id + i as u32);
        config.designate(*category, id);
        players.push(if slot.is_goalkeeper() { keeper(id, rating) } else { outfielder(id, *slot, rating) });
    }
    Bench::new(players, config)
}

/// Home side: ids 1-11, bench 101-106.
pub fn home_plan(rating: u8) -> SidePlan {
    SidePlan::new(team_442(TeamSide::Home, 1, rating), Vec::new(), full_bench(101, rating))
}

/// Away side: ids 21-31, bench 201-206.
pub fn away_plan(rating: u8) -> SidePlan {
    SidePlan::new(team_442(TeamSide::Away, 21, rating), Vec::new(), full_bench(201, rating))
}
