//! Attribute-Based Calculation Module
//!
//! Maps (player attributes, slot, lane, phase) onto a numeric contribution.
//!
//! ## Weight table
//! The per-slot table is the product of two exhaustive tables:
//! - `Channel::presence(lane)`: how much the slot takes part in a corridor
//! - [`role_weights`]: which attributes matter for the slot's role in a phase
//!
//! Goalkeepers contribute nothing to lane/phase play and are rated separately
//! through [`goalkeeper_save_rating`].
//!
//! All attributes are on a 1-20 scale; a `0` attribute simply adds nothing.

use crate::models::{Lane, Phase, Player, PlayerAttributes, Slot, SlotRole};

/// Rating scale applied to shot, penalty and save ratings (1-20 attrs → ~5-100).
pub const RATING_SCALE: f32 = 5.0;

/// Weights over the eight outfield attributes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AttributeWeights {
    pub pace: f32,
    pub strength: f32,
    pub finishing: f32,
    pub passing: f32,
    pub dribbling: f32,
    pub defending: f32,
    pub positioning: f32,
    pub composure: f32,
}

impl AttributeWeights {
    /// Weighted dot-product with an attribute vector.
    #[inline]
    pub fn apply(&self, a: &PlayerAttributes) -> f32 {
        self.pace * a.pace as f32
            + self.strength * a.strength as f32
            + self.finishing * a.finishing as f32
            + self.passing * a.passing as f32
            + self.dribbling * a.dribbling as f32
            + self.defending * a.defending as f32
            + self.positioning * a.positioning as f32
            + self.composure * a.composure as f32
    }

    pub fn total(&self) -> f32 {
        self.pace
            + self.strength
            + self.finishing
            + self.passing
            + self.dribbling
            + self.defending
            + self.positioning
            + self.composure
    }
}

fn w(
    pace: f32,
    strength: f32,
    finishing: f32,
    passing: f32,
    dribbling: f32,
    defending: f32,
    positioning: f32,
    composure: f32,
) -> AttributeWeights {
    AttributeWeights {
        pace,
        strength,
        finishing,
        passing,
        dribbling,
        defending,
        positioning,
        composure,
    }
}

// ============================================================================
// Role weight table
// ============================================================================

/// Attribute weights for a role in a phase.
///
/// The total of each row is the role's involvement in that phase, so a centre
/// back barely registers in attack while a forward barely registers in defense.
///
/// Columns: pace, strength, finishing, passing, dribbling, defending, positioning, composure
pub fn role_weights(role: SlotRole, phase: Phase) -> AttributeWeights {
    match (role, phase) {
        (SlotRole::Goalkeeper, _) => AttributeWeights::default(),

        (SlotRole::CentreBack, Phase::Attack) => w(0.02, 0.05, 0.02, 0.04, 0.0, 0.0, 0.05, 0.02),
        (SlotRole::CentreBack, Phase::Possession) => w(0.0, 0.05, 0.0, 0.20, 0.0, 0.0, 0.10, 0.15),
        (SlotRole::CentreBack, Phase::Defense) => w(0.10, 0.20, 0.0, 0.0, 0.0, 0.45, 0.30, 0.10),

        (SlotRole::FullBack, Phase::Attack) => w(0.15, 0.0, 0.0, 0.10, 0.10, 0.0, 0.05, 0.0),
        (SlotRole::FullBack, Phase::Possession) => w(0.10, 0.0, 0.0, 0.20, 0.10, 0.0, 0.05, 0.10),
        (SlotRole::FullBack, Phase::Defense) => w(0.20, 0.10, 0.0, 0.0, 0.0, 0.40, 0.25, 0.05),

        (SlotRole::WingBack, Phase::Attack) => w(0.20, 0.0, 0.03, 0.15, 0.15, 0.0, 0.05, 0.0),
        (SlotRole::WingBack, Phase::Possession) => w(0.12, 0.0, 0.0, 0.20, 0.12, 0.0, 0.06, 0.10),
        (SlotRole::WingBack, Phase::Defense) => w(0.20, 0.08, 0.0, 0.0, 0.0, 0.30, 0.20, 0.0),

        (SlotRole::DefensiveMid, Phase::Attack) => w(0.0, 0.03, 0.04, 0.12, 0.0, 0.0, 0.06, 0.05),
        (SlotRole::DefensiveMid, Phase::Possession) => w(0.0, 0.10, 0.0, 0.30, 0.05, 0.0, 0.15, 0.20),
        (SlotRole::DefensiveMid, Phase::Defense) => w(0.10, 0.20, 0.0, 0.0, 0.0, 0.35, 0.25, 0.05),

        (SlotRole::CentralMid, Phase::Attack) => w(0.05, 0.0, 0.08, 0.20, 0.10, 0.0, 0.10, 0.07),
        (SlotRole::CentralMid, Phase::Possession) => w(0.0, 0.05, 0.0, 0.35, 0.15, 0.0, 0.15, 0.20),
        (SlotRole::CentralMid, Phase::Defense) => w(0.10, 0.10, 0.0, 0.0, 0.0, 0.20, 0.15, 0.0),

        (SlotRole::WideMid, Phase::Attack) => w(0.20, 0.0, 0.08, 0.15, 0.20, 0.0, 0.07, 0.0),
        (SlotRole::WideMid, Phase::Possession) => w(0.10, 0.0, 0.0, 0.25, 0.20, 0.0, 0.05, 0.10),
        (SlotRole::WideMid, Phase::Defense) => w(0.15, 0.0, 0.0, 0.0, 0.0, 0.15, 0.10, 0.0),

        (SlotRole::AttackingMid, Phase::Attack) => w(0.05, 0.0, 0.15, 0.25, 0.20, 0.0, 0.15, 0.10),
        (SlotRole::AttackingMid, Phase::Possession) => w(0.0, 0.0, 0.0, 0.30, 0.20, 0.0, 0.10, 0.15),
        (SlotRole::AttackingMid, Phase::Defense) => w(0.05, 0.02, 0.0, 0.0, 0.0, 0.08, 0.10, 0.0),

        (SlotRole::Winger, Phase::Attack) => w(0.30, 0.0, 0.15, 0.15, 0.30, 0.0, 0.10, 0.0),
        (SlotRole::Winger, Phase::Possession) => w(0.10, 0.0, 0.0, 0.15, 0.20, 0.0, 0.0, 0.05),
        (SlotRole::Winger, Phase::Defense) => w(0.10, 0.0, 0.0, 0.0, 0.0, 0.08, 0.05, 0.0),

        (SlotRole::Forward, Phase::Attack) => w(0.15, 0.10, 0.35, 0.0, 0.10, 0.0, 0.30, 0.15),
        (SlotRole::Forward, Phase::Possession) => w(0.0, 0.10, 0.0, 0.10, 0.10, 0.0, 0.05, 0.05),
        (SlotRole::Forward, Phase::Defense) => w(0.05, 0.05, 0.0, 0.0, 0.0, 0.05, 0.05, 0.0),
    }
}

// ============================================================================
// Contributions
// ============================================================================

/// Raw (unconditioned) contribution of `player` standing in `slot` to `lane`/`phase`.
pub fn contribution(player: &Player, slot: Slot, lane: Lane, phase: Phase) -> f32 {
    if slot.is_goalkeeper() {
        return 0.0;
    }
    let presence = slot.channel().presence(lane);
    presence * role_weights(slot.role(), phase).apply(&player.attributes)
}

/// Shot-stopping rating from reflexes, handling and composure.
///
/// Outfield players have no reflexes/handling, so a stand-in keeper is rated
/// on composure alone.
pub fn goalkeeper_save_rating(player: &Player) -> f32 {
    let a = &player.attributes;
    let raw = a.reflexes as f32 * 0.5 + a.handling as f32 * 0.3 + a.composure as f32 * 0.2;
    raw * RATING_SCALE
}

/// Open-play finishing rating before condition and distance are applied.
pub fn shot_rating(player: &Player) -> f32 {
    let a = &player.attributes;
    let raw = a.finishing as f32 * 0.45
        + a.composure as f32 * 0.25
        + a.positioning as f32 * 0.20
        + a.strength as f32 * 0.10;
    raw * RATING_SCALE
}

/// Spot-kick rating before the penalty multiplier.
pub fn penalty_rating(player: &Player) -> f32 {
    let a = &player.attributes;
    (a.finishing as f32 * 0.6 + a.composure as f32 * 0.4) * RATING_SCALE
}

// ============================================================================
// Actor selection weights
// ============================================================================

/// Relative likelihood that a slot takes the shot at the end of an attack down `lane`.
pub fn shooter_weight(slot: Slot, lane: Lane) -> f32 {
    let base = match slot.role() {
        SlotRole::Goalkeeper => return 0.0,
        SlotRole::Forward => 5.0,
        SlotRole::AttackingMid | SlotRole::Winger => 3.0,
        SlotRole::CentralMid | SlotRole::WideMid => 1.5,
        SlotRole::WingBack | SlotRole::DefensiveMid => 0.8,
        SlotRole::FullBack | SlotRole::CentreBack => 0.4,
    };
    base * (0.5 + slot.channel().presence(lane))
}

/// Relative likelihood that a slot provides the final pass.
pub fn assist_weight(slot: Slot, lane: Lane) -> f32 {
    let base = match slot.role() {
        SlotRole::Goalkeeper => return 0.0,
        SlotRole::AttackingMid => 4.0,
        SlotRole::Winger => 3.5,
        SlotRole::WideMid => 3.0,
        SlotRole::CentralMid => 2.5,
        SlotRole::WingBack => 2.0,
        SlotRole::Forward => 1.5,
        SlotRole::FullBack => 1.2,
        SlotRole::DefensiveMid => 1.0,
        SlotRole::CentreBack => 0.3,
    };
    base * (0.5 + slot.channel().presence(lane))
}
