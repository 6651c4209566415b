//! mapper.rs
//! Persisted records → matchday_core models.
//!
//! Every loosely typed field (string codes, optional attributes, free-form
//! instruction rows) is resolved here, once, before the engine sees it.

use matchday_core::engine::condition::clamp_fitness;
use matchday_core::{
    BenchCategory, InstructionAction, Player, PlayerAttributes, PlayerId, ScoreCondition, Slot,
    SubstituteRef, TacticalInstruction,
};

use crate::{AdapterError, AttributesRecord, InstructionRecord, PlayerRecord, Result};

/// Attribute ceiling on the persisted 1-20 scale.
const ATTRIBUTE_MAX: u8 = 20;

const DEFAULT_STAMINA: f32 = 5.0;
const DEFAULT_FORM: u8 = 5;
const DEFAULT_EXPERIENCE: u8 = 10;

// =============================================================================
// Players
// =============================================================================

/// Translate one persisted player row.
///
/// `id`, `name` and `position` are required. Missing attributes count as
/// "not rated" (0); condition fields fall back to neutral values.
pub fn to_player(record: &PlayerRecord) -> Result<Player> {
    let id = record.id.ok_or_else(|| missing(record, "id"))?;
    let name = record.name.clone().ok_or_else(|| missing(record, "name"))?;
    let code = record.position.as_deref().ok_or_else(|| missing(record, "position"))?;

    Ok(Player {
        id: PlayerId(id),
        name,
        position: parse_slot(code)?,
        attributes: to_attributes(&record.attributes),
        stamina: clamp_fitness(record.stamina.unwrap_or(DEFAULT_STAMINA)),
        form: record.form.unwrap_or(DEFAULT_FORM).clamp(1, 10),
        experience: record.experience.unwrap_or(DEFAULT_EXPERIENCE).clamp(1, ATTRIBUTE_MAX),
        overall: record.overall.unwrap_or(0),
        age: record.age.unwrap_or(0.0).max(0.0),
    })
}

fn to_attributes(record: &AttributesRecord) -> PlayerAttributes {
    let rate = |v: Option<u8>| v.unwrap_or(0).min(ATTRIBUTE_MAX);
    PlayerAttributes {
        pace: rate(record.pace),
        strength: rate(record.strength),
        finishing: rate(record.finishing),
        passing: rate(record.passing),
        dribbling: rate(record.dribbling),
        defending: rate(record.defending),
        positioning: rate(record.positioning),
        composure: rate(record.composure),
        reflexes: rate(record.reflexes),
        handling: rate(record.handling),
        distribution: rate(record.distribution),
    }
}

fn missing(record: &PlayerRecord, field: &'static str) -> AdapterError {
    let entity = match (record.id, record.name.as_deref()) {
        (Some(id), _) => format!("player {}", id),
        (None, Some(name)) => format!("player '{}'", name),
        (None, None) => "player record".to_string(),
    };
    AdapterError::MissingField { entity, field }
}

// =============================================================================
// Codes
// =============================================================================

pub fn parse_slot(code: &str) -> Result<Slot> {
    code.parse().map_err(|_| AdapterError::InvalidSlot { code: code.to_string() })
}

pub fn parse_category(code: &str) -> Result<BenchCategory> {
    code.parse().map_err(|_| AdapterError::InvalidSlot { code: code.to_string() })
}

fn parse_condition(code: &str) -> Option<ScoreCondition> {
    match code.trim().to_ascii_lowercase().as_str() {
        "leading" | "winning" => Some(ScoreCondition::Leading),
        "drawing" | "draw" | "level" => Some(ScoreCondition::Drawing),
        "trailing" | "losing" => Some(ScoreCondition::Trailing),
        _ => None,
    }
}

// =============================================================================
// Instructions
// =============================================================================

/// Translate one persisted instruction row. `index` is its position in the
/// team sheet and only used for error reporting.
///
/// Whether the instruction can actually be applied is decided by the engine
/// at its trigger minute; this only checks the row is well formed.
pub fn to_instruction(index: usize, record: &InstructionRecord) -> Result<TacticalInstruction> {
    let invalid = |reason: String| AdapterError::InvalidInstruction { index, reason };

    let minute = record.minute.ok_or_else(|| invalid("missing minute".into()))?;
    let kind = record.action.as_deref().ok_or_else(|| invalid("missing action".into()))?;
    let player = |field: Option<u32>, name: &str| {
        field.map(PlayerId).ok_or_else(|| invalid(format!("{} needs `{}`", kind, name)))
    };

    let action = match kind.trim().to_ascii_lowercase().as_str() {
        "move" => {
            let code = record
                .target_slot
                .as_deref()
                .ok_or_else(|| invalid("move needs `target_slot`".into()))?;
            InstructionAction::Move { player: player(record.player, "player")?, to: parse_slot(code)? }
        }
        "substitute" | "substitution" | "sub" => InstructionAction::Substitute {
            player_out: player(record.player, "player")?,
            player_in: substitute_ref(record)?,
        },
        "swap" => InstructionAction::Swap {
            first: player(record.player, "player")?,
            second: player(record.other, "other")?,
        },
        other => return Err(invalid(format!("unknown action '{}'", other))),
    };

    let condition = match record.condition.as_deref() {
        None => None,
        Some(code) => Some(
            parse_condition(code).ok_or_else(|| invalid(format!("unknown condition '{}'", code)))?,
        ),
    };

    Ok(TacticalInstruction { minute, condition, action })
}

/// Explicit player first, then category; neither means like-for-like.
fn substitute_ref(record: &InstructionRecord) -> Result<SubstituteRef> {
    if let Some(id) = record.player_in {
        return Ok(SubstituteRef::Player(PlayerId(id)));
    }
    match record.category.as_deref() {
        None => Ok(SubstituteRef::LikeForLike),
        Some(code) if code.trim().eq_ignore_ascii_case("like_for_like") => {
            Ok(SubstituteRef::LikeForLike)
        }
        Some(code) => parse_category(code).map(SubstituteRef::Category),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: Option<u32>, name: Option<&str>, position: Option<&str>) -> PlayerRecord {
        PlayerRecord {
            id,
            name: name.map(str::to_string),
            position: position.map(str::to_string),
            ..PlayerRecord::default()
        }
    }

    fn instruction(action: &str) -> InstructionRecord {
        InstructionRecord {
            minute: Some(60),
            action: Some(action.to_string()),
            player: Some(9),
            ..InstructionRecord::default()
        }
    }

    #[test]
    fn test_to_player_defaults() {
        let player = to_player(&row(Some(7), Some("Winger"), Some("rw"))).unwrap();
        assert_eq!(player.id, PlayerId(7));
        assert_eq!(player.position, Slot::RW);
        assert_eq!(player.attributes, PlayerAttributes::default());
        assert_eq!(player.stamina, DEFAULT_STAMINA);
        assert_eq!(player.form, DEFAULT_FORM);
        assert_eq!(player.experience, DEFAULT_EXPERIENCE);
    }

    #[test]
    fn test_to_player_clamps_out_of_range_values() {
        let mut record = row(Some(1), Some("Keeper"), Some("GK"));
        record.attributes.reflexes = Some(99);
        record.stamina = Some(9.0);
        record.form = Some(0);

        let player = to_player(&record).unwrap();
        assert_eq!(player.attributes.reflexes, ATTRIBUTE_MAX);
        assert_eq!(player.stamina, 6.0);
        assert_eq!(player.form, 1);
    }

    #[test]
    fn test_to_player_reports_missing_fields() {
        match to_player(&row(None, Some("Nameless"), Some("CB"))) {
            Err(AdapterError::MissingField { entity, field }) => {
                assert_eq!(field, "id");
                assert!(entity.contains("Nameless"));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(
            to_player(&row(Some(3), Some("x"), None)),
            Err(AdapterError::MissingField { field: "position", .. })
        ));
        assert!(matches!(
            to_player(&row(Some(3), Some("x"), Some("SW"))),
            Err(AdapterError::InvalidSlot { .. })
        ));
    }

    #[test]
    fn test_substitute_reference_resolution() {
        let mut sub = instruction("substitute");
        assert_eq!(
            to_instruction(0, &sub).unwrap().action,
            InstructionAction::Substitute { player_out: PlayerId(9), player_in: SubstituteRef::LikeForLike }
        );

        sub.category = Some("forward".into());
        assert_eq!(
            to_instruction(0, &sub).unwrap().action,
            InstructionAction::Substitute {
                player_out: PlayerId(9),
                player_in: SubstituteRef::Category(BenchCategory::Forward)
            }
        );

        sub.player_in = Some(106);
        assert_eq!(
            to_instruction(0, &sub).unwrap().action,
            InstructionAction::Substitute {
                player_out: PlayerId(9),
                player_in: SubstituteRef::Player(PlayerId(106))
            }
        );
    }

    #[test]
    fn test_condition_and_move() {
        let mut mv = instruction("move");
        mv.target_slot = Some("ST".into());
        mv.condition = Some("Trailing".into());

        let parsed = to_instruction(2, &mv).unwrap();
        assert_eq!(parsed.condition, Some(ScoreCondition::Trailing));
        assert_eq!(parsed.action, InstructionAction::Move { player: PlayerId(9), to: Slot::ST });
    }

    #[test]
    fn test_malformed_instructions() {
        let swap = instruction("swap");
        assert!(matches!(
            to_instruction(4, &swap),
            Err(AdapterError::InvalidInstruction { index: 4, .. })
        ));

        let unknown = instruction("dance");
        assert!(matches!(to_instruction(0, &unknown), Err(AdapterError::InvalidInstruction { .. })));

        let mut guarded = instruction("substitute");
        guarded.condition = Some("sometimes".into());
        assert!(matches!(to_instruction(0, &guarded), Err(AdapterError::InvalidInstruction { .. })));

        let mut untimed = instruction("swap");
        untimed.minute = None;
        untimed.other = Some(10);
        assert!(matches!(to_instruction(0, &untimed), Err(AdapterError::InvalidInstruction { .. })));
    }
}
