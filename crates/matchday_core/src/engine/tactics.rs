//! Tactical instruction application.
//!
//! Instructions fire on their exact minute when the score guard (if any)
//! matches the issuing side's situation. Anything that cannot be applied is
//! dropped with a debug log: no event, no retry.

use log::debug;
use rand::Rng;

use super::match_engine::MatchEngine;
use crate::models::{
    EventData, EventType, InstructionAction, PlayerId, SubstituteRef, SubstitutionDetails,
    TacticalChangeDetails, TacticalInstruction, TeamSide,
};

impl<R: Rng> MatchEngine<R> {
    /// Apply every instruction due this minute, home list first.
    pub(super) fn apply_instructions(&mut self, minute: u8) {
        for side in [TeamSide::Home, TeamSide::Away] {
            let (scored, conceded) = self.score.for_side(side);
            let due: Vec<TacticalInstruction> = self
                .side(side)
                .instructions
                .iter()
                .filter(|ins| ins.is_due(minute, scored, conceded))
                .copied()
                .collect();

            for instruction in due {
                if !self.apply_instruction(side, instruction.action, minute) {
                    debug!("{:?} minute {}: dropped instruction {:?}", side, minute, instruction.action);
                }
            }
        }
    }

    fn apply_instruction(&mut self, side: TeamSide, action: InstructionAction, minute: u8) -> bool {
        match action {
            InstructionAction::Move { player, to } => {
                let Some(from) = self.side(side).team.player(player).map(|tp| tp.slot) else {
                    return false;
                };
                if !self.side_mut(side).team.move_player(player, to) {
                    return false;
                }
                let ev = self
                    .event(
                        minute,
                        EventType::TacticalChange,
                        EventData::TacticalChange(TacticalChangeDetails::Move { player, from, to }),
                    )
                    .for_team(side)
                    .with_player(player);
                self.push(ev);
                true
            }

            InstructionAction::Swap { first, second } => {
                let team = &self.side(side).team;
                let (Some(a), Some(b)) = (team.player(first), team.player(second)) else {
                    return false;
                };
                let (first_slot, second_slot) = (a.slot, b.slot);
                if !self.side_mut(side).team.swap_slots(first, second) {
                    return false;
                }
                // Slots recorded as they were before the exchange.
                let ev = self
                    .event(
                        minute,
                        EventType::TacticalChange,
                        EventData::TacticalChange(TacticalChangeDetails::Swap {
                            first,
                            first_slot,
                            second,
                            second_slot,
                        }),
                    )
                    .for_team(side)
                    .with_player(first)
                    .with_related(Some(second));
                self.push(ev);
                true
            }

            InstructionAction::Substitute { player_out, player_in } => {
                self.apply_substitution(side, player_out, player_in, minute)
            }
        }
    }

    fn apply_substitution(
        &mut self,
        side: TeamSide,
        player_out: PlayerId,
        requested: SubstituteRef,
        minute: u8,
    ) -> bool {
        let plan = self.side_mut(side);
        let Some(slot) = plan.team.player(player_out).filter(|tp| tp.is_live()).map(|tp| tp.slot) else {
            return false;
        };
        let Some(incoming) = plan.bench.resolve(requested, slot).and_then(|id| plan.bench.find(id)).cloned()
        else {
            return false;
        };
        let player_in = incoming.id;
        if !plan.team.substitute(player_out, incoming, minute) {
            return false;
        }

        let ev = self
            .event(
                minute,
                EventType::Substitution,
                EventData::Substitution(SubstitutionDetails { player_in, player_out, slot, requested }),
            )
            .for_team(side)
            .with_player(player_in)
            .with_related(Some(player_out));
        self.push(ev);
        true
    }
}
