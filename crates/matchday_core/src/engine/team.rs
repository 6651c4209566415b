//! Team state for one simulation.
//!
//! A `Team` owns the eleven tactical players, a parallel fitness array (one
//! value per slot index) and the cached [`TeamSnapshot`]. Substitutions
//! replace the occupant at a fixed index, so the fitness array and the
//! id→index map stay aligned for the whole match.
//!
//! Mutations never fail loudly: an instruction that cannot be applied returns
//! `false` and leaves the team untouched.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::attribute_calc;
use super::condition;
use crate::error::{Result, SimError};
use crate::models::{Lane, Phase, Player, PlayerId, Slot, TacticalPlayer, TeamSide};

pub const TEAM_SIZE: usize = 11;

/// Substitutions allowed per team per match.
pub const MAX_SUBSTITUTIONS: u8 = 5;

/// Fitness drift (any one player) that marks the snapshot stale.
pub const SNAPSHOT_FITNESS_DRIFT: f32 = 0.25;

// ============================================================================
// Snapshot
// ============================================================================

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct LaneStrengths {
    pub attack: f32,
    pub possession: f32,
    pub defense: f32,
}

impl LaneStrengths {
    pub fn get(&self, phase: Phase) -> f32 {
        match phase {
            Phase::Attack => self.attack,
            Phase::Possession => self.possession,
            Phase::Defense => self.defense,
        }
    }

    fn add(&mut self, phase: Phase, value: f32) {
        match phase {
            Phase::Attack => self.attack += value,
            Phase::Possession => self.possession += value,
            Phase::Defense => self.defense += value,
        }
    }
}

/// Nine lane×phase aggregates plus the goalkeeper rating.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct TeamSnapshot {
    pub left: LaneStrengths,
    pub center: LaneStrengths,
    pub right: LaneStrengths,
    pub goalkeeper: f32,
}

impl TeamSnapshot {
    pub fn lane(&self, lane: Lane) -> &LaneStrengths {
        match lane {
            Lane::Left => &self.left,
            Lane::Center => &self.center,
            Lane::Right => &self.right,
        }
    }

    fn lane_mut(&mut self, lane: Lane) -> &mut LaneStrengths {
        match lane {
            Lane::Left => &mut self.left,
            Lane::Center => &mut self.center,
            Lane::Right => &mut self.right,
        }
    }

    pub fn get(&self, lane: Lane, phase: Phase) -> f32 {
        self.lane(lane).get(phase)
    }
}

// ============================================================================
// Team
// ============================================================================

#[derive(Debug, Clone)]
pub struct Team {
    side: TeamSide,
    players: Vec<TacticalPlayer>,
    fitness: Vec<f32>,
    index: HashMap<PlayerId, usize>,
    /// Everyone who has been on the pitch; nobody enters twice.
    appeared: HashSet<PlayerId>,
    substitutions_made: u8,
    snapshot: TeamSnapshot,
    snapshot_fitness: Vec<f32>,
    stale: bool,
}

impl Team {
    /// Build a team from its starting eleven.
    ///
    /// Rejects rosters that are not exactly eleven players, repeat a player
    /// or put two players in one slot. The snapshot is computed immediately.
    pub fn new(side: TeamSide, players: Vec<TacticalPlayer>) -> Result<Self> {
        if players.len() != TEAM_SIZE {
            return Err(SimError::InvalidTeamSize {
                side,
                expected: TEAM_SIZE,
                found: players.len(),
            });
        }

        let mut index = HashMap::with_capacity(TEAM_SIZE);
        let mut slots = HashSet::with_capacity(TEAM_SIZE);
        for (i, tp) in players.iter().enumerate() {
            if index.insert(tp.id(), i).is_some() {
                return Err(SimError::DuplicatePlayer { side, player: tp.id() });
            }
            if !slots.insert(tp.slot) {
                return Err(SimError::DuplicateSlot { side, slot: tp.slot });
            }
        }

        let fitness: Vec<f32> =
            players.iter().map(|tp| condition::clamp_fitness(tp.player.stamina)).collect();
        let appeared = index.keys().copied().collect();

        let mut team = Self {
            side,
            players,
            snapshot_fitness: fitness.clone(),
            fitness,
            index,
            appeared,
            substitutions_made: 0,
            snapshot: TeamSnapshot::default(),
            stale: true,
        };
        team.update_snapshot();
        Ok(team)
    }

    pub fn side(&self) -> TeamSide {
        self.side
    }

    pub fn players(&self) -> &[TacticalPlayer] {
        &self.players
    }

    pub fn player_at(&self, index: usize) -> Option<&TacticalPlayer> {
        self.players.get(index)
    }

    pub fn player(&self, id: PlayerId) -> Option<&TacticalPlayer> {
        self.index.get(&id).map(|&i| &self.players[i])
    }

    pub fn live_players(&self) -> impl Iterator<Item = &TacticalPlayer> {
        self.players.iter().filter(|tp| tp.is_live())
    }

    pub fn fitness_of(&self, id: PlayerId) -> Option<f32> {
        self.index.get(&id).map(|&i| self.fitness[i])
    }

    pub fn substitutions_made(&self) -> u8 {
        self.substitutions_made
    }

    pub fn has_appeared(&self, id: PlayerId) -> bool {
        self.appeared.contains(&id)
    }

    /// Condition multiplier for a live player.
    pub fn condition_multiplier(&self, id: PlayerId) -> Option<f32> {
        let &i = self.index.get(&id)?;
        let tp = &self.players[i];
        if !tp.is_live() {
            return None;
        }
        Some(Self::multiplier_for(tp, self.fitness[i]))
    }

    fn multiplier_for(tp: &TacticalPlayer, fitness: f32) -> f32 {
        condition::multiplier(fitness, tp.player.stamina, tp.player.form, tp.player.experience)
    }

    // ========================================================================
    // Condition & snapshot
    // ========================================================================

    /// Decay (and at breaks, first recover) every live player's fitness.
    pub fn update_condition(&mut self, minutes: u8, is_break: bool) {
        for (i, tp) in self.players.iter().enumerate() {
            if !tp.is_live() {
                continue;
            }
            self.fitness[i] = condition::step(self.fitness[i], tp.player.stamina, minutes, is_break);

            if (self.fitness[i] - self.snapshot_fitness[i]).abs() >= SNAPSHOT_FITNESS_DRIFT {
                self.stale = true;
            }
        }
    }

    /// Recompute the nine lane×phase aggregates and the goalkeeper rating.
    pub fn update_snapshot(&mut self) {
        let mut snapshot = TeamSnapshot::default();

        for (i, tp) in self.players.iter().enumerate() {
            if !tp.is_live() {
                continue;
            }
            let m = Self::multiplier_for(tp, self.fitness[i]);
            for lane in Lane::ALL {
                let strengths = snapshot.lane_mut(lane);
                for phase in Phase::ALL {
                    strengths.add(phase, attribute_calc::contribution(&tp.player, tp.slot, lane, phase) * m);
                }
            }
        }

        snapshot.goalkeeper = self.goalkeeper_index().map_or(0.0, |i| self.keeper_rating_at(i));

        self.snapshot = snapshot;
        self.snapshot_fitness.clone_from(&self.fitness);
        self.stale = false;
    }

    pub fn snapshot_is_stale(&self) -> bool {
        self.stale
    }

    /// Recompute the snapshot only if something material changed. Returns whether it ran.
    pub fn refresh_if_stale(&mut self) -> bool {
        if self.stale {
            self.update_snapshot();
            true
        } else {
            false
        }
    }

    pub fn snapshot(&self) -> &TeamSnapshot {
        &self.snapshot
    }

    /// Cached strength for a lane and phase.
    pub fn lane_strength(&self, lane: Lane, phase: Phase) -> f32 {
        self.snapshot.get(lane, phase)
    }

    fn keeper_rating_at(&self, i: usize) -> f32 {
        let tp = &self.players[i];
        attribute_calc::goalkeeper_save_rating(&tp.player) * Self::multiplier_for(tp, self.fitness[i])
    }

    /// The live player in goal, or the best live outfield stand-in.
    fn goalkeeper_index(&self) -> Option<usize> {
        let keeper = self
            .players
            .iter()
            .position(|tp| tp.is_live() && tp.slot.is_goalkeeper());
        if keeper.is_some() {
            return keeper;
        }

        self.players
            .iter()
            .enumerate()
            .filter(|(_, tp)| tp.is_live())
            .map(|(i, _)| (i, self.keeper_rating_at(i)))
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }

    /// Whoever is currently keeping goal.
    pub fn goalkeeper(&self) -> Option<&TacticalPlayer> {
        self.goalkeeper_index().map(|i| &self.players[i])
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Occupied means held by a live player; a dismissal vacates the slot.
    pub fn is_slot_occupied(&self, slot: Slot) -> bool {
        self.live_players().any(|tp| tp.slot == slot)
    }

    fn live_index(&self, id: PlayerId) -> Option<usize> {
        self.index.get(&id).copied().filter(|&i| self.players[i].is_live())
    }

    /// Dismiss a player. Fitness collapses to the floor and the slot is vacated.
    pub fn send_off(&mut self, id: PlayerId) -> bool {
        let Some(i) = self.live_index(id) else {
            return false;
        };
        self.players[i].sent_off = true;
        self.fitness[i] = condition::FITNESS_MIN;
        self.stale = true;
        true
    }

    /// Returns the caution count after this one, or 0 for an unknown player.
    pub fn add_caution(&mut self, id: PlayerId) -> u8 {
        match self.live_index(id) {
            Some(i) => {
                let tp = &mut self.players[i];
                tp.cautions = tp.cautions.saturating_add(1);
                tp.cautions
            }
            None => 0,
        }
    }

    /// Replace `out_id` with `incoming` at the same slot index.
    ///
    /// Refused when the outgoing player is not live, the incoming player has
    /// already appeared, the substitution limit is reached, or a goalkeeper
    /// would swap with an outfield player.
    pub fn substitute(&mut self, out_id: PlayerId, incoming: Player, minute: u8) -> bool {
        let Some(i) = self.live_index(out_id) else {
            return false;
        };
        if self.substitutions_made >= MAX_SUBSTITUTIONS || self.appeared.contains(&incoming.id) {
            return false;
        }

        let slot = self.players[i].slot;
        if !incoming.position.bench_category().is_compatible_with(slot.bench_category()) {
            return false;
        }

        self.index.remove(&out_id);
        self.index.insert(incoming.id, i);
        self.appeared.insert(incoming.id);
        self.fitness[i] = condition::clamp_fitness(incoming.stamina);
        self.players[i] = TacticalPlayer::substitute(incoming, slot, minute);
        self.substitutions_made += 1;
        self.stale = true;
        true
    }

    /// Relocate a live player to an unoccupied slot.
    pub fn move_player(&mut self, id: PlayerId, new_slot: Slot) -> bool {
        let Some(i) = self.live_index(id) else {
            return false;
        };
        if self.players[i].slot == new_slot || self.is_slot_occupied(new_slot) {
            return false;
        }
        self.players[i].slot = new_slot;
        self.stale = true;
        true
    }

    /// Exchange the slots of two live players.
    pub fn swap_slots(&mut self, a: PlayerId, b: PlayerId) -> bool {
        if a == b {
            return false;
        }
        let (Some(i), Some(j)) = (self.live_index(a), self.live_index(b)) else {
            return false;
        };
        let slot_a = self.players[i].slot;
        self.players[i].slot = self.players[j].slot;
        self.players[j].slot = slot_a;
        self.stale = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_fixtures::{keeper, outfielder, starting_eleven, team_442};

    #[test]
    fn test_new_rejects_short_roster() {
        let mut players = starting_eleven(1, 14);
        players.pop();
        let err = Team::new(TeamSide::Home, players).unwrap_err();
        assert_eq!(
            err,
            SimError::InvalidTeamSize { side: TeamSide::Home, expected: 11, found: 10 }
        );
    }

    #[test]
    fn test_new_rejects_duplicates() {
        let mut players = starting_eleven(1, 14);
        players[10].player.id = players[9].player.id;
        assert!(matches!(
            Team::new(TeamSide::Away, players),
            Err(SimError::DuplicatePlayer { .. })
        ));

        let mut players = starting_eleven(1, 14);
        players[10].slot = players[9].slot;
        assert!(matches!(
            Team::new(TeamSide::Away, players),
            Err(SimError::DuplicateSlot { .. })
        ));
    }

    #[test]
    fn test_snapshot_has_strength_everywhere() {
        let team = team_442(TeamSide::Home, 1, 14);
        for lane in Lane::ALL {
            for phase in Phase::ALL {
                assert!(team.lane_strength(lane, phase) > 0.0, "{:?} {:?}", lane, phase);
            }
        }
        assert!(team.snapshot().goalkeeper > 50.0);
    }

    #[test]
    fn test_send_off_vacates_slot_and_removes_contribution() {
        let mut team = team_442(TeamSide::Home, 1, 14);
        let before = team.lane_strength(Lane::Center, Phase::Attack);
        let striker = team.players().iter().find(|tp| tp.slot == Slot::LS).unwrap().id();

        assert!(team.send_off(striker));
        assert!(!team.send_off(striker));
        assert!(!team.is_slot_occupied(Slot::LS));
        assert_eq!(team.fitness_of(striker), Some(condition::FITNESS_MIN));
        assert!(team.snapshot_is_stale());

        team.update_snapshot();
        assert!(team.lane_strength(Lane::Center, Phase::Attack) < before);
        assert!(team.live_players().all(|tp| tp.id() != striker));
    }

    #[test]
    fn test_substitute_preserves_index() {
        let mut team = team_442(TeamSide::Home, 1, 14);
        let out = team.player_at(10).unwrap().id();
        let slot = team.player_at(10).unwrap().slot;
        let sub = outfielder(PlayerId(50), slot, 15);

        assert!(team.substitute(out, sub.clone(), 60));
        let tp = team.player_at(10).unwrap();
        assert_eq!(tp.id(), PlayerId(50));
        assert_eq!(tp.slot, slot);
        assert_eq!(tp.entry_minute, 60);
        assert!(team.player(out).is_none());
        assert_eq!(team.substitutions_made(), 1);

        // Same player cannot enter twice.
        assert!(!team.substitute(PlayerId(50), sub, 70));
    }

    #[test]
    fn test_goalkeeper_cannot_replace_outfielder() {
        let mut team = team_442(TeamSide::Home, 1, 14);
        let striker = team.players().iter().find(|tp| tp.slot == Slot::RS).unwrap().id();
        assert!(!team.substitute(striker, keeper(PlayerId(60), 15), 60));
        assert!(team.player(striker).is_some());
        assert_eq!(team.substitutions_made(), 0);
    }

    #[test]
    fn test_substitution_limit() {
        let mut team = team_442(TeamSide::Home, 1, 14);
        let outs: Vec<(PlayerId, Slot)> =
            team.players().iter().skip(1).map(|tp| (tp.id(), tp.slot)).collect();
        for (n, (id, slot)) in outs.iter().enumerate() {
            let ok = team.substitute(*id, outfielder(PlayerId(100 + n as u32), *slot, 12), 60);
            assert_eq!(ok, n < MAX_SUBSTITUTIONS as usize);
        }
        assert_eq!(team.substitutions_made(), MAX_SUBSTITUTIONS);
    }

    #[test]
    fn test_move_and_swap() {
        let mut team = team_442(TeamSide::Home, 1, 14);
        let lm = team.players().iter().find(|tp| tp.slot == Slot::LM).unwrap().id();
        let rm = team.players().iter().find(|tp| tp.slot == Slot::RM).unwrap().id();

        assert!(!team.move_player(lm, Slot::RM));
        assert!(team.move_player(lm, Slot::LW));
        assert!(team.is_slot_occupied(Slot::LW));
        assert!(!team.is_slot_occupied(Slot::LM));

        assert!(team.swap_slots(lm, rm));
        assert_eq!(team.player(lm).unwrap().slot, Slot::RM);
        assert_eq!(team.player(rm).unwrap().slot, Slot::LW);
        assert!(!team.swap_slots(lm, lm));
        assert!(!team.move_player(PlayerId(999), Slot::CAM));
    }

    #[test]
    fn test_missing_keeper_uses_outfield_stand_in() {
        let mut team = team_442(TeamSide::Away, 1, 14);
        let gk = team.goalkeeper().unwrap().id();
        let full_strength = team.snapshot().goalkeeper;

        team.send_off(gk);
        team.update_snapshot();
        let stand_in = team.goalkeeper().unwrap();
        assert_ne!(stand_in.id(), gk);
        assert!(!stand_in.slot.is_goalkeeper());
        assert!(team.snapshot().goalkeeper > 0.0);
        assert!(team.snapshot().goalkeeper < full_strength / 2.0);
    }

    #[test]
    fn test_condition_drift_marks_snapshot_stale() {
        let mut team = team_442(TeamSide::Home, 1, 14);
        assert!(!team.snapshot_is_stale());
        team.update_condition(1, false);
        assert!(!team.snapshot_is_stale());
        team.update_condition(30, false);
        assert!(team.snapshot_is_stale());
        assert!(team.refresh_if_stale());
        assert!(!team.refresh_if_stale());
    }
}
