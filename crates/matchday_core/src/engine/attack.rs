//! Key-moment resolution: fouls and attack sequences.
//!
//! ## Attack sequence
//! 1. Foul check (~8%): dismissal, caution or plain foul ends the sequence
//! 2. Uniform lane
//! 3. Possession duel decides who attacks
//! 4. Attack push (attack ×1.15 vs defense); a loss is a defensive stop
//! 5. Shooter (+ optional assister) and the shot duel against the keeper
//!
//! Each sequence logs exactly one attack event carrying the full decomposition.

use log::trace;
use rand::Rng;

use super::attribute_calc::{assist_weight, shooter_weight, shot_rating};
use super::duel::{self, ATTACK_PUSH, ATTACK_PUSH_SCALE, POSSESSION, SHOT};
use super::match_engine::MatchEngine;
use super::team::Team;
use crate::models::{
    AttackDetails, AttackOutcome, DuelRecord, EventData, EventType, FoulDetails, FoulSeverity,
    Lane, Phase, PlayerId, ShotDetails, TeamSide,
};

/// Share of key moments that turn into a foul instead of an attack.
pub const FOUL_CHANCE: f32 = 0.08;
/// Given a foul: straight red.
pub const DISMISSAL_CHANCE: f32 = 0.04;
/// Given a foul that is not a straight red: caution.
pub const CAUTION_CHANCE: f32 = 0.18;
/// Share of shots with a credited final pass.
pub const ASSIST_CHANCE: f32 = 0.65;

pub const DISTANCE_FACTOR_MIN: f32 = 0.6;
pub const DISTANCE_FACTOR_MAX: f32 = 1.1;
/// Efforts below this distance factor are long-range; a lost one goes wide.
pub const LONG_RANGE_THRESHOLD: f32 = 0.7;

/// Roulette draw over `(id, weight)`; `None` when nothing carries weight.
fn pick_weighted<R: Rng + ?Sized>(rng: &mut R, candidates: &[(PlayerId, f32)]) -> Option<PlayerId> {
    let total: f32 = candidates.iter().map(|(_, w)| w.max(0.0)).sum();
    if total <= 0.0 {
        return None;
    }

    let mut random = rng.gen::<f32>() * total;
    let mut last = None;
    for &(id, weight) in candidates.iter().filter(|(_, w)| *w > 0.0) {
        last = Some(id);
        random -= weight;
        if random <= 0.0 {
            break;
        }
    }
    last
}

fn pick_uniform<R: Rng + ?Sized>(rng: &mut R, candidates: &[PlayerId]) -> Option<PlayerId> {
    if candidates.is_empty() {
        None
    } else {
        Some(candidates[rng.gen_range(0..candidates.len())])
    }
}

fn live_outfield(team: &Team) -> Vec<PlayerId> {
    team.live_players().filter(|tp| !tp.slot.is_goalkeeper()).map(|tp| tp.id()).collect()
}

impl<R: Rng> MatchEngine<R> {
    pub(super) fn play_key_moment(&mut self, minute: u8) {
        if self.rng.gen::<f32>() < FOUL_CHANCE {
            self.play_foul(minute);
        } else {
            self.play_attack(minute);
        }
    }

    // ========================================================================
    // Fouls
    // ========================================================================

    /// Send a player off and rebuild the snapshot at once: a second key moment
    /// in the same minute must not see the dismissed player's strength.
    fn dismiss(&mut self, side: TeamSide, id: PlayerId) -> bool {
        let team = &mut self.side_mut(side).team;
        if !team.send_off(id) {
            return false;
        }
        team.refresh_if_stale();
        true
    }

    fn play_foul(&mut self, minute: u8) {
        let side = if self.rng.gen_bool(0.5) { TeamSide::Home } else { TeamSide::Away };

        let offenders = live_outfield(&self.side(side).team);
        let offenders = if offenders.is_empty() {
            self.side(side).team.live_players().map(|tp| tp.id()).collect()
        } else {
            offenders
        };
        let Some(offender) = pick_uniform(&mut self.rng, &offenders) else {
            return;
        };
        let victims: Vec<PlayerId> =
            self.side(side.opponent()).team.live_players().map(|tp| tp.id()).collect();
        let victim = pick_uniform(&mut self.rng, &victims);

        let roll: f32 = self.rng.gen();
        let team = &mut self.side_mut(side).team;
        let (severity, cautions) = if roll < DISMISSAL_CHANCE {
            (FoulSeverity::StraightRed, team.player(offender).map_or(0, |tp| tp.cautions))
        } else if roll < DISMISSAL_CHANCE + CAUTION_CHANCE {
            let cautions = team.add_caution(offender);
            if cautions >= 2 {
                (FoulSeverity::SecondCaution, cautions)
            } else {
                (FoulSeverity::Caution, cautions)
            }
        } else {
            (FoulSeverity::Plain, team.player(offender).map_or(0, |tp| tp.cautions))
        };

        let details = FoulDetails { severity, cautions };
        let ev = self
            .event(minute, EventType::Foul, EventData::Foul(details.clone()))
            .for_team(side)
            .with_player(offender)
            .with_related(victim);
        self.push(ev);

        if matches!(severity, FoulSeverity::Caution | FoulSeverity::SecondCaution) {
            let ev = self
                .event(minute, EventType::Caution, EventData::Foul(details.clone()))
                .for_team(side)
                .with_player(offender);
            self.push(ev);
        }

        if matches!(severity, FoulSeverity::StraightRed | FoulSeverity::SecondCaution)
            && self.dismiss(side, offender)
        {
            let ev = self
                .event(minute, EventType::Dismissal, EventData::Foul(details))
                .for_team(side)
                .with_player(offender);
            self.push(ev);
        }

        trace!("{}' foul by {:?} {} ({:?})", minute, side, offender, severity);
    }

    // ========================================================================
    // Attacks
    // ========================================================================

    fn play_attack(&mut self, minute: u8) {
        let lane = Lane::ALL[self.rng.gen_range(0..Lane::ALL.len())];

        let home_possession = self.home.team.lane_strength(lane, Phase::Possession);
        let away_possession = self.away.team.lane_strength(lane, Phase::Possession);
        let contest = duel::resolve(&mut self.rng, home_possession, away_possession, POSSESSION);

        // Recorded from whoever ends up attacking.
        let (attacking, possession) = if contest.won {
            (TeamSide::Home, contest)
        } else {
            (
                TeamSide::Away,
                DuelRecord {
                    strength: away_possession,
                    opposition: home_possession,
                    probability: 1.0 - contest.probability,
                    won: true,
                },
            )
        };
        let defending = attacking.opponent();

        let attack = self.side(attacking).team.lane_strength(lane, Phase::Attack) * ATTACK_PUSH_SCALE;
        let defense = self.side(defending).team.lane_strength(lane, Phase::Defense);
        let push = duel::resolve(&mut self.rng, attack, defense, ATTACK_PUSH);

        trace!(
            "{}' {:?} attack via {:?}: possession p={:.2}, push {:.1} vs {:.1} p={:.2} won={}",
            minute,
            attacking,
            lane,
            possession.probability,
            attack,
            defense,
            push.probability,
            push.won
        );

        let mut details = AttackDetails {
            lane,
            attacking,
            possession,
            push,
            shot: None,
            outcome: AttackOutcome::DefensiveStop,
            score: None,
        };

        if !push.won {
            let ev = self
                .event(minute, EventType::Turnover, EventData::Attack(details))
                .for_team(attacking);
            self.push(ev);
            return;
        }

        let Some(shooter) = self.select_shooter(attacking, lane) else {
            details.outcome = AttackOutcome::Blocked;
            let ev = self
                .event(minute, EventType::Turnover, EventData::Attack(details))
                .for_team(attacking);
            self.push(ev);
            return;
        };

        let assist = if self.rng.gen::<f32>() < ASSIST_CHANCE {
            self.select_assister(attacking, lane, shooter)
        } else {
            None
        };

        let distance_factor = self.rng.gen_range(DISTANCE_FACTOR_MIN..=DISTANCE_FACTOR_MAX);
        let attackers = &self.side(attacking).team;
        let shot_strength = attackers
            .player(shooter)
            .map_or(0.0, |tp| shot_rating(&tp.player))
            * attackers.condition_multiplier(shooter).unwrap_or(1.0)
            * distance_factor;

        let defenders = &self.side(defending).team;
        let keeper = defenders.goalkeeper().map(|tp| tp.id());
        let keeper_rating = defenders.snapshot().goalkeeper;

        let shot = duel::resolve(&mut self.rng, shot_strength, keeper_rating, SHOT);

        let (event_type, outcome, related) = if shot.won {
            self.score.add_goal(attacking);
            details.score = Some(self.score);
            (EventType::Goal, AttackOutcome::Goal, assist)
        } else if distance_factor < LONG_RANGE_THRESHOLD {
            (EventType::Miss, AttackOutcome::Miss, keeper)
        } else {
            (EventType::Save, AttackOutcome::Save, keeper)
        };

        trace!(
            "{}' shot by {} ({:.1}, distance {:.2}) vs keeper {:.1}: p={:.2} → {:?}",
            minute,
            shooter,
            shot_strength,
            distance_factor,
            keeper_rating,
            shot.probability,
            outcome
        );

        details.shot = Some(ShotDetails { shooter, assist, keeper, distance_factor, duel: shot });
        details.outcome = outcome;

        let ev = self
            .event(minute, event_type, EventData::Attack(details))
            .for_team(attacking)
            .with_player(shooter)
            .with_related(related);
        self.push(ev);
    }

    /// Weighted toward advanced, central slots; any live outfielder as fallback.
    fn select_shooter(&mut self, side: TeamSide, lane: Lane) -> Option<PlayerId> {
        let team = &self.side(side).team;
        let weighted: Vec<(PlayerId, f32)> = team
            .live_players()
            .filter(|tp| !tp.slot.is_goalkeeper())
            .map(|tp| (tp.id(), shooter_weight(tp.slot, lane)))
            .collect();
        let fallback = live_outfield(team);

        pick_weighted(&mut self.rng, &weighted).or_else(|| pick_uniform(&mut self.rng, &fallback))
    }

    fn select_assister(&mut self, side: TeamSide, lane: Lane, shooter: PlayerId) -> Option<PlayerId> {
        let weighted: Vec<(PlayerId, f32)> = self
            .side(side)
            .team
            .live_players()
            .filter(|tp| !tp.slot.is_goalkeeper() && tp.id() != shooter)
            .map(|tp| (tp.id(), assist_weight(tp.slot, lane)))
            .collect();
        pick_weighted(&mut self.rng, &weighted)
    }
}
