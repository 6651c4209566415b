//! Penalty shootout.
//!
//! Five alternating kicks each (home first) with an early stop once the
//! trailing side cannot catch up, then sudden-death pairs. Kickers rotate
//! through the live players, best penalty takers first and the keeper last.

use log::debug;
use rand::Rng;
use std::cmp::Ordering;

use super::attribute_calc::{goalkeeper_save_rating, penalty_rating};
use super::condition::penalty_multiplier;
use super::duel::{self, PENALTY};
use super::match_engine::MatchEngine;
use super::team::Team;
use crate::models::{
    EventData, EventType, PenaltyDetails, PenaltyKick, PenaltyShootoutResult, PlayerId, Score,
    TeamSide,
};

pub const SHOOTOUT_ROUNDS: u8 = 5;

/// Sudden-death rounds played before the tie is settled by lot.
pub const SUDDEN_DEATH_ROUND_CAP: u8 = 30;

/// Live players ordered by spot-kick rating, goalkeeper last.
pub fn kicker_order(team: &Team) -> Vec<PlayerId> {
    let mut kickers: Vec<(PlayerId, bool, f32)> = team
        .live_players()
        .map(|tp| {
            let rating = penalty_rating(&tp.player) * penalty_multiplier(tp.player.form, tp.player.experience);
            (tp.id(), tp.slot.is_goalkeeper(), rating)
        })
        .collect();

    kickers.sort_by(|a, b| {
        a.1.cmp(&b.1)
            .then_with(|| b.2.partial_cmp(&a.2).unwrap_or(Ordering::Equal))
            .then_with(|| a.0.cmp(&b.0))
    });
    kickers.into_iter().map(|(id, _, _)| id).collect()
}

/// One side's kickers, the keeper they face and how far through the order they are.
struct KickingSide {
    side: TeamSide,
    order: Vec<PlayerId>,
    next: usize,
    taken: u8,
    opposing_keeper: Option<PlayerId>,
    keeper_rating: f32,
}

impl KickingSide {
    fn new(side: TeamSide, own: &Team, opponent: &Team) -> Self {
        let keeper = opponent.goalkeeper();
        let keeper_rating = keeper.map_or(0.0, |tp| {
            goalkeeper_save_rating(&tp.player) * penalty_multiplier(tp.player.form, tp.player.experience)
        });
        Self {
            side,
            order: kicker_order(own),
            next: 0,
            taken: 0,
            opposing_keeper: keeper.map(|tp| tp.id()),
            keeper_rating,
        }
    }

    fn next_kicker(&mut self) -> Option<PlayerId> {
        if self.order.is_empty() {
            return None;
        }
        let id = self.order[self.next % self.order.len()];
        self.next += 1;
        Some(id)
    }
}

impl<R: Rng> MatchEngine<R> {
    pub(super) fn play_shootout(&mut self, minute: u8) -> PenaltyShootoutResult {
        let mut home = KickingSide::new(TeamSide::Home, &self.home.team, &self.away.team);
        let mut away = KickingSide::new(TeamSide::Away, &self.away.team, &self.home.team);
        let mut goals = Score::default();
        let mut kicks = Vec::new();

        debug!("Shootout order home {:?} away {:?}", home.order, away.order);

        'regulation: for round in 1..=SHOOTOUT_ROUNDS {
            for kicking in [&mut home, &mut away] {
                self.take_kick(kicking, round, false, minute, &mut goals, &mut kicks);

                let home_left = SHOOTOUT_ROUNDS.saturating_sub(kicks_taken(&kicks, TeamSide::Home));
                let away_left = SHOOTOUT_ROUNDS.saturating_sub(kicks_taken(&kicks, TeamSide::Away));
                if goals.home > goals.away + away_left || goals.away > goals.home + home_left {
                    break 'regulation;
                }
            }
        }

        let mut round = SHOOTOUT_ROUNDS;
        while goals.is_level() && round < SHOOTOUT_ROUNDS + SUDDEN_DEATH_ROUND_CAP {
            round += 1;
            self.take_kick(&mut home, round, true, minute, &mut goals, &mut kicks);
            self.take_kick(&mut away, round, true, minute, &mut goals, &mut kicks);
        }

        // A lot settles the tie without touching the kick tally.
        let decided_by_lot = goals.is_level();
        let winner = match goals.leader() {
            Some(side) => side,
            None => {
                let lucky = if self.rng.gen_bool(0.5) { TeamSide::Home } else { TeamSide::Away };
                debug!("Shootout still level after {} rounds, {:?} wins the draw", round, lucky);
                lucky
            }
        };
        debug!("Shootout {}-{}, {:?} win", goals.home, goals.away, winner);

        PenaltyShootoutResult {
            goals,
            kicks_taken_home: home.taken,
            kicks_taken_away: away.taken,
            winner,
            decided_by_lot,
            kicks,
        }
    }

    fn take_kick(
        &mut self,
        kicking: &mut KickingSide,
        round: u8,
        sudden_death: bool,
        minute: u8,
        goals: &mut Score,
        kicks: &mut Vec<PenaltyKick>,
    ) {
        let kicker = kicking.next_kicker();
        let strength = kicker
            .and_then(|id| self.side(kicking.side).team.player(id))
            .map_or(0.0, |tp| {
                penalty_rating(&tp.player) * penalty_multiplier(tp.player.form, tp.player.experience)
            });

        let record = duel::resolve(&mut self.rng, strength, kicking.keeper_rating, PENALTY);
        kicking.taken += 1;
        if record.won {
            goals.add_goal(kicking.side);
        }

        kicks.push(PenaltyKick {
            round,
            side: kicking.side,
            kicker,
            keeper: kicking.opposing_keeper,
            scored: record.won,
        });

        let event_type = if record.won { EventType::PenaltyGoal } else { EventType::PenaltyMiss };
        let mut ev = self
            .event(
                minute,
                event_type,
                EventData::Penalty(PenaltyDetails { round, sudden_death, duel: record, tally: *goals }),
            )
            .for_team(kicking.side)
            .with_related(kicking.opposing_keeper);
        if let Some(id) = kicker {
            ev = ev.with_player(id);
        }
        self.push(ev);
    }
}

fn kicks_taken(kicks: &[PenaltyKick], side: TeamSide) -> u8 {
    kicks.iter().filter(|k| k.side == side).count() as u8
}
