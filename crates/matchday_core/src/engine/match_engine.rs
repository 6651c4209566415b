//! Match Engine
//!
//! Minute-stepped simulation of one fixture:
//! Kickoff → Regulation (1-90) → [Extra Time (91-120)] → [Penalty Shootout] → Finished.
//!
//! ## Per-minute loop
//! 1. Apply tactical instructions due this minute (home list first, then away)
//! 2. Advance condition, with break recovery at minutes 46, 91 and 106
//! 3. Refresh snapshots on the cadence (and emit a snapshot event), or silently when stale
//! 4. Resolve the attack sequences pre-rolled for this minute
//!
//! The engine owns its RNG. Production callers use [`MatchEngine::from_entropy`];
//! tests and calibration use [`MatchEngine::with_seed`].

use log::info;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::key_moments::{schedule_key_moments, EXTRA_TIME_KEY_MOMENTS, REGULATION_KEY_MOMENTS};
use super::match_phase::{next_phase, MatchOptions, MatchPhase};
use super::team::Team;
use crate::error::{Result, SimError};
use crate::models::{
    Bench, EventData, EventType, FullTimeDetails, LineupDetails, LineupEntry, MatchEvent,
    MatchPeriod, MatchResult, PenaltyShootoutResult, PeriodDetails, Score, SnapshotDetails,
    TacticalInstruction, TeamSide,
};

pub const REGULATION_MINUTES: u8 = 90;
pub const HALF_TIME_MINUTE: u8 = 45;
pub const EXTRA_TIME_END: u8 = 120;
pub const EXTRA_TIME_HALF_MINUTE: u8 = 105;

/// Minutes that open a period after a break; fitness recovers first.
const BREAK_RECOVERY_MINUTES: [u8; 3] = [46, 91, 106];

/// Snapshot cadence: every fifth minute plus period boundaries.
pub fn is_snapshot_minute(minute: u8) -> bool {
    minute % 5 == 0 || matches!(minute, 45 | 46 | 90 | 91 | 105 | 106 | 120)
}

/// Everything one side brings to the match.
#[derive(Debug, Clone)]
pub struct SidePlan {
    pub team: Team,
    pub instructions: Vec<TacticalInstruction>,
    pub bench: Bench,
}

impl SidePlan {
    pub fn new(team: Team, instructions: Vec<TacticalInstruction>, bench: Bench) -> Self {
        Self { team, instructions, bench }
    }
}

pub struct MatchEngine<R: Rng = ChaCha8Rng> {
    pub(super) home: SidePlan,
    pub(super) away: SidePlan,
    pub(super) options: MatchOptions,
    pub(super) rng: R,
    pub(super) phase: MatchPhase,
    pub(super) score: Score,
    pub(super) events: Vec<MatchEvent>,
    pub(super) extra_time_played: bool,
    pub(super) shootout: Option<PenaltyShootoutResult>,
}

impl MatchEngine<ChaCha8Rng> {
    /// Reproducible engine for tests and calibration runs.
    pub fn with_seed(home: SidePlan, away: SidePlan, options: MatchOptions, seed: u64) -> Self {
        Self::new(home, away, options, ChaCha8Rng::seed_from_u64(seed))
    }

    /// Freshly randomized engine, one per invocation.
    pub fn from_entropy(home: SidePlan, away: SidePlan, options: MatchOptions) -> Self {
        Self::new(home, away, options, ChaCha8Rng::from_entropy())
    }
}

impl<R: Rng> MatchEngine<R> {
    pub fn new(home: SidePlan, away: SidePlan, options: MatchOptions, rng: R) -> Self {
        Self {
            home,
            away,
            options,
            rng,
            phase: MatchPhase::Kickoff,
            score: Score::default(),
            events: Vec::with_capacity(128),
            extra_time_played: false,
            shootout: None,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    /// The phase the engine will run next given the current score.
    pub fn pending_phase(&self) -> MatchPhase {
        next_phase(self.phase, self.options, self.score.is_level())
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn events(&self) -> &[MatchEvent] {
        &self.events
    }

    pub fn team(&self, side: TeamSide) -> &Team {
        &self.side(side).team
    }

    pub(super) fn side(&self, side: TeamSide) -> &SidePlan {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }

    pub(super) fn side_mut(&mut self, side: TeamSide) -> &mut SidePlan {
        match side {
            TeamSide::Home => &mut self.home,
            TeamSide::Away => &mut self.away,
        }
    }

    // ========================================================================
    // Event log
    // ========================================================================

    /// New event stamped with the next sequence number. Not yet logged.
    pub(super) fn event(&self, minute: u8, event_type: EventType, data: EventData) -> MatchEvent {
        MatchEvent::new(self.events.len() as u32, minute, event_type, data)
    }

    pub(super) fn push(&mut self, event: MatchEvent) {
        self.events.push(event);
    }

    fn push_period(&mut self, minute: u8, event_type: EventType, period: MatchPeriod) {
        let ev = self.event(minute, event_type, EventData::Period(PeriodDetails { period, score: self.score }));
        self.push(ev);
    }

    fn push_lineup(&mut self, side: TeamSide) {
        let players = self
            .side(side)
            .team
            .players()
            .iter()
            .map(|tp| LineupEntry { player: tp.id(), slot: tp.slot })
            .collect();
        let ev = self
            .event(0, EventType::Lineup, EventData::Lineup(LineupDetails { players }))
            .for_team(side);
        self.push(ev);
    }

    fn push_snapshot(&mut self, minute: u8) {
        self.home.team.update_snapshot();
        self.away.team.update_snapshot();
        let details = SnapshotDetails {
            home: *self.home.team.snapshot(),
            away: *self.away.team.snapshot(),
        };
        let ev = self.event(minute, EventType::Snapshot, EventData::Snapshot(details));
        self.push(ev);
    }

    fn push_full_time(&mut self, minute: u8) {
        let details = FullTimeDetails {
            score: self.score,
            extra_time_played: self.extra_time_played,
            shootout: self.shootout.as_ref().map(|s| s.goals),
            winner: self.winner(),
        };
        let ev = self.event(minute, EventType::FullTime, EventData::FullTime(details));
        self.push(ev);
        self.phase = MatchPhase::Finished;

        info!(
            "Full time: {}-{} (extra time: {}, shootout: {:?})",
            self.score.home,
            self.score.away,
            self.extra_time_played,
            self.shootout.as_ref().map(|s| s.goals.tuple())
        );
    }

    fn winner(&self) -> Option<TeamSide> {
        self.score.leader().or_else(|| self.shootout.as_ref().map(|s| s.winner))
    }

    // ========================================================================
    // Phase flow
    // ========================================================================

    /// Move into `requested`, or refuse if it is not the next phase.
    fn enter(&mut self, requested: MatchPhase) -> Result<()> {
        if self.pending_phase() != requested || self.phase == MatchPhase::Finished {
            return Err(SimError::PhaseOrder { current: self.phase, requested });
        }
        self.phase = requested;
        Ok(())
    }

    /// Minutes 1-90. Ends with full time unless the tie goes to extra time.
    pub fn run_regulation(&mut self) -> Result<()> {
        self.enter(MatchPhase::Regulation)?;
        info!("Kick-off");

        self.push_lineup(TeamSide::Home);
        self.push_lineup(TeamSide::Away);
        self.push_period(0, EventType::KickOff, MatchPeriod::FirstHalf);
        self.push_snapshot(0);

        let moments = schedule_key_moments(&mut self.rng, 1, REGULATION_MINUTES, REGULATION_KEY_MOMENTS);
        self.play_minutes(1, REGULATION_MINUTES, &moments);

        if self.pending_phase() == MatchPhase::ExtraTime {
            info!("Level at {}-{} after 90 minutes, extra time", self.score.home, self.score.away);
            self.push_period(REGULATION_MINUTES, EventType::RegulationEnd, MatchPeriod::SecondHalf);
        } else {
            self.push_full_time(REGULATION_MINUTES);
        }
        Ok(())
    }

    /// Minutes 91-120. Ends with full time unless the tie goes to penalties.
    pub fn run_extra_time(&mut self) -> Result<()> {
        self.enter(MatchPhase::ExtraTime)?;
        self.extra_time_played = true;

        self.push_period(REGULATION_MINUTES + 1, EventType::ExtraTimeKickOff, MatchPeriod::ExtraTimeFirstHalf);

        let moments =
            schedule_key_moments(&mut self.rng, REGULATION_MINUTES + 1, EXTRA_TIME_END, EXTRA_TIME_KEY_MOMENTS);
        self.play_minutes(REGULATION_MINUTES + 1, EXTRA_TIME_END, &moments);

        if self.pending_phase() == MatchPhase::PenaltyShootout {
            info!("Still level after extra time, penalties");
            self.push_period(EXTRA_TIME_END, EventType::ShootoutStart, MatchPeriod::PenaltyShootout);
        } else {
            self.push_full_time(EXTRA_TIME_END);
        }
        Ok(())
    }

    /// Best-of-five shootout followed by full time.
    pub fn run_penalty_shootout(&mut self) -> Result<()> {
        self.enter(MatchPhase::PenaltyShootout)?;
        let result = self.play_shootout(EXTRA_TIME_END);
        self.shootout = Some(result);
        self.push_full_time(EXTRA_TIME_END);
        Ok(())
    }

    /// Drive every phase the fixture needs and return the result.
    pub fn simulate(mut self) -> Result<MatchResult> {
        self.run_regulation()?;
        if self.pending_phase() == MatchPhase::ExtraTime {
            self.run_extra_time()?;
        }
        if self.pending_phase() == MatchPhase::PenaltyShootout {
            self.run_penalty_shootout()?;
        }
        Ok(self.into_result())
    }

    pub fn into_result(self) -> MatchResult {
        MatchResult {
            score: self.score,
            extra_time_played: self.extra_time_played,
            penalty_shootout: self.shootout,
            events: self.events,
        }
    }

    // ========================================================================
    // Minute loop
    // ========================================================================

    fn play_minutes(&mut self, first: u8, last: u8, moments: &[u8]) {
        let mut pending = moments.iter().copied().peekable();

        for minute in first..=last {
            match minute {
                46 => self.push_period(minute, EventType::SecondHalf, MatchPeriod::SecondHalf),
                106 => self.push_period(minute, EventType::SecondHalf, MatchPeriod::ExtraTimeSecondHalf),
                _ => {}
            }

            self.apply_instructions(minute);

            let is_break = BREAK_RECOVERY_MINUTES.contains(&minute);
            self.home.team.update_condition(1, is_break);
            self.away.team.update_condition(1, is_break);

            if is_snapshot_minute(minute) {
                self.push_snapshot(minute);
            } else {
                self.home.team.refresh_if_stale();
                self.away.team.refresh_if_stale();
            }

            while pending.next_if_eq(&minute).is_some() {
                self.play_key_moment(minute);
            }

            match minute {
                HALF_TIME_MINUTE => self.push_period(minute, EventType::HalfTime, MatchPeriod::FirstHalf),
                EXTRA_TIME_HALF_MINUTE => {
                    self.push_period(minute, EventType::HalfTime, MatchPeriod::ExtraTimeFirstHalf)
                }
                _ => {}
            }
        }
    }
}
