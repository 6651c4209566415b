//! Reveal-time mapping.
//!
//! Turns the simulated minute of each event into a wall-clock instant so a
//! match computed in milliseconds can be disclosed as if it were live.
//!
//! One pass over the log, walking period anchors:
//! - first half: kick-off + minute × minute length
//! - second-half kick-off: half-time whistle + half-time break
//! - extra-time kick-off: end of regulation + extra-time break
//! - second half of extra time: extra-time half-time + short break
//! - first penalty: end of extra time + shootout break, then one interval per kick
//!
//! Within a period an event sits at `anchor + (minute - anchor minute) × minute length`.
//! Offsets are clamped to be non-decreasing in emission order.

use chrono::{DateTime, Duration, Utc};

use crate::config::RevealConfig;
use crate::models::{EventType, MatchEvent, Score};

/// Wall-clock reveal instant for every event, in log order.
pub fn reveal_schedule(
    events: &[MatchEvent],
    kickoff: DateTime<Utc>,
    config: &RevealConfig,
) -> Vec<DateTime<Utc>> {
    let minute_len = config.minute();

    let mut anchor = Duration::zero();
    let mut anchor_minute: u8 = 0;
    let mut previous = Duration::zero();
    let mut in_shootout = false;

    events
        .iter()
        .map(|ev| {
            let offset = match ev.event_type {
                EventType::SecondHalf => {
                    let pause = if ev.minute > 90 {
                        config.extra_time_half_break()
                    } else {
                        config.half_time_break()
                    };
                    anchor = previous + pause;
                    anchor_minute = ev.minute;
                    anchor
                }
                EventType::ExtraTimeKickOff => {
                    anchor = previous + config.extra_time_break();
                    anchor_minute = ev.minute;
                    anchor
                }
                t if t.is_penalty_kick() => {
                    if in_shootout {
                        previous + config.kick_interval()
                    } else {
                        in_shootout = true;
                        previous + config.shootout_break()
                    }
                }
                EventType::FullTime if in_shootout => previous + config.kick_interval(),
                _ => anchor + minute_len * ev.minute.saturating_sub(anchor_minute) as i32,
            };

            previous = offset.max(previous);
            kickoff + previous
        })
        .collect()
}

/// New event values carrying their reveal instants.
pub fn with_reveal_times(
    events: &[MatchEvent],
    kickoff: DateTime<Utc>,
    config: &RevealConfig,
) -> Vec<MatchEvent> {
    reveal_schedule(events, kickoff, config)
        .into_iter()
        .zip(events)
        .map(|(at, ev)| ev.clone().with_reveal_at(at))
        .collect()
}

/// Events already revealed at `now`. Events without a reveal instant stay hidden.
pub fn visible_events(events: &[MatchEvent], now: DateTime<Utc>) -> Vec<&MatchEvent> {
    events.iter().filter(|ev| ev.is_visible_at(now)).collect()
}

/// Score as a viewer at `now` would see it. Shootout kicks do not count.
pub fn live_score(events: &[MatchEvent], now: DateTime<Utc>) -> Score {
    let mut score = Score::default();
    for ev in events.iter().filter(|ev| ev.event_type.is_goal() && ev.is_visible_at(now)) {
        if let Some(side) = ev.team {
            score.add_goal(side);
        }
    }
    score
}

/// Instant the final whistle is revealed, if the log has one.
pub fn final_whistle(events: &[MatchEvent]) -> Option<DateTime<Utc>> {
    events
        .iter()
        .rev()
        .find(|ev| ev.event_type == EventType::FullTime)
        .and_then(|ev| ev.reveal_at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::match_phase::MatchOptions;
    use crate::engine::test_fixtures::{away_plan, home_plan};
    use crate::engine::MatchEngine;
    use crate::models::MatchResult;
    use chrono::TimeZone;

    fn kickoff() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 15, 0, 0).unwrap()
    }

    fn revealed(seed: u64, options: MatchOptions) -> (MatchResult, Vec<MatchEvent>) {
        let result = MatchEngine::with_seed(home_plan(14), away_plan(14), options, seed)
            .simulate()
            .unwrap();
        let events = with_reveal_times(&result.events, kickoff(), &RevealConfig::standard());
        (result, events)
    }

    fn first_of(events: &[MatchEvent], event_type: EventType) -> &MatchEvent {
        events.iter().find(|e| e.event_type == event_type).unwrap()
    }

    #[test]
    fn test_timestamps_non_decreasing() {
        for seed in 0..30 {
            let (_, events) = revealed(seed, MatchOptions::knockout());
            assert!(events.windows(2).all(|w| w[0].reveal_at <= w[1].reveal_at), "seed {}", seed);
            assert_eq!(events[0].reveal_at, Some(kickoff()));
        }
    }

    #[test]
    fn test_second_half_is_one_break_after_half_time() {
        let cfg = RevealConfig::standard();
        let (_, events) = revealed(7, MatchOptions::default());
        let half_time = first_of(&events, EventType::HalfTime).reveal_at.unwrap();
        let second_half = first_of(&events, EventType::SecondHalf).reveal_at.unwrap();

        assert_eq!(half_time, kickoff() + Duration::minutes(45));
        assert_eq!(second_half - half_time, cfg.half_time_break());
    }

    #[test]
    fn test_extra_time_breaks() {
        let cfg = RevealConfig::standard();
        let (result, events) = (0..200)
            .map(|seed| revealed(seed, MatchOptions::knockout()))
            .find(|(r, _)| r.extra_time_played)
            .expect("no extra time in 200 knockout matches");
        assert!(result.extra_time_played);

        let regulation_end = first_of(&events, EventType::RegulationEnd).reveal_at.unwrap();
        let et_kickoff = first_of(&events, EventType::ExtraTimeKickOff).reveal_at.unwrap();
        assert_eq!(et_kickoff - regulation_end, cfg.extra_time_break());

        let et_half = events
            .iter()
            .find(|e| e.event_type == EventType::HalfTime && e.minute == 105)
            .unwrap()
            .reveal_at
            .unwrap();
        let et_second = events
            .iter()
            .find(|e| e.event_type == EventType::SecondHalf && e.minute == 106)
            .unwrap()
            .reveal_at
            .unwrap();
        assert_eq!(et_half - et_kickoff, Duration::minutes(14));
        assert_eq!(et_second - et_half, cfg.extra_time_half_break());
    }

    #[test]
    fn test_shootout_kicks_are_spaced() {
        let cfg = RevealConfig::standard();
        let (_, events) = (0..200)
            .map(|seed| revealed(seed, MatchOptions::knockout()))
            .find(|(r, _)| r.penalty_shootout.is_some())
            .expect("no shootout in 200 knockout matches");

        let start = first_of(&events, EventType::ShootoutStart).reveal_at.unwrap();
        let kicks: Vec<DateTime<Utc>> = events
            .iter()
            .filter(|e| e.event_type.is_penalty_kick())
            .map(|e| e.reveal_at.unwrap())
            .collect();
        assert_eq!(kicks[0] - start, cfg.shootout_break());
        assert!(kicks.windows(2).all(|w| w[1] - w[0] == cfg.kick_interval()));
        assert_eq!(final_whistle(&events), Some(*kicks.last().unwrap() + cfg.kick_interval()));
    }

    #[test]
    fn test_live_score_tracks_reveal() {
        let (result, events) = (0..100)
            .map(|seed| revealed(seed, MatchOptions::default()))
            .find(|(r, _)| r.score.home + r.score.away > 0)
            .expect("no goals in 100 matches");

        assert_eq!(live_score(&events, kickoff()), Score::default());
        let end = final_whistle(&events).unwrap();
        assert_eq!(live_score(&events, end), result.score);
        assert_eq!(visible_events(&events, end).len(), events.len());
        assert!(visible_events(&events, kickoff() - Duration::seconds(1)).is_empty());

        let first_goal = first_of(&events, EventType::Goal);
        let at = first_goal.reveal_at.unwrap();
        let side = first_goal.team.unwrap();
        assert_eq!(live_score(&events, at - Duration::seconds(1)).for_side(side).0, 0);
        assert_eq!(live_score(&events, at).for_side(side).0, 1);
    }

    #[test]
    fn test_unrevealed_events_stay_hidden() {
        let result = MatchEngine::with_seed(home_plan(14), away_plan(14), MatchOptions::default(), 1)
            .simulate()
            .unwrap();
        assert!(visible_events(&result.events, kickoff() + Duration::days(1)).is_empty());
    }
}
