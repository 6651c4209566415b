//! matchday_adapter: persisted roster/tactics records → matchday_core inputs,
//! and a one-call API to simulate a fixture and reveal it.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use matchday_core::reveal::{final_whistle, with_reveal_times};
use matchday_core::{
    Bench, BenchConfig, MatchEngine, MatchEvent, MatchOptions, PenaltyShootoutResult, Player,
    RevealConfig, Score, SidePlan, SimError, TacticalPlayer, Team, TeamSide,
};

pub mod mapper;

pub use mapper::{parse_category, parse_slot, to_instruction, to_player};

/// -----------------------------
/// Persisted records
/// -----------------------------

/// Attribute columns; absent means "not rated".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttributesRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pace: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strength: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finishing: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passing: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dribbling: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defending: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub positioning: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composure: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reflexes: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handling: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribution: Option<u8>,
}

/// One squad row. `id`, `name` and `position` are required by [`to_player`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerRecord {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default)]
    pub name: Option<String>,
    /// Natural position as a slot code ("GK", "LCB", ...).
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub attributes: AttributesRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stamina: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineupEntryRecord {
    pub player_id: u32,
    pub slot: String,
}

/// Free-form instruction row, validated by [`to_instruction`].
///
/// `action` is one of `move` (player → target_slot), `substitute`
/// (player off, player_in or category on) or `swap` (player ↔ other).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstructionRecord {
    #[serde(default)]
    pub minute: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_slot: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_in: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other: Option<u32>,
}

/// Bench selection. An empty `players` list benches every squad player not
/// in the lineup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BenchRecord {
    #[serde(default)]
    pub players: Vec<u32>,
    /// Category code ("goalkeeper", "forward", ...) → designated player id.
    #[serde(default)]
    pub designated: BTreeMap<String, u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamSheetRecord {
    #[serde(default)]
    pub name: Option<String>,
    pub squad: Vec<PlayerRecord>,
    pub lineup: Vec<LineupEntryRecord>,
    #[serde(default)]
    pub bench: BenchRecord,
    #[serde(default)]
    pub instructions: Vec<InstructionRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub kickoff: DateTime<Utc>,
    /// Cup rules: extra time and penalties when level.
    #[serde(default)]
    pub must_produce_winner: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Reveal pacing; `MATCHDAY_REVEAL_PROFILE` decides when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reveal: Option<RevealConfig>,
    pub home: TeamSheetRecord,
    pub away: TeamSheetRecord,
}

/// -----------------------------
/// Output
/// -----------------------------

/// Everything a caller persists for one played fixture.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixture_id: Option<String>,
    pub kickoff: DateTime<Utc>,
    pub score: Score,
    pub winner: Option<TeamSide>,
    pub extra_time_played: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub penalty_shootout: Option<PenaltyShootoutResult>,
    /// Reveal instant of the final whistle.
    pub final_whistle: Option<DateTime<Utc>>,
    /// Events with `reveal_at` set.
    pub events: Vec<MatchEvent>,
}

#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("{entity} is missing required field `{field}`")]
    MissingField { entity: String, field: &'static str },
    #[error("unknown slot or bench category code: {code}")]
    InvalidSlot { code: String },
    #[error("player {id} is not in the squad")]
    UnknownPlayer { id: u32 },
    #[error("instruction #{index} is invalid: {reason}")]
    InvalidInstruction { index: usize, reason: String },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("simulation error: {0}")]
    Sim(#[from] SimError),
}

pub type Result<T> = std::result::Result<T, AdapterError>;

/// -----------------------------
/// Translation
/// -----------------------------

/// Build one side's engine input from its team sheet.
///
/// Lineup and bench entries reference squad rows by id. Roster-level
/// defects (size, duplicates) are reported by the engine as [`SimError`].
pub fn build_side(sheet: &TeamSheetRecord, side: TeamSide) -> Result<SidePlan> {
    let squad = sheet.squad.iter().map(to_player).collect::<Result<Vec<Player>>>()?;

    let mut starters = Vec::with_capacity(sheet.lineup.len());
    for entry in &sheet.lineup {
        let player = find_player(&squad, entry.player_id)?;
        starters.push(TacticalPlayer::starter(player.clone(), parse_slot(&entry.slot)?));
    }
    let team = Team::new(side, starters)?;

    let bench_players: Vec<Player> = if sheet.bench.players.is_empty() {
        let started: HashSet<u32> = sheet.lineup.iter().map(|e| e.player_id).collect();
        squad.iter().filter(|p| !started.contains(&p.id.0)).cloned().collect()
    } else {
        sheet
            .bench
            .players
            .iter()
            .map(|&id| find_player(&squad, id).cloned())
            .collect::<Result<_>>()?
    };

    let mut config = BenchConfig::new();
    for (code, &id) in &sheet.bench.designated {
        let category = parse_category(code)?;
        config.designate(category, find_player(&bench_players, id)?.id);
    }

    let instructions = sheet
        .instructions
        .iter()
        .enumerate()
        .map(|(i, record)| to_instruction(i, record))
        .collect::<Result<Vec<_>>>()?;

    debug!(
        "[build_side] {:?} '{}': {} starters, {} on bench, {} instructions",
        side,
        sheet.name.as_deref().unwrap_or("unnamed"),
        team.players().len(),
        bench_players.len(),
        instructions.len()
    );

    Ok(SidePlan::new(team, instructions, Bench::new(bench_players, config)))
}

fn find_player(players: &[Player], id: u32) -> Result<&Player> {
    players.iter().find(|p| p.id.0 == id).ok_or(AdapterError::UnknownPlayer { id })
}

/// -----------------------------
/// Simulation API
/// -----------------------------

/// Simulate a fixture and stamp every event with its reveal instant.
///
/// `seed` overrides the fixture's own seed; with neither the engine draws
/// from OS entropy.
pub fn simulate_fixture(fixture: &FixtureRecord, seed: Option<u64>) -> Result<MatchReport> {
    let home = build_side(&fixture.home, TeamSide::Home)?;
    let away = build_side(&fixture.away, TeamSide::Away)?;
    let options = if fixture.must_produce_winner {
        MatchOptions::knockout()
    } else {
        MatchOptions::default()
    };

    let result = match seed.or(fixture.seed) {
        Some(seed) => MatchEngine::with_seed(home, away, options, seed).simulate()?,
        None => MatchEngine::from_entropy(home, away, options).simulate()?,
    };

    let reveal = fixture.reveal.unwrap_or_else(RevealConfig::from_env_or_default);
    let events = with_reveal_times(&result.events, fixture.kickoff, &reveal);
    let winner = result.winner();

    info!(
        "[simulate_fixture] {} finished {}-{} ({} events, winner {:?})",
        fixture.id.as_deref().unwrap_or("fixture"),
        result.score.home,
        result.score.away,
        events.len(),
        winner
    );

    Ok(MatchReport {
        fixture_id: fixture.id.clone(),
        kickoff: fixture.kickoff,
        score: result.score,
        winner,
        extra_time_played: result.extra_time_played,
        penalty_shootout: result.penalty_shootout,
        final_whistle: final_whistle(&events),
        events,
    })
}

/// JSON in, JSON out. The seed, if any, comes from the fixture itself.
pub fn simulate_fixture_json(fixture_json: &str) -> Result<String> {
    let fixture: FixtureRecord = serde_json::from_str(fixture_json)?;
    let report = simulate_fixture(&fixture, None)?;
    Ok(serde_json::to_string(&report)?)
}
