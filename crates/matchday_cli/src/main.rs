//! matchday CLI
//!
//! Fixture JSON → simulated, revealed event log.
//! Used for calibration runs and eyeballing match flow.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use matchday_adapter::{simulate_fixture, FixtureRecord, MatchReport};
use matchday_core::{event_json_schema, EventType};

#[derive(Parser)]
#[command(name = "matchday")]
#[command(about = "Simulate football fixtures and inspect the event log", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate one fixture file
    Simulate {
        /// Fixture JSON file path
        #[arg(long)]
        fixture: PathBuf,

        /// RNG seed (overrides the fixture's own seed)
        #[arg(long)]
        seed: Option<u64>,

        /// Write the report here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,

        /// Pretty-print the report JSON
        #[arg(long, default_value = "false")]
        pretty: bool,

        /// Print a one-line-per-event digest to stderr
        #[arg(long, default_value = "false")]
        summary: bool,
    },

    /// Print the MatchEvent JSON schema
    Schema {
        /// Output file path
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate { fixture, seed, out, pretty, summary } => {
            eprintln!("⚽ Simulating fixture...");
            eprintln!("   Input: {}", fixture.display());
            if let Some(seed) = seed {
                eprintln!("   Seed:  {}", seed);
            }

            let report = run_simulate(&fixture, seed)?;
            let json = render(&report, pretty)?;

            if summary {
                for line in digest(&report) {
                    eprintln!("{}", line);
                }
            }
            print_result(&report);

            match out {
                Some(path) => {
                    write_output(&path, &json)?;
                    eprintln!("✅ Report saved: {}", path.display());
                }
                None => println!("{}", json),
            }
        }

        Commands::Schema { out } => {
            let schema = serde_json::to_string_pretty(&event_json_schema())?;
            match out {
                Some(path) => {
                    write_output(&path, &schema)?;
                    eprintln!("✅ Schema saved: {}", path.display());
                }
                None => println!("{}", schema),
            }
        }
    }

    Ok(())
}

fn load_fixture(path: &Path) -> Result<FixtureRecord> {
    if !path.exists() {
        bail!("Fixture file not found: {}", path.display());
    }
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read fixture {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid fixture JSON in {}", path.display()))
}

fn run_simulate(path: &Path, seed: Option<u64>) -> Result<MatchReport> {
    let fixture = load_fixture(path)?;
    let report = simulate_fixture(&fixture, seed)
        .with_context(|| format!("Simulation failed for {}", path.display()))?;
    info!("simulated {} events", report.events.len());
    Ok(report)
}

fn render(report: &MatchReport, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    };
    Ok(json)
}

fn write_output(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}

/// Headline lines only; snapshots are noise at this level.
fn digest(report: &MatchReport) -> Vec<String> {
    report
        .events
        .iter()
        .filter(|e| e.event_type != EventType::Snapshot)
        .map(|e| {
            let side = e.team.map(|t| format!(" {:?}", t)).unwrap_or_default();
            let actor = e.player.map(|p| format!(" {}", p)).unwrap_or_default();
            let at = e.reveal_at.map(|t| t.format(" @ %H:%M:%S").to_string()).unwrap_or_default();
            format!("{:>3}' {:?}{}{}{}", e.minute, e.event_type, side, actor, at)
        })
        .collect()
}

fn print_result(report: &MatchReport) {
    eprintln!("\n📊 Result:");
    eprintln!("   Score:      {}-{}", report.score.home, report.score.away);
    if report.extra_time_played {
        eprintln!("   Extra time: yes");
    }
    if let Some(shootout) = &report.penalty_shootout {
        eprintln!(
            "   Penalties:  {}-{}{}",
            shootout.goals.home,
            shootout.goals.away,
            if shootout.decided_by_lot { " (decided by lot)" } else { "" }
        );
    }
    eprintln!("   Winner:     {:?}", report.winner);
    eprintln!("   Events:     {}", report.events.len());
    if let Some(end) = report.final_whistle {
        eprintln!("   Final whistle revealed at {}", end.to_rfc3339());
    }
}
