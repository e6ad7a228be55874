//! Skirmish Headless Balance Simulator
//!
//! Loads balance tables and player loadouts from JSON, then replays one stage
//! over a range of seeds using the same front end as live requests.
//!
//! Usage:
//!   cargo run --bin simulator -- --tables FILE --loadout FILE [OPTIONS]
//!
//! Options:
//!   --stage N       Stage to replay (default: 1)
//!   --seed N        First RNG seed (default: 42)
//!   --runs N        Number of runs with incrementing seeds (default: 1000)
//!   --log           Print the full JSON output of the single run at --seed
//!   --json          Print the report as JSON
//!   --quiet         No progress logging
//!
//! Logs go to stderr and honor RUST_LOG; stdout carries only the result.

use skirmish::character::loadout::PlayerLoadout;
use skirmish::error::SimResult;
use skirmish::modes::{run_stage, StageRequest, StageVersion};
use skirmish::rng::BattleRng;
use skirmish::simulator::{run_simulation, SimConfig};
use skirmish::tables::BalanceTables;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

// ── CLI Configuration ────────────────────────────────────────────────

struct CliConfig {
    tables: PathBuf,
    loadout: PathBuf,
    sim: SimConfig,
    print_log: bool,
    json: bool,
}

fn parse_args(args: &[String]) -> Result<CliConfig, String> {
    let mut tables = None;
    let mut loadout = None;
    let mut sim = SimConfig::default();
    let mut print_log = false;
    let mut json = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--tables" => {
                i += 1;
                tables = Some(PathBuf::from(value(args, i, "--tables")?));
            }
            "--loadout" => {
                i += 1;
                loadout = Some(PathBuf::from(value(args, i, "--loadout")?));
            }
            "--stage" => {
                i += 1;
                sim.stage_id = number(args, i, "--stage")?;
            }
            "--seed" => {
                i += 1;
                sim.seed = number(args, i, "--seed")?;
            }
            "--runs" => {
                i += 1;
                sim.num_runs = number(args, i, "--runs")?;
            }
            "--log" => print_log = true,
            "--json" => json = true,
            "--quiet" => sim.verbosity = 0,
            "--verbose" => sim.verbosity = 2,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => return Err(format!("Unknown argument: {other}")),
        }
        i += 1;
    }

    Ok(CliConfig {
        tables: tables.ok_or("--tables is required")?,
        loadout: loadout.ok_or("--loadout is required")?,
        sim,
        print_log,
        json,
    })
}

fn value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str, String> {
    args.get(i)
        .map(String::as_str)
        .ok_or_else(|| format!("{flag} requires a value"))
}

fn number<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> Result<T, String> {
    value(args, i, flag)?
        .parse()
        .map_err(|_| format!("{flag} requires a number"))
}

fn print_usage() {
    eprintln!(
        "Skirmish Headless Balance Simulator\n\
         \n\
         Usage: simulator --tables FILE --loadout FILE [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 --tables FILE   Balance tables JSON\n\
         \x20 --loadout FILE  JSON array of player loadouts\n\
         \x20 --stage N       Stage to replay (default: 1)\n\
         \x20 --seed N        First RNG seed (default: 42)\n\
         \x20 --runs N        Number of runs with incrementing seeds (default: 1000)\n\
         \x20 --log           Print the full JSON output of the run at --seed\n\
         \x20 --json          Print the report as JSON\n\
         \x20 --quiet         No progress logging\n\
         \x20 --verbose       Log every run\n\
         \x20 --help, -h      Show this help"
    );
}

// ── Running ──────────────────────────────────────────────────────────

fn load_loadouts(path: &Path) -> SimResult<Vec<PlayerLoadout>> {
    let json = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

fn run(cli: &CliConfig) -> SimResult<String> {
    let tables = BalanceTables::load(&cli.tables)?;
    let loadouts = load_loadouts(&cli.loadout)?;

    if cli.print_log {
        let request = StageRequest {
            version: StageVersion::Current,
            stage_id: cli.sim.stage_id,
            loadouts,
        };
        let mut rng = BattleRng::from_seed(cli.sim.seed);
        let output = run_stage(&request, &tables, &mut rng)?;
        return Ok(serde_json::to_string_pretty(&output)?);
    }

    let report = run_simulation(&cli.sim, &tables, &loadouts)?;
    Ok(if cli.json {
        report.to_json()
    } else {
        report.to_text()
    })
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(msg) => {
            eprintln!("{msg}");
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    match run(&cli) {
        Ok(out) => {
            println!("{out}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(%err, "simulation failed");
            ExitCode::FAILURE
        }
    }
}
