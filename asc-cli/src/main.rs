//! asc: CLI binary for the ability-stone probability engine.
//!
//! Subcommands:
//! - tables
//! - query
//! - play
//! - sim

mod render;

use std::env;
use std::io::{self, BufRead, Write};
use std::process;
use std::thread;
use std::time::Duration;

use asc_core::{Attempt, EngineConfig, History, Preset};
use asc_dp::Params;
use asc_logging::{BuildManifestV1, TableSummaryV1, BUILD_MANIFEST_VERSION};
use asc_oracle::{TableHandle, TableSet};
use asc_session::{EngineError, Session, Snapshot};

use render::{position, render_grid, render_snapshot};

fn value_of<'a>(args: &'a [String], i: usize, flag: &str) -> &'a str {
    match args.get(i + 1) {
        Some(v) => v.as_str(),
        None => {
            eprintln!("Missing value for {flag}");
            process::exit(1);
        }
    }
}

fn parse_or_exit<T: std::str::FromStr>(raw: &str, flag: &str) -> T {
    raw.parse().unwrap_or_else(|_| {
        eprintln!("Invalid {flag} value: {raw}");
        process::exit(1);
    })
}

fn load_config(path: Option<&str>) -> EngineConfig {
    match path {
        None => EngineConfig::default(),
        Some(p) => EngineConfig::load(p).unwrap_or_else(|e| {
            eprintln!("Failed to load config {p}: {e}");
            process::exit(1);
        }),
    }
}

fn parse_history(raw: &str) -> Vec<Attempt> {
    Attempt::parse_list(raw).unwrap_or_else(|e| {
        eprintln!("Invalid --history: {e}");
        process::exit(1);
    })
}

fn build_tables(config: &EngineConfig) -> TableHandle {
    let handle = TableHandle::spawn(config.clone());
    if let Err(e) = handle.wait() {
        eprintln!("Table build failed: {e}");
        process::exit(1);
    }
    handle
}

/// Retry `action` until the tables are ready.
fn until_ready(mut action: impl FnMut() -> Result<Snapshot, EngineError>) -> Result<Snapshot, EngineError> {
    let mut announced = false;
    loop {
        match action() {
            Err(EngineError::NotReady) => {
                if !announced {
                    eprintln!("Probability tables are still building...");
                    announced = true;
                }
                thread::sleep(Duration::from_millis(50));
            }
            other => return other,
        }
    }
}

fn cmd_tables(args: &[String]) {
    let mut config_path: Option<String> = None;
    let mut manifest: Option<String> = None;

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                println!(
                    r#"asc tables

USAGE:
    asc tables [--config PATH] [--manifest PATH]

OPTIONS:
    --config PATH     Engine config YAML (default: built-in presets)
    --manifest PATH   Write a JSON build manifest
"#
                );
                return;
            }
            "--config" => {
                config_path = Some(value_of(args, i, "--config").to_string());
                i += 2;
            }
            "--manifest" => {
                manifest = Some(value_of(args, i, "--manifest").to_string());
                i += 2;
            }
            other => {
                eprintln!("Unknown option for `asc tables`: {other}");
                eprintln!("Run `asc tables --help` for usage.");
                process::exit(1);
            }
        }
    }

    let config = load_config(config_path.as_deref());
    println!("Building probability tables...");
    let handle = build_tables(&config);
    let Ok(set) = handle.get() else {
        eprintln!("Table build failed");
        process::exit(1);
    };

    let summaries = summarize(set);
    println!();
    for t in &summaries {
        println!(
            "  - {:<15} cells={} build={:.2}s fresh-stone={:.4}%",
            t.preset,
            t.cells,
            t.build_secs,
            t.start_value * 100.0
        );
    }

    if let Some(path) = manifest {
        let config_hash = match config_path.as_deref() {
            Some(p) => std::fs::read(p).ok().map(|b| asc_logging::hash_config_bytes(&b)),
            None => set.config_hash().map(str::to_string),
        };
        let m = BuildManifestV1 {
            build_manifest_version: BUILD_MANIFEST_VERSION,
            created_ts_ms: asc_logging::now_ms(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            git_hash: asc_logging::try_git_hash(),
            config_hash,
            num_attempts: asc_core::NUM_ATTEMPTS as u32,
            pity_tiers: asc_core::PITY_TIERS as u32,
            default_preset: config.default_preset.name().to_string(),
            tables: summaries,
        };
        asc_logging::write_manifest_atomic(&path, &m).unwrap_or_else(|e| {
            eprintln!("Failed to write manifest: {e}");
            process::exit(1);
        });
        println!("Manifest written to {path}");
    }
}

fn summarize(set: &TableSet) -> Vec<TableSummaryV1> {
    Preset::ALL
        .iter()
        .filter_map(|&p| set.get(p).ok())
        .map(|t| TableSummaryV1 {
            preset: t.preset.name().to_string(),
            cells: t.info.cells as u64,
            build_secs: t.info.build_secs,
            start_value: t.start_value(),
        })
        .collect()
}

fn cmd_query(args: &[String]) {
    let mut config_path: Option<String> = None;
    let mut preset: Option<Preset> = None;
    let mut history: Vec<Attempt> = Vec::new();
    let mut json = false;
    let mut grid = false;

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                println!(
                    r#"asc query

USAGE:
    asc query [--config PATH] [--preset 14|16] [--history "1s 2f 3f"] [--json] [--grid]

OPTIONS:
    --config PATH     Engine config YAML (default: built-in presets)
    --preset P        Goal preset (default: config default_preset)
    --history H       Attempts as <track><s|f>, tracks 1..3
    --json            Print the snapshot as JSON
    --grid            Also print the goal matrix with the current position
"#
                );
                return;
            }
            "--config" => {
                config_path = Some(value_of(args, i, "--config").to_string());
                i += 2;
            }
            "--preset" => {
                preset = Some(parse_or_exit(value_of(args, i, "--preset"), "--preset"));
                i += 2;
            }
            "--history" => {
                history = parse_history(value_of(args, i, "--history"));
                i += 2;
            }
            "--json" => {
                json = true;
                i += 1;
            }
            "--grid" => {
                grid = true;
                i += 1;
            }
            other => {
                eprintln!("Unknown option for `asc query`: {other}");
                eprintln!("Run `asc query --help` for usage.");
                process::exit(1);
            }
        }
    }

    let config = load_config(config_path.as_deref());
    let handle = build_tables(&config);
    let mut session = Session::with_preset(handle.clone(), preset.unwrap_or(config.default_preset));
    let mut snapshot = session.query();
    for a in history {
        snapshot = session.attempt(a.track, a.outcome);
    }
    let snapshot = snapshot.unwrap_or_else(|e| {
        eprintln!("Query failed: {e}");
        process::exit(1);
    });

    if json {
        match serde_json::to_string_pretty(&snapshot) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("Failed to encode snapshot: {e}");
                process::exit(1);
            }
        }
    } else {
        print!("{}", render_snapshot(&snapshot));
    }

    if grid {
        if let Ok(t) = handle.get().and_then(|set| set.get(session.preset())) {
            println!();
            print!("{}", render_grid(&t.goals, Some(position(session.history()))));
        }
    }
}

fn print_play_help() {
    println!(
        r#"Commands:
    1s 1f 2s 2f 3s 3f   Record an attempt (track 1..3, success/fail)
    u, undo             Remove the last attempt
    r, reset            Clear the history
    p, preset 14|16     Switch preset (history kept)
    g, grid             Show the goal matrix
    ?, help             This help
    q, quit             Exit"#
    );
}

fn cmd_play(args: &[String]) {
    let mut config_path: Option<String> = None;
    let mut preset: Option<Preset> = None;

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                println!(
                    r#"asc play

USAGE:
    asc play [--config PATH] [--preset 14|16]

Reads commands from stdin, one per line. Type `help` for the command list.
"#
                );
                return;
            }
            "--config" => {
                config_path = Some(value_of(args, i, "--config").to_string());
                i += 2;
            }
            "--preset" => {
                preset = Some(parse_or_exit(value_of(args, i, "--preset"), "--preset"));
                i += 2;
            }
            other => {
                eprintln!("Unknown option for `asc play`: {other}");
                eprintln!("Run `asc play --help` for usage.");
                process::exit(1);
            }
        }
    }

    let mut config = load_config(config_path.as_deref());
    if let Some(p) = preset {
        config.default_preset = p;
    }
    // Tables build in the background; actions poll until they are ready.
    let handle = TableHandle::spawn(config.clone());
    let mut session = Session::new(handle.clone(), &config);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    print_outcome(until_ready(|| session.query()));

    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        let cmd = line.trim();
        if cmd.is_empty() {
            continue;
        }
        let mut words = cmd.split_whitespace();
        let head = words.next().unwrap_or_default();
        let result = match head {
            "q" | "quit" | "exit" => break,
            "?" | "help" => {
                print_play_help();
                continue;
            }
            "u" | "undo" => until_ready(|| session.undo()),
            "r" | "reset" => until_ready(|| session.reset()),
            "p" | "preset" => match words.next().map(str::parse::<Preset>) {
                Some(Ok(p)) => until_ready(|| session.select_preset(p)),
                _ => {
                    eprintln!("Usage: preset 14|16");
                    continue;
                }
            },
            "g" | "grid" => {
                if let Ok(t) = handle.get().and_then(|set| set.get(session.preset())) {
                    print!("{}", render_grid(&t.goals, Some(position(session.history()))));
                } else {
                    eprintln!("Probability tables are still building...");
                }
                continue;
            }
            other => match other.parse::<Attempt>() {
                Ok(a) => until_ready(|| session.attempt(a.track, a.outcome)),
                Err(e) => {
                    eprintln!("{e} (type `help` for commands)");
                    continue;
                }
            },
        };
        print_outcome(result);
        let _ = stdout.flush();
    }
}

fn print_outcome(result: Result<Snapshot, EngineError>) {
    match result {
        Ok(s) => print!("{}", render_snapshot(&s)),
        Err(e) => eprintln!("Error: {e}"),
    }
}

fn cmd_sim(args: &[String]) {
    let mut config_path: Option<String> = None;
    let mut preset: Option<Preset> = None;
    let mut history: Vec<Attempt> = Vec::new();
    let mut games: u64 = 100_000;
    let mut seed: u64 = 0;

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                println!(
                    r#"asc sim

USAGE:
    asc sim [--config PATH] [--preset 14|16] [--history H] [--games N] [--seed S]

OPTIONS:
    --config PATH   Engine config YAML (default: built-in presets)
    --preset P      Goal preset (default: config default_preset)
    --history H     Start from this history instead of a fresh stone
    --games N       Number of games to simulate (default: 100000)
    --seed S        RNG seed (default: 0)
"#
                );
                return;
            }
            "--config" => {
                config_path = Some(value_of(args, i, "--config").to_string());
                i += 2;
            }
            "--preset" => {
                preset = Some(parse_or_exit(value_of(args, i, "--preset"), "--preset"));
                i += 2;
            }
            "--history" => {
                history = parse_history(value_of(args, i, "--history"));
                i += 2;
            }
            "--games" => {
                games = parse_or_exit(value_of(args, i, "--games"), "--games");
                i += 2;
            }
            "--seed" => {
                seed = parse_or_exit(value_of(args, i, "--seed"), "--seed");
                i += 2;
            }
            other => {
                eprintln!("Unknown option for `asc sim`: {other}");
                eprintln!("Run `asc sim --help` for usage.");
                process::exit(1);
            }
        }
    }

    let config = load_config(config_path.as_deref());
    let preset = preset.unwrap_or(config.default_preset);
    println!("Building probability tables...");
    let handle = build_tables(&config);
    let Ok(t) = handle.get().and_then(|set| set.get(preset)) else {
        eprintln!("No table for preset {preset}");
        process::exit(1);
    };

    let mut replayed = History::new();
    for a in history {
        replayed.record(a, t.dims().n);
    }
    let Some(start) = Params::from_history(replayed.attempts(), &t.config, t.dims()) else {
        println!("History already exceeds the negative goal; success rate is 0%.");
        return;
    };
    println!("Running simulation...");
    let report = asc_dp::simulate(&t.table, &t.goals, start, games, seed);

    println!();
    println!("Simulation ({preset}):");
    println!("  - Games: {}", report.games);
    println!("  - Table value: {:.4}%", report.expected * 100.0);
    println!("  - Observed:    {:.4}%", report.success_rate() * 100.0);
    let se = report.std_error();
    if se > 0.0 {
        println!(
            "  - Deviation:   {:+.2} standard errors",
            (report.success_rate() - report.expected) / se
        );
    }
}

fn print_help() {
    eprintln!(
        r#"asc - ability-stone probability engine

USAGE:
    asc <COMMAND> [OPTIONS]

COMMANDS:
    tables      Build every preset's table and print build info
    query       Print the snapshot for a history
    play        Interactive session on stdin
    sim         Monte Carlo check of the table's policy

OPTIONS:
    -h, --help          Print this help message
    -V, --version       Print version

Run `asc <COMMAND> --help` for command options.
"#
    );
}

fn print_version() {
    println!("asc {}", env!("CARGO_PKG_VERSION"));
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_help();
        process::exit(0);
    }

    match args[1].as_str() {
        "-h" | "--help" | "help" => {
            print_help();
        }
        "-V" | "--version" => {
            print_version();
        }
        "tables" => {
            cmd_tables(&args[2..]);
        }
        "query" => {
            cmd_query(&args[2..]);
        }
        "play" => {
            cmd_play(&args[2..]);
        }
        "sim" => {
            cmd_sim(&args[2..]);
        }
        cmd => {
            eprintln!("Unknown command: {cmd}");
            eprintln!("Run `asc --help` for usage.");
            process::exit(1);
        }
    }
}
