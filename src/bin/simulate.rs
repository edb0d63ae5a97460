//! Exploration pacing simulator CLI.
//!
//! Runs many isolated engine instances across seeds and reports discovery
//! pacing and luck spread.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                      # Default: 100 runs
//!   cargo run --bin simulate -- -n 20 -l 15       # 20 runs at skill 15
//!   cargo run --bin simulate -- --seed mars       # Reproducible batch
//!   cargo run --bin simulate -- --json            # Machine-readable report

use std::env;
use std::process;

use wayfarer::sim::{run_simulation, SimConfig};

fn main() {
    let args: Vec<String> = env::args().collect();
    let (config, as_json) = parse_args(&args);

    if !as_json && config.verbosity >= 1 {
        println!("Wayfarer exploration simulator");
        println!();
        println!("Configuration:");
        println!("  Runs:        {}", config.num_runs);
        println!("  Base seed:   {}", config.seed);
        println!("  Ticks/run:   {}", config.ticks_per_run);
        println!("  Skill level: {}", config.skill_level);
        println!();
    }

    let report = run_simulation(&config);

    if as_json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("failed to serialize report: {err}");
                process::exit(1);
            }
        }
    } else {
        println!("{}", report.to_text());
    }
}

fn parse_args(args: &[String]) -> (SimConfig, bool) {
    let mut config = SimConfig::default();
    let mut as_json = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                i += 1;
                config.num_runs = parse_value(args, i, "--runs");
            }
            "-t" | "--ticks" => {
                i += 1;
                config.ticks_per_run = parse_value(args, i, "--ticks");
            }
            "-l" | "--level" => {
                i += 1;
                config.skill_level = parse_value(args, i, "--level");
            }
            "--seed" => {
                i += 1;
                config.seed = args
                    .get(i)
                    .unwrap_or_else(|| usage_error("--seed needs a value"))
                    .clone();
            }
            "--json" => {
                as_json = true;
                config.verbosity = 0;
            }
            "-v" | "--verbose" => config.verbosity = 2,
            "-q" | "--quiet" => config.verbosity = 0,
            "-h" | "--help" => {
                print_help();
                process::exit(0);
            }
            other => usage_error(&format!("unknown option: {other}")),
        }
        i += 1;
    }

    (config, as_json)
}

fn parse_value<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> T {
    args.get(i)
        .and_then(|v| v.parse().ok())
        .unwrap_or_else(|| usage_error(&format!("{flag} needs a numeric value")))
}

fn usage_error(message: &str) -> ! {
    eprintln!("{message}");
    eprintln!("Run with --help for usage.");
    process::exit(2);
}

fn print_help() {
    println!("Wayfarer exploration simulator");
    println!();
    println!("Options:");
    println!("  -n, --runs N     Number of independent runs (default 100)");
    println!("  -t, --ticks N    Session tick budget per run (default 10000)");
    println!("  -l, --level N    Exploration skill level (default 5)");
    println!("      --seed S     Base seed string (default wayfarer-sim)");
    println!("      --json       Emit the report as JSON");
    println!("  -v, --verbose    Per-run detail");
    println!("  -q, --quiet      No output except the report");
    println!("  -h, --help       This help");
}
