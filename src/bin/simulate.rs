//! Balance simulator CLI.
//!
//! Runs batches of seeded tower climbs and prints where they end.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                   # Default: 1000 starter-deck runs
//!   cargo run --bin simulate -- -n 100         # Smaller batch
//!   cargo run --bin simulate -- --seed 42      # Reproducible batch

use ascent::simulator::{run_simulation, SimConfig};
use std::env;

fn main() {
    let args: Vec<String> = env::args().collect();
    let config = parse_args(&args);

    println!("Ascent balance simulator");
    println!();
    println!("Configuration:");
    println!("  Runs:        {}", config.num_runs);
    println!("  Start floor: {}", config.start_floor);
    println!("  Deck size:   {}", config.deck.len());
    if let Some(seed) = config.seed {
        println!("  Seed:        {}", seed);
    }
    println!();

    let report = match run_simulation(&config) {
        Ok(report) => report,
        Err(violations) => {
            eprintln!("Deck is not equippable:");
            for v in violations {
                eprintln!("  - {}", v);
            }
            std::process::exit(1);
        }
    };

    println!("{}", report.to_text());

    if args.iter().any(|a| a == "--json") {
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        std::fs::write(&filename, report.to_json()).expect("Failed to write JSON report");
        println!("JSON report saved to: {}", filename);
    }
}

fn parse_args(args: &[String]) -> SimConfig {
    let mut config = SimConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    config.num_runs = args[i + 1].parse().unwrap_or(1000);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-f" | "--floor" => {
                if i + 1 < args.len() {
                    config.start_floor = args[i + 1].parse().unwrap_or(1);
                    i += 1;
                }
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    config
}

fn print_help() {
    println!("Ascent Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>      Number of simulation runs (default: 1000)");
    println!("    -s, --seed <S>      Random seed for reproducibility");
    println!("    -f, --floor <F>     Starting floor (default: 1)");
    println!("    --json              Save JSON report");
    println!("    -h, --help          Show this help");
    println!();
    println!("EXAMPLES:");
    println!("    cargo run --bin simulate                   # Default batch");
    println!("    cargo run --bin simulate -- -n 100         # Smaller batch");
    println!("    cargo run --bin simulate -- --seed 42      # Reproducible");
}
