//! Game balance simulator CLI.
//!
//! Auto-plays seeded characters through the real game to analyze balance.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                       # 100 runs per class to floor 10
//!   cargo run --bin simulate -- -n 20 -f 3         # 20 runs per class to floor 3
//!   cargo run --bin simulate -- --class mage -s 42 # Reproducible mage runs

use castlecrawl::build_info;
use castlecrawl::character::PlayerClass;
use castlecrawl::core::config::{BattleTiming, GameConfig};
use castlecrawl::simulator::{run_simulation, SimConfig};
use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("error: {}", message);
            eprintln!("run with --help for usage");
            return ExitCode::FAILURE;
        }
    };
    let config = options.config;

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              CASTLECRAWL BALANCE SIMULATOR                    ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs per class: {}", config.num_runs);
    println!("  Target Floor:   {}", config.target_floor);
    println!("  Max Updates:    {}", config.max_updates_per_run);
    let classes: Vec<&str> = config.classes_to_run().iter().map(|c| c.name()).collect();
    println!("  Classes:        {}", classes.join(", "));
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&config);

    println!("{}", report.to_text());

    if options.json {
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        if let Err(err) = std::fs::write(&filename, report.to_json()) {
            eprintln!("error: failed to write {}: {}", filename, err);
            return ExitCode::FAILURE;
        }
        println!("JSON report saved to: {}", filename);
    }

    ExitCode::SUCCESS
}

struct Options {
    config: SimConfig,
    json: bool,
}

fn next_value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str, String> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| format!("{} needs a value", flag))
}

fn parse_class(name: &str) -> Result<PlayerClass, String> {
    PlayerClass::all()
        .into_iter()
        .find(|c| c.name().eq_ignore_ascii_case(name))
        .ok_or_else(|| format!("unknown class '{}'", name))
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut config = SimConfig::default();
    let mut game_config: Option<GameConfig> = None;
    let mut json = false;

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "-n" | "--runs" => {
                let value = next_value(args, &mut i, flag)?;
                config.num_runs = value.parse().map_err(|_| format!("bad run count '{}'", value))?;
            }
            "-f" | "--floor" => {
                let value = next_value(args, &mut i, flag)?;
                config.target_floor = value.parse().map_err(|_| format!("bad floor '{}'", value))?;
            }
            "-s" | "--seed" => {
                let value = next_value(args, &mut i, flag)?;
                config.seed = Some(value.parse().map_err(|_| format!("bad seed '{}'", value))?);
            }
            "-u" | "--updates" => {
                let value = next_value(args, &mut i, flag)?;
                config.max_updates_per_run = value
                    .parse()
                    .map_err(|_| format!("bad update limit '{}'", value))?;
            }
            "-c" | "--class" => {
                let value = next_value(args, &mut i, flag)?;
                config.classes.push(parse_class(value)?);
            }
            "--config" => {
                let path = next_value(args, &mut i, flag)?;
                let loaded = GameConfig::load(path).map_err(|err| err.to_string())?;
                game_config = Some(loaded);
            }
            "--paced" => {
                // keep the configured battle delays instead of resolving instantly
                config.game.battle = BattleTiming::default();
            }
            "--json" => json = true,
            "-v" | "--verbose" => config.verbosity = 2,
            "--quick" => {
                let classes = std::mem::take(&mut config.classes);
                config = SimConfig {
                    classes,
                    ..SimConfig::quick(3)
                };
            }
            "-V" | "--version" => {
                println!("{}", build_info::version_line());
                std::process::exit(0);
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            other => return Err(format!("unknown option '{}'", other)),
        }
        i += 1;
    }

    if let Some(mut loaded) = game_config {
        // a config file keeps instant battles unless --paced asked otherwise
        if config.game.battle == BattleTiming::instant() {
            loaded.battle = BattleTiming::instant();
        }
        config.game = loaded;
    }

    Ok(Options { config, json })
}

fn print_help() {
    println!("Castlecrawl Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>      Runs per class (default: 100)");
    println!("    -f, --floor <F>     Target floor to clear (default: 10)");
    println!("    -s, --seed <S>      Random seed for reproducibility");
    println!("    -u, --updates <U>   Max game updates per run (default: 2,000,000)");
    println!("    -c, --class <C>     Only simulate this class (repeatable)");
    println!("    --config <PATH>     Load game rules from a JSON file");
    println!("    --paced             Keep battle presentation delays");
    println!("    --json              Save JSON report");
    println!("    --quick             Quick test (20 runs to floor 3)");
    println!("    -v, --verbose       Per-run output");
    println!("    -V, --version       Print version");
    println!("    -h, --help          Show this help");
    println!();
    println!("Set RUST_LOG=castlecrawl=debug for engine logs.");
}
