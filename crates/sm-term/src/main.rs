//! Slot Machine terminal front-end
//!
//! Usage:
//!   slot-machine play              - Play interactively (default)
//!   slot-machine odds              - Print odds and RTP for the configuration
//!   slot-machine simulate          - Run a headless batch of pulls
//!   slot-machine check-config      - Validate the configuration and print it

mod game;
mod input;
mod logging;
mod terminal;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;

use sm_core::{ConfigError, MachineConfig};

#[derive(Parser)]
#[command(name = "slot-machine", version, about = "Terminal slot machine")]
struct Cli {
    /// Config file (.yaml, .yml or .json); built-in defaults when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play interactively
    Play {
        /// Seed the machine for a reproducible session
        #[arg(long)]
        seed: Option<u64>,
        /// Override the animation frame delay
        #[arg(long)]
        frame_ms: Option<u64>,
        /// Plain output without ANSI colors or in-place redraw
        #[arg(long)]
        no_color: bool,
    },
    /// Print odds and RTP for the configuration
    Odds,
    /// Run a headless batch of pulls
    Simulate {
        /// Number of pulls
        #[arg(short, long, default_value_t = 100_000)]
        pulls: u64,
        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Validate the configuration and print it
    CheckConfig,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration Error:\n{e}");
            std::process::exit(1);
        }
    };

    let command = cli.command.unwrap_or(Commands::Play {
        seed: None,
        frame_ms: None,
        no_color: false,
    });

    match command {
        Commands::Play {
            seed,
            frame_ms,
            no_color,
        } => {
            if let Some(ms) = frame_ms {
                config.display.frame_delay_ms = ms;
            }
            if no_color {
                config.display.color = false;
            }
            start_logging(&config);
            game::play(&config, seed)
        }
        Commands::Odds => print_odds(&config),
        Commands::Simulate { pulls, seed } => {
            let report = sm_core::simulate(&config, pulls, seed)?;
            println!("{report}");
            Ok(())
        }
        Commands::CheckConfig => {
            println!("Configuration is valid.\n");
            print!("{}", config.to_yaml()?);
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<MachineConfig, ConfigError> {
    match path {
        Some(path) => MachineConfig::load(path),
        None => {
            let config = MachineConfig::default();
            config.validate()?;
            Ok(config)
        }
    }
}

/// A log file that cannot be created is reported and the game goes on
fn start_logging(config: &MachineConfig) {
    match logging::init(&config.logging) {
        Ok(Some(path)) => info!("Logging to {}", path.display()),
        Ok(None) => {}
        Err(e) => eprintln!("Warning: file logging disabled: {e:#}"),
    }
    info!("Starting slot machine...");
}

fn print_odds(config: &MachineConfig) -> Result<()> {
    let symbols = config.symbol_set()?;
    let ledger = config.ledger();
    let names: Vec<&str> = symbols.values().iter().map(|s| s.as_str()).collect();

    println!("Symbols ({}): {}", symbols.len(), names.join(" "));
    println!("Slots: {}", config.machine.slot_count);
    println!(
        "Pull cost: ${}, win prize: ${}",
        ledger.pull_cost(),
        ledger.win_prize()
    );
    if ledger.jackpot_enabled() {
        println!(
            "Jackpot: {} x{} = ${}",
            ledger.jackpot().symbol,
            ledger.jackpot().multiplier,
            ledger.jackpot_prize()
        );
    } else {
        println!("JACKPOT DISABLED");
    }
    println!();
    println!("{}", ledger.odds(symbols.len(), config.machine.slot_count));
    Ok(())
}
