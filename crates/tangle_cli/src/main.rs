//! Tangle profiling CLI
//!
//! Match stats from a ledger, and lifetime profile folding and inspection
//! over a directory-backed store.

#[cfg(feature = "cli")]
use anyhow::{Context, Result};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use serde::Serialize;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "tangle")]
#[command(about = "Match stats and lifetime player profiles for Tangle", long_about = None)]
struct Cli {
    /// Profiling tunables (YAML); defaults apply when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Print the stats of a finished match
    Stats {
        /// Ledger JSON file path
        #[arg(long)]
        ledger: PathBuf,
    },

    /// Fold a finished match into a player's lifetime profile
    Fold {
        /// Profile store directory
        #[arg(long)]
        store: PathBuf,

        /// Ledger JSON file path
        #[arg(long)]
        ledger: PathBuf,

        /// Player id whose profile is updated
        #[arg(long)]
        player: String,
    },

    /// Print the current radar and snapshot history of a player
    Radar {
        #[arg(long)]
        store: PathBuf,

        #[arg(long)]
        player: String,
    },

    /// Print a player's stored lifetime profile
    Profile {
        #[arg(long)]
        store: PathBuf,

        #[arg(long)]
        player: String,
    },
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = tangle_cli::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Stats { ledger } => {
            let stats = tangle_cli::compute_stats(&ledger)?;
            print_json(&stats)?;
        }

        Commands::Fold { store, ledger, player } => {
            let (profile, summary) = tangle_cli::fold_ledger(&store, &ledger, &player, &config)?;
            println!("Folded {} into {}", ledger.display(), profile.player_id);
            println!("   Outcome:      {:?}", summary.outcome);
            println!("   Opponent:     {}", if summary.vs_ai { "AI" } else { "human" });
            println!("   Total games:  {}", summary.total_games);
            if summary.snapshot_taken {
                println!("   Radar snapshot taken");
            }
        }

        Commands::Radar { store, player } => {
            let report = tangle_cli::radar_report(&store, &player, &config)?;
            print_json(&report)?;
        }

        Commands::Profile { store, player } => {
            let profile = tangle_cli::load_profile(&store, &player)?;
            print_json(&profile)?;
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to render JSON")?;
    println!("{}", json);
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("tangle CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
