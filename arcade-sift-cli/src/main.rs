//! arcade-sift CLI
//!
//! Command-line interface for normalizing a MAME `-listxml` catalog dump,
//! classifying machines into subsystems, and auditing a curated favorites
//! list against the catalog's dependency graph.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod error;

#[derive(Parser)]
#[command(name = "arcade-sift")]
#[command(about = "Classify and audit arcade machine catalogs", long_about = None)]
struct Cli {
    /// Path to the raw catalog dump (output of `mame -listxml`)
    #[arg(short = 'x', long, global = true, default_value = "mame.xml")]
    xml: PathBuf,

    /// Path to the normalized catalog artifact
    #[arg(short = 'j', long, global = true, default_value = "mame.json")]
    json: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Materialize the normalized catalog from the dump (skipped if present)
    Normalize,

    /// Compute per-subsystem machine lists from a mapping config
    Plan {
        /// Subsystem mapping config (TOML with a [systems] table)
        #[arg(short, long, default_value = "systems.toml")]
        config: PathBuf,

        /// Only plan the named subsystem
        #[arg(short, long)]
        subsystem: Option<String>,

        /// Write the plan as JSON to this path instead of printing it
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check a curated favorites list against the catalog
    Check {
        /// Favorites config (TOML with a [favorites] table)
        #[arg(short, long, default_value = "favorites.toml")]
        config: PathBuf,
    },

    /// Print enabled favorites in declaration order
    Favorites {
        /// Favorites config (TOML with a [favorites] table)
        #[arg(short, long, default_value = "favorites.toml")]
        config: PathBuf,
    },

    /// Print catalog summary counts
    Stats,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Normalize => commands::run_normalize(&cli.xml, &cli.json),
        Commands::Plan {
            config,
            subsystem,
            output,
        } => commands::run_plan(&cli.xml, &cli.json, &config, subsystem.as_deref(), output),
        Commands::Check { config } => commands::run_check(&cli.xml, &cli.json, &config),
        Commands::Favorites { config } => commands::run_favorites(&config),
        Commands::Stats => commands::run_stats(&cli.xml, &cli.json),
    };

    if let Err(e) = result {
        log::error!("{e}");
        std::process::exit(1);
    }
}
