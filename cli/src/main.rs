mod audit;
mod db;
mod export;
mod extract;
mod fix;
mod models;
mod schema;
mod stats;
mod store;

use std::path::PathBuf;

use anyhow::Result;
use ardoise_core::Registry;
use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "ardoise")]
#[command(about = "Ingredient-mention maintenance for a menu corpus", long_about = None)]
struct Cli {
    /// Path to the corpus SQLite database
    #[arg(long, default_value = "menu_corpus.db")]
    db: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit recorded mentions for false positives (dry run by default)
    Audit {
        /// Delete the false positives found by this pass
        #[arg(long)]
        apply: bool,
    },
    /// Scan dish names for ingredients not yet recorded
    Extract,
    /// Normalize misspelled labels and resolve generic labels to subtypes
    Fix,
    /// Write the ingredient and dish summary documents
    Export {
        /// Output directory
        #[arg(long, default_value = "export")]
        out: PathBuf,
    },
    /// Print corpus statistics
    Stats,
}

fn init_telemetry() {
    let fmt_layer = tracing_subscriber::fmt::layer();
    let env_filter = tracing_subscriber::EnvFilter::from_default_env();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn main() -> Result<()> {
    init_telemetry();

    let cli = Cli::parse();
    let rules = Registry::builtin();
    let mut conn = db::connect(&cli.db)?;

    match cli.command {
        Commands::Audit { apply } => audit::run(rules, &mut conn, apply),
        Commands::Extract => extract::run(rules, &mut conn),
        Commands::Fix => fix::run(rules, &mut conn),
        Commands::Export { out } => export::run(&mut conn, &out),
        Commands::Stats => stats::run(&mut conn),
    }
}
