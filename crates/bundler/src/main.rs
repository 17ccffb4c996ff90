//! Bundler CLI - lasso-select labelling tasks and push them to Label Studio.
//!
//! Bundler reads a CSV of tasks laid out in 2D, colors them by label, and
//! turns a selection into one or more Label Studio views.
//!
//! # Usage
//!
//! ```bash
//! # Summarize a dataset and its color legend
//! bundler inspect tasks.csv
//!
//! # Print the table feed for a selection, keeping only two categories
//! bundler table tasks.csv --select 0-49 --category cat --category dog
//!
//! # Create views for every task with a score strictly between 0.2 and 0.8
//! bundler export tasks.csv --name "Needs review" --range 0.2,0.8
//!
//! # Compute x/y from an embedding column
//! bundler layout spans.csv --output tasks.csv
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;
mod logging;

/// Bundler - select embedded records and export them as Label Studio views.
#[derive(Parser, Debug)]
#[command(name = "bundler")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    /// Config file to use instead of the default location
    #[arg(long, global = true, env = "BUNDLER_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Summarize a dataset: columns, projects, color mapping and legend
    Inspect(cli::inspect::InspectArgs),

    /// Print the table feed for a selection
    Table(cli::table::TableArgs),

    /// Export a selection to Label Studio as named views
    Export(cli::export::ExportArgs),

    /// Compute x/y layout coordinates from a feature-vector column
    Layout(cli::layout::LayoutArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so config warnings go through eprintln.
    let loaded = match &cli.config {
        Some(path) => bundler_core::Config::load_from(path),
        None => bundler_core::Config::load(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `bundler config path`."
            );
            bundler_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);
    bundler_core::config::load_dotenv();

    tracing::debug!("Bundler v{}", bundler_core::VERSION);

    match cli.command {
        Commands::Inspect(args) => cli::inspect::execute(args).await,
        Commands::Table(args) => cli::table::execute(args, &config).await,
        Commands::Export(args) => cli::export::execute(args, &config).await,
        Commands::Layout(args) => cli::layout::execute(args).await,
        Commands::Config(args) => cli::config::execute(args, cli.config.as_deref()).await,
    }
}
