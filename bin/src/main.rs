//! Displacement CLI binary.
//!
//! Computes the displacement composite index from collector output on disk.

mod cmd;
mod data;

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use displacement::{Month, RangePreset};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "displacement")]
#[command(about = "Composite index of AI-driven displacement in professional services", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the composite index from a data directory
    Compute {
        /// Collector data directory
        #[arg(short, long, env = "DISPLACEMENT_DATA_DIR", default_value = "data")]
        data_dir: PathBuf,

        /// Output path (defaults to DATA_DIR/composite/displacement_index.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Engine configuration file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Range preset applied to every signal (observed or theoretical)
        #[arg(long)]
        ranges: Option<RangePreset>,

        /// First output month (YYYY-MM)
        #[arg(long)]
        start: Option<Month>,

        /// Last output month (YYYY-MM)
        #[arg(long)]
        end: Option<Month>,

        /// Date stamped into the output (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },

    /// Derive the normalized earnings document
    Earnings {
        /// Raw earnings document
        #[arg(short, long)]
        input: PathBuf,

        /// Where to write the normalized document
        #[arg(short, long)]
        output: PathBuf,

        /// Relabeling index above which a firm quarter is flagged
        #[arg(short, long, default_value_t = displacement::earnings::DEFAULT_RELABELING_THRESHOLD)]
        threshold: f64,
    },

    /// List registered signals
    Signals {
        /// Filter by category
        #[arg(short, long)]
        category: Option<String>,

        /// Show detailed information
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print a computed index as a table
    Show {
        /// Composite index document
        #[arg(short, long)]
        input: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compute {
            data_dir,
            output,
            config,
            ranges,
            start,
            end,
            as_of,
        } => {
            let args = cmd::compute::ComputeArgs {
                data_dir,
                output,
                config,
                ranges,
                start,
                end,
                as_of,
            };
            cmd::compute::compute(args).await?;
        }
        Commands::Earnings {
            input,
            output,
            threshold,
        } => {
            cmd::earnings::normalize_earnings(&input, &output, threshold).await?;
        }
        Commands::Signals { category, verbose } => {
            cmd::signals::list_signals(category.as_deref(), verbose);
        }
        Commands::Show { input } => {
            cmd::show::show_index(&input).await?;
        }
    }

    Ok(())
}
