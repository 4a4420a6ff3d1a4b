//! rotrack CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::OutputFormat;

#[derive(Parser)]
#[command(name = "rotrack", version, about = "Rotation evaluation tracker")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the evaluation period timeline
    Timeline {
        /// Path to the dossier .toml file
        #[arg(long)]
        dossier: PathBuf,

        /// Evaluate the timeline as of this date (YYYY-MM-DD, default: now)
        #[arg(long)]
        as_of: Option<String>,

        /// Output format: text, json, markdown
        #[arg(long)]
        format: Option<String>,
    },

    /// Classify the performance trend across periods
    Trend {
        /// Path to the dossier .toml file
        #[arg(long)]
        dossier: PathBuf,

        /// Output format: text, json
        #[arg(long)]
        format: Option<String>,
    },

    /// Classify the aggregate performance level from selected criteria
    Classify {
        /// Path to the dossier .toml file
        #[arg(long)]
        dossier: PathBuf,

        /// Criterion numbers to select (comma-separated, 1-based)
        #[arg(long)]
        select: Option<String>,

        /// Criterion numbers to deselect (comma-separated, 1-based)
        #[arg(long)]
        deselect: Option<String>,

        /// Clear all recorded selections before applying --select/--deselect
        #[arg(long)]
        reset: bool,

        /// Output format: text, json
        #[arg(long)]
        format: Option<String>,
    },

    /// Write a progress report
    Report {
        /// Path to the dossier .toml file
        #[arg(long)]
        dossier: PathBuf,

        /// Evaluate the report as of this date (YYYY-MM-DD, default: now)
        #[arg(long)]
        as_of: Option<String>,

        /// Output format: text, json, markdown, all (default: from config)
        #[arg(long)]
        format: Option<String>,

        /// Output directory (default: from config)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Validate dossier TOML files
    Validate {
        /// Path to dossier file or directory
        #[arg(long)]
        dossier: PathBuf,
    },

    /// Create starter config and example dossier
    Init,
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = config::load_config_from(cli.config.as_deref())?;
    init_tracing(&config.log_filter);

    match cli.command {
        Commands::Timeline {
            dossier,
            as_of,
            format,
        } => {
            let format = OutputFormat::resolve(format.as_deref(), &config.default_format)?;
            commands::timeline::execute(dossier, as_of, format)
        }
        Commands::Trend { dossier, format } => {
            let format = OutputFormat::resolve(format.as_deref(), &config.default_format)?;
            commands::trend::execute(dossier, format)
        }
        Commands::Classify {
            dossier,
            select,
            deselect,
            reset,
            format,
        } => {
            let format = OutputFormat::resolve(format.as_deref(), &config.default_format)?;
            commands::classify::execute(dossier, select, deselect, reset, format)
        }
        Commands::Report {
            dossier,
            as_of,
            format,
            output,
        } => {
            let format = format.unwrap_or(config.default_format);
            let output = output.unwrap_or(config.output_dir);
            commands::report::execute(dossier, as_of, format, output)
        }
        Commands::Validate { dossier } => commands::validate::execute(dossier),
        Commands::Init => commands::init::execute(),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
