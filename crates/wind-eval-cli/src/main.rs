//! wind-eval CLI - wind comfort and safety assessment tool

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

/// Rate wind survey points on the Lawson, NEN8100 and Murakami scales.
#[derive(Parser)]
#[command(name = "wind-eval")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Rate every point of a survey CSV
    Evaluate {
        /// Input CSV file (columns 지점, 풍속, 초과확률, 풍속비)
        #[arg(short, long)]
        input: PathBuf,

        /// Output CSV file with grade and verdict columns
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Nomogram SVG file
        #[arg(long)]
        chart: Option<PathBuf>,

        /// JSON report file
        #[arg(long)]
        json: Option<PathBuf>,

        /// Lawson rule (binned, conditional)
        #[arg(long, default_value = "binned")]
        lawson_policy: String,
    },

    /// Draw the nomogram for a survey CSV
    Chart {
        /// Input CSV file
        #[arg(short, long)]
        input: PathBuf,

        /// Output SVG file
        #[arg(short, long)]
        output: PathBuf,

        /// Chart title
        #[arg(long, default_value = "Nomogram")]
        title: String,
    },

    /// Summarise an exported result CSV
    Summary {
        /// Result CSV written by `evaluate --output`
        #[arg(short, long)]
        input: PathBuf,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(verbose: bool, format: LogFormat) {
    let default = if verbose { "wind_eval=debug" } else { "wind_eval=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into());

    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_format);

    match cli.command {
        Commands::Evaluate {
            input,
            output,
            chart,
            json,
            lawson_policy,
        } => commands::evaluate::run(input, output, chart, json, &lawson_policy),
        Commands::Chart { input, output, title } => commands::chart::run(input, output, title),
        Commands::Summary { input, json } => commands::summary::run(input, json),
    }
}
