mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::analysis::{AnalyzeArgs, MetricsArgs, ScenarioArgs};

/// Deterministic financial health analysis
#[derive(Parser)]
#[command(
    name = "fhc",
    version,
    about = "Deterministic financial health analysis",
    long_about = "Turns a chronological series of financial statements plus scenario \
                  levers into trailing metrics, a 3-year projection, bounded health \
                  scores, risk signals and templated recommendations."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Emit debug logs to stderr (otherwise RUST_LOG applies)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full analysis: metrics, scenario, scores, risk signals, narrative
    Analyze(AnalyzeArgs),
    /// Compute trailing metrics only
    Metrics(MetricsArgs),
    /// Project the 3-year scenario only
    Scenario(ScenarioArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Analyze(args) => commands::analysis::run_analyze(args),
        Commands::Metrics(args) => commands::analysis::run_metrics(args),
        Commands::Scenario(args) => commands::analysis::run_scenario(args),
        Commands::Version => {
            println!("fhc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
