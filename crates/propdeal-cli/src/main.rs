mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::analyze::AnalyzeArgs;
use commands::grade::GradeArgs;
use commands::irr::IrrArgs;
use commands::mortgage::PaymentArgs;

/// Dubai residential deal analysis
#[derive(Parser)]
#[command(
    name = "propdeal",
    version,
    about = "Dubai residential deal analysis",
    long_about = "A CLI for analyzing Dubai residential real-estate deals with decimal \
                  precision. Computes financing splits, cash flow, yields, DSCR, \
                  horizon ROI, IRR, and a weighted investment grade."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full deal analysis pipeline
    Analyze(AnalyzeArgs),
    /// Calculate the level monthly mortgage payment
    Payment(PaymentArgs),
    /// Solve the internal rate of return for a cash-flow series
    Irr(IrrArgs),
    /// Grade a set of pre-computed deal metrics
    Grade(GradeArgs),
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

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Analyze(args) => commands::analyze::run_analyze(args),
        Commands::Payment(args) => commands::mortgage::run_payment(args),
        Commands::Irr(args) => commands::irr::run_irr(args),
        Commands::Grade(args) => commands::grade::run_grade(args),
        Commands::Version => {
            println!("propdeal {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
