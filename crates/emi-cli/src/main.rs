mod commands;
mod input;
mod logger;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::calculate::CalculateArgs;
use commands::schedule::ScheduleArgs;
use commands::session::SessionArgs;

/// Loan EMI calculator
#[derive(Parser)]
#[command(
    name = "emi",
    version,
    about = "Loan EMI (equated monthly installment) calculations",
    long_about = "Computes the monthly installment, total interest and total amount payable \
                  on a reducing-balance loan, builds amortization schedules, and replays \
                  typed edits through the calculator's input gates."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log debug detail to stderr
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate monthly EMI, total interest and total amount
    Calculate(CalculateArgs),
    /// Build a monthly or yearly amortization schedule
    Schedule(ScheduleArgs),
    /// Replay field edits through the validation gates
    Session(SessionArgs),
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
    logger::init_cli_logger(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Calculate(args) => commands::calculate::run_calculate(args),
        Commands::Schedule(args) => commands::schedule::run_schedule(args),
        Commands::Session(args) => commands::session::run_session(args),
        Commands::Version => {
            println!("emi {}", env!("CARGO_PKG_VERSION"));
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
