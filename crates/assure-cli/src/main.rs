//! # assure CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use assure_cli::customers::{run_customers, CustomersArgs};
use assure_cli::risk::{run_risk, RiskArgs};
use assure_cli::sample::{run_sample, SampleArgs};

/// Assure back-office CLI.
///
/// Queries and summarizes customer datasets with the same rules as the
/// HTTP service, exports the sample book, and scores risk.
#[derive(Parser, Debug)]
#[command(name = "assure", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Query or summarize customers.
    Customers(CustomersArgs),

    /// Write the sample customer dataset as JSON.
    Sample(SampleArgs),

    /// Derive a risk profile from credit, claims, fraud, and compliance scores.
    Risk(RiskArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    // Logs go to stderr so stdout stays parseable JSON.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Customers(args) => run_customers(&args),
        Commands::Sample(args) => run_sample(&args),
        Commands::Risk(args) => run_risk(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parse_customers_query() {
        let cli = Cli::try_parse_from([
            "assure",
            "customers",
            "query",
            "--search",
            "sarah",
            "--limit",
            "5",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Customers(_)));
    }

    #[test]
    fn cli_parse_sample_output() {
        let cli = Cli::try_parse_from(["assure", "sample", "--output", "book.json"]).unwrap();
        if let Commands::Sample(args) = cli.command {
            assert_eq!(args.output, Some(std::path::PathBuf::from("book.json")));
        } else {
            panic!("expected sample");
        }
    }

    #[test]
    fn cli_parse_risk_requires_all_scores() {
        assert!(Cli::try_parse_from(["assure", "risk", "--credit", "10"]).is_err());
        let cli = Cli::try_parse_from([
            "assure",
            "risk",
            "--credit",
            "10",
            "--claims",
            "20",
            "--fraud",
            "30",
            "--compliance",
            "40",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Risk(_)));
    }

    #[test]
    fn cli_parse_verbose_levels() {
        let cli = Cli::try_parse_from(["assure", "-vv", "sample"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn cli_parse_no_subcommand_errors() {
        assert!(Cli::try_parse_from(["assure"]).is_err());
    }
}
