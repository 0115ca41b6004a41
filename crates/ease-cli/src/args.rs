//! CLI argument definitions using clap
//!
//! - ease evaluate flow.json        # Score a structured flow
//! - ease evaluate -t log.md        # Score a step log
//! - ease parse log.md              # Show the flow parsed from a step log
//! - ease check output.txt          # Validate a model's verdict
//! - ease batch cases/              # Run evaluation cases
//! - ease compare base.json new.json
//! - ease config show|init|validate

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ease")]
#[command(about = "Ease - deterministic ease-of-use scoring for UI interaction flows")]
#[command(
    long_about = r#"Ease - deterministic ease-of-use scoring for UI interaction flows

USAGE:
  ease evaluate flow.json            # Print the verdict for a flow
  ease evaluate -t run.md --explain  # Score a step log, show the arithmetic
  ease batch cases/ --format json    # Run a directory of cases
  ease compare base.json new.json    # Detect score regressions

Use "-" as a file name to read from stdin."#
)]
#[command(version)]
pub struct Cli {
    /// Path to configuration file (default: ease.toml when present)
    #[arg(long, global = true)]
    pub config_file: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Score a flow and print the verdict as JSON
    Evaluate {
        /// Flow file (JSON or YAML), or a step log with --transcript
        flow: PathBuf,

        /// Treat the input as a text/markdown step log
        #[arg(long, short)]
        transcript: bool,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,

        /// Print the verdict together with its penalty breakdown
        #[arg(long)]
        explain: bool,
    },

    /// Parse a step log and print the resulting flow as JSON
    Parse {
        /// Text or markdown step log
        transcript: PathBuf,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Validate a model's raw verdict output
    Check {
        /// File holding the model's response
        file: PathBuf,
    },

    /// Run evaluation cases and report the results
    Batch {
        /// Case file or directory of case files
        path: PathBuf,

        /// Report format: table, json, markdown
        #[arg(long)]
        format: Option<String>,

        /// Write the report to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Only run these case IDs
        #[arg(long, value_delimiter = ',')]
        ids: Vec<String>,

        /// Only run cases carrying any of these tags
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,

        /// Stop at the first case that errors
        #[arg(long)]
        fail_fast: bool,
    },

    /// Compare two JSON batch reports for regressions
    Compare {
        /// Baseline report
        baseline: PathBuf,

        /// Current report
        current: PathBuf,

        /// Per-case score drop that counts as a regression
        #[arg(long)]
        threshold: Option<u8>,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Display the effective configuration
    Show,

    /// Write a configuration file with default settings
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Validate a configuration file
    Validate,
}
