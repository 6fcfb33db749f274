//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values. Every flag is optional:
//! with no arguments the tool reads `data/input/*.csv` and writes
//! `data/output/*.csv`.

use crate::config::LogFormat;
use clap::Parser;
use std::path::PathBuf;

/// Vote Tally - legislative vote aggregation
///
/// Reads votes, vote results, bills and legislators from CSV files and
/// writes per-legislator and per-bill support/oppose reports.
///
/// Examples:
///   vote-tally
///   vote-tally --input-dir ./fixtures --output-dir ./reports
///   vote-tally --summary run.json --log-format json
///   vote-tally --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Path to configuration file
    ///
    /// If not specified, looks for .votetally.toml in the current directory
    #[arg(short, long, value_name = "FILE", env = "VOTE_TALLY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding votes.csv, vote_results.csv, bills.csv and legislators.csv
    #[arg(long, value_name = "DIR")]
    pub input_dir: Option<PathBuf>,

    /// Directory for the generated reports
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Also write a JSON run summary to this file
    #[arg(long, value_name = "FILE")]
    pub summary: Option<PathBuf>,

    /// Log output format (compact, json)
    #[arg(long, value_name = "FORMAT")]
    pub log_format: Option<LogFormat>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .votetally.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(ref dir) = self.input_dir {
            if !dir.is_dir() {
                return Err(format!(
                    "Input directory does not exist: {}",
                    dir.display()
                ));
            }
        }

        if let Some(ref config) = self.config {
            if !config.is_file() {
                return Err(format!("Config file does not exist: {}", config.display()));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    ///
    /// `verbose_default` comes from the configuration file.
    pub fn log_level(&self, verbose_default: bool) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose || verbose_default {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
