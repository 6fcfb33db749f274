//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.votetally.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = ".votetally.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Input file locations.
    #[serde(default)]
    pub input: InputConfig,

    /// Output file locations.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Single-line human readable events (default)
    #[default]
    Compact,
    /// One JSON object per event
    Json,
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,

    /// Log output format.
    #[serde(default)]
    pub log_format: LogFormat,
}

/// Paths of the four input datasets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_votes")]
    pub votes: PathBuf,

    #[serde(default = "default_vote_results")]
    pub vote_results: PathBuf,

    #[serde(default = "default_bills")]
    pub bills: PathBuf,

    #[serde(default = "default_legislators")]
    pub legislators: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            votes: default_votes(),
            vote_results: default_vote_results(),
            bills: default_bills(),
            legislators: default_legislators(),
        }
    }
}

const INPUT_DIR: &str = "data/input";
const OUTPUT_DIR: &str = "data/output";

const VOTES_FILE: &str = "votes.csv";
const VOTE_RESULTS_FILE: &str = "vote_results.csv";
const BILLS_FILE: &str = "bills.csv";
const LEGISLATORS_FILE: &str = "legislators.csv";
const LEGISLATORS_REPORT_FILE: &str = "legislators-support-oppose-count.csv";
const BILLS_REPORT_FILE: &str = "bills.csv";

fn default_votes() -> PathBuf {
    Path::new(INPUT_DIR).join(VOTES_FILE)
}

fn default_vote_results() -> PathBuf {
    Path::new(INPUT_DIR).join(VOTE_RESULTS_FILE)
}

fn default_bills() -> PathBuf {
    Path::new(INPUT_DIR).join(BILLS_FILE)
}

fn default_legislators() -> PathBuf {
    Path::new(INPUT_DIR).join(LEGISLATORS_FILE)
}

/// Paths of the generated reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Per-legislator support/oppose counts.
    #[serde(default = "default_legislators_report")]
    pub legislators: PathBuf,

    /// Per-bill supporter/opposer counts.
    #[serde(default = "default_bills_report")]
    pub bills: PathBuf,

    /// Optional JSON run summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            legislators: default_legislators_report(),
            bills: default_bills_report(),
            summary: None,
        }
    }
}

fn default_legislators_report() -> PathBuf {
    Path::new(OUTPUT_DIR).join(LEGISLATORS_REPORT_FILE)
}

fn default_bills_report() -> PathBuf {
    Path::new(OUTPUT_DIR).join(BILLS_REPORT_FILE)
}

impl InputConfig {
    /// Point all four inputs at their default file names inside `dir`.
    pub fn rebase(&mut self, dir: &Path) {
        self.votes = dir.join(VOTES_FILE);
        self.vote_results = dir.join(VOTE_RESULTS_FILE);
        self.bills = dir.join(BILLS_FILE);
        self.legislators = dir.join(LEGISLATORS_FILE);
    }
}

impl OutputConfig {
    /// Point both reports at their default file names inside `dir`.
    pub fn rebase(&mut self, dir: &Path) {
        self.legislators = dir.join(LEGISLATORS_REPORT_FILE);
        self.bills = dir.join(BILLS_REPORT_FILE);
    }
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(DEFAULT_CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref dir) = args.input_dir {
            self.input.rebase(dir);
        }
        if let Some(ref dir) = args.output_dir {
            self.output.rebase(dir);
        }
        if let Some(ref summary) = args.summary {
            self.output.summary = Some(summary.clone());
        }
        if let Some(format) = args.log_format {
            self.general.log_format = format;
        }

        // Flags always override
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
