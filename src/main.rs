//! Vote Tally - legislative vote aggregation
//!
//! A CLI tool that joins votes, vote results, bills and legislators
//! from CSV files and writes per-legislator and per-bill support/oppose
//! reports.
//!
//! Exit codes:
//!   0 - Success
//!   1 - I/O, configuration or validation error

mod analysis;
mod cli;
mod config;
mod csv_io;
mod models;
mod report;
mod validate;

use anyhow::{Context, Result};
use cli::Args;
use config::{Config, InputConfig, LogFormat};
use models::{InputCounts, RunSummary};
use std::time::Instant;
use tracing::level_filters::LevelFilter;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

fn main() {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        if let Err(e) = handle_init_config() {
            eprintln!("❌ Error: {:#}", e);
            std::process::exit(1);
        }
        return;
    }

    let (mut config, config_warning) = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("❌ Error: {:#}", e);
            std::process::exit(1);
        }
    };
    config.merge_with_args(&args);

    // Initialize logging
    if let Err(e) = init_logging(&args, &config) {
        eprintln!("❌ Error: {:#}", e);
        std::process::exit(1);
    }

    info!("Vote Tally v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    if let Some(warning) = config_warning {
        warn!("{}", warning);
    }

    match run_pipeline(&config) {
        Ok(summary) => {
            println!("✅ CSV reports generated successfully!");
            println!("{}", report::generate_summary_text(&summary, &config.output));
        }
        Err(e) => {
            error!("Vote processing failed: {:#}", e);
            eprintln!("\n❌ Error processing data: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .votetally.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(config::DEFAULT_CONFIG_FILE);

    if path.exists() {
        anyhow::bail!(
            "{} already exists. Remove it first or edit it manually.",
            config::DEFAULT_CONFIG_FILE
        );
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", config::DEFAULT_CONFIG_FILE))?;

    println!(
        "✅ Created {} with default settings.",
        config::DEFAULT_CONFIG_FILE
    );
    println!("   Edit it to customize input and output paths.");
    Ok(())
}

/// Initialize logging based on verbosity settings and log format.
///
/// `RUST_LOG` directives refine the level chosen by the flags.
fn init_logging(args: &Args, config: &Config) -> Result<()> {
    let level = args.log_level(config.general.verbose);
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    match config.general.log_format {
        LogFormat::Compact => tracing::subscriber::set_global_default(builder.compact().finish()),
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish()),
    }
    .context("Failed to set tracing subscriber")
}

/// Load configuration from file or use defaults.
///
/// An unreadable default config file is not fatal; the returned message is
/// logged once logging is up.
fn load_config(args: &Args) -> Result<(Config, Option<String>)> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        return Ok((Config::load(config_path)?, None));
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => Ok((config, None)),
        Ok(None) => Ok((Config::default(), None)),
        Err(e) => Ok((
            Config::default(),
            Some(format!("Failed to load config, using defaults: {:#}", e)),
        )),
    }
}

/// Run the complete pipeline: read, validate, aggregate, write.
fn run_pipeline(config: &Config) -> Result<RunSummary> {
    let start_time = Instant::now();
    info!("Starting vote processing application");

    // Step 1: Load input files
    let rows = load_input(&config.input)?;

    // Step 2: Validate required fields
    let input = validate::validate_all(
        &rows.votes,
        &rows.vote_results,
        &rows.bills,
        &rows.legislators,
    )
    .context("Input validation failed")?;
    let counts = InputCounts {
        votes: input.votes.len(),
        vote_results: input.vote_results.len(),
        bills: input.bills.len(),
        legislators: input.legislators.len(),
    };

    // Step 3: Aggregate
    let output = analysis::run(
        &input.votes,
        &input.vote_results,
        &input.bills,
        &input.legislators,
    );

    // Step 4: Write reports
    report::write_reports(&output, &config.output)?;

    let summary = RunSummary::new(counts, &output, start_time.elapsed().as_secs_f64());
    if let Some(ref path) = config.output.summary {
        report::write_json_summary(&summary, path)?;
    }

    info!("Vote processing application completed successfully");
    Ok(summary)
}

/// Raw rows of the four input files.
struct InputRows {
    votes: Vec<csv_io::Row>,
    vote_results: Vec<csv_io::Row>,
    bills: Vec<csv_io::Row>,
    legislators: Vec<csv_io::Row>,
}

/// Read all four input files.
fn load_input(input: &InputConfig) -> Result<InputRows> {
    info!("Loading input data files");

    let read = |path: &std::path::Path| {
        csv_io::read_rows(path).with_context(|| format!("Failed to load {}", path.display()))
    };

    Ok(InputRows {
        votes: read(&input.votes)?,
        vote_results: read(&input.vote_results)?,
        bills: read(&input.bills)?,
        legislators: read(&input.legislators)?,
    })
}
