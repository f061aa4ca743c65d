//! Trust Game Simulator - Console Runner
//!
//! Loads an experiment description from a TOML file, runs the Monte
//! Carlo simulation and writes the five report files plus a JSON dump
//! of the full statistics into the output directory.

use clap::Parser;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, error, info};
use trust_simulator_core::params::ModelParameters;
use trust_simulator_core::stats::RunStats;
use trust_simulator_core::{report, run_model, SimulationError};

mod config;

use config::{ConfigError, ExperimentConfig};

/// Command line arguments for the console runner
#[derive(Parser, Debug)]
#[command(name = "trust_sim")]
#[command(about = "Evolutionary N-player Trust Game Monte Carlo simulator")]
struct Args {
    /// Experiment configuration file (TOML)
    #[arg(long, default_value = "experiment.toml")]
    config: PathBuf,

    /// Directory for the report files
    #[arg(long, default_value = "logs")]
    output_dir: PathBuf,

    /// Override the configured seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override the configured number of Monte Carlo runs
    #[arg(long)]
    runs_mc: Option<usize>,

    /// Override the configured number of steps per run
    #[arg(long)]
    max_steps: Option<usize>,

    /// Override the output file tag
    #[arg(long)]
    output_file: Option<String>,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Simulation(#[from] SimulationError),

    #[error("cannot write report files: {0}")]
    Io(#[from] std::io::Error),
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "experiment failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let config = ExperimentConfig::load(&args.config)?;
    let (mut params, network) = config.build()?;

    // command-line overrides on top of the file
    if let Some(seed) = args.seed {
        params.seed = seed;
    }
    if let Some(runs_mc) = args.runs_mc {
        params.runs_mc = runs_mc;
    }
    if let Some(max_steps) = args.max_steps {
        params.max_steps = max_steps;
    }
    params.validate()?;
    let tag = args
        .output_file
        .unwrap_or_else(|| config.experiment.output_file.clone());

    info!(config = %args.config.display(), %tag, "starting trust game experiment");
    debug!("parameter values:\n{}", params.export());

    let started = Instant::now();
    let mut stats = run_model(&params, &network)?;
    stats.exp_name = tag.clone();
    info!(elapsed = ?started.elapsed(), "simulation complete");

    write_reports(&stats, &params, &args.output_dir, &tag)?;
    info!(dir = %args.output_dir.display(), "reports written");
    Ok(())
}

/// Write the five delimited reports and the JSON statistics dump
fn write_reports(
    stats: &RunStats,
    params: &ModelParameters,
    dir: &Path,
    tag: &str,
) -> Result<(), CliError> {
    fs::create_dir_all(dir)?;

    let reports: [(&str, fn(&RunStats, &ModelParameters, &mut BufWriter<File>) -> std::io::Result<()>); 5] = [
        ("AllMCruns", report::print_all_stats),
        ("SummaryMCruns", report::print_summary_stats),
        ("AllMCrunsLQ", report::print_all_stats_last_quartile),
        ("SummaryMCrunsLQ", report::print_summary_stats_last_quartile),
        ("TimeSeriesMCruns", report::print_time_series_stats),
    ];
    for (prefix, writer) in reports {
        let path = dir.join(format!("{prefix}_{tag}.txt"));
        let mut out = BufWriter::new(File::create(&path)?);
        writer(stats, params, &mut out)?;
        debug!(file = %path.display(), "report written");
    }

    let json_path = dir.join(format!("Stats_{tag}.json"));
    let mut out = BufWriter::new(File::create(&json_path)?);
    report::write_json_stats(stats, &mut out)?;
    Ok(())
}
