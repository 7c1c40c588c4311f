//! Coastal ocean time series for one region.
//!
//! Prints a single JSON document on stdout. By default the real wave product is
//! tried first and any failure falls back to simulated data, so a result is
//! always printed. With `--no-fallback` the requested dataset is fetched as is
//! and failures are reported as `{"error": ...}` with exit code 1.
//!
//! Logs go to stderr as JSON.

mod config;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use ocean_common::TimeWindow;
use ocean_synth::{EntropyNoise, SyntheticOceanSynthesizer};
use retrieval::{
    fetch_timeseries, CopernicusMarineCli, DefaultLoader, RetrievalOrchestrator,
    RetrievalRequest, SubsetRequest, DEFAULT_PROGRAM,
};
use serde::Serialize;
use serde_json::json;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use config::{AppConfig, RegionOverrides};

#[derive(Parser, Debug)]
#[command(name = "ocean-series")]
#[command(about = "Ocean time series with real wave data and simulated fallback")]
struct Args {
    /// Window start, e.g. 2024-01-15T00:00:00
    #[arg(long)]
    start: String,

    /// Window end, e.g. 2024-01-15T12:00:00
    #[arg(long)]
    end: String,

    /// Dataset to subset (default: the configured wave product)
    #[arg(long)]
    dataset_id: Option<String>,

    /// Comma-separated variable names
    #[arg(long, default_value = "VHM0,zos")]
    variables: String,

    #[arg(long, allow_negative_numbers = true)]
    center_lat: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    center_lon: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    min_lon: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    max_lon: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    min_lat: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    max_lat: Option<f64>,

    /// YAML file with region, synthesis and acquisition sections
    #[arg(long, env = "OCEAN_SERIES_CONFIG")]
    config: Option<PathBuf>,

    /// Report acquisition failures instead of simulating data
    #[arg(long)]
    no_fallback: bool,

    /// Path of the copernicusmarine executable
    #[arg(long, env = "COPERNICUSMARINE_BIN", default_value = DEFAULT_PROGRAM)]
    copernicus_bin: PathBuf,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,
}

impl Args {
    fn region_overrides(&self) -> RegionOverrides {
        RegionOverrides {
            center_lat: self.center_lat,
            center_lon: self.center_lon,
            min_lon: self.min_lon,
            max_lon: self.max_lon,
            min_lat: self.min_lat,
            max_lat: self.max_lat,
        }
    }
}

fn init_tracing(log_level: &str) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .json()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer(&mut stdout, value).context("Failed to write JSON output")?;
    writeln!(stdout)?;
    Ok(())
}

fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = AppConfig::load(args.config.as_deref())?;
    config.region = args.region_overrides().apply(&config.region)?;
    if let Some(dataset_id) = &args.dataset_id {
        config.acquisition.wave_dataset_id = dataset_id.clone();
    }
    Ok(config)
}

/// Real wave data when it can be had, simulated data otherwise.
fn run_with_fallback(args: &Args, config: AppConfig) -> Result<()> {
    let request = RetrievalRequest::new(
        &args.start,
        &args.end,
        RetrievalRequest::parse_variables(&args.variables),
    );

    let mut orchestrator = RetrievalOrchestrator::with_synthesizer(
        config.region,
        config.acquisition,
        CopernicusMarineCli::new(&args.copernicus_bin),
        DefaultLoader::default(),
        SyntheticOceanSynthesizer::new(config.synthesis, EntropyNoise::from_entropy()),
    );

    let result = orchestrator.run(&request);
    print_json(&result)
}

/// The requested dataset only; any failure is printed as an error document.
fn run_strict(args: &Args, config: AppConfig) -> Result<ExitCode> {
    let outcome = TimeWindow::parse(&args.start, &args.end)
        .map_err(|e| e.to_string())
        .and_then(|window| {
            let request = SubsetRequest {
                dataset_id: config.acquisition.wave_dataset_id.clone(),
                variables: RetrievalRequest::parse_variables(&args.variables),
                bbox: config.region.bbox,
                window,
            };
            fetch_timeseries(
                &CopernicusMarineCli::new(&args.copernicus_bin),
                &DefaultLoader::default(),
                &config.region,
                &request,
            )
            .map_err(|e| e.to_string())
        });

    match outcome {
        Ok(result) => {
            print_json(&result)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(message) => {
            error!(error = %message, "Time series retrieval failed");
            report_failure(&message)
        }
    }
}

fn error_document(message: &str) -> serde_json::Value {
    json!({ "error": message })
}

fn report_failure(message: &str) -> Result<ExitCode> {
    print_json(&error_document(message))?;
    Ok(ExitCode::FAILURE)
}

fn main() -> Result<ExitCode> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args.log_level)?;

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) if args.no_fallback => {
            let message = format!("{:#}", e);
            error!(error = %message, "Configuration rejected");
            return report_failure(&message);
        }
        Err(e) => return Err(e),
    };
    info!(
        region = %config.region.name,
        start = %args.start,
        end = %args.end,
        variables = %args.variables,
        strict = args.no_fallback,
        "Starting ocean series retrieval"
    );

    if args.no_fallback {
        run_strict(&args, config)
    } else {
        run_with_fallback(&args, config)?;
        Ok(ExitCode::SUCCESS)
    }
}
