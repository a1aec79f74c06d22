//! bsm - Command Line Operations for Black-Scholes-Merton Pricing
//!
//! Operational entry point for the analytic and Monte Carlo pricers.
//!
//! # Commands
//!
//! - `bsm price --input <csv> --method analytic|mc|par-mc` - Price an instrument file
//! - `bsm compare --input <csv>` - Cross-validate Monte Carlo against the closed form
//! - `bsm bench --input <csv>` - Time every pricing method
//!
//! # Configuration
//!
//! Settings come from, in increasing priority: defaults, an optional TOML
//! file (`--config`), `BSM_*` environment variables and command line flags.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use pricer_pricing::mc::PartitionAxis;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;

use commands::Method;
use config::{build_config, CliArgs as ConfigCliArgs, LogLevel, PricerConfig};
pub use error::{CliError, Result};

/// Black-Scholes-Merton European call pricer
#[derive(Parser, Debug)]
#[command(name = "bsm")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path (TOML format)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Risk-free rate
    #[arg(long, global = true, env = "BSM_RATE")]
    rate: Option<f64>,

    /// Monte Carlo paths per instrument
    #[arg(long, global = true, env = "BSM_N_PATHS")]
    n_paths: Option<usize>,

    /// Parallel workers (defaults to logical CPUs)
    #[arg(long, global = true, env = "BSM_N_WORKERS")]
    n_workers: Option<usize>,

    /// Run seed for reproducible Monte Carlo
    #[arg(long, global = true, env = "BSM_SEED")]
    seed: Option<u64>,

    /// Parallel partition axis (paths, instruments)
    #[arg(long, global = true, env = "BSM_PARTITION")]
    partition: Option<PartitionAxis>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "BSM_LOG_LEVEL")]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Price an instrument file
    Price {
        /// Instrument CSV (strike, asset_price, sigma, maturity)
        #[arg(short, long)]
        input: PathBuf,

        /// Pricing method
        #[arg(short, long, value_enum, default_value_t = Method::Analytic)]
        method: Method,

        /// Output CSV (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compare Monte Carlo prices against the closed form
    Compare {
        /// Instrument CSV
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Time each pricing method
    Bench {
        /// Instrument CSV
        #[arg(short, long)]
        input: PathBuf,

        /// Runs per method
        #[arg(short, long, default_value = "5")]
        repeat: u32,
    },
}

impl From<&Cli> for ConfigCliArgs {
    fn from(cli: &Cli) -> Self {
        ConfigCliArgs {
            config_file: cli.config.clone(),
            rate: cli.rate,
            n_paths: cli.n_paths,
            n_workers: cli.n_workers,
            seed: cli.seed,
            partition: cli.partition,
            log_level: cli.log_level,
        }
    }
}

fn init_tracing(log_level: LogLevel) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level.as_filter_str())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn dispatch(command: Commands, config: &PricerConfig) -> Result<()> {
    match command {
        Commands::Price {
            input,
            method,
            output,
        } => commands::price::run(&input, method, output.as_deref(), config),
        Commands::Compare { input } => commands::compare::run(&input, config),
        Commands::Bench { input, repeat } => commands::bench::run(&input, repeat, config),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = build_config(&ConfigCliArgs::from(&cli));

    // Tracing needs the configured level, so it starts even if config failed
    init_tracing(
        config
            .as_ref()
            .map(|config| config.log_level)
            .unwrap_or_default(),
    );

    let result = config.map_err(CliError::from).and_then(|config| {
        info!(
            rate = config.rate,
            n_paths = config.n_paths,
            n_workers = ?config.n_workers,
            seed = ?config.seed,
            partition = %config.partition,
            "Configuration loaded"
        );
        dispatch(cli.command, &config)
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "bsm failed");
            ExitCode::FAILURE
        }
    }
}
