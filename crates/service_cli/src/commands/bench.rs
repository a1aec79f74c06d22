//! Bench command implementation
//!
//! Times each pricing method on a real instrument file.

use std::io::Write;
use std::path::Path;
use std::time::{Duration, Instant};

use adapter_loader::load_instruments;
use tracing::{debug, info};

use super::{price_with, Method};
use crate::config::PricerConfig;
use crate::{CliError, Result};

/// Wall-clock summary of repeated runs.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Timing {
    min: Duration,
    mean: Duration,
}

impl Timing {
    fn from_samples(samples: &[Duration]) -> Option<Self> {
        let min = samples.iter().min().copied()?;
        let total: Duration = samples.iter().sum();
        Some(Self {
            min,
            mean: total / samples.len() as u32,
        })
    }
}

/// Run the bench command
pub fn run(input: &Path, repeat: u32, config: &PricerConfig) -> Result<()> {
    if repeat == 0 {
        return Err(CliError::InvalidArgument(
            "repeat must be at least 1".to_string(),
        ));
    }

    let instruments = load_instruments(input)?;
    info!(
        n_instruments = instruments.len(),
        n_paths = config.n_paths,
        repeat,
        "Benchmarking pricing methods"
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{:>10} {:>12} {:>12}", "method", "min_ms", "mean_ms")?;

    for method in Method::ALL {
        let mut samples = Vec::with_capacity(repeat as usize);
        for run in 0..repeat {
            let start = Instant::now();
            price_with(method, &instruments, config)?;
            let elapsed = start.elapsed();
            debug!(%method, run, elapsed_ms = elapsed.as_secs_f64() * 1e3, "Run finished");
            samples.push(elapsed);
        }

        if let Some(timing) = Timing::from_samples(&samples) {
            writeln!(
                out,
                "{:>10} {:>12.3} {:>12.3}",
                method.to_string(),
                timing.min.as_secs_f64() * 1e3,
                timing.mean.as_secs_f64() * 1e3
            )?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timing_summary() {
        let samples = [
            Duration::from_millis(30),
            Duration::from_millis(10),
            Duration::from_millis(20),
        ];
        let timing = Timing::from_samples(&samples).unwrap();
        assert_eq!(timing.min, Duration::from_millis(10));
        assert_eq!(timing.mean, Duration::from_millis(20));
    }

    #[test]
    fn test_no_samples() {
        assert!(Timing::from_samples(&[]).is_none());
    }

    #[test]
    fn test_zero_repeat_rejected() {
        let err = run(Path::new("unused.csv"), 0, &PricerConfig::default()).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }
}
