//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod bench;
pub mod compare;
pub mod price;

use std::fmt;

use clap::ValueEnum;
use pricer_core::types::{InstrumentTable, PricingError, PricingResult};
use pricer_models::BlackScholes;
use pricer_pricing::mc::{ParallelMonteCarloPricer, SequentialMonteCarloPricer};

use crate::config::PricerConfig;

/// Pricing method selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Method {
    /// Closed-form Black-Scholes
    Analytic,
    /// Single-threaded Monte Carlo
    Mc,
    /// Parallel Monte Carlo
    ParMc,
}

impl Method {
    /// Every method, in reporting order.
    pub const ALL: [Method; 3] = [Method::Analytic, Method::Mc, Method::ParMc];
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Analytic => write!(f, "analytic"),
            Method::Mc => write!(f, "mc"),
            Method::ParMc => write!(f, "par-mc"),
        }
    }
}

/// Prices `instruments` with `method` under `config`.
pub fn price_with(
    method: Method,
    instruments: &InstrumentTable,
    config: &PricerConfig,
) -> Result<PricingResult, PricingError> {
    let market = config.market();
    match method {
        Method::Analytic => BlackScholes::new(market).price(instruments),
        Method::Mc => {
            SequentialMonteCarloPricer::new(config.simulation_config()?).price(instruments, &market)
        }
        Method::ParMc => {
            ParallelMonteCarloPricer::new(config.simulation_config()?).price(instruments, &market)
        }
    }
}
