//! Compare command implementation
//!
//! Cross-validates both Monte Carlo pricers against the closed form.

use std::io::Write;
use std::path::Path;

use adapter_loader::load_instruments;
use pricer_core::types::PricingResult;
use tracing::info;

use super::{price_with, Method};
use crate::config::PricerConfig;
use crate::Result;

/// Run the compare command
pub fn run(input: &Path, config: &PricerConfig) -> Result<()> {
    let instruments = load_instruments(input)?;
    info!(
        n_instruments = instruments.len(),
        n_paths = config.n_paths,
        "Comparing pricing methods"
    );

    let analytic = price_with(Method::Analytic, &instruments, config)?;
    let mc = price_with(Method::Mc, &instruments, config)?;
    let par_mc = price_with(Method::ParMc, &instruments, config)?;

    let stdout = std::io::stdout();
    let max_error = render(&mut stdout.lock(), &analytic, &mc, &par_mc)?;
    info!(max_abs_error = max_error, "Comparison complete");

    Ok(())
}

/// Writes the comparison table and returns the largest absolute error.
fn render<W: Write>(
    out: &mut W,
    analytic: &PricingResult,
    mc: &PricingResult,
    par_mc: &PricingResult,
) -> std::io::Result<f64> {
    writeln!(
        out,
        "{:>6} {:>12} {:>12} {:>10} {:>12} {:>10}",
        "row", "analytic", "mc", "mc_err", "par_mc", "par_err"
    )?;

    let mut max_error: f64 = 0.0;
    for (row, &exact) in analytic.option_prices.iter().enumerate() {
        let mc_price = mc.option_prices[row];
        let par_price = par_mc.option_prices[row];
        let mc_error = (mc_price - exact).abs();
        let par_error = (par_price - exact).abs();
        max_error = max_error.max(mc_error).max(par_error);

        writeln!(
            out,
            "{:>6} {:>12.6} {:>12.6} {:>10.6} {:>12.6} {:>10.6}",
            row, exact, mc_price, mc_error, par_price, par_error
        )?;
    }

    Ok(max_error)
}
