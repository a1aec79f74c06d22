//! # Random Number Generation Infrastructure
//!
//! This module provides the standard-normal draws consumed by the Monte
//! Carlo pricers.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: every generator is seeded; the same seed and count
//!   reproduce the same draws
//! - **Ownership**: generators are never shared; each block of paths gets a
//!   fresh, exclusively owned instance from a [`StreamFactory`]
//! - **Pluggability**: pricers are generic over [`StreamFactory`], so tests
//!   can inject deterministic sources
//! - **Efficiency**: zero-allocation batch operations via `&mut [f64]` slices
//!
//! ## Module Structure
//!
//! - [`prng`]: Seeded pseudo-random generator implementing [`NormalSource`]
//! - [`streams`]: Stream factories and seed derivation
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::rng::{NormalSource, PricerRng, SeededStreams, StreamFactory};
//!
//! let mut rng = PricerRng::from_seed(12345);
//! let draws = rng.draw_standard_normal(1000);
//! assert_eq!(draws.len(), 1000);
//!
//! // Streams are addressed by (instrument, block) under one run seed
//! let streams = SeededStreams::new(42);
//! let mut a = streams.stream(0, 3);
//! let mut b = streams.stream(0, 3);
//! assert_eq!(a.draw_standard_normal(8), b.draw_standard_normal(8));
//! ```

pub mod prng;
pub mod streams;

// Public re-exports
pub use prng::PricerRng;
pub use streams::{resolve_seed, stream_seed, SeededStreams, StreamFactory};

/// A source of independent standard normal variates.
///
/// Implementations are stateful and exclusively owned by one unit of work.
pub trait NormalSource {
    /// Fills the buffer with standard normal (mean=0, std=1) variates.
    fn fill_standard_normal(&mut self, buffer: &mut [f64]);

    /// Draws `count` standard normal variates into a new vector.
    fn draw_standard_normal(&mut self, count: usize) -> Vec<f64> {
        let mut draws = vec![0.0; count];
        self.fill_standard_normal(&mut draws);
        draws
    }

    /// Advances the source by `count` draws, discarding them.
    fn skip(&mut self, count: usize) {
        let mut scratch = [0.0; 256];
        let mut remaining = count;
        while remaining > 0 {
            let n = remaining.min(scratch.len());
            self.fill_standard_normal(&mut scratch[..n]);
            remaining -= n;
        }
    }
}

#[cfg(test)]
mod tests;
