//! Deterministic per-block random streams.
//!
//! Paths are simulated in fixed-size blocks. Every `(instrument, block)`
//! pair owns an independent stream whose seed is derived from the run seed,
//! so the draws feeding a given path never depend on how work is split
//! across workers.

use rand::Rng;
use tracing::debug;

use super::{NormalSource, PricerRng};

/// Golden-ratio increment used by SplitMix64.
const GOLDEN_GAMMA: u64 = 0x9e37_79b9_7f4a_7c15;

/// One round of the SplitMix64 finaliser.
///
/// # Algorithm Reference
///
/// - Steele, G. L., Lea, D. & Flood, C. H. (2014). "Fast Splittable
///   Pseudorandom Number Generators". OOPSLA.
#[inline]
fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(GOLDEN_GAMMA);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Derives the seed of the stream for `(instrument, block)` under `run_seed`.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::rng::stream_seed;
///
/// assert_eq!(stream_seed(42, 0, 1), stream_seed(42, 0, 1));
/// assert_ne!(stream_seed(42, 0, 1), stream_seed(42, 1, 0));
/// ```
#[inline]
pub fn stream_seed(run_seed: u64, instrument: usize, block: usize) -> u64 {
    let per_instrument = splitmix64(run_seed ^ splitmix64(instrument as u64));
    splitmix64(per_instrument.wrapping_add((block as u64).wrapping_mul(GOLDEN_GAMMA)))
}

/// Returns `seed`, or a freshly drawn one when `None`.
///
/// A fresh seed is logged at debug level so that a run can be replayed.
pub fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        let fresh: u64 = rand::thread_rng().gen();
        debug!(seed = fresh, "no seed supplied, drew a fresh one");
        fresh
    })
}

/// Factory of independent normal streams, addressed by instrument and block.
///
/// Implementations must be deterministic: the same `(instrument, block)`
/// must always yield a source producing the same draws. The factory is
/// shared read-only between workers; each returned source is owned by the
/// caller.
pub trait StreamFactory: Sync {
    /// Source type handed to the simulation kernel.
    type Source: NormalSource;

    /// Creates the stream for the given instrument row and path block.
    fn stream(&self, instrument: usize, block: usize) -> Self::Source;
}

/// Default factory: a [`PricerRng`] per block, seeded via [`stream_seed`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeededStreams {
    seed: u64,
}

impl SeededStreams {
    /// Creates a factory for the given run seed.
    #[inline]
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Returns the run seed.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl StreamFactory for SeededStreams {
    type Source = PricerRng;

    #[inline]
    fn stream(&self, instrument: usize, block: usize) -> PricerRng {
        PricerRng::from_seed(stream_seed(self.seed, instrument, block))
    }
}
