//! Contiguous work partitioning.

use std::ops::Range;

/// Splits `0..total` into `n_chunks` contiguous ranges of near-equal size.
///
/// The first `total % n_chunks` ranges receive one extra element. Ranges
/// are returned in order, cover `0..total` exactly, and may be empty when
/// `n_chunks > total`.
///
/// # Panics
///
/// Panics if `n_chunks` is 0.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::chunk_ranges;
///
/// assert_eq!(chunk_ranges(10, 3), vec![0..4, 4..7, 7..10]);
/// assert_eq!(chunk_ranges(2, 3), vec![0..1, 1..2, 2..2]);
/// ```
pub fn chunk_ranges(total: usize, n_chunks: usize) -> Vec<Range<usize>> {
    assert!(n_chunks > 0, "n_chunks must be positive");

    let base = total / n_chunks;
    let remainder = total % n_chunks;

    let mut ranges = Vec::with_capacity(n_chunks);
    let mut start = 0;
    for chunk in 0..n_chunks {
        let len = base + usize::from(chunk < remainder);
        ranges.push(start..start + len);
        start += len;
    }
    ranges
}
