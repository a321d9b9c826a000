//! Parallel trial-division prime counting
//!
//! # Critical Invariants
//!
//! - Each worker owns a disjoint, contiguous slice of `[2, max]`
//! - Workers never share a counter; partial counts are summed after join,
//!   so the result does not depend on the number of workers

use std::ops::RangeInclusive;

/// Smallest prime; candidates below it are never counted
const FIRST_PRIME: u64 = 2;

/// Fallback when the platform cannot report its parallelism
const DEFAULT_WORKERS: usize = 4;

/// Primality by testing every divisor in `[2, x)`
///
/// Stops at the first divisor found.
///
/// # Example
/// ```
/// use cpubench_core::is_prime;
///
/// assert!(is_prime(7));
/// assert!(!is_prime(9));
/// assert!(!is_prime(1));
/// ```
pub fn is_prime(x: u64) -> bool {
    if x < FIRST_PRIME {
        return false;
    }
    for y in FIRST_PRIME..x {
        if x % y == 0 {
            return false;
        }
    }
    true
}

/// Number of processing units available to this process
pub fn available_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(DEFAULT_WORKERS)
}

/// Count primes in `[2, max]` using every available processing unit
///
/// # Example
/// ```
/// use cpubench_core::count_primes;
///
/// assert_eq!(count_primes(10), 4);
/// assert_eq!(count_primes(1), 0);
/// ```
pub fn count_primes(max: u64) -> u64 {
    count_primes_with_workers(max, available_workers())
}

/// Count primes in `[2, max]` with an explicit worker count
///
/// The candidate range is split into at most `workers` contiguous chunks,
/// one scoped thread per chunk. A worker count of 0 is treated as 1.
///
/// # Panics
/// Re-raises a panic from any worker on the calling thread.
pub fn count_primes_with_workers(max: u64, workers: usize) -> u64 {
    if max < FIRST_PRIME {
        return 0;
    }
    let chunks = partition(FIRST_PRIME..=max, workers.max(1));
    tracing::debug!(max, workers, chunks = chunks.len(), "counting primes");

    if chunks.len() == 1 {
        return count_range(chunks[0].clone());
    }

    std::thread::scope(|s| {
        let handles: Vec<_> = chunks
            .into_iter()
            .map(|chunk| s.spawn(move || count_range(chunk)))
            .collect();

        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
            .sum()
    })
}

/// Sequential count for one worker's slice
fn count_range(range: RangeInclusive<u64>) -> u64 {
    let (start, end) = (*range.start(), *range.end());
    let count = range.filter(|&x| is_prime(x)).count() as u64;
    tracing::trace!(start, end, count, "chunk done");
    count
}

/// Split `range` into at most `parts` contiguous, non-empty, disjoint chunks
/// covering it exactly
fn partition(range: RangeInclusive<u64>, parts: usize) -> Vec<RangeInclusive<u64>> {
    let (start, end) = (*range.start(), *range.end());
    if start > end {
        return Vec::new();
    }
    let total = end - start + 1;
    let parts = (parts as u64).min(total);
    let base = total / parts;
    let extra = total % parts;

    let mut chunks = Vec::with_capacity(parts as usize);
    let mut lo = start;
    for k in 0..parts {
        let len = base + u64::from(k < extra);
        let hi = lo + (len - 1);
        chunks.push(lo..=hi);
        lo = hi.wrapping_add(1);
    }
    chunks
}
