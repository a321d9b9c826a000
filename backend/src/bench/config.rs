//! Benchmark configuration

use crate::bench::runner::BenchmarkError;
use crate::precision::context::DEFAULT_MARGIN_BITS;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Value used when none is supplied
pub const DEFAULT_VALUE: u64 = 10_000;

/// Which kernel a run exercises
///
/// The two modes are mutually exclusive per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BenchmarkMode {
    /// π digits on one thread
    #[serde(rename = "single-threaded")]
    Pi,

    /// Prime counting across all processing units
    #[serde(rename = "multi-threaded")]
    Primes,
}

impl fmt::Display for BenchmarkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BenchmarkMode::Pi => write!(f, "single-threaded [PI]"),
            BenchmarkMode::Primes => write!(f, "multi-threaded [Primes]"),
        }
    }
}

/// Parameters of one benchmark run
///
/// # Example
/// ```
/// use cpubench_core::{BenchmarkConfig, BenchmarkMode};
///
/// let config = BenchmarkConfig {
///     mode: BenchmarkMode::Primes,
///     value: 1_000,
///     workers: Some(2),
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkConfig {
    pub mode: BenchmarkMode,

    /// Digit count (π) or inclusive upper bound (primes); must be >= 1
    pub value: u64,

    /// Bits added to `ceil(digits * log2(10))` when sizing π precision
    pub precision_margin_bits: u32,

    /// Prime worker count (None = all available processing units)
    pub workers: Option<usize>,

    /// Series term count override (None = `digits / 15 + 1`)
    pub iterations: Option<u64>,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            mode: BenchmarkMode::Pi,
            value: DEFAULT_VALUE,
            precision_margin_bits: DEFAULT_MARGIN_BITS,
            workers: None,
            iterations: None,
        }
    }
}

impl BenchmarkConfig {
    pub fn pi(digits: u64) -> Self {
        Self {
            mode: BenchmarkMode::Pi,
            value: digits,
            ..Default::default()
        }
    }

    pub fn primes(max: u64) -> Self {
        Self {
            mode: BenchmarkMode::Primes,
            value: max,
            ..Default::default()
        }
    }

    /// Reject inputs the kernels do not accept
    pub fn validate(&self) -> Result<(), BenchmarkError> {
        if self.value == 0 {
            return Err(BenchmarkError::InvalidValue { value: self.value });
        }
        if self.workers == Some(0) {
            return Err(BenchmarkError::InvalidWorkers);
        }
        if self.iterations == Some(0) {
            return Err(BenchmarkError::InvalidIterations);
        }
        Ok(())
    }
}
