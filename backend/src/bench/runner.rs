//! Benchmark dispatch
//!
//! ```text
//! 1. Validate the configuration
//! 2. Select the kernel from the mode
//! 3. Bracket the kernel with the monotonic clock
//! 4. Render the result as text
//! 5. Fingerprint the text
//! ```
//!
//! Kernels run to completion; there is no retry, timeout or cancellation.

use crate::bench::config::{BenchmarkConfig, BenchmarkMode};
use crate::core::timing::measure;
use crate::pi::chudnovsky::{iteration_count, SeriesState};
use crate::pi::digits::PiDigits;
use crate::precision::context::PrecisionContext;
use crate::primes::counter::{available_workers, count_primes_with_workers};
use crate::verify::fingerprint::{Fingerprint, FingerprintError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised before a kernel starts
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BenchmarkError {
    #[error("Value must be at least 1, got {value}")]
    InvalidValue { value: u64 },

    #[error("Worker count must be at least 1")]
    InvalidWorkers,

    #[error("Iteration count must be at least 1")]
    InvalidIterations,

    #[error("Fingerprint error: {0}")]
    Fingerprint(#[from] FingerprintError),
}

/// What a kernel produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KernelOutput {
    Pi(PiDigits),
    Primes(u64),
}

impl KernelOutput {
    /// Text that gets fingerprinted: the digit string or the decimal count
    pub fn text(&self) -> String {
        match self {
            KernelOutput::Pi(digits) => digits.digits().to_string(),
            KernelOutput::Primes(count) => count.to_string(),
        }
    }

    pub fn as_pi(&self) -> Option<&PiDigits> {
        match self {
            KernelOutput::Pi(digits) => Some(digits),
            KernelOutput::Primes(_) => None,
        }
    }

    pub fn as_prime_count(&self) -> Option<u64> {
        match self {
            KernelOutput::Primes(count) => Some(*count),
            KernelOutput::Pi(_) => None,
        }
    }
}

/// Outcome of one benchmark run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    pub mode: BenchmarkMode,

    /// Digit count or prime upper bound the run was given
    pub value: u64,

    pub output: KernelOutput,

    /// Series terms summed (π only)
    pub iterations: Option<u64>,

    /// Threads used (primes only)
    pub workers: Option<usize>,

    /// Wall-clock seconds spent in the kernel
    ///
    /// For π this covers the series loop and the final division only;
    /// precision setup and decimal conversion are outside the bracket.
    pub elapsed_secs: f64,

    pub fingerprint: Fingerprint,
}

impl BenchmarkResult {
    /// Compare against a fingerprint from another run or machine
    pub fn verify(&self, expected: &str) -> Result<bool, BenchmarkError> {
        let expected: Fingerprint = expected.parse()?;
        Ok(expected == self.fingerprint)
    }
}

/// Run the kernel selected by `config.mode`
///
/// # Example
/// ```
/// use cpubench_core::{run_benchmark, BenchmarkConfig};
///
/// let result = run_benchmark(&BenchmarkConfig::primes(10)).unwrap();
/// assert_eq!(result.output.text(), "4");
/// assert_eq!(result.fingerprint.to_hex().len(), 32);
/// ```
pub fn run_benchmark(config: &BenchmarkConfig) -> Result<BenchmarkResult, BenchmarkError> {
    config.validate()?;

    let (elapsed_secs, output, iterations, workers) = match config.mode {
        BenchmarkMode::Pi => {
            let ctx = PrecisionContext::with_margin(config.value, config.precision_margin_bits);
            let iterations = config
                .iterations
                .unwrap_or_else(|| iteration_count(config.value));
            let state = SeriesState::new(&ctx);
            let timed = measure(|| state.run(iterations));
            let elapsed_secs = timed.elapsed_secs();
            let (digits, exponent) = timed.into_value().to_digits(ctx.digits());
            let output = KernelOutput::Pi(PiDigits::new(digits, exponent));
            (elapsed_secs, output, Some(iterations), None)
        }
        BenchmarkMode::Primes => {
            let workers = config.workers.unwrap_or_else(available_workers);
            let timed = measure(|| count_primes_with_workers(config.value, workers));
            let elapsed_secs = timed.elapsed_secs();
            let output = KernelOutput::Primes(timed.into_value());
            (elapsed_secs, output, None, Some(workers))
        }
    };

    let fingerprint = Fingerprint::of(&output.text());

    tracing::info!(
        mode = ?config.mode,
        value = config.value,
        elapsed_secs,
        fingerprint = %fingerprint,
        "benchmark complete"
    );

    Ok(BenchmarkResult {
        mode: config.mode,
        value: config.value,
        output,
        iterations,
        workers,
        elapsed_secs,
        fingerprint,
    })
}
