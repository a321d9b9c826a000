//! CPU Bench Core - Rust Engine
//!
//! CPU stress-and-verification kernels with deterministic, fingerprinted
//! results.
//!
//! # Architecture
//!
//! - **precision**: Working-precision sizing and big-number arithmetic
//! - **pi**: Chudnovsky series summation (single-threaded kernel)
//! - **primes**: Trial-division prime counting (multi-threaded kernel)
//! - **core**: Monotonic timing harness
//! - **verify**: Result fingerprints
//! - **bench**: Configuration and dispatch
//!
//! # Critical Invariants
//!
//! 1. π precision and iteration count are fixed before the first term
//! 2. Prime counts do not depend on the number of workers
//! 3. Identical result text always yields an identical fingerprint

// Module declarations
pub mod bench;
pub mod core;
pub mod pi;
pub mod precision;
pub mod primes;
pub mod verify;

// Re-exports for convenience
pub use bench::{
    run_benchmark, BenchmarkConfig, BenchmarkError, BenchmarkMode, BenchmarkResult, KernelOutput,
};
pub use self::core::timing::{measure, Stopwatch, Timed};
pub use pi::{compute_pi, compute_pi_with, iteration_count, PiDigits, SeriesState};
pub use precision::{BigFloat, PrecisionContext};
pub use primes::{available_workers, count_primes, count_primes_with_workers, is_prime};
pub use verify::{Fingerprint, FingerprintError};
