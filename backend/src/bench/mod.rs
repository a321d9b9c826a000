//! Benchmark runner - wires kernels, timing and fingerprinting together
//!
//! See `runner.rs` for the dispatch flow.

pub mod config;
pub mod runner;

pub use config::{BenchmarkConfig, BenchmarkMode, DEFAULT_VALUE};
pub use runner::{run_benchmark, BenchmarkError, BenchmarkResult, KernelOutput};
