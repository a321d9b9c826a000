//! π kernel
//!
//! Sums the Chudnovsky series on a single thread at a precision fixed once
//! per computation. See `chudnovsky.rs` for the term formula.

pub mod chudnovsky;
pub mod digits;

pub use chudnovsky::{compute_pi, compute_pi_with, iteration_count, SeriesState, DIGITS_PER_TERM};
pub use digits::PiDigits;
