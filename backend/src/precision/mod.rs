//! Arbitrary-precision arithmetic for the π kernel
//!
//! Two halves:
//! - **integer**: exact big-integer helpers (factorial, power, sign)
//! - **float**: a binary floating value whose significand is capped at a
//!   fixed number of bits chosen once per computation
//!
//! # Critical Invariants
//!
//! - Precision is fixed by a [`PrecisionContext`] before the first operation
//!   and is never raised afterwards
//! - Every float operation truncates toward zero at the working precision

pub mod context;
pub mod float;
pub mod integer;

pub use context::{PrecisionContext, DEFAULT_MARGIN_BITS, LIMB_BITS};
pub use float::BigFloat;
