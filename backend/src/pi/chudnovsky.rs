//! Chudnovsky series summation
//!
//! For `i` in `0..iterations`:
//!
//! ```text
//! term(i) = (6i)! * (545140134*i + 13591409)
//!           ------------------------------------------
//!           (3i)! * (i!)^3 * 640320^(3i) * sign(i)
//!
//! sign(i) = -1 when 3i is odd, +1 otherwise
//!
//! pi = 426880 * sqrt(10005) / sum(term)
//! ```
//!
//! # Critical Invariants
//!
//! - Precision and iteration count are fixed before the first term
//! - The accumulator only ever grows by addition until the final
//!   reciprocal-and-scale step
//! - No convergence check: the iteration budget is `digits / 15 + 1`

use crate::pi::digits::PiDigits;
use crate::precision::context::PrecisionContext;
use crate::precision::float::BigFloat;
use crate::precision::integer::{factorial_into, mul_add_ui, negate, pow_ui_into};
use num_bigint::BigInt;
use num_traits::Zero;

/// Iteration budget divisor; the series yields ~14.18 digits per term
pub const DIGITS_PER_TERM: u64 = 15;

const LINEAR_COEFFICIENT: u64 = 545_140_134;
const CONSTANT_TERM: u64 = 13_591_409;
const POWER_BASE: u64 = 640_320;
const SQRT_RADICAND: u64 = 10_005;
const SCALE_FACTOR: u64 = 426_880;

/// Number of series terms summed for `digits` digits
///
/// Always at least 1.
///
/// # Example
/// ```
/// use cpubench_core::iteration_count;
///
/// assert_eq!(iteration_count(0), 1);
/// assert_eq!(iteration_count(14), 1);
/// assert_eq!(iteration_count(15), 2);
/// assert_eq!(iteration_count(10_000), 667);
/// ```
pub fn iteration_count(digits: u64) -> u64 {
    digits / DIGITS_PER_TERM + 1
}

/// Compute `digits` digits of π with the derived iteration budget
///
/// # Example
/// ```
/// use cpubench_core::compute_pi;
///
/// let pi = compute_pi(10);
/// assert_eq!(pi.digits(), "3141592653");
/// assert_eq!(pi.exponent(), 1);
/// ```
pub fn compute_pi(digits: u64) -> PiDigits {
    let ctx = PrecisionContext::for_digits(digits);
    compute_pi_with(&ctx, iteration_count(digits))
}

/// Compute π at the context's precision summing exactly `iterations` terms
///
/// An iteration budget of 0 is raised to 1 so the sum is never empty.
/// The returned string has `ctx.digits()` digits.
pub fn compute_pi_with(ctx: &PrecisionContext, iterations: u64) -> PiDigits {
    let pi = SeriesState::new(ctx).run(iterations);
    let (digits, exponent) = pi.to_digits(ctx.digits());
    PiDigits::new(digits, exponent)
}

/// Running Chudnovsky sum and the scratch values reused for every term
///
/// Setup (including `sqrt(10005)`) happens in [`new`]. Scratch values are
/// overwritten through their existing buffers on each [`add_term`] call and
/// cleared once by [`finish`].
///
/// [`new`]: SeriesState::new
/// [`add_term`]: SeriesState::add_term
/// [`finish`]: SeriesState::finish
#[derive(Debug, Clone)]
pub struct SeriesState {
    total: BigFloat,
    /// `426880 * sqrt(10005)`, computed once at setup
    scale: BigFloat,
    terms_added: u64,

    // Integer scratch
    numerator: BigInt,
    linear: BigInt,
    denominator: BigInt,
    factorial_i: BigInt,
    power: BigInt,

    // Float scratch
    numerator_f: BigFloat,
    denominator_f: BigFloat,
    term: BigFloat,
}

impl SeriesState {
    /// Allocate the accumulator and scratch at the context's precision
    pub fn new(ctx: &PrecisionContext) -> Self {
        tracing::debug!(
            digits = ctx.digits(),
            requested_bits = ctx.requested_bits(),
            working_bits = ctx.working_bits(),
            "series setup"
        );
        let scale = &BigFloat::sqrt_u64(SQRT_RADICAND, ctx) * &BigFloat::from_u64(SCALE_FACTOR, ctx);
        Self {
            total: BigFloat::zero(ctx),
            scale,
            terms_added: 0,
            numerator: BigInt::zero(),
            linear: BigInt::zero(),
            denominator: BigInt::zero(),
            factorial_i: BigInt::zero(),
            power: BigInt::zero(),
            numerator_f: BigFloat::zero(ctx),
            denominator_f: BigFloat::zero(ctx),
            term: BigFloat::zero(ctx),
        }
    }

    /// Add `term(i)` to the running sum
    pub fn add_term(&mut self, i: u64) {
        let ti = 3 * i;

        factorial_into(&mut self.numerator, 6 * i);
        self.linear.set_zero();
        self.linear += LINEAR_COEFFICIENT;
        mul_add_ui(&mut self.linear, i, CONSTANT_TERM);
        factorial_into(&mut self.denominator, ti);
        factorial_into(&mut self.factorial_i, i);
        pow_ui_into(&mut self.power, POWER_BASE, ti);
        if ti & 1 == 1 {
            negate(&mut self.power);
        }

        self.numerator *= &self.linear;
        self.numerator_f.set_int(&self.numerator);
        // (3i)! * (i!)^3 * 640320^(3i)
        for _ in 0..3 {
            self.denominator *= &self.factorial_i;
        }
        self.denominator *= &self.power;
        self.denominator_f.set_int(&self.denominator);

        self.term.div_into(&self.numerator_f, &self.denominator_f);
        self.total += &self.term;
        self.terms_added += 1;
    }

    /// Sum `iterations` terms (at least one) and finish
    ///
    /// Covers exactly the series loop and the final reciprocal-and-scale
    /// step; setup cost stays in [`SeriesState::new`].
    pub fn run(mut self, iterations: u64) -> BigFloat {
        let iterations = iterations.max(1);
        tracing::debug!(iterations, "summing Chudnovsky series");
        for i in 0..iterations {
            self.add_term(i);
            tracing::trace!(iteration = i, of = iterations - 1, "term added");
        }
        self.finish()
    }

    /// Terms summed so far
    pub fn terms_added(&self) -> u64 {
        self.terms_added
    }

    /// Current value of the sum
    pub fn total(&self) -> &BigFloat {
        &self.total
    }

    /// Release scratch and return `scale / total`
    ///
    /// # Panics
    /// Panics if no term was added.
    pub fn finish(mut self) -> BigFloat {
        self.numerator.set_zero();
        self.linear.set_zero();
        self.denominator.set_zero();
        self.factorial_i.set_zero();
        self.power.set_zero();
        self.numerator_f.clear();
        self.denominator_f.clear();
        self.term.clear();

        assert!(self.terms_added > 0, "Chudnovsky sum has no terms");
        &self.total.recip() * &self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_term_is_constant() {
        let ctx = PrecisionContext::for_digits(20);
        let mut state = SeriesState::new(&ctx);
        state.add_term(0);
        assert_eq!(state.terms_added(), 1);
        assert_eq!(state.total().to_digits(8), ("13591409".to_string(), 8));
    }

    #[test]
    fn test_second_term_is_negative_and_small() {
        let ctx = PrecisionContext::for_digits(20);
        let mut state = SeriesState::new(&ctx);
        state.add_term(0);
        let after_first = state.total().to_f64();
        state.add_term(1);
        let after_second = state.total().to_f64();
        assert!(after_second < after_first);
        assert!(after_first - after_second < 1e-6);
    }

    #[test]
    fn test_single_term_gives_fourteen_digits() {
        let ctx = PrecisionContext::for_digits(14);
        let pi = compute_pi_with(&ctx, 1);
        assert_eq!(pi.digits(), "31415926535897");
    }

    #[test]
    fn test_run_sums_and_finishes() {
        let ctx = PrecisionContext::for_digits(14);
        let pi = SeriesState::new(&ctx).run(1);
        assert_eq!(pi.to_digits(14), ("31415926535897".to_string(), 1));
    }

    #[test]
    fn test_scratch_reused_across_terms() {
        // Terms summed one by one through the same scratch match a fresh
        // state per term count
        let ctx = PrecisionContext::for_digits(60);
        let mut state = SeriesState::new(&ctx);
        for i in 0..5 {
            state.add_term(i);
        }
        let reused = state.finish();
        assert_eq!(reused, SeriesState::new(&ctx).run(5));
        assert_eq!(reused.to_digits(60).0, compute_pi(60).digits());
    }

    #[test]
    fn test_zero_iterations_raised_to_one() {
        let ctx = PrecisionContext::for_digits(5);
        assert_eq!(compute_pi_with(&ctx, 0), compute_pi_with(&ctx, 1));
    }
}
