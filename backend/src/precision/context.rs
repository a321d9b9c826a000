//! Working precision for one π computation

use serde::{Deserialize, Serialize};

/// Extra bits added on top of `ceil(digits * log2(10))`
pub const DEFAULT_MARGIN_BITS: u32 = 1;

/// Granularity of the arithmetic layer's significand storage
pub const LIMB_BITS: u64 = 64;

/// Precision sizing derived once from a requested digit count
///
/// `requested_bits` is `ceil(digits * log2(10)) + margin_bits`. The
/// arithmetic layer treats it as a lower bound: `working_bits` rounds it up
/// to whole limbs and keeps one guard limb on top.
///
/// # Example
/// ```
/// use cpubench_core::PrecisionContext;
///
/// let ctx = PrecisionContext::for_digits(10);
/// assert_eq!(ctx.digits(), 10);
/// assert_eq!(ctx.requested_bits(), 35); // ceil(33.22) + 1
/// assert_eq!(ctx.working_bits(), 128);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrecisionContext {
    digits: u64,
    margin_bits: u32,
    requested_bits: u64,
    working_bits: u64,
}

impl PrecisionContext {
    /// Size a context for `digits` decimal digits with the default margin
    pub fn for_digits(digits: u64) -> Self {
        Self::with_margin(digits, DEFAULT_MARGIN_BITS)
    }

    /// Size a context with an explicit safety margin in bits
    ///
    /// The margin is not adjusted later; an insufficient margin degrades the
    /// trailing digits silently.
    pub fn with_margin(digits: u64, margin_bits: u32) -> Self {
        let requested_bits = bits_for_digits(digits) + u64::from(margin_bits);
        let limbs = requested_bits.max(1).div_ceil(LIMB_BITS);
        Self {
            digits,
            margin_bits,
            requested_bits,
            working_bits: (limbs + 1) * LIMB_BITS,
        }
    }

    /// Requested decimal digit count
    pub fn digits(&self) -> u64 {
        self.digits
    }

    pub fn margin_bits(&self) -> u32 {
        self.margin_bits
    }

    /// `ceil(digits * log2(10)) + margin_bits`
    pub fn requested_bits(&self) -> u64 {
        self.requested_bits
    }

    /// Significand width every float operation truncates to
    pub fn working_bits(&self) -> u64 {
        self.working_bits
    }
}

/// `ceil(digits * log2(10))`
fn bits_for_digits(digits: u64) -> u64 {
    (digits as f64 * std::f64::consts::LOG2_10).ceil() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_digits_still_has_precision() {
        let ctx = PrecisionContext::for_digits(0);
        assert_eq!(ctx.requested_bits(), 1);
        assert_eq!(ctx.working_bits(), 2 * LIMB_BITS);
    }

    #[test]
    fn test_requested_bits_formula() {
        assert_eq!(PrecisionContext::for_digits(1).requested_bits(), 5);
        assert_eq!(PrecisionContext::for_digits(100).requested_bits(), 334);
        assert_eq!(PrecisionContext::for_digits(1000).requested_bits(), 3323);
    }

    #[test]
    fn test_margin_is_tunable() {
        let ctx = PrecisionContext::with_margin(100, 64);
        assert_eq!(ctx.margin_bits(), 64);
        assert_eq!(ctx.requested_bits(), 333 + 64);
    }

    #[test]
    fn test_working_bits_cover_request_plus_guard_limb() {
        for digits in [1u64, 19, 20, 77, 500, 10_000] {
            let ctx = PrecisionContext::for_digits(digits);
            assert_eq!(ctx.working_bits() % LIMB_BITS, 0);
            assert!(ctx.working_bits() >= ctx.requested_bits() + LIMB_BITS);
        }
    }
}
