//! Fixed-precision binary floating values
//!
//! A [`BigFloat`] is `mantissa * 2^exponent`. After every operation the
//! mantissa is truncated (toward zero) to at most `precision` bits, the
//! precision having been fixed by a [`PrecisionContext`].
//!
//! Intermediate alignment keeps [`GUARD_BITS`] extra bits so that a single
//! operation loses at most one unit in the last place.

use crate::precision::context::PrecisionContext;
use num_bigint::{BigInt, BigUint};
use num_traits::{One, Signed, ToPrimitive, Zero};
use std::ops::{AddAssign, Div, Mul};

/// Extra bits kept while aligning or dividing
const GUARD_BITS: u64 = 2;

/// Binary floating value with a fixed significand width
///
/// # Example
/// ```
/// use cpubench_core::{BigFloat, PrecisionContext};
///
/// let ctx = PrecisionContext::for_digits(20);
/// let root = BigFloat::sqrt_u64(10005, &ctx);
/// let (digits, exponent) = root.to_digits(8);
/// assert_eq!(digits, "10002499");
/// assert_eq!(exponent, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BigFloat {
    mantissa: BigInt,
    exponent: i64,
    precision: u64,
}

impl BigFloat {
    /// Zero at the context's working precision
    pub fn zero(ctx: &PrecisionContext) -> Self {
        Self {
            mantissa: BigInt::zero(),
            exponent: 0,
            precision: ctx.working_bits(),
        }
    }

    pub fn from_u64(value: u64, ctx: &PrecisionContext) -> Self {
        Self::from_int(&BigInt::from(value), ctx)
    }

    /// Round an exact integer to the context's working precision
    pub fn from_int(value: &BigInt, ctx: &PrecisionContext) -> Self {
        let mut out = Self::zero(ctx);
        out.set_int(value);
        out
    }

    /// Overwrite this value with `value`, keeping the existing allocation
    pub fn set_int(&mut self, value: &BigInt) {
        self.mantissa.clone_from(value);
        self.exponent = 0;
        self.normalize();
    }

    /// Reset to zero without changing precision
    pub fn clear(&mut self) {
        self.mantissa.set_zero();
        self.exponent = 0;
    }

    /// Overwrite this value with `dividend / divisor`, keeping the existing
    /// allocation and precision
    ///
    /// # Panics
    /// Panics if `divisor` is zero.
    pub fn div_into(&mut self, dividend: &BigFloat, divisor: &BigFloat) {
        assert!(!divisor.is_zero(), "BigFloat division by zero");
        if dividend.is_zero() {
            self.clear();
            return;
        }
        // Pre-shift the dividend so the quotient has precision + guard bits
        let wanted = self.precision + GUARD_BITS + divisor.mantissa.bits();
        let shift = wanted.saturating_sub(dividend.mantissa.bits());
        self.mantissa.clone_from(&dividend.mantissa);
        self.mantissa <<= shift as usize;
        // Signed division truncates toward zero
        self.mantissa /= &divisor.mantissa;
        self.exponent = dividend.exponent - divisor.exponent - shift as i64;
        self.normalize();
    }

    /// `sqrt(n)` truncated to the context's working precision
    pub fn sqrt_u64(n: u64, ctx: &PrecisionContext) -> Self {
        let precision = ctx.working_bits();
        let value = BigUint::from(n);
        // Scale by 4^k so the integer root carries precision + guard bits
        let half_bits = value.bits().div_ceil(2);
        let k = (precision + GUARD_BITS).saturating_sub(half_bits);
        let root = (value << (2 * k) as usize).sqrt();
        let mut out = Self {
            mantissa: BigInt::from(root),
            exponent: -(k as i64),
            precision,
        };
        out.normalize();
        out
    }

    /// `1 / self`
    ///
    /// # Panics
    /// Panics if `self` is zero.
    pub fn recip(&self) -> Self {
        let one = Self {
            mantissa: BigInt::one(),
            exponent: 0,
            precision: self.precision,
        };
        &one / self
    }

    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.mantissa.is_negative()
    }

    /// Significand width in bits
    pub fn precision(&self) -> u64 {
        self.precision
    }

    /// Nearest `f64`, for diagnostics only
    pub fn to_f64(&self) -> f64 {
        let bits = self.mantissa.bits();
        let shift = bits.saturating_sub(63);
        let head = shr_toward_zero(&self.mantissa, shift)
            .to_f64()
            .unwrap_or(0.0);
        let scale = (self.exponent + shift as i64).clamp(i32::MIN as i64, i32::MAX as i64);
        head * 2f64.powi(scale as i32)
    }

    /// Exactly `count` significant decimal digits, truncated, and the
    /// base-10 exponent `e` such that the value is `0.d1d2... * 10^e`
    ///
    /// A negative value is prefixed with `-`. Zero yields an empty string and
    /// exponent 0. `count == 0` yields an empty string and the value's
    /// exponent.
    pub fn to_digits(&self, count: u64) -> (String, i64) {
        if self.is_zero() {
            return (String::new(), 0);
        }
        let magnitude = self.mantissa.magnitude();
        let top = magnitude.bits() as i64 + self.exponent;
        let mut exponent = ((top - 1) as f64 * std::f64::consts::LOG10_2).floor() as i64 + 1;

        let upper = pow10(count);
        let lower = if count == 0 {
            BigUint::zero()
        } else {
            pow10(count - 1)
        };

        loop {
            let scaled = self.scaled_decimal(magnitude, count as i64 - exponent);
            if scaled >= upper {
                exponent += 1;
            } else if count > 0 && scaled < lower {
                exponent -= 1;
            } else {
                let digits = if count == 0 {
                    String::new()
                } else if self.is_negative() {
                    format!("-{}", scaled)
                } else {
                    scaled.to_string()
                };
                return (digits, exponent);
            }
        }
    }

    /// `floor(|self| * 10^shift)`
    fn scaled_decimal(&self, magnitude: &BigUint, shift: i64) -> BigUint {
        let mut numerator = magnitude.clone();
        let mut denominator = BigUint::one();
        if shift >= 0 {
            numerator *= pow10(shift as u64);
        } else {
            denominator *= pow10(shift.unsigned_abs());
        }
        if self.exponent >= 0 {
            numerator <<= self.exponent as usize;
        } else {
            denominator <<= self.exponent.unsigned_abs() as usize;
        }
        numerator / denominator
    }

    /// Position one past the most significant bit
    fn top(&self) -> i64 {
        self.exponent + self.mantissa.bits() as i64
    }

    /// Truncate the mantissa to `precision` bits
    fn normalize(&mut self) {
        if self.mantissa.is_zero() {
            self.exponent = 0;
            return;
        }
        let bits = self.mantissa.bits();
        if bits > self.precision {
            let shift = bits - self.precision;
            self.mantissa = shr_toward_zero(&self.mantissa, shift);
            self.exponent += shift as i64;
        }
    }

    /// Mantissa re-expressed at binary exponent `target`
    fn aligned_mantissa(&self, target: i64) -> BigInt {
        if self.exponent >= target {
            &self.mantissa << (self.exponent - target) as usize
        } else {
            shr_toward_zero(&self.mantissa, (target - self.exponent) as u64)
        }
    }
}

impl AddAssign<&BigFloat> for BigFloat {
    fn add_assign(&mut self, rhs: &BigFloat) {
        if rhs.is_zero() {
            return;
        }
        if self.is_zero() {
            self.mantissa.clone_from(&rhs.mantissa);
            self.exponent = rhs.exponent;
            self.normalize();
            return;
        }
        // Bits below the floor cannot reach the truncated result
        let floor = self.top().max(rhs.top()) - (self.precision + GUARD_BITS) as i64;
        let target = self.exponent.min(rhs.exponent).max(floor);
        let sum = self.aligned_mantissa(target) + rhs.aligned_mantissa(target);
        self.mantissa = sum;
        self.exponent = target;
        self.normalize();
    }
}

impl Mul for &BigFloat {
    type Output = BigFloat;

    fn mul(self, rhs: &BigFloat) -> BigFloat {
        let mut out = BigFloat {
            mantissa: &self.mantissa * &rhs.mantissa,
            exponent: self.exponent + rhs.exponent,
            precision: self.precision,
        };
        out.normalize();
        out
    }
}

impl Div for &BigFloat {
    type Output = BigFloat;

    /// # Panics
    /// Panics on division by zero.
    fn div(self, rhs: &BigFloat) -> BigFloat {
        let mut out = BigFloat {
            mantissa: BigInt::zero(),
            exponent: 0,
            precision: self.precision,
        };
        out.div_into(self, rhs);
        out
    }
}

/// `value >> shift`, rounding toward zero for negative values
fn shr_toward_zero(value: &BigInt, shift: u64) -> BigInt {
    let magnitude = value.magnitude() >> shift as usize;
    BigInt::from_biguint(value.sign(), magnitude)
}

fn pow10(exp: u64) -> BigUint {
    num_traits::pow(BigUint::from(10u8), exp as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> PrecisionContext {
        PrecisionContext::for_digits(30)
    }

    #[test]
    fn test_integer_round_trips_through_digits() {
        let value = BigFloat::from_u64(13_591_409, &ctx());
        assert_eq!(value.to_digits(8), ("13591409".to_string(), 8));
    }

    #[test]
    fn test_normalize_truncates_to_precision() {
        let narrow = PrecisionContext::for_digits(0);
        // 2^200 + 1 does not fit in 128 bits; the low bit is dropped
        let big = (BigInt::one() << 200usize) + 1;
        let value = BigFloat::from_int(&big, &narrow);
        assert_eq!(value.mantissa.bits(), narrow.working_bits());
        assert_eq!(value.top(), 201);
    }

    #[test]
    fn test_add_assign_mixed_signs() {
        let ctx = ctx();
        let mut total = BigFloat::from_u64(10, &ctx);
        let mut neg = BigFloat::from_u64(3, &ctx);
        neg.mantissa = -neg.mantissa;
        total += &neg;
        assert_eq!(total.to_digits(1), ("7".to_string(), 1));
    }

    #[test]
    fn test_add_assign_ignores_bits_below_precision() {
        let ctx = PrecisionContext::for_digits(0);
        let mut total = BigFloat::from_int(&(BigInt::one() << 400usize), &ctx);
        let before = total.clone();
        total += &BigFloat::from_u64(1, &ctx);
        assert_eq!(total, before);
    }

    #[test]
    fn test_division_and_recip() {
        let ctx = ctx();
        let third = &BigFloat::from_u64(1, &ctx) / &BigFloat::from_u64(3, &ctx);
        assert_eq!(third.to_digits(6), ("333333".to_string(), 0));

        let recip = BigFloat::from_u64(8, &ctx).recip();
        assert_eq!(recip.to_digits(3), ("125".to_string(), 0));
    }

    #[test]
    fn test_div_into_reuses_target() {
        let ctx = ctx();
        let mut target = BigFloat::from_u64(123_456, &ctx);
        target.div_into(&BigFloat::from_u64(1, &ctx), &BigFloat::from_u64(8, &ctx));
        assert_eq!(target.to_digits(3), ("125".to_string(), 0));

        target.div_into(&BigFloat::zero(&ctx), &BigFloat::from_u64(3, &ctx));
        assert!(target.is_zero());

        let third = &BigFloat::from_u64(1, &ctx) / &BigFloat::from_u64(3, &ctx);
        target.div_into(&BigFloat::from_u64(1, &ctx), &BigFloat::from_u64(3, &ctx));
        assert_eq!(target, third);
    }

    #[test]
    fn test_negative_quotient() {
        let ctx = ctx();
        let mut neg = BigFloat::from_u64(2, &ctx);
        neg.mantissa = -neg.mantissa;
        let q = &BigFloat::from_u64(1, &ctx) / &neg;
        assert!(q.is_negative());
        assert_eq!(q.to_digits(1), ("-5".to_string(), 0));
    }

    #[test]
    fn test_small_value_exponent() {
        let ctx = ctx();
        // 1/1024 = 0.0009765625 is exact in binary
        let tiny = &BigFloat::from_u64(1, &ctx) / &BigFloat::from_u64(1024, &ctx);
        let (digits, exponent) = tiny.to_digits(4);
        assert_eq!(exponent, -3);
        assert_eq!(digits, "9765");
    }

    #[test]
    fn test_zero_digits() {
        let ctx = ctx();
        assert_eq!(BigFloat::zero(&ctx).to_digits(5), (String::new(), 0));
        assert_eq!(BigFloat::from_u64(42, &ctx).to_digits(0), (String::new(), 2));
    }

    #[test]
    fn test_sqrt_matches_f64() {
        let root = BigFloat::sqrt_u64(2, &ctx());
        assert!((root.to_f64() - std::f64::consts::SQRT_2).abs() < 1e-15);
    }

    #[test]
    #[should_panic(expected = "division by zero")]
    fn test_division_by_zero_panics() {
        let ctx = ctx();
        let _ = &BigFloat::from_u64(1, &ctx) / &BigFloat::zero(&ctx);
    }
}
