//! Exact big-integer operations used to build each series term

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};

/// Below this span a range product is multiplied out linearly
const PRODUCT_SPLIT_THRESHOLD: u64 = 32;

/// `n!` for any non-negative `n`
///
/// # Example
/// ```
/// use cpubench_core::precision::integer::factorial;
/// use num_bigint::BigInt;
///
/// assert_eq!(factorial(0), BigInt::from(1));
/// assert_eq!(factorial(10), BigInt::from(3_628_800));
/// ```
pub fn factorial(n: u64) -> BigInt {
    if n < 2 {
        return BigInt::one();
    }
    BigInt::from(range_product(2, n))
}

/// Product of every integer in `[lo, hi]`, split in halves so the
/// multiplications stay balanced
fn range_product(lo: u64, hi: u64) -> BigUint {
    if lo > hi {
        return BigUint::one();
    }
    if hi - lo < PRODUCT_SPLIT_THRESHOLD {
        let mut acc = BigUint::one();
        for k in lo..=hi {
            acc *= k;
        }
        return acc;
    }
    let mid = lo + (hi - lo) / 2;
    range_product(lo, mid) * range_product(mid + 1, hi)
}

/// Overwrite `out` with `n!`, multiplying in place
pub fn factorial_into(out: &mut BigInt, n: u64) {
    out.set_one();
    for k in 2..=n {
        *out *= k;
    }
}

/// Overwrite `out` with `base^exp`, multiplying in place
pub fn pow_ui_into(out: &mut BigInt, base: u64, exp: u64) {
    out.set_one();
    for _ in 0..exp {
        *out *= base;
    }
}

/// `base^exp`
pub fn pow_ui(base: u64, exp: u64) -> BigInt {
    let mut result = BigInt::one();
    let mut square = BigInt::from(base);
    let mut e = exp;
    while e > 0 {
        if e & 1 == 1 {
            result *= &square;
        }
        e >>= 1;
        if e > 0 {
            square = &square * &square;
        }
    }
    result
}

/// `value * factor + addend`, in place
pub fn mul_add_ui(value: &mut BigInt, factor: u64, addend: u64) {
    *value *= factor;
    *value += addend;
}

/// Flip the sign of `value` in place
pub fn negate(value: &mut BigInt) {
    if !value.is_zero() {
        *value = -std::mem::take(value);
    }
}
