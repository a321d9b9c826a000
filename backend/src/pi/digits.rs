//! Textual output of the π kernel

use serde::{Deserialize, Serialize};
use std::fmt;

/// Decimal digits of π plus the position of the decimal point
///
/// The value represented is `0.d1d2d3... * 10^exponent`; for π the exponent
/// is 1, placing the point after the first digit.
///
/// # Example
/// ```
/// use cpubench_core::PiDigits;
///
/// let pi = PiDigits::new("31415".to_string(), 1);
/// assert_eq!(pi.to_string(), "3.1415");
/// assert_eq!(pi.len(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PiDigits {
    digits: String,
    exponent: i64,
}

impl PiDigits {
    pub fn new(digits: String, exponent: i64) -> Self {
        Self { digits, exponent }
    }

    /// Raw digit string without a decimal point (the fingerprinted text)
    pub fn digits(&self) -> &str {
        &self.digits
    }

    pub fn exponent(&self) -> i64 {
        self.exponent
    }

    /// Number of digits produced
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// Leading digit, `None` when no digits were requested
    pub fn leading_digit(&self) -> Option<char> {
        self.digits.chars().next()
    }
}

impl fmt::Display for PiDigits {
    /// Places the decimal point according to the exponent
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (sign, body) = match self.digits.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", self.digits.as_str()),
        };
        if body.is_empty() {
            return Ok(());
        }
        let len = body.len() as i64;
        if self.exponent <= 0 {
            let zeros = "0".repeat(self.exponent.unsigned_abs() as usize);
            write!(f, "{}0.{}{}", sign, zeros, body)
        } else if self.exponent >= len {
            let zeros = "0".repeat((self.exponent - len) as usize);
            write!(f, "{}{}{}", sign, body, zeros)
        } else {
            let (int_part, frac_part) = body.split_at(self.exponent as usize);
            write!(f, "{}{}.{}", sign, int_part, frac_part)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_point_after_first_digit() {
        let pi = PiDigits::new("3141592653".to_string(), 1);
        assert_eq!(pi.to_string(), "3.141592653");
    }

    #[test]
    fn test_display_single_digit() {
        assert_eq!(PiDigits::new("3".to_string(), 1).to_string(), "3");
    }

    #[test]
    fn test_display_other_exponents() {
        assert_eq!(PiDigits::new("125".to_string(), 0).to_string(), "0.125");
        assert_eq!(PiDigits::new("125".to_string(), -1).to_string(), "0.0125");
        assert_eq!(PiDigits::new("12".to_string(), 4).to_string(), "1200");
        assert_eq!(PiDigits::new("-5".to_string(), 0).to_string(), "-0.5");
    }

    #[test]
    fn test_empty() {
        let empty = PiDigits::new(String::new(), 1);
        assert!(empty.is_empty());
        assert_eq!(empty.leading_digit(), None);
        assert_eq!(empty.to_string(), "");
    }
}
