//! 128-bit fingerprint of a kernel's textual result
//!
//! The digest is SHA-256 truncated to its first 16 bytes. It identifies a
//! result across runs and machines; it is a fingerprint, not a security
//! primitive.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Digest length in bytes
pub const FINGERPRINT_BYTES: usize = 16;

/// Length of the hexadecimal rendering
pub const FINGERPRINT_HEX_LEN: usize = FINGERPRINT_BYTES * 2;

/// Errors parsing a fingerprint string
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FingerprintError {
    #[error("Fingerprint must be 32 hex characters, got {len}")]
    InvalidLength { len: usize },

    #[error("Fingerprint contains non-hex character: {0:?}")]
    InvalidHex(char),
}

/// Deterministic fixed-length digest of a result string
///
/// # Example
/// ```
/// use cpubench_core::Fingerprint;
///
/// let a = Fingerprint::of("3141592653");
/// let b = Fingerprint::of("3141592653");
/// assert_eq!(a, b);
/// assert_eq!(a.to_hex().len(), 32);
/// assert!(a.matches("3141592653"));
/// assert!(!a.matches("3141592654"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Fingerprint([u8; FINGERPRINT_BYTES]);

impl Fingerprint {
    /// Fingerprint the UTF-8 bytes of `text`
    pub fn of(text: &str) -> Self {
        let digest = Sha256::digest(text.as_bytes());
        let mut bytes = [0u8; FINGERPRINT_BYTES];
        bytes.copy_from_slice(&digest[..FINGERPRINT_BYTES]);
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; FINGERPRINT_BYTES] {
        &self.0
    }

    /// Lowercase hexadecimal, always 32 characters
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{:02x}", b)).collect()
    }

    /// Whether `text` produces this fingerprint
    pub fn matches(&self, text: &str) -> bool {
        Self::of(text) == *self
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.0 {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

impl FromStr for Fingerprint {
    type Err = FingerprintError;

    /// Parse 32 hex characters, either case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() != FINGERPRINT_HEX_LEN {
            return Err(FingerprintError::InvalidLength { len: s.chars().count() });
        }
        if let Some(bad) = s.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(FingerprintError::InvalidHex(bad));
        }

        let mut bytes = [0u8; FINGERPRINT_BYTES];
        for (i, byte) in bytes.iter_mut().enumerate() {
            let pair = &s[2 * i..2 * i + 2];
            *byte = u8::from_str_radix(pair, 16)
                .map_err(|_| FingerprintError::InvalidHex(pair.chars().next().unwrap_or('?')))?;
        }
        Ok(Self(bytes))
    }
}

impl From<Fingerprint> for String {
    fn from(fp: Fingerprint) -> Self {
        fp.to_hex()
    }
}

impl TryFrom<String> for Fingerprint {
    type Error = FingerprintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
