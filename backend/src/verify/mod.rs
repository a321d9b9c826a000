//! Result fingerprints for cross-run verification

pub mod fingerprint;

pub use fingerprint::{Fingerprint, FingerprintError, FINGERPRINT_BYTES, FINGERPRINT_HEX_LEN};
