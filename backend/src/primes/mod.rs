//! Prime kernel
//!
//! Brute-force trial division fanned out across worker threads. The
//! quadratic cost is the point: it is a sustained CPU load generator, not
//! a prime-finding library.

pub mod counter;

pub use counter::{available_workers, count_primes, count_primes_with_workers, is_prime};
