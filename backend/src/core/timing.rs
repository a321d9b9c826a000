//! Monotonic wall-clock measurement around a kernel
//!
//! Purely observational: a measurement never aborts, throttles or otherwise
//! influences the code being timed.

use std::time::{Duration, Instant};

/// Started monotonic clock
///
/// # Example
/// ```
/// use cpubench_core::Stopwatch;
///
/// let watch = Stopwatch::start();
/// let elapsed = watch.elapsed_secs();
/// assert!(elapsed >= 0.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    started: Instant,
}

impl Stopwatch {
    /// Sample the monotonic clock
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    /// Time since [`Stopwatch::start`]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Time since [`Stopwatch::start`] in seconds (nanosecond resolution)
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed().as_secs_f64()
    }
}

/// A value together with the time it took to produce
#[derive(Debug, Clone, PartialEq)]
pub struct Timed<T> {
    pub value: T,
    pub elapsed: Duration,
}

impl<T> Timed<T> {
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Discard the measurement
    pub fn into_value(self) -> T {
        self.value
    }
}

/// Run `kernel`, sampling the clock immediately before and after
///
/// # Example
/// ```
/// use cpubench_core::measure;
///
/// let timed = measure(|| (1..=10u64).sum::<u64>());
/// assert_eq!(timed.value, 55);
/// assert!(timed.elapsed_secs() >= 0.0);
/// ```
pub fn measure<T, F>(kernel: F) -> Timed<T>
where
    F: FnOnce() -> T,
{
    let watch = Stopwatch::start();
    let value = kernel();
    let elapsed = watch.elapsed();
    Timed { value, elapsed }
}
