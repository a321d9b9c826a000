//! Console and file rendering of a benchmark result

use colored::Colorize;
use cpubench_core::{BenchmarkMode, BenchmarkResult, PiDigits};

/// Banner printed before a run
pub fn banner() -> String {
    let rule = "-".repeat(63);
    let body = format!(
        "{}\nCPU Bench v{} ({})\n{}",
        rule,
        env!("CARGO_PKG_VERSION"),
        std::env::consts::ARCH,
        rule
    );
    body.green().to_string()
}

/// Line announcing what is about to run
pub fn announce(mode: BenchmarkMode, value: u64) -> String {
    match mode {
        BenchmarkMode::Pi => format!(
            "Performing {} benchmarking\nComputing {} digits of PI...",
            mode, value
        ),
        BenchmarkMode::Primes => format!(
            "Performing {} benchmarking\nComputing primes under {}...",
            mode, value
        ),
    }
}

/// `3.1415...`: the first digit, a point, then the rest
pub fn pi_line(digits: &PiDigits) -> String {
    let text = digits.digits();
    match text.char_indices().nth(1) {
        Some((split, _)) => format!("{}.{}", &text[..split], &text[split..]),
        None => format!("{}.", text),
    }
}

/// Report lines following a completed run
pub fn summary(result: &BenchmarkResult) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(iterations) = result.iterations {
        lines.push(format!("Total iterations: {}", iterations));
    }
    if let Some(workers) = result.workers {
        lines.push(format!("Worker threads: {}", workers));
    }
    lines.push(format!("Done!\n\nTime taken (seconds): {:.6}", result.elapsed_secs));
    if let Some(count) = result.output.as_prime_count() {
        lines.push(format!("Total primes found are {}", count));
    }
    lines.push(format!(
        "Fingerprint (for verification): {}",
        result.fingerprint
    ));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use cpubench_core::{run_benchmark, BenchmarkConfig};

    #[test]
    fn test_pi_line() {
        assert_eq!(pi_line(&PiDigits::new("31415".to_string(), 1)), "3.1415");
        assert_eq!(pi_line(&PiDigits::new("3".to_string(), 1)), "3.");
    }

    #[test]
    fn test_announce_mentions_value() {
        assert!(announce(BenchmarkMode::Pi, 500).contains("500 digits of PI"));
        assert!(announce(BenchmarkMode::Primes, 500).contains("primes under 500"));
    }

    #[test]
    fn test_banner_has_version() {
        assert!(banner().contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_summary_for_primes() {
        let result = run_benchmark(&BenchmarkConfig::primes(10)).unwrap();
        let lines = summary(&result);
        assert!(lines.iter().any(|l| l == "Total primes found are 4"));
        assert!(lines.iter().any(|l| l.ends_with(&result.fingerprint.to_hex())));
        assert!(!lines.iter().any(|l| l.starts_with("Total iterations")));
    }

    #[test]
    fn test_summary_for_pi() {
        let result = run_benchmark(&BenchmarkConfig::pi(5)).unwrap();
        let lines = summary(&result);
        assert_eq!(lines[0], "Total iterations: 1");
    }
}
