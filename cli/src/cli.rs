use clap::{ArgGroup, Parser};
use cpubench_core::{BenchmarkConfig, BenchmarkMode};
use std::path::PathBuf;

/// Largest accepted value
pub const MAX_VALUE: u64 = u32::MAX as u64;

#[derive(Parser, Debug)]
#[command(name = "cpubench")]
#[command(author, version, about = "Stress and verify a CPU with π digits or prime counting")]
#[command(
    after_help = "Process priority is left unchanged; run under `nice -n -20` (as root) for the highest priority."
)]
#[command(group(
    ArgGroup::new("threading")
        .required(true)
        .args(["singlethreaded", "multithreaded"]),
))]
#[command(group(
    ArgGroup::new("digits")
        .args(["printdigits", "nodigits", "dumpdigits"]),
))]
pub struct Cli {
    /// Digits of π (single-threaded) or upper bound for primes (multi-threaded)
    #[arg(value_parser = clap::value_parser!(u64).range(1..=MAX_VALUE))]
    pub value: u64,

    /// Stress one core by computing digits of π
    #[arg(long)]
    pub singlethreaded: bool,

    /// Stress all cores by counting primes
    #[arg(long)]
    pub multithreaded: bool,

    /// Print all digits of π to the console
    #[arg(long)]
    pub printdigits: bool,

    /// Do not print digits of π (default)
    #[arg(long)]
    pub nodigits: bool,

    /// Save all digits of π to a text file
    #[arg(long)]
    pub dumpdigits: bool,

    /// File written by --dumpdigits
    #[arg(long, default_value = "pidigits.txt")]
    pub dump_path: PathBuf,

    /// Worker threads for the prime benchmark (default: all processing units)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub threads: Option<u64>,

    /// Extra bits of working precision for π
    #[arg(long, default_value_t = cpubench_core::precision::DEFAULT_MARGIN_BITS)]
    pub precision_margin: u32,

    /// Expected fingerprint; exit with an error if the result differs
    #[arg(long)]
    pub expect: Option<String>,

    /// Emit the result as JSON instead of the console report
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging (ignored when RUST_LOG is set)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn mode(&self) -> BenchmarkMode {
        if self.multithreaded {
            BenchmarkMode::Primes
        } else {
            BenchmarkMode::Pi
        }
    }

    /// Log filter directive: `RUST_LOG` wins when set, otherwise `--verbose`
    /// picks `debug` over the default `warn`
    pub fn log_directive(&self, rust_log: Option<&str>) -> String {
        match rust_log.map(str::trim) {
            Some(directive) if !directive.is_empty() => directive.to_string(),
            _ if self.verbose => "debug".to_string(),
            _ => "warn".to_string(),
        }
    }

    pub fn to_config(&self) -> BenchmarkConfig {
        BenchmarkConfig {
            mode: self.mode(),
            value: self.value,
            precision_margin_bits: self.precision_margin,
            workers: self.threads.map(|n| n as usize),
            iterations: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_positional_value_then_flags() {
        let cli = Cli::try_parse_from(["cpubench", "50000", "--singlethreaded", "--printdigits"])
            .unwrap();
        assert_eq!(cli.value, 50_000);
        assert_eq!(cli.mode(), BenchmarkMode::Pi);
        assert!(cli.printdigits);
        assert!(!cli.dumpdigits);
    }

    #[test]
    fn test_multithreaded_config() {
        let cli = Cli::try_parse_from([
            "cpubench",
            "1000",
            "--multithreaded",
            "--nodigits",
            "--threads",
            "4",
        ])
        .unwrap();
        let config = cli.to_config();
        assert_eq!(config.mode, BenchmarkMode::Primes);
        assert_eq!(config.value, 1000);
        assert_eq!(config.workers, Some(4));
    }

    #[test]
    fn test_threading_required() {
        assert!(Cli::try_parse_from(["cpubench", "100"]).is_err());
    }

    #[test]
    fn test_threading_exclusive() {
        assert!(
            Cli::try_parse_from(["cpubench", "100", "--singlethreaded", "--multithreaded"])
                .is_err()
        );
    }

    #[test]
    fn test_digit_flags_exclusive() {
        assert!(Cli::try_parse_from([
            "cpubench",
            "100",
            "--singlethreaded",
            "--printdigits",
            "--dumpdigits",
        ])
        .is_err());
    }

    #[test]
    fn test_value_bounds() {
        assert!(Cli::try_parse_from(["cpubench", "0", "--singlethreaded"]).is_err());
        assert!(Cli::try_parse_from(["cpubench", "-5", "--singlethreaded"]).is_err());
        assert!(Cli::try_parse_from(["cpubench", "4294967296", "--singlethreaded"]).is_err());
        assert!(Cli::try_parse_from(["cpubench", "4294967295", "--singlethreaded"]).is_ok());
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["cpubench", "10", "--singlethreaded"]).unwrap();
        assert_eq!(cli.dump_path, PathBuf::from("pidigits.txt"));
        assert_eq!(cli.precision_margin, 1);
        assert_eq!(cli.threads, None);
        assert!(!cli.json);
    }

    #[test]
    fn test_rust_log_overrides_verbose() {
        let cli = Cli::try_parse_from(["cpubench", "10", "--singlethreaded", "-v"]).unwrap();
        assert_eq!(cli.log_directive(Some("cpubench_core=trace")), "cpubench_core=trace");
        assert_eq!(cli.log_directive(Some("info")), "info");
        assert_eq!(cli.log_directive(None), "debug");
        assert_eq!(cli.log_directive(Some("  ")), "debug");
    }

    #[test]
    fn test_default_log_level_is_warn() {
        let cli = Cli::try_parse_from(["cpubench", "10", "--singlethreaded"]).unwrap();
        assert_eq!(cli.log_directive(None), "warn");
        assert_eq!(cli.log_directive(Some("")), "warn");
        assert_eq!(cli.log_directive(Some("trace")), "trace");
    }

    #[test]
    fn test_help_mentions_priority() {
        let help = Cli::command().render_long_help().to_string();
        assert!(help.contains("Process priority is left unchanged"));
        assert!(help.contains("nice -n -20"));
    }
}
