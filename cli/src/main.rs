use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use cpubench_core::run_benchmark;
use std::fs;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod cli;
mod report;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stderr keeps the report on stdout clean
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::new(cli.log_directive(rust_log.as_deref())))
        .init();

    let config = cli.to_config();

    if !cli.json {
        println!("{}\n", report::banner());
        println!("{}", report::announce(config.mode, config.value));
    }

    let result = run_benchmark(&config).context("benchmark failed")?;

    if let Some(digits) = result.output.as_pi() {
        if cli.printdigits && !cli.json {
            println!("Here are the digits:\n\n{}\n", report::pi_line(digits));
        }
        if cli.dumpdigits {
            fs::write(&cli.dump_path, format!("{}\n", report::pi_line(digits)))
                .with_context(|| format!("writing {}", cli.dump_path.display()))?;
            tracing::info!(path = %cli.dump_path.display(), "digits saved");
        }
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        for line in report::summary(&result) {
            println!("{}", line);
        }
    }

    if let Some(expected) = &cli.expect {
        if !result.verify(expected)? {
            bail!(
                "fingerprint mismatch: expected {}, got {}",
                expected,
                result.fingerprint
            );
        }
        if !cli.json {
            println!("{}", "Fingerprint matches expected value".green());
        }
    }

    if !cli.json {
        println!("Goodbye!");
    }
    Ok(())
}
