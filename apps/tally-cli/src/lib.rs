//! # tally-cli
//!
//! Command-line front end for tally-core.
//!
//! ## Module Organization
//! ```text
//! tally_cli/
//! ├── lib.rs          ◄─── You are here (logging setup & run)
//! ├── config.rs       ◄─── TALLY_* environment configuration
//! └── commands.rs     ◄─── clap definitions and dispatch
//! ```
//!
//! ## Output
//! The result record is printed to stdout as pretty JSON. A round-trip
//! discrepancy is logged at WARN and printed to stderr; it never changes
//! the exit code.

pub mod commands;
pub mod config;

use std::io::{self, Write};

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use commands::{Cli, Outcome};
use config::CliConfig;

/// Parses argv, loads configuration, runs the command, prints the result.
pub fn run() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = CliConfig::load()?;
    info!(tax_rate = %config.tax_rate, rounding = %config.rounding, "Configuration loaded");

    let outcome = commands::execute(&cli.command, &config)?;
    report(&outcome, &mut io::stdout().lock(), &mut io::stderr().lock())
}

/// Writes the JSON result to `out` and any rounding warning to `err`.
fn report(outcome: &Outcome, out: &mut impl Write, err: &mut impl Write) -> Result<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(&outcome.output)?)?;

    if let Some(warning) = &outcome.warning {
        warn!(
            entered = %warning.entered,
            recalculated = %warning.recalculated,
            discrepancy = %warning.discrepancy,
            "Rounding discrepancy detected"
        );
        writeln!(err, "warning: {warning}")?;
    }

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - Default: INFO, with DEBUG for tally crates
///
/// Logs go to stderr so stdout stays valid JSON.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tally_cli=debug,tally_core=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::{Money, RoundingWarning};

    fn render(outcome: &Outcome) -> (String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        report(outcome, &mut out, &mut err).unwrap();
        (String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
    }

    #[test]
    fn test_report_prints_json_only() {
        let outcome = Outcome {
            output: serde_json::json!({ "tax": 100, "including": 1100 }),
            warning: None,
        };

        let (out, err) = render(&outcome);
        let printed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(printed, outcome.output);
        assert!(out.ends_with('\n'));
        assert!(err.is_empty());
    }

    #[test]
    fn test_report_warns_on_stderr() {
        let outcome = Outcome {
            output: serde_json::json!({ "discrepancy": 1 }),
            warning: Some(RoundingWarning {
                entered: Money::from_units(366),
                recalculated: Money::from_units(365),
                discrepancy: Money::from_units(1),
            }),
        };

        let (out, err) = render(&outcome);
        assert!(!out.contains("warning"));
        assert_eq!(
            err,
            "warning: entered amount 366 recalculates to 365 after rounding (difference 1)\n"
        );
    }
}
