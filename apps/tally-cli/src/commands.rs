//! # Commands
//!
//! One subcommand per tax operation. Each resolves its rate and policy
//! (flag, else config), calls into tally-core, and returns the result as
//! JSON plus any rounding warning for the caller to surface.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use tracing::debug;

use tally_core::validation::validate_tax_rate_bps;
use tally_core::{
    apply_rounding, detect_round_trip_discrepancy, exclusive_to_inclusive, inclusive_to_exclusive,
    Money, RoundingPolicy, RoundingWarning, TaxRate,
};

use crate::config::CliConfig;

/// Tax rounding calculator for point-of-sale amounts
#[derive(Debug, Parser)]
#[command(name = "tally", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Round a real value to an integer
    Round(RoundArgs),
    /// Add tax to a tax-exclusive amount
    ToInclusive(AmountArgs),
    /// Extract tax from a tax-inclusive amount
    ToExclusive(AmountArgs),
    /// Check that a tax-inclusive amount survives exclusive → inclusive
    RoundTrip(AmountArgs),
}

#[derive(Debug, Args)]
pub struct RoundArgs {
    /// Value to round
    #[arg(long, allow_negative_numbers = true)]
    pub value: f64,

    /// floor | half-up | ceil, or 0 | 1 | 2 (unknown values mean floor)
    #[arg(long)]
    pub policy: Option<String>,
}

#[derive(Debug, Args)]
pub struct AmountArgs {
    /// Amount in whole currency units
    #[arg(long, allow_negative_numbers = true)]
    pub amount: i64,

    /// Tax rate in percent, e.g. 10 or 8.25
    #[arg(long, allow_negative_numbers = true)]
    pub rate: Option<f64>,

    /// floor | half-up | ceil, or 0 | 1 | 2 (unknown values mean floor)
    #[arg(long)]
    pub policy: Option<String>,
}

/// What a command produced.
#[derive(Debug)]
pub struct Outcome {
    pub output: Value,
    pub warning: Option<RoundingWarning>,
}

impl Outcome {
    fn plain(output: Value) -> Self {
        Outcome {
            output,
            warning: None,
        }
    }
}

/// Runs one parsed command against `config`.
pub fn execute(command: &Command, config: &CliConfig) -> Result<Outcome> {
    match command {
        Command::Round(args) => {
            let policy = resolve_policy(args.policy.as_deref(), config);
            debug!(value = args.value, %policy, "rounding value");
            let rounded = apply_rounding(args.value, policy)?;
            Ok(Outcome::plain(serde_json::json!({
                "value": args.value,
                "policy": policy,
                "rounded": rounded,
            })))
        }
        Command::ToInclusive(args) => {
            let (amount, rate, policy) = resolve_amount_args(args, config)?;
            debug!(%amount, %rate, %policy, "exclusive to inclusive");
            let result = exclusive_to_inclusive(amount, rate, policy)?;
            Ok(Outcome::plain(serde_json::to_value(result)?))
        }
        Command::ToExclusive(args) => {
            let (amount, rate, policy) = resolve_amount_args(args, config)?;
            debug!(%amount, %rate, %policy, "inclusive to exclusive");
            let result = inclusive_to_exclusive(amount, rate, policy)?;
            Ok(Outcome::plain(serde_json::to_value(result)?))
        }
        Command::RoundTrip(args) => {
            let (amount, rate, policy) = resolve_amount_args(args, config)?;
            debug!(%amount, %rate, %policy, "round trip check");
            let check = detect_round_trip_discrepancy(amount, rate, policy)?;
            Ok(Outcome {
                output: serde_json::to_value(check)?,
                warning: check.warning(),
            })
        }
    }
}

fn resolve_policy(flag: Option<&str>, config: &CliConfig) -> RoundingPolicy {
    flag.map(RoundingPolicy::from).unwrap_or(config.rounding)
}

fn resolve_rate(flag: Option<f64>, config: &CliConfig) -> Result<TaxRate> {
    let Some(pct) = flag else {
        return Ok(config.tax_rate);
    };

    let rate = TaxRate::try_from_percentage(pct)?;
    validate_tax_rate_bps(rate.bps())?;
    Ok(rate)
}

fn resolve_amount_args(
    args: &AmountArgs,
    config: &CliConfig,
) -> Result<(Money, TaxRate, RoundingPolicy)> {
    Ok((
        Money::from_units(args.amount),
        resolve_rate(args.rate, config)?,
        resolve_policy(args.policy.as_deref(), config),
    ))
}
