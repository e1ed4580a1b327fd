//! CLI configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults. Command-line flags override whatever is loaded here.
//!
//! | Variable             | Default | Meaning                          |
//! |----------------------|---------|----------------------------------|
//! | `TALLY_TAX_RATE_BPS` | `1000`  | Tax rate in basis points (10%)   |
//! | `TALLY_ROUNDING`     | `floor` | Rounding policy name or code     |

use std::env;

use tally_core::validation::validate_tax_rate_bps;
use tally_core::{RoundingPolicy, TaxRate};

/// Default tax rate: 10%.
pub const DEFAULT_TAX_RATE_BPS: u32 = 1000;

/// CLI configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CliConfig {
    /// Rate used when `--rate` is not given
    pub tax_rate: TaxRate,

    /// Policy used when `--policy` is not given
    pub rounding: RoundingPolicy,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            tax_rate: TaxRate::from_bps(DEFAULT_TAX_RATE_BPS),
            rounding: RoundingPolicy::Floor,
        }
    }
}

impl CliConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value if set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let tax_rate_bps = match lookup("TALLY_TAX_RATE_BPS") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidValue("TALLY_TAX_RATE_BPS".to_string()))?,
            None => DEFAULT_TAX_RATE_BPS,
        };
        validate_tax_rate_bps(tax_rate_bps)
            .map_err(|_| ConfigError::InvalidValue("TALLY_TAX_RATE_BPS".to_string()))?;

        // Unknown names fall back to FLOOR, same as everywhere else.
        let rounding = lookup("TALLY_ROUNDING")
            .map(|raw| RoundingPolicy::from(raw.as_str()))
            .unwrap_or_default();

        Ok(CliConfig {
            tax_rate: TaxRate::from_bps(tax_rate_bps),
            rounding,
        })
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
