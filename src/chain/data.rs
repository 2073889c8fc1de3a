//! Chain configuration data structures matching the RPCfi config schema

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_base_currency() -> String {
    "USD".to_string()
}

/// APY scenarios applied when a config omits `apy_scenarios`
pub fn default_apy_scenarios() -> BTreeMap<String, f64> {
    BTreeMap::from([
        ("worst".to_string(), 20.0),
        ("base".to_string(), 30.0),
        ("best".to_string(), 40.0),
    ])
}

/// A single chain's RPCfi configuration
///
/// Instances built from raw JSON go through [`crate::chain::config_from_value`],
/// which validates every invariant below. Hand-built instances should call
/// [`ChainConfig::validate`] before projecting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Display name of the chain (e.g. "Avalanche")
    pub chain_name: String,

    /// Symbol of the chain's native token, bought back with half of the
    /// post-protocol revenue
    pub native_token: String,

    /// Symbol of the governance token forming the other side of the LP pair
    pub governance_token: String,

    /// Infrastructure partner receiving the protocol cut
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpcfi_partner: Option<String>,

    /// Currency all monetary amounts are denominated in
    #[serde(default = "default_base_currency")]
    pub base_currency: String,

    /// Unit price per token symbol, applied at the moment of buyback
    pub token_prices: BTreeMap<String, f64>,

    /// Seeded LP value per foundation; constant across the whole projection
    pub initial_lp: BTreeMap<String, f64>,

    /// Factor applied to the baseline revenue at simulation start
    pub growth_multiplier: f64,

    /// Target factor the revenue curve approaches by the end of the horizon
    pub expected_future_growth_multiplier: f64,

    /// Annual percentage rate per scenario name (20.0 means 20%)
    #[serde(default = "default_apy_scenarios")]
    pub apy_scenarios: BTreeMap<String, f64>,

    /// Monthly revenue keyed by zero-padded `YYYY-MM`; the last entry seeds
    /// the projection baseline
    pub historical_data: BTreeMap<String, f64>,
}

impl ChainConfig {
    /// Price of a token used as a buyback divisor
    ///
    /// Fails when the token has no price entry or the price is not strictly
    /// positive (a zero price would turn the buyback into a division by zero).
    pub fn price_of(&self, token: &str) -> Result<f64, ConfigError> {
        let field = format!("token_prices.{token}");
        let price = self
            .token_prices
            .get(token)
            .copied()
            .ok_or_else(|| ConfigError::missing(field.clone()))?;
        if price <= 0.0 {
            return Err(ConfigError::out_of_range(
                field,
                price,
                "buyback token price must be strictly positive",
            ));
        }
        Ok(price)
    }

    pub fn native_price(&self) -> Result<f64, ConfigError> {
        self.price_of(&self.native_token)
    }

    pub fn governance_price(&self) -> Result<f64, ConfigError> {
        self.price_of(&self.governance_token)
    }

    /// Combined foundation LP value
    pub fn foundation_lp_total(&self) -> f64 {
        self.initial_lp.values().sum()
    }

    /// Latest historical monthly revenue
    ///
    /// Zero-padded `YYYY-MM` keys sort chronologically, so the last map entry
    /// is the most recent month.
    pub fn last_historical_revenue(&self) -> Result<f64, ConfigError> {
        self.historical_data.values().next_back().copied().ok_or_else(|| {
            ConfigError::out_of_range("historical_data", 0.0, "must contain at least one entry")
        })
    }

    /// Annual percentage rate for a named scenario
    pub fn apy_for(&self, scenario: &str) -> Result<f64, ConfigError> {
        self.apy_scenarios.get(scenario).copied().ok_or_else(|| {
            ConfigError::UnknownScenario {
                scenario: scenario.to_string(),
                available: self
                    .apy_scenarios
                    .keys()
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(", "),
            }
        })
    }

    /// Check every invariant the projection arithmetic relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (token, &price) in &self.token_prices {
            let field = format!("token_prices.{token}");
            require_finite(&field, price)?;
            if price < 0.0 {
                return Err(ConfigError::out_of_range(
                    field,
                    price,
                    "token prices must be non-negative",
                ));
            }
        }

        // The two buyback divisors must exist and be strictly positive
        self.native_price()?;
        self.governance_price()?;

        for (name, &value) in &self.initial_lp {
            let field = format!("initial_lp.{name}");
            require_finite(&field, value)?;
            if value < 0.0 {
                return Err(ConfigError::out_of_range(
                    field,
                    value,
                    "foundation LP values must be non-negative",
                ));
            }
        }

        require_finite("growth_multiplier", self.growth_multiplier)?;
        if self.growth_multiplier < 0.0 {
            return Err(ConfigError::out_of_range(
                "growth_multiplier",
                self.growth_multiplier,
                "growth multiplier must be non-negative",
            ));
        }

        require_finite(
            "expected_future_growth_multiplier",
            self.expected_future_growth_multiplier,
        )?;
        if self.expected_future_growth_multiplier < 0.0 {
            return Err(ConfigError::out_of_range(
                "expected_future_growth_multiplier",
                self.expected_future_growth_multiplier,
                "growth multiplier must be non-negative",
            ));
        }

        if self.apy_scenarios.is_empty() {
            return Err(ConfigError::out_of_range(
                "apy_scenarios",
                0.0,
                "must contain at least one scenario",
            ));
        }
        for (name, &apy) in &self.apy_scenarios {
            let field = format!("apy_scenarios.{name}");
            require_finite(&field, apy)?;
            if apy < 0.0 {
                return Err(ConfigError::out_of_range(
                    field,
                    apy,
                    "APY must be non-negative",
                ));
            }
        }

        if self.historical_data.is_empty() {
            return Err(ConfigError::out_of_range(
                "historical_data",
                0.0,
                "must contain at least one entry",
            ));
        }
        for (month, &revenue) in &self.historical_data {
            parse_month_key(month)?;
            let field = format!("historical_data.{month}");
            require_finite(&field, revenue)?;
            if revenue < 0.0 {
                return Err(ConfigError::out_of_range(
                    field,
                    revenue,
                    "monthly revenue must be non-negative",
                ));
            }
        }

        Ok(())
    }

    /// Replace the historical revenue series, re-validating the result
    pub fn with_historical_data(
        mut self,
        data: BTreeMap<String, f64>,
    ) -> Result<Self, ConfigError> {
        self.historical_data = data;
        self.validate()?;
        Ok(self)
    }
}

fn require_finite(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid_type(field, "finite number"))
    }
}

/// Parse a month key into the first day of that month
///
/// Keys must be zero-padded `YYYY-MM` so that lexicographic map order is
/// chronological order.
pub fn parse_month_key(key: &str) -> Result<NaiveDate, ConfigError> {
    let parsed = NaiveDate::parse_from_str(&format!("{key}-01"), "%Y-%m-%d")
        .map_err(|_| ConfigError::invalid_type(key.to_string(), "`YYYY-MM` month key"))?;
    if format_month(parsed) != key {
        return Err(ConfigError::invalid_type(
            key.to_string(),
            "`YYYY-MM` month key",
        ));
    }
    Ok(parsed)
}

/// Format a date back into its `YYYY-MM` month key
pub fn format_month(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}
