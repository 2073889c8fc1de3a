//! Revenue schedule construction for growth and flat projections

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::chain::{format_month, ChainConfig};
use crate::error::ConfigError;

/// How future revenue is projected from the historical series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevenueMode {
    /// Linear interpolation from the start multiplier toward the target
    /// multiplier over the horizon
    Growth,
    /// Future revenue held constant at the last historical value
    Flat,
}

impl RevenueMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RevenueMode::Growth => "growth",
            RevenueMode::Flat => "flat",
        }
    }
}

impl std::str::FromStr for RevenueMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "growth" => Ok(RevenueMode::Growth),
            "flat" => Ok(RevenueMode::Flat),
            _ => Err(ConfigError::invalid_type("mode", "`growth` or `flat`")),
        }
    }
}

/// One projected month before any revenue splitting
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulePoint {
    /// Month label (`YYYY-MM`)
    pub month: String,
    /// Gross revenue for the month
    pub revenue: f64,
}

/// Build the per-month revenue schedule for the configured horizon
///
/// Growth mode: period 0 revenue is the last historical value scaled by the
/// start multiplier, then each period interpolates linearly toward the target
/// multiplier with `t = period / horizon`. The interpolation is always
/// evaluated, so degenerate multiplier choices follow the same path.
///
/// Flat mode: every period repeats the last historical value; multipliers are
/// ignored.
pub fn build_schedule(
    config: &ChainConfig,
    mode: RevenueMode,
    start_month: NaiveDate,
    horizon_months: u32,
) -> Result<Vec<SchedulePoint>, ConfigError> {
    let last = config.last_historical_revenue()?;
    let total = horizon_months as f64;

    let mut points = Vec::with_capacity(horizon_months as usize);
    let mut month = start_month;

    for period in 0..horizon_months {
        let revenue = match mode {
            RevenueMode::Flat => last,
            RevenueMode::Growth => {
                let baseline = last * config.growth_multiplier;
                let t = period as f64 / total;
                baseline * (1.0 + t * (config.expected_future_growth_multiplier - 1.0))
            }
        };

        points.push(SchedulePoint {
            month: format_month(month),
            revenue,
        });

        month = month.checked_add_months(Months::new(1)).ok_or_else(|| {
            ConfigError::out_of_range(
                "horizon_months",
                horizon_months as f64,
                "projection horizon overflows the calendar",
            )
        })?;
    }

    log::debug!(
        "built {} schedule: {} periods from {}",
        mode.as_str(),
        points.len(),
        format_month(start_month)
    );

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::parse_month_key;
    use approx::assert_relative_eq;
    use std::collections::BTreeMap;

    fn test_config(growth: f64, expected: f64) -> ChainConfig {
        ChainConfig {
            chain_name: "Avalanche".to_string(),
            native_token: "AVAX".to_string(),
            governance_token: "NEURA".to_string(),
            rpcfi_partner: None,
            base_currency: "USD".to_string(),
            token_prices: BTreeMap::from([
                ("AVAX".to_string(), 25.0),
                ("NEURA".to_string(), 0.05),
            ]),
            initial_lp: BTreeMap::new(),
            growth_multiplier: growth,
            expected_future_growth_multiplier: expected,
            apy_scenarios: crate::chain::default_apy_scenarios(),
            historical_data: BTreeMap::from([("2025-09".to_string(), 10_000.0)]),
        }
    }

    fn start() -> NaiveDate {
        parse_month_key("2026-01").unwrap()
    }

    #[test]
    fn test_growth_schedule_boundaries() {
        let config = test_config(1.0, 3.0);
        let points = build_schedule(&config, RevenueMode::Growth, start(), 24).unwrap();

        assert_eq!(points.len(), 24);
        assert_relative_eq!(points[0].revenue, 10_000.0);
        // Midpoint: t = 12/24 = 0.5, factor = 1 + 0.5 * 2 = 2.0
        assert_relative_eq!(points[12].revenue, 20_000.0);
        // Final period: t = 23/24, factor approaches the 3x target
        assert_relative_eq!(points[23].revenue, 10_000.0 * (1.0 + 23.0 / 24.0 * 2.0));
    }

    #[test]
    fn test_growth_multiplier_scales_baseline() {
        let config = test_config(1.4, 2.0);
        let points = build_schedule(&config, RevenueMode::Growth, start(), 24).unwrap();

        assert_relative_eq!(points[0].revenue, 14_000.0);
    }

    #[test]
    fn test_flat_schedule_is_constant() {
        let config = test_config(1.4, 2.0);
        let points = build_schedule(&config, RevenueMode::Flat, start(), 24).unwrap();

        assert!(points.iter().all(|p| p.revenue == 10_000.0));
    }

    #[test]
    fn test_unit_multipliers_degenerate_to_constant() {
        let config = test_config(1.0, 1.0);
        let points = build_schedule(&config, RevenueMode::Growth, start(), 24).unwrap();

        assert!(points.iter().all(|p| p.revenue == 10_000.0));
    }

    #[test]
    fn test_month_labels_advance_across_years() {
        let config = test_config(1.0, 3.0);
        let points = build_schedule(&config, RevenueMode::Growth, start(), 24).unwrap();

        assert_eq!(points[0].month, "2026-01");
        assert_eq!(points[1].month, "2026-02");
        assert_eq!(points[11].month, "2026-12");
        assert_eq!(points[12].month, "2027-01");
        assert_eq!(points[23].month, "2027-12");
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("growth".parse::<RevenueMode>().unwrap(), RevenueMode::Growth);
        assert_eq!("FLAT".parse::<RevenueMode>().unwrap(), RevenueMode::Flat);
        assert!("linear".parse::<RevenueMode>().is_err());
    }
}
