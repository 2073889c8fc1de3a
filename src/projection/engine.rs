//! Core projection engine for monthly buyback, LP, and yield projections

use chrono::NaiveDate;

use super::schedule::{build_schedule, RevenueMode};
use super::table::{PeriodRow, ProjectionTable};
use crate::chain::ChainConfig;
use crate::error::ConfigError;

/// Average weeks per calendar month, used to scale weekly yield to a period
pub const WEEKS_PER_MONTH: f64 = 4.33;

/// Weeks per year, used to convert an annual rate to a weekly rate
pub const WEEKS_PER_YEAR: f64 = 52.0;

/// Default projection horizon (Jan 2026 - Dec 2027)
pub const DEFAULT_HORIZON_MONTHS: u32 = 24;

/// Default share of revenue routed to the protocol untouched
pub const DEFAULT_PROTOCOL_SHARE: f64 = 0.50;

/// First projected month in the reference deployment
pub const DEFAULT_START_MONTH: &str = "2026-01";

/// Configuration for a projection run
#[derive(Debug, Clone)]
pub struct ProjectionSettings {
    /// Number of months to project
    pub horizon_months: u32,

    /// Share of each period's revenue removed before the buyback split
    pub protocol_share: f64,

    /// Revenue projection mode
    pub mode: RevenueMode,

    /// First projected month
    pub start_month: NaiveDate,
}

impl ProjectionSettings {
    /// Default settings with an explicit mode
    pub fn with_mode(mode: RevenueMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Reject parameter combinations the arithmetic cannot honor
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.horizon_months == 0 {
            return Err(ConfigError::out_of_range(
                "horizon_months",
                0.0,
                "projection horizon must cover at least one period",
            ));
        }
        if !(0.0..=1.0).contains(&self.protocol_share) {
            return Err(ConfigError::out_of_range(
                "protocol_share",
                self.protocol_share,
                "protocol share must lie in [0, 1]",
            ));
        }
        Ok(())
    }
}

impl Default for ProjectionSettings {
    fn default() -> Self {
        Self {
            horizon_months: DEFAULT_HORIZON_MONTHS,
            protocol_share: DEFAULT_PROTOCOL_SHARE,
            mode: RevenueMode::Growth,
            start_month: NaiveDate::from_ymd_opt(2026, 1, 1).expect("static date is valid"),
        }
    }
}

/// Main projection engine
///
/// A pure transformation: identical config, settings, and scenario always
/// produce an identical table. No state survives between calls.
pub struct ProjectionEngine {
    config: ChainConfig,
    settings: ProjectionSettings,
}

impl ProjectionEngine {
    /// Create a new projection engine with given config and settings
    pub fn new(config: ChainConfig, settings: ProjectionSettings) -> Self {
        Self { config, settings }
    }

    /// Run the projection for a named APY scenario
    pub fn project(&self, scenario: &str) -> Result<ProjectionTable, ConfigError> {
        self.settings.validate()?;

        let apy = self.config.apy_for(scenario)?;
        let native_price = self.config.native_price()?;
        let governance_price = self.config.governance_price()?;

        let schedule = build_schedule(
            &self.config,
            self.settings.mode,
            self.settings.start_month,
            self.settings.horizon_months,
        )?;

        let foundation_lp = self.config.foundation_lp_total();
        let weekly_rate = apy / 100.0 / WEEKS_PER_YEAR;

        let mut rows = Vec::with_capacity(schedule.len());
        let mut developer_lp = 0.0;
        let mut cumulative_developer_yield = 0.0;
        let mut cumulative_foundation_yield = 0.0;

        for (period, point) in schedule.into_iter().enumerate() {
            let revenue = point.revenue;

            // Protocol cut leaves the system untouched; the remainder splits
            // evenly between the two buyback pools
            let protocol_cut = self.settings.protocol_share * revenue;
            let buyback_pool = revenue - protocol_cut;
            let native_buyback = buyback_pool / 2.0;
            let governance_buyback = buyback_pool - native_buyback;

            let native_units = native_buyback / native_price;
            let governance_units = governance_buyback / governance_price;

            // Value-weighted 1:1 pairing: the pool mints twice the smaller side
            let native_side = native_units * native_price;
            let governance_side = governance_units * governance_price;
            let lp_minted = 2.0 * native_side.min(governance_side);

            developer_lp += lp_minted;

            let developer_weekly_yield = developer_lp * weekly_rate;
            let foundation_weekly_yield = foundation_lp * weekly_rate;
            let developer_period_yield = developer_weekly_yield * WEEKS_PER_MONTH;
            let foundation_period_yield = foundation_weekly_yield * WEEKS_PER_MONTH;

            // Yields are paid out, never folded back into LP
            cumulative_developer_yield += developer_period_yield;
            cumulative_foundation_yield += foundation_period_yield;

            rows.push(PeriodRow {
                period: period as u32,
                month: point.month,
                revenue,
                protocol_cut,
                native_buyback,
                governance_buyback,
                native_units,
                governance_units,
                lp_minted,
                developer_lp,
                foundation_lp,
                total_lp: developer_lp + foundation_lp,
                developer_weekly_yield,
                foundation_weekly_yield,
                developer_period_yield,
                foundation_period_yield,
                cumulative_developer_yield,
                cumulative_foundation_yield,
            });
        }

        log::info!(
            "projected {} periods for {} ({} scenario, {} mode)",
            rows.len(),
            self.config.chain_name,
            scenario,
            self.settings.mode.as_str()
        );

        Ok(ProjectionTable {
            chain_name: self.config.chain_name.clone(),
            scenario: scenario.to_string(),
            apy,
            mode: self.settings.mode,
            rows,
        })
    }
}
