//! Projection output structures

use serde::{Deserialize, Serialize};

use super::schedule::RevenueMode;

/// A single row of projection output for one month
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodRow {
    // Timing
    pub period: u32,
    pub month: String,

    // Revenue split
    pub revenue: f64,
    pub protocol_cut: f64,
    pub native_buyback: f64,
    pub governance_buyback: f64,

    // Buyback token quantities
    pub native_units: f64,
    pub governance_units: f64,

    // Liquidity pool values
    pub lp_minted: f64,
    pub developer_lp: f64,
    pub foundation_lp: f64,
    pub total_lp: f64,

    // Yield (weekly rate, period amount, running totals)
    pub developer_weekly_yield: f64,
    pub foundation_weekly_yield: f64,
    pub developer_period_yield: f64,
    pub foundation_period_yield: f64,
    pub cumulative_developer_yield: f64,
    pub cumulative_foundation_yield: f64,
}

/// Complete projection result for one scenario/mode pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionTable {
    pub chain_name: String,
    pub scenario: String,
    pub apy: f64,
    pub mode: RevenueMode,
    pub rows: Vec<PeriodRow>,
}

impl ProjectionTable {
    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let total_revenue: f64 = self.rows.iter().map(|r| r.revenue).sum();
        let total_protocol: f64 = self.rows.iter().map(|r| r.protocol_cut).sum();
        let total_buybacks: f64 = self
            .rows
            .iter()
            .map(|r| r.native_buyback + r.governance_buyback)
            .sum();

        let last = self.rows.last();
        let final_developer_lp = last.map(|r| r.developer_lp).unwrap_or(0.0);
        let final_total_lp = last.map(|r| r.total_lp).unwrap_or(0.0);
        let total_developer_yield = last.map(|r| r.cumulative_developer_yield).unwrap_or(0.0);
        let total_foundation_yield = last.map(|r| r.cumulative_foundation_yield).unwrap_or(0.0);

        let average_weekly_developer_yield = if self.rows.is_empty() {
            0.0
        } else {
            self.rows
                .iter()
                .map(|r| r.developer_weekly_yield)
                .sum::<f64>()
                / self.rows.len() as f64
        };

        ProjectionSummary {
            periods: self.rows.len() as u32,
            total_revenue,
            total_protocol,
            total_buybacks,
            final_developer_lp,
            final_total_lp,
            total_developer_yield,
            total_foundation_yield,
            average_weekly_developer_yield,
        }
    }

    /// Write all rows as CSV, header included
    pub fn write_csv<W: std::io::Write>(&self, writer: W) -> csv::Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        for row in &self.rows {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub periods: u32,
    pub total_revenue: f64,
    pub total_protocol: f64,
    pub total_buybacks: f64,
    pub final_developer_lp: f64,
    pub final_total_lp: f64,
    pub total_developer_yield: f64,
    pub total_foundation_yield: f64,
    pub average_weekly_developer_yield: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn row(period: u32, revenue: f64, developer_lp: f64) -> PeriodRow {
        PeriodRow {
            period,
            month: format!("2026-{:02}", period + 1),
            revenue,
            protocol_cut: revenue * 0.5,
            native_buyback: revenue * 0.25,
            governance_buyback: revenue * 0.25,
            native_units: revenue * 0.25 / 25.0,
            governance_units: revenue * 0.25 / 0.05,
            lp_minted: revenue * 0.5,
            developer_lp,
            foundation_lp: 100_000.0,
            total_lp: developer_lp + 100_000.0,
            developer_weekly_yield: developer_lp * 0.30 / 52.0,
            foundation_weekly_yield: 100_000.0 * 0.30 / 52.0,
            developer_period_yield: developer_lp * 0.30 / 52.0 * 4.33,
            foundation_period_yield: 100_000.0 * 0.30 / 52.0 * 4.33,
            cumulative_developer_yield: 0.0,
            cumulative_foundation_yield: 0.0,
        }
    }

    fn table() -> ProjectionTable {
        ProjectionTable {
            chain_name: "Avalanche".to_string(),
            scenario: "base".to_string(),
            apy: 30.0,
            mode: RevenueMode::Growth,
            rows: vec![row(0, 10_000.0, 5_000.0), row(1, 12_000.0, 11_000.0)],
        }
    }

    #[test]
    fn test_summary_totals() {
        let summary = table().summary();

        assert_eq!(summary.periods, 2);
        assert_relative_eq!(summary.total_revenue, 22_000.0);
        assert_relative_eq!(summary.total_protocol, 11_000.0);
        assert_relative_eq!(summary.total_buybacks, 11_000.0);
        assert_relative_eq!(summary.final_developer_lp, 11_000.0);
        assert_relative_eq!(summary.final_total_lp, 111_000.0);
    }

    #[test]
    fn test_summary_of_empty_table() {
        let mut table = table();
        table.rows.clear();

        let summary = table.summary();
        assert_eq!(summary.periods, 0);
        assert_eq!(summary.total_revenue, 0.0);
        assert_eq!(summary.average_weekly_developer_yield, 0.0);
    }

    #[test]
    fn test_write_csv() {
        let mut buffer = Vec::new();
        table().write_csv(&mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();

        let header = lines.next().unwrap();
        assert!(header.starts_with("period,month,revenue,protocol_cut"));
        assert_eq!(lines.count(), 2);
    }
}
