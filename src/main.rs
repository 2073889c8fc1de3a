//! RPCfi Flow CLI
//!
//! Command-line interface for running revenue projections

use std::fs::File;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use rpcfi_flow::chain::{load_config, load_historical_csv, parse_month_key};
use rpcfi_flow::projection::{
    ProjectionEngine, ProjectionSettings, DEFAULT_HORIZON_MONTHS, DEFAULT_PROTOCOL_SHARE,
    DEFAULT_START_MONTH,
};
use rpcfi_flow::RevenueMode;

#[derive(Debug, Parser)]
#[command(
    name = "rpcfi_flow",
    about = "Project RPCfi buybacks, LP growth, and yield for one chain",
    version
)]
struct Cli {
    /// Path to the chain configuration JSON
    #[arg(long, default_value = "data/config_avax.json")]
    config: PathBuf,

    /// APY scenario to project
    #[arg(long, default_value = "base")]
    scenario: String,

    /// Revenue mode: growth or flat
    #[arg(long, default_value = "growth")]
    mode: String,

    /// Number of months to project
    #[arg(long, default_value_t = DEFAULT_HORIZON_MONTHS)]
    horizon: u32,

    /// Share of revenue routed to the protocol untouched
    #[arg(long, default_value_t = DEFAULT_PROTOCOL_SHARE)]
    protocol_share: f64,

    /// First projected month (YYYY-MM)
    #[arg(long, default_value = DEFAULT_START_MONTH)]
    start_month: String,

    /// Replace the config's historical data with a Month,RPC_Revenue_USD CSV
    #[arg(long)]
    historical: Option<PathBuf>,

    /// Write the full table to this CSV file
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    println!("RPCfi Flow v0.1.0");
    println!("=================\n");

    let mut config = load_config(&cli.config)?;
    if let Some(path) = &cli.historical {
        let data = load_historical_csv(path)?;
        config = config.with_historical_data(data)?;
    }

    println!("Chain: {}", config.chain_name);
    println!("  Native token: {} (${})", config.native_token, config.native_price()?);
    println!(
        "  Governance token: {} (${})",
        config.governance_token,
        config.governance_price()?
    );
    println!("  Foundation LP: ${:.2}", config.foundation_lp_total());
    println!("  Historical months: {}", config.historical_data.len());
    println!();

    let settings = ProjectionSettings {
        horizon_months: cli.horizon,
        protocol_share: cli.protocol_share,
        mode: cli.mode.parse::<RevenueMode>()?,
        start_month: parse_month_key(&cli.start_month)?,
    };

    let engine = ProjectionEngine::new(config, settings);
    let table = engine.project(&cli.scenario)?;

    println!(
        "Projection ({} scenario, {:.0}% APY, {} mode, {} periods):",
        table.scenario,
        table.apy,
        table.mode.as_str(),
        table.rows.len()
    );
    println!(
        "{:>6} {:>8} {:>12} {:>12} {:>12} {:>12} {:>14} {:>12} {:>12}",
        "Period", "Month", "Revenue", "Protocol", "NativeBB", "GovBB", "DevLP", "DevYld/wk", "FndYld/wk"
    );
    println!("{}", "-".repeat(110));

    for row in table.rows.iter().take(24) {
        println!(
            "{:>6} {:>8} {:>12.2} {:>12.2} {:>12.2} {:>12.2} {:>14.2} {:>12.2} {:>12.2}",
            row.period,
            row.month,
            row.revenue,
            row.protocol_cut,
            row.native_buyback,
            row.governance_buyback,
            row.developer_lp,
            row.developer_weekly_yield,
            row.foundation_weekly_yield,
        );
    }

    if table.rows.len() > 24 {
        println!("... ({} more periods)", table.rows.len() - 24);
    }

    if let Some(path) = &cli.output {
        let file = File::create(path)
            .with_context(|| format!("creating output file {}", path.display()))?;
        table.write_csv(file)?;
        println!("\nFull results written to: {}", path.display());
    }

    let summary = table.summary();
    println!("\nSummary:");
    println!("  Periods: {}", summary.periods);
    println!("  Total revenue: ${:.2}", summary.total_revenue);
    println!("  Total protocol cut: ${:.2}", summary.total_protocol);
    println!("  Total buybacks: ${:.2}", summary.total_buybacks);
    println!("  Final developer LP: ${:.2}", summary.final_developer_lp);
    println!("  Final LP TVL: ${:.2}", summary.final_total_lp);
    println!("  Total developer yield: ${:.2}", summary.total_developer_yield);
    println!("  Total foundation yield: ${:.2}", summary.total_foundation_yield);

    Ok(())
}
