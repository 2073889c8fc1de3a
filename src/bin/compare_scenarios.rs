//! Compare projections across every APY scenario and both revenue modes
//!
//! Usage: cargo run --bin compare_scenarios -- --config data/config_avax.json

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;

use rpcfi_flow::chain::load_config;
use rpcfi_flow::projection::{ProjectionSettings, ProjectionTable, RevenueMode};
use rpcfi_flow::ScenarioRunner;

#[derive(Debug, Parser)]
#[command(
    name = "compare_scenarios",
    about = "Run every APY scenario in both revenue modes and compare outcomes"
)]
struct Cli {
    /// Path to the chain configuration JSON
    #[arg(long, default_value = "data/config_avax.json")]
    config: PathBuf,

    /// Comparison CSV output path
    #[arg(long, default_value = "scenario_comparison.csv")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = load_config(&cli.config)?;

    println!("{}", "=".repeat(72));
    println!("Scenario comparison for {}", config.chain_name);
    println!("{}", "=".repeat(72));

    let mut tables: Vec<ProjectionTable> = Vec::new();
    for mode in [RevenueMode::Growth, RevenueMode::Flat] {
        let runner =
            ScenarioRunner::with_settings(config.clone(), ProjectionSettings::with_mode(mode));
        tables.extend(runner.run_all()?);
    }

    println!(
        "{:<10} {:<8} {:>8} {:>14} {:>14} {:>14} {:>14}",
        "Scenario", "Mode", "APY", "Revenue", "Buybacks", "FinalTVL", "DevYield"
    );
    println!("{:-<88}", "");

    for table in &tables {
        let summary = table.summary();
        println!(
            "{:<10} {:<8} {:>7.0}% {:>14.2} {:>14.2} {:>14.2} {:>14.2}",
            table.scenario,
            table.mode.as_str(),
            table.apy,
            summary.total_revenue,
            summary.total_buybacks,
            summary.final_total_lp,
            summary.total_developer_yield,
        );
    }

    write_comparison_csv(&cli.output, &tables)?;
    println!("\nComparison written to: {}", cli.output.display());

    Ok(())
}

fn write_comparison_csv(path: &Path, tables: &[ProjectionTable]) -> anyhow::Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("creating comparison file {}", path.display()))?;

    writeln!(
        file,
        "Scenario,Mode,APY,TotalRevenue,TotalProtocol,TotalBuybacks,FinalDevLP,FinalTVL,TotalDevYield,TotalFoundationYield"
    )?;

    for table in tables {
        let s = table.summary();
        writeln!(
            file,
            "{},{},{:.1},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2}",
            table.scenario,
            table.mode.as_str(),
            table.apy,
            s.total_revenue,
            s.total_protocol,
            s.total_buybacks,
            s.final_developer_lp,
            s.final_total_lp,
            s.total_developer_yield,
            s.total_foundation_yield,
        )?;
    }

    Ok(())
}
