//! Generate synthetic RPC revenue data for projection runs
//!
//! Produces flat-revenue monthly series with bounded random variation, in the
//! same `Month,RPC_Revenue_USD` format the projection CLI consumes, plus
//! sample per-chain config files.

use std::collections::BTreeMap;
use std::fs::File;

use anyhow::{bail, Context};
use chrono::{Months, NaiveDate};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use rpcfi_flow::chain::{default_apy_scenarios, format_month, parse_month_key, ChainConfig};

/// A revenue generation preset
#[derive(Debug, Clone, Copy)]
struct Preset {
    base_revenue: f64,
    volatility: f64,
}

const PRESET_NAMES: [&str; 4] = ["conservative", "moderate", "aggressive", "volatile"];

fn preset(name: &str) -> Option<Preset> {
    match name {
        "conservative" => Some(Preset {
            base_revenue: 12_000.0,
            volatility: 0.02,
        }),
        "moderate" => Some(Preset {
            base_revenue: 15_000.0,
            volatility: 0.05,
        }),
        "aggressive" => Some(Preset {
            base_revenue: 20_000.0,
            volatility: 0.08,
        }),
        "volatile" => Some(Preset {
            base_revenue: 15_000.0,
            volatility: 0.15,
        }),
        _ => None,
    }
}

#[derive(Debug, Parser)]
#[command(name = "generate_revenue", about = "Generate synthetic RPC revenue data")]
struct Cli {
    /// Revenue preset: conservative, moderate, aggressive, volatile, or all
    #[arg(long, default_value = "moderate")]
    scenario: String,

    /// Output format: csv, json, or both
    #[arg(long, default_value = "both")]
    format: String,

    /// Output filename prefix
    #[arg(long, default_value = "revenue_data")]
    output: String,

    /// First month of the generated window (YYYY-MM)
    #[arg(long, default_value = "2025-04")]
    start: String,

    /// Last month of the generated window (YYYY-MM)
    #[arg(long, default_value = "2025-09")]
    end: String,

    /// RNG seed for reproducible series
    #[arg(long)]
    seed: Option<u64>,

    /// Write sample chain config files instead of revenue data
    #[arg(long)]
    create_configs: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.create_configs {
        println!("Creating sample configuration files...");
        create_sample_configs()?;
        return Ok(());
    }

    if !matches!(cli.format.as_str(), "csv" | "json" | "both") {
        bail!("unknown format `{}` (expected csv, json, or both)", cli.format);
    }

    let start = parse_month_key(&cli.start)?;
    let end = parse_month_key(&cli.end)?;
    if end < start {
        bail!("--end must not precede --start");
    }

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let presets: Vec<(&str, Preset)> = if cli.scenario == "all" {
        PRESET_NAMES
            .iter()
            .map(|&name| (name, preset(name).expect("preset table covers all names")))
            .collect()
    } else {
        let p = preset(&cli.scenario).with_context(|| {
            format!(
                "unknown scenario `{}` (expected one of {}, or all)",
                cli.scenario,
                PRESET_NAMES.join(", ")
            )
        })?;
        vec![(cli.scenario.as_str(), p)]
    };

    for (name, preset) in presets {
        let data = generate_series(start, end, preset, &mut rng);
        let total: f64 = data.values().sum();
        println!(
            "\nGenerated {name} scenario: ${total:.0} over {} months",
            data.len()
        );
        for (month, revenue) in &data {
            println!("  {month}: ${revenue:.0}");
        }

        if matches!(cli.format.as_str(), "csv" | "both") {
            save_csv(&data, &format!("{}_{}.csv", cli.output, name))?;
        }
        if matches!(cli.format.as_str(), "json" | "both") {
            save_json(&data, &format!("{}_{}.json", cli.output, name))?;
        }
    }

    Ok(())
}

/// Generate one flat-revenue series with bounded uniform jitter
fn generate_series(
    start: NaiveDate,
    end: NaiveDate,
    preset: Preset,
    rng: &mut StdRng,
) -> BTreeMap<String, f64> {
    let mut data = BTreeMap::new();
    let mut month = start;

    while month <= end {
        let jitter = 1.0 + rng.gen_range(-preset.volatility..=preset.volatility);
        let mut revenue = preset.base_revenue * jitter;

        // Floor at half the base, then round to the nearest thousand
        revenue = revenue.max(preset.base_revenue * 0.5);
        revenue = (revenue / 1_000.0).round() * 1_000.0;

        data.insert(format_month(month), revenue);
        month = month
            .checked_add_months(Months::new(1))
            .expect("generation window overflows the calendar");
    }

    data
}

fn save_csv(data: &BTreeMap<String, f64>, filename: &str) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(filename)
        .with_context(|| format!("creating {filename}"))?;

    wtr.write_record(["Month", "RPC_Revenue_USD"])?;
    for (month, revenue) in data {
        let revenue_field = format!("{revenue:.1}");
        wtr.write_record([month.as_str(), revenue_field.as_str()])?;
    }
    wtr.flush()?;

    println!("Revenue data saved to {filename}");
    Ok(())
}

fn save_json(data: &BTreeMap<String, f64>, filename: &str) -> anyhow::Result<()> {
    let file = File::create(filename).with_context(|| format!("creating {filename}"))?;
    serde_json::to_writer_pretty(file, data)?;

    println!("Revenue data saved to {filename}");
    Ok(())
}

/// Write one sample config per supported chain
fn create_sample_configs() -> anyhow::Result<()> {
    for (filename, config) in sample_configs() {
        let file = File::create(&filename).with_context(|| format!("creating {filename}"))?;
        serde_json::to_writer_pretty(file, &config)?;
        println!("Created {filename}");
    }
    Ok(())
}

fn sample_configs() -> Vec<(String, ChainConfig)> {
    let avalanche = ChainConfig {
        chain_name: "Avalanche".to_string(),
        native_token: "AVAX".to_string(),
        governance_token: "NEURA".to_string(),
        rpcfi_partner: Some("Ankr".to_string()),
        base_currency: "USD".to_string(),
        token_prices: BTreeMap::from([
            ("AVAX".to_string(), 25.0),
            ("NEURA".to_string(), 0.05),
        ]),
        initial_lp: BTreeMap::from([
            ("Avalanche Foundation".to_string(), 50_000.0),
            ("Neura Foundation".to_string(), 50_000.0),
        ]),
        growth_multiplier: 1.0,
        expected_future_growth_multiplier: 3.0,
        apy_scenarios: default_apy_scenarios(),
        historical_data: BTreeMap::from([
            ("2025-04".to_string(), 15_000.0),
            ("2025-05".to_string(), 18_000.0),
            ("2025-06".to_string(), 22_000.0),
            ("2025-07".to_string(), 25_000.0),
            ("2025-08".to_string(), 30_000.0),
            ("2025-09".to_string(), 35_000.0),
        ]),
    };

    let tron = ChainConfig {
        chain_name: "Tron".to_string(),
        native_token: "TRX".to_string(),
        governance_token: "ANKR".to_string(),
        rpcfi_partner: Some("Ankr".to_string()),
        base_currency: "USD".to_string(),
        token_prices: BTreeMap::from([
            ("TRX".to_string(), 0.12),
            ("ANKR".to_string(), 0.025),
        ]),
        initial_lp: BTreeMap::from([
            ("Tron Foundation".to_string(), 50_000.0),
            ("Ankr Foundation".to_string(), 50_000.0),
        ]),
        growth_multiplier: 1.4,
        expected_future_growth_multiplier: 2.0,
        apy_scenarios: default_apy_scenarios(),
        historical_data: BTreeMap::from([
            ("2025-04".to_string(), 14_000.0),
            ("2025-05".to_string(), 15_000.0),
            ("2025-06".to_string(), 15_000.0),
            ("2025-07".to_string(), 16_000.0),
            ("2025-08".to_string(), 15_000.0),
            ("2025-09".to_string(), 15_000.0),
        ]),
    };

    vec![
        ("config_avax.json".to_string(), avalanche),
        ("config_tron.json".to_string(), tron),
    ]
}
