//! Load chain configurations from JSON and historical revenue from CSV

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use serde_json::{Map, Value};

use super::data::{default_apy_scenarios, ChainConfig};
use crate::error::ConfigError;

/// Build a validated [`ChainConfig`] from parsed JSON
///
/// Field-level failures surface as typed [`ConfigError`] values naming the
/// offending field, so callers can render them directly.
pub fn config_from_value(value: &Value) -> Result<ChainConfig, ConfigError> {
    let root = value
        .as_object()
        .ok_or_else(|| ConfigError::invalid_type("<config root>", "JSON object"))?;

    let config = ChainConfig {
        chain_name: require_string(root, "chain_name")?,
        native_token: require_string(root, "native_token")?,
        governance_token: require_string(root, "governance_token")?,
        rpcfi_partner: optional_string(root, "rpcfi_partner")?,
        base_currency: optional_string(root, "base_currency")?
            .unwrap_or_else(|| "USD".to_string()),
        token_prices: require_number_map(root, "token_prices")?,
        initial_lp: require_number_map(root, "initial_lp")?,
        growth_multiplier: require_number(root, "growth_multiplier")?,
        expected_future_growth_multiplier: require_number(
            root,
            "expected_future_growth_multiplier",
        )?,
        apy_scenarios: match root.get("apy_scenarios") {
            Some(v) => number_map("apy_scenarios", v)?,
            None => default_apy_scenarios(),
        },
        historical_data: require_number_map(root, "historical_data")?,
    };

    config.validate()?;
    Ok(config)
}

/// Parse and validate a config from raw JSON text
pub fn config_from_str(text: &str) -> Result<ChainConfig, ConfigError> {
    let value: Value = serde_json::from_str(text)
        .map_err(|_| ConfigError::invalid_type("<config root>", "JSON document"))?;
    config_from_value(&value)
}

/// Load a chain configuration from a JSON file
pub fn load_config<P: AsRef<Path>>(path: P) -> anyhow::Result<ChainConfig> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    let value: Value = serde_json::from_str(&text)
        .with_context(|| format!("parsing JSON in {}", path.display()))?;
    let config = config_from_value(&value)
        .with_context(|| format!("validating config {}", path.display()))?;

    log::info!(
        "loaded config for chain {} ({} historical months, {} scenarios)",
        config.chain_name,
        config.historical_data.len(),
        config.apy_scenarios.len()
    );

    Ok(config)
}

/// Raw CSV row matching the generator's `Month,RPC_Revenue_USD` output
#[derive(Debug, serde::Deserialize)]
struct RevenueRow {
    #[serde(rename = "Month")]
    month: String,
    #[serde(rename = "RPC_Revenue_USD")]
    revenue: f64,
}

/// Load a historical revenue series from a CSV file
pub fn load_historical_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<BTreeMap<String, f64>> {
    let path = path.as_ref();
    let reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening revenue CSV {}", path.display()))?;
    let data = historical_from_reader(reader)
        .with_context(|| format!("reading revenue CSV {}", path.display()))?;

    log::info!("loaded {} months of revenue from {}", data.len(), path.display());
    Ok(data)
}

/// Load a historical revenue series from any reader (e.g. a string buffer)
pub fn load_historical_from_reader<R: std::io::Read>(
    reader: R,
) -> anyhow::Result<BTreeMap<String, f64>> {
    historical_from_reader(csv::Reader::from_reader(reader))
}

fn historical_from_reader<R: std::io::Read>(
    mut reader: csv::Reader<R>,
) -> anyhow::Result<BTreeMap<String, f64>> {
    let mut data = BTreeMap::new();
    for result in reader.deserialize() {
        let row: RevenueRow = result?;
        data.insert(row.month, row.revenue);
    }
    Ok(data)
}

fn require_field<'a>(root: &'a Map<String, Value>, field: &str) -> Result<&'a Value, ConfigError> {
    root.get(field).ok_or_else(|| ConfigError::missing(field))
}

fn require_string(root: &Map<String, Value>, field: &str) -> Result<String, ConfigError> {
    require_field(root, field)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| ConfigError::invalid_type(field, "string"))
}

fn optional_string(
    root: &Map<String, Value>,
    field: &str,
) -> Result<Option<String>, ConfigError> {
    match root.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v
            .as_str()
            .map(|s| Some(s.to_string()))
            .ok_or_else(|| ConfigError::invalid_type(field, "string")),
    }
}

fn require_number(root: &Map<String, Value>, field: &str) -> Result<f64, ConfigError> {
    require_field(root, field)?
        .as_f64()
        .ok_or_else(|| ConfigError::invalid_type(field, "number"))
}

fn require_number_map(
    root: &Map<String, Value>,
    field: &str,
) -> Result<BTreeMap<String, f64>, ConfigError> {
    number_map(field, require_field(root, field)?)
}

fn number_map(field: &str, value: &Value) -> Result<BTreeMap<String, f64>, ConfigError> {
    let object = value
        .as_object()
        .ok_or_else(|| ConfigError::invalid_type(field, "object of numbers"))?;

    let mut map = BTreeMap::new();
    for (key, entry) in object {
        let number = entry
            .as_f64()
            .ok_or_else(|| ConfigError::invalid_type(format!("{field}.{key}"), "number"))?;
        map.insert(key.clone(), number);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_value() -> Value {
        json!({
            "chain_name": "Avalanche",
            "native_token": "AVAX",
            "governance_token": "NEURA",
            "rpcfi_partner": "Ankr",
            "token_prices": { "AVAX": 25.0, "NEURA": 0.05 },
            "initial_lp": {
                "Avalanche Foundation": 50000.0,
                "Neura Foundation": 50000.0
            },
            "growth_multiplier": 1.0,
            "expected_future_growth_multiplier": 3.0,
            "apy_scenarios": { "worst": 20.0, "base": 30.0, "best": 40.0 },
            "historical_data": {
                "2025-08": 30000.0,
                "2025-09": 35000.0
            }
        })
    }

    #[test]
    fn test_config_from_value() {
        let config = config_from_value(&sample_value()).unwrap();

        assert_eq!(config.chain_name, "Avalanche");
        assert_eq!(config.native_token, "AVAX");
        assert_eq!(config.base_currency, "USD");
        assert_eq!(config.rpcfi_partner.as_deref(), Some("Ankr"));
        assert_eq!(config.last_historical_revenue().unwrap(), 35_000.0);
    }

    #[test]
    fn test_missing_field() {
        let mut value = sample_value();
        value.as_object_mut().unwrap().remove("token_prices");

        let err = config_from_value(&value).unwrap_err();
        assert_eq!(
            err,
            ConfigError::missing("token_prices"),
        );
    }

    #[test]
    fn test_invalid_type() {
        let mut value = sample_value();
        value["growth_multiplier"] = json!("fast");

        let err = config_from_value(&value).unwrap_err();
        assert_eq!(err, ConfigError::invalid_type("growth_multiplier", "number"));
    }

    #[test]
    fn test_invalid_map_entry_type() {
        let mut value = sample_value();
        value["token_prices"]["AVAX"] = json!("25");

        let err = config_from_value(&value).unwrap_err();
        assert_eq!(
            err,
            ConfigError::invalid_type("token_prices.AVAX", "number")
        );
    }

    #[test]
    fn test_default_apy_scenarios_applied() {
        let mut value = sample_value();
        value.as_object_mut().unwrap().remove("apy_scenarios");

        let config = config_from_value(&value).unwrap();
        assert_eq!(config.apy_for("worst").unwrap(), 20.0);
        assert_eq!(config.apy_for("base").unwrap(), 30.0);
        assert_eq!(config.apy_for("best").unwrap(), 40.0);
    }

    #[test]
    fn test_zero_price_rejected() {
        let mut value = sample_value();
        value["token_prices"]["NEURA"] = json!(0.0);

        let err = config_from_value(&value).unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { .. }));
    }

    #[test]
    fn test_bad_month_key_rejected() {
        let mut value = sample_value();
        value["historical_data"]["2025-9"] = json!(10_000.0);

        let err = config_from_value(&value).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidType { .. }));
    }

    #[test]
    fn test_historical_from_reader() {
        let csv_text = "Month,RPC_Revenue_USD\n2025-04,15000.0\n2025-05,18000.0\n";
        let data = load_historical_from_reader(csv_text.as_bytes()).unwrap();

        assert_eq!(data.len(), 2);
        assert_eq!(data["2025-04"], 15_000.0);
        assert_eq!(data["2025-05"], 18_000.0);
    }
}
