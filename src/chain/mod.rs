//! Chain configuration model and loaders

mod data;
pub mod loader;

pub use data::{default_apy_scenarios, format_month, parse_month_key, ChainConfig};
pub use loader::{config_from_str, config_from_value, load_config, load_historical_csv};
