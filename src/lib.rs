//! RPCfi Flow - deterministic revenue projection engine for RPC-fee-sharing
//!
//! This library provides:
//! - Validated chain configuration loading (JSON config, CSV revenue series)
//! - Growth and flat revenue projections over a fixed monthly horizon
//! - Buyback splitting, LP accumulation, and weekly yield accrual
//! - Multi-scenario batch runs

pub mod chain;
pub mod error;
pub mod projection;
pub mod scenario;

// Re-export commonly used types
pub use chain::ChainConfig;
pub use error::ConfigError;
pub use projection::{PeriodRow, ProjectionEngine, ProjectionSettings, ProjectionTable, RevenueMode};
pub use scenario::ScenarioRunner;
