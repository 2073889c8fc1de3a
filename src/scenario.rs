//! Scenario runner for batch projections
//!
//! Pre-loads a validated chain config once, then runs projections for any
//! number of APY scenarios or modes without re-reading the config file.

use rayon::prelude::*;

use crate::chain::ChainConfig;
use crate::error::ConfigError;
use crate::projection::{ProjectionEngine, ProjectionSettings, ProjectionTable, RevenueMode};

/// Pre-loaded scenario runner
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(load_config("data/config_avax.json")?);
/// let tables = runner.run_all()?;
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    config: ChainConfig,
    settings: ProjectionSettings,
}

impl ScenarioRunner {
    /// Create a runner with default projection settings
    pub fn new(config: ChainConfig) -> Self {
        Self {
            config,
            settings: ProjectionSettings::default(),
        }
    }

    /// Create a runner with explicit projection settings
    pub fn with_settings(config: ChainConfig, settings: ProjectionSettings) -> Self {
        Self { config, settings }
    }

    /// Run a single projection for a named scenario
    pub fn run(&self, scenario: &str) -> Result<ProjectionTable, ConfigError> {
        let engine = ProjectionEngine::new(self.config.clone(), self.settings.clone());
        engine.project(scenario)
    }

    /// Run every configured scenario
    ///
    /// The engine is pure, so scenarios fan out onto the rayon pool; results
    /// come back in scenario-name order regardless of completion order.
    pub fn run_all(&self) -> Result<Vec<ProjectionTable>, ConfigError> {
        let scenarios: Vec<&str> = self
            .config
            .apy_scenarios
            .keys()
            .map(|s| s.as_str())
            .collect();

        scenarios
            .par_iter()
            .map(|scenario| self.run(scenario))
            .collect()
    }

    /// Run the growth and flat projections for one scenario
    pub fn run_modes(
        &self,
        scenario: &str,
    ) -> Result<(ProjectionTable, ProjectionTable), ConfigError> {
        let mut growth_settings = self.settings.clone();
        growth_settings.mode = RevenueMode::Growth;
        let mut flat_settings = self.settings.clone();
        flat_settings.mode = RevenueMode::Flat;

        let growth = ProjectionEngine::new(self.config.clone(), growth_settings)
            .project(scenario)?;
        let flat = ProjectionEngine::new(self.config.clone(), flat_settings).project(scenario)?;

        Ok((growth, flat))
    }

    /// Get reference to the loaded config
    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    /// Get reference to the base settings
    pub fn settings(&self) -> &ProjectionSettings {
        &self.settings
    }

    /// Get mutable reference to the base settings for customization
    pub fn settings_mut(&mut self) -> &mut ProjectionSettings {
        &mut self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::default_apy_scenarios;
    use std::collections::BTreeMap;

    fn test_config() -> ChainConfig {
        ChainConfig {
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
            historical_data: BTreeMap::from([("2025-09".to_string(), 15_000.0)]),
        }
    }

    #[test]
    fn test_run_all_covers_every_scenario() {
        let runner = ScenarioRunner::new(test_config());
        let tables = runner.run_all().unwrap();

        let names: Vec<&str> = tables.iter().map(|t| t.scenario.as_str()).collect();
        assert_eq!(names, vec!["base", "best", "worst"]);
    }

    #[test]
    fn test_run_all_is_deterministic() {
        let runner = ScenarioRunner::new(test_config());

        let first = serde_json::to_string(&runner.run_all().unwrap()).unwrap();
        let second = serde_json::to_string(&runner.run_all().unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_yield_orders_with_apy() {
        let runner = ScenarioRunner::new(test_config());
        let tables = runner.run_all().unwrap();

        let yield_for = |name: &str| {
            tables
                .iter()
                .find(|t| t.scenario == name)
                .unwrap()
                .summary()
                .total_developer_yield
        };

        assert!(yield_for("worst") < yield_for("base"));
        assert!(yield_for("base") < yield_for("best"));
    }

    #[test]
    fn test_run_modes() {
        let runner = ScenarioRunner::new(test_config());
        let (growth, flat) = runner.run_modes("base").unwrap();

        assert_eq!(growth.mode, RevenueMode::Growth);
        assert_eq!(flat.mode, RevenueMode::Flat);

        // Flat holds the last historical value; growth starts above it
        // because the start multiplier is 1.4
        assert_eq!(flat.rows[0].revenue, 15_000.0);
        assert!(growth.rows[0].revenue > flat.rows[0].revenue);
    }

    #[test]
    fn test_unknown_scenario_propagates() {
        let runner = ScenarioRunner::new(test_config());
        assert!(matches!(
            runner.run("midcase").unwrap_err(),
            ConfigError::UnknownScenario { .. }
        ));
    }
}
