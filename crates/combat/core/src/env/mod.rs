//! Traits describing read-only encounter data.
//!
//! Oracles expose technique and item definitions. The [`CombatEnv`] aggregate
//! bundles them with the rules config so the engine can access everything it
//! needs without hard coupling to concrete implementations.
mod error;
mod items;
mod techniques;
mod weather;

pub use error::OracleError;
pub use items::{ConsumableEffect, ItemDefinition, ItemKind, ItemOracle};
pub use techniques::{
    ActionTiming, TechniqueDefinition, TechniqueEffect, TechniqueOracle, TechniqueSource,
};
pub use weather::{WeatherBoost, WeatherModifiers};

use crate::config::CombatConfig;

/// Aggregates read-only oracles required by the combat engine.
#[derive(Clone, Copy)]
pub struct CombatEnv<'a> {
    techniques: Option<&'a dyn TechniqueOracle>,
    items: Option<&'a dyn ItemOracle>,
    config: &'a CombatConfig,
}

impl<'a> CombatEnv<'a> {
    pub fn new(config: &'a CombatConfig) -> Self {
        Self {
            techniques: None,
            items: None,
            config,
        }
    }

    pub fn with_all(
        config: &'a CombatConfig,
        techniques: &'a dyn TechniqueOracle,
        items: &'a dyn ItemOracle,
    ) -> Self {
        Self {
            techniques: Some(techniques),
            items: Some(items),
            config,
        }
    }

    pub fn with_techniques(mut self, techniques: &'a dyn TechniqueOracle) -> Self {
        self.techniques = Some(techniques);
        self
    }

    pub fn with_items(mut self, items: &'a dyn ItemOracle) -> Self {
        self.items = Some(items);
        self
    }

    pub fn config(&self) -> &'a CombatConfig {
        self.config
    }

    /// Returns the TechniqueOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::TechniquesNotAvailable` if no technique oracle was provided.
    pub fn techniques(&self) -> Result<&'a dyn TechniqueOracle, OracleError> {
        self.techniques.ok_or(OracleError::TechniquesNotAvailable)
    }

    /// Returns the ItemOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::ItemsNotAvailable` if no item oracle was provided.
    pub fn items(&self) -> Result<&'a dyn ItemOracle, OracleError> {
        self.items.ok_or(OracleError::ItemsNotAvailable)
    }
}

impl core::fmt::Debug for CombatEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CombatEnv")
            .field("techniques", &self.techniques.is_some())
            .field("items", &self.items.is_some())
            .field("config", self.config)
            .finish()
    }
}
