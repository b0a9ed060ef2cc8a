//! Runtime wrappers around static encounter content.
//!
//! These implementations expose `combat-core` oracle traits and bundle them
//! into an [`OracleManager`] so the runtime can build [`CombatEnv`] snapshots
//! on demand. The data is immutable at runtime; dynamic state lives in
//! [`combat_core::CombatState`] and the codex.
mod items;
mod techniques;

use combat_content::ContentBundle;
use combat_core::{CombatConfig, CombatEnv};
use std::sync::Arc;

pub use items::ItemOracleImpl;
pub use techniques::TechniqueOracleImpl;

/// Manages all oracle implementations and provides unified access
#[derive(Clone)]
pub struct OracleManager {
    pub(crate) techniques: Arc<TechniqueOracleImpl>,
    pub(crate) items: Arc<ItemOracleImpl>,
    pub(crate) config: Arc<CombatConfig>,
}

impl OracleManager {
    pub fn new(
        techniques: Arc<TechniqueOracleImpl>,
        items: Arc<ItemOracleImpl>,
        config: Arc<CombatConfig>,
    ) -> Self {
        Self {
            techniques,
            items,
            config,
        }
    }

    /// Builds oracles from a loaded content directory.
    pub fn from_bundle(bundle: &ContentBundle) -> Self {
        Self::new(
            Arc::new(bundle.techniques.iter().cloned().collect()),
            Arc::new(bundle.items.iter().cloned().collect()),
            Arc::new(bundle.config.clone()),
        )
    }

    /// Borrowed view handed to the combat engine for one step.
    pub fn as_env(&self) -> CombatEnv<'_> {
        CombatEnv::with_all(
            self.config.as_ref(),
            self.techniques.as_ref(),
            self.items.as_ref(),
        )
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn techniques(&self) -> &TechniqueOracleImpl {
        &self.techniques
    }

    pub fn items(&self) -> &ItemOracleImpl {
        &self.items
    }
}

impl std::fmt::Debug for OracleManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OracleManager")
            .field("techniques", &self.techniques.len())
            .field("items", &self.items.len())
            .field("config", &self.config)
            .finish()
    }
}
