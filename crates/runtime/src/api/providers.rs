//! Asynchronous abstraction for sourcing player intent.
//!
//! Runtime users plug in [`PlayerActionProvider`] implementations so an
//! encounter can run with human input, scripted fixtures, or the autopilot.
use async_trait::async_trait;
use combat_core::{CombatState, PlayerAction};

use super::errors::Result;

/// Trait for providing player decisions based on the encounter state.
///
/// Called only while the phase is `PlayerTurn`, once per action; a player
/// turn that spends a bonus action asks again before the turn ends.
#[async_trait]
pub trait PlayerActionProvider: Send + Sync {
    async fn provide_action(&self, state: &CombatState) -> Result<PlayerAction>;
}

/// A provider that always attacks.
pub struct AttackProvider;

#[async_trait]
impl PlayerActionProvider for AttackProvider {
    async fn provide_action(&self, _state: &CombatState) -> Result<PlayerAction> {
        Ok(PlayerAction::Attack)
    }
}
