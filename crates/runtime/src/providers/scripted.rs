//! Replays a fixed list of player decisions.
use std::collections::VecDeque;

use async_trait::async_trait;
use combat_core::{CombatState, PlayerAction};
use tokio::sync::Mutex;

use crate::api::{PlayerActionProvider, Result, RuntimeError};

/// Hands out the scripted actions in order, then fails with
/// [`RuntimeError::ScriptExhausted`].
pub struct ScriptedProvider {
    actions: Mutex<VecDeque<PlayerAction>>,
}

impl ScriptedProvider {
    pub fn new(actions: impl IntoIterator<Item = PlayerAction>) -> Self {
        Self {
            actions: Mutex::new(actions.into_iter().collect()),
        }
    }

    pub async fn remaining(&self) -> usize {
        self.actions.lock().await.len()
    }
}

#[async_trait]
impl PlayerActionProvider for ScriptedProvider {
    async fn provide_action(&self, _state: &CombatState) -> Result<PlayerAction> {
        self.actions
            .lock()
            .await
            .pop_front()
            .ok_or(RuntimeError::ScriptExhausted)
    }
}
