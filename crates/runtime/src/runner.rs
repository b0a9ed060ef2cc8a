//! Async driver that plays an encounter to the end.
//!
//! The runner alternates between asking a [`PlayerActionProvider`] for the
//! player's decisions and letting the monster reply after the configured
//! delay. All rules live in the session; the runner only paces and routes.

use combat_core::{
    CombatState, EncounterOutcome, EncounterPhase, MonsterCodex, PlayerAction,
};
use tracing::{info, warn};

use crate::api::{PlayerActionProvider, Result, RuntimeError};
use crate::config::RuntimeConfig;
use crate::session::{EncounterSession, SessionReply};

/// Consecutive faults tolerated before the runner gives up.
const MAX_CONSECUTIVE_FAULTS: u32 = 3;

/// Final result of a driven encounter.
#[derive(Debug, Clone)]
pub struct EncounterReport<C> {
    pub outcome: EncounterOutcome,
    /// Player turns started.
    pub rounds: u32,
    pub state: CombatState,
    pub codex: C,
    /// Provider decisions the engine refused.
    pub rejections: u32,
}

pub struct EncounterRunner<C> {
    session: EncounterSession<C>,
    provider: Box<dyn PlayerActionProvider>,
    config: RuntimeConfig,
}

impl<C: MonsterCodex + Clone> EncounterRunner<C> {
    pub fn new(
        session: EncounterSession<C>,
        provider: impl PlayerActionProvider + 'static,
        config: RuntimeConfig,
    ) -> Self {
        Self {
            session,
            provider: Box::new(provider),
            config,
        }
    }

    pub fn session(&self) -> &EncounterSession<C> {
        &self.session
    }

    /// Runs until victory, defeat or a successful escape.
    ///
    /// A decision the engine rejects is replaced by a plain attack, which is
    /// always legal at the start of a player's action. Faults are retried a
    /// few times before the run is abandoned.
    pub async fn run(mut self) -> Result<EncounterReport<C>> {
        let mut rejections = 0;
        let mut faults = 0;

        if self.session.state().phase == EncounterPhase::Init {
            let reply = self.session.begin();
            settle(reply, &mut faults)?;
        }
        info!(
            player = %self.session.state().player.name,
            monster = %self.session.state().monster.name(),
            "encounter started"
        );

        loop {
            match self.session.state().phase {
                EncounterPhase::PlayerTurn => {
                    let action = self.provider.provide_action(self.session.state()).await?;
                    match self.session.submit(&action) {
                        SessionReply::Rejected { code, reason } => {
                            rejections += 1;
                            warn!(
                                %action,
                                code,
                                %reason,
                                "provider chose a rejected action; attacking instead"
                            );
                            match self.session.submit(&PlayerAction::Attack) {
                                SessionReply::Rejected { reason, .. } => {
                                    return Err(RuntimeError::Provider(reason));
                                }
                                reply => settle(reply, &mut faults)?,
                            }
                        }
                        reply => settle(reply, &mut faults)?,
                    }
                }
                EncounterPhase::MonsterTurn => {
                    if !self.config.monster_delay.is_zero() {
                        tokio::time::sleep(self.config.monster_delay).await;
                    }
                    let reply = self.session.monster_turn();
                    settle(reply, &mut faults)?;
                }
                EncounterPhase::Init => return Err(RuntimeError::NotStarted),
                EncounterPhase::Victory | EncounterPhase::Defeat | EncounterPhase::Fled => break,
            }
        }

        let (state, codex) = self.session.into_parts();
        let outcome = state
            .outcome
            .clone()
            .ok_or_else(|| RuntimeError::Fault("terminal phase without an outcome".into()))?;
        info!(phase = %state.phase, rounds = state.round, "encounter over");

        Ok(EncounterReport {
            outcome,
            rounds: state.round,
            state,
            codex,
            rejections,
        })
    }
}

/// Resets the fault streak on success; errors once it is too long.
fn settle(reply: SessionReply, faults: &mut u32) -> Result<()> {
    match reply {
        SessionReply::Applied(_) | SessionReply::Rejected { .. } => {
            *faults = 0;
            Ok(())
        }
        SessionReply::Fault(message) => {
            *faults += 1;
            if *faults >= MAX_CONSECUTIVE_FAULTS {
                Err(RuntimeError::Fault(message))
            } else {
                Ok(())
            }
        }
    }
}
