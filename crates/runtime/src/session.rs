//! Defensive boundary around the combat engine.
//!
//! Every step runs against a scratch copy of the encounter state and codex.
//! The copy replaces the live values only when the engine returns events, so
//! a rejected action or a panic inside the rules leaves the encounter exactly
//! as it was.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use combat_core::{
    ActionRejected, CombatEngine, CombatEvent, CombatState, Dice, GameError, MonsterCodex,
    MonsterTemplate, PlayerAction, PlayerState, WeatherModifiers,
};
use tracing::{debug, error, info};

use crate::events::{EventBus, Topic};
use crate::oracle::OracleManager;

/// Message shown to the player when an action faults.
pub const FAULT_MESSAGE: &str = "Something went wrong. Try another action.";

/// What happened to one submitted step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionReply {
    /// The step resolved; events in order.
    Applied(Vec<CombatEvent>),
    /// Refused before resolution; state unchanged.
    Rejected { code: &'static str, reason: String },
    /// The rules faulted; state unchanged.
    Fault(String),
}

impl SessionReply {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    pub fn events(&self) -> &[CombatEvent] {
        match self {
            Self::Applied(events) => events,
            _ => &[],
        }
    }
}

/// One encounter plus everything needed to advance it.
pub struct EncounterSession<C> {
    state: CombatState,
    dice: Dice,
    codex: C,
    oracles: OracleManager,
    bus: EventBus,
}

impl<C: MonsterCodex + Clone> EncounterSession<C> {
    pub fn new(
        state: CombatState,
        dice: Dice,
        codex: C,
        oracles: OracleManager,
        bus: EventBus,
    ) -> Self {
        Self {
            state,
            dice,
            codex,
            oracles,
            bus,
        }
    }

    /// Fresh encounter with dice seeded from OS entropy.
    pub fn start(
        player: PlayerState,
        monster: MonsterTemplate,
        weather: WeatherModifiers,
        codex: C,
        oracles: OracleManager,
        bus: EventBus,
    ) -> Self {
        let seed = rand::random::<u64>();
        debug!(seed, monster = %monster.id, "encounter seeded");
        let state = CombatState::new(player, monster, weather);
        Self::new(state, Dice::seeded(seed), codex, oracles, bus)
    }

    pub fn state(&self) -> &CombatState {
        &self.state
    }

    pub fn codex(&self) -> &C {
        &self.codex
    }

    pub fn oracles(&self) -> &OracleManager {
        &self.oracles
    }

    pub fn events(&self) -> &EventBus {
        &self.bus
    }

    /// Hands back the final encounter state and the updated codex.
    pub fn into_parts(self) -> (CombatState, C) {
        (self.state, self.codex)
    }

    pub fn begin(&mut self) -> SessionReply {
        self.step("begin", |engine| engine.begin())
    }

    pub fn submit(&mut self, action: &PlayerAction) -> SessionReply {
        self.step(action.label(), |engine| engine.execute(action))
    }

    pub fn monster_turn(&mut self) -> SessionReply {
        self.step("monster turn", |engine| engine.run_monster_turn())
    }

    fn step<F>(&mut self, label: &str, run: F) -> SessionReply
    where
        F: FnOnce(&mut CombatEngine<'_, C>) -> Result<Vec<CombatEvent>, ActionRejected>,
    {
        let mut state = self.state.clone();
        let mut codex = self.codex.clone();
        let env = self.oracles.as_env();
        let dice = &mut self.dice;

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            let mut engine = CombatEngine::new(&mut state, dice, &mut codex, env);
            run(&mut engine)
        }));

        match outcome {
            Ok(Ok(events)) => {
                self.state = state;
                self.codex = codex;
                debug!(action = label, events = events.len(), "step applied");
                self.publish(&events);
                SessionReply::Applied(events)
            }
            Ok(Err(rejected)) => {
                let code = rejected.error_code();
                debug!(
                    action = label,
                    code,
                    severity = ?rejected.severity(),
                    reason = %rejected,
                    "action rejected"
                );
                SessionReply::Rejected {
                    code,
                    reason: rejected.to_string(),
                }
            }
            Err(payload) => {
                error!(
                    action = label,
                    panic = panic_message(payload.as_ref()),
                    phase = %self.state.phase,
                    "combat step faulted; state left unchanged"
                );
                SessionReply::Fault(FAULT_MESSAGE.to_owned())
            }
        }
    }

    fn publish(&self, events: &[CombatEvent]) {
        for event in events {
            match event {
                CombatEvent::ActionResolved(result) => {
                    debug!(detail = %result.message(), "action resolved");
                }
                CombatEvent::PhaseChanged { from, to } => {
                    info!(%from, %to, round = self.state.round, "phase changed");
                }
                CombatEvent::ArmorClassDiscovered {
                    monster_id,
                    armor_class,
                } => {
                    info!(monster = %monster_id, armor_class, "armor class discovered");
                }
                _ if Topic::of(event) == Topic::Outcome => {
                    info!(outcome = ?event, "encounter finished");
                }
                _ => {}
            }
            self.bus.publish(event.clone());
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use combat_core::{AbilityScores, CombatConfig, DamageDice, EncounterPhase, InMemoryCodex};

    use super::*;
    use crate::oracle::{ItemOracleImpl, TechniqueOracleImpl};

    fn session(faces: &[u32]) -> EncounterSession<InMemoryCodex> {
        let player = PlayerState::new("Ayla", AbilityScores::new(16, 10, 10, 10, 10, 10), 1)
            .with_hp(20);
        let monster =
            MonsterTemplate::new("rat", "Rat", 6, 12).with_attack(2, DamageDice::new(1, 4));
        let oracles = OracleManager::new(
            Arc::new(TechniqueOracleImpl::new()),
            Arc::new(ItemOracleImpl::new()),
            Arc::new(CombatConfig::default()),
        );
        EncounterSession::new(
            CombatState::new(player, monster, WeatherModifiers::CLEAR),
            Dice::scripted(faces.iter().copied()),
            InMemoryCodex::new(),
            oracles,
            EventBus::new(),
        )
    }

    #[test]
    fn rejection_keeps_state() {
        let mut session = session(&[15, 5]);
        assert!(session.begin().is_applied());
        let before = session.state().clone();

        let reply = session.submit(&PlayerAction::cast("fireball"));
        assert!(matches!(
            reply,
            SessionReply::Rejected {
                code: "COMBAT_UNKNOWN_TECHNIQUE",
                ..
            }
        ));
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn panic_becomes_fault_and_keeps_state() {
        // Initiative only; the attack roll finds the script empty and panics.
        let mut session = session(&[15, 5]);
        session.begin();
        let before = session.state().clone();

        let reply = session.submit(&PlayerAction::Attack);
        assert_eq!(reply, SessionReply::Fault(FAULT_MESSAGE.to_owned()));
        assert_eq!(session.state(), &before);
        assert_eq!(session.state().phase, EncounterPhase::PlayerTurn);
    }

    #[test]
    fn applied_steps_are_published() {
        let mut session = session(&[15, 5]);
        let mut phases = session.events().subscribe(Topic::Phase);
        session.begin();

        assert_eq!(
            phases.try_recv().unwrap(),
            CombatEvent::PhaseChanged {
                from: EncounterPhase::Init,
                to: EncounterPhase::PlayerTurn,
            }
        );
    }
}
