//! Turn and action-economy state machine.
//!
//! The [`CombatEngine`] is the only writer of [`CombatState`]. It checks every
//! decision against the phase and the turn economy, asks the
//! [`Resolver`](crate::combat::Resolver) for a result, applies that result and
//! reports what happened as an ordered list of [`CombatEvent`]s.
//!
//! A rejected action returns [`ActionRejected`] and leaves the state untouched:
//! all checks run before the first mutation.

mod errors;
mod monster;
mod player;

pub use errors::ActionRejected;

use crate::codex::{ArmorClassTracker, MonsterCodex};
use crate::combat::{ActionResult, EffectOutcome, Side, roll_initiative};
use crate::dice::Dice;
use crate::env::CombatEnv;
use crate::events::CombatEvent;
use crate::outcome::{EncounterOutcome, apply_defeat, apply_victory};
use crate::state::{CombatState, EncounterPhase};
use crate::stats::Ability;

/// Drives one encounter.
///
/// The engine borrows the encounter state, the shared dice and the codex for
/// the duration of one call site; it owns nothing itself.
pub struct CombatEngine<'a, C: MonsterCodex + ?Sized> {
    state: &'a mut CombatState,
    dice: &'a mut Dice,
    codex: &'a mut C,
    env: CombatEnv<'a>,
}

impl<'a, C: MonsterCodex + ?Sized> CombatEngine<'a, C> {
    pub fn new(
        state: &'a mut CombatState,
        dice: &'a mut Dice,
        codex: &'a mut C,
        env: CombatEnv<'a>,
    ) -> Self {
        Self {
            state,
            dice,
            codex,
            env,
        }
    }

    pub fn state(&self) -> &CombatState {
        &*self.state
    }

    /// Rolls initiative and hands the first turn to the winner.
    ///
    /// A species whose AC is already in the codex skips AC tracking.
    pub fn begin(&mut self) -> Result<Vec<CombatEvent>, ActionRejected> {
        if self.state.phase != EncounterPhase::Init {
            return Err(ActionRejected::AlreadyStarted);
        }

        if self.codex.is_ac_discovered(self.state.monster.id()) {
            self.state.tracker = ArmorClassTracker::known();
        }

        let monster_modifier = self.state.monster.template.attack_bonus
            + self.state.weather.monster_initiative_bonus();
        let initiative = roll_initiative(
            self.dice,
            self.state.player.modifier(Ability::Dex),
            monster_modifier,
        );
        self.state.initiative = Some(initiative);

        let mut events = vec![CombatEvent::InitiativeRolled(initiative)];
        let first = match initiative.first {
            Side::Player => EncounterPhase::PlayerTurn,
            Side::Monster => EncounterPhase::MonsterTurn,
        };
        self.enter(first, &mut events);
        Ok(events)
    }

    /// Moves to a terminal phase if the encounter just ended, running the
    /// outcome logic on the way in.
    ///
    /// Once an outcome is recorded every further call is a no-op returning no
    /// events.
    pub fn check_battle_end(&mut self) -> Vec<CombatEvent> {
        let mut events = Vec::new();
        if self.state.outcome.is_some() {
            return events;
        }

        let terminal = if self.state.monster.is_down() {
            EncounterPhase::Victory
        } else if self.state.player.is_down() {
            EncounterPhase::Defeat
        } else if self.state.phase == EncounterPhase::Fled {
            EncounterPhase::Fled
        } else {
            return events;
        };
        self.enter(terminal, &mut events);

        let outcome = match terminal {
            EncounterPhase::Victory => {
                let report = apply_victory(
                    &mut self.state.player,
                    &self.state.monster.template,
                    &mut *self.dice,
                    &mut *self.codex,
                    self.state.tracker.is_known(),
                );
                events.push(CombatEvent::Victory(report.clone()));
                EncounterOutcome::Victory(report)
            }
            EncounterPhase::Defeat => {
                let report = apply_defeat(&mut self.state.player, self.env.config());
                events.push(CombatEvent::Defeat(report.clone()));
                EncounterOutcome::Defeat(report)
            }
            _ => {
                events.push(CombatEvent::Fled);
                EncounterOutcome::Fled
            }
        };
        self.state.outcome = Some(outcome);
        events
    }

    /// Changes phase, resetting the economy when a player turn begins.
    fn enter(&mut self, to: EncounterPhase, events: &mut Vec<CombatEvent>) {
        let from = self.state.phase;
        if from == to {
            return;
        }
        self.state.phase = to;
        if to == EncounterPhase::PlayerTurn {
            self.state.economy.reset();
            self.state.round += 1;
        }
        events.push(CombatEvent::PhaseChanged { from, to });
    }

    /// Applies a result, feeds the AC tracker and emits the events.
    fn record(&mut self, result: ActionResult, events: &mut Vec<CombatEvent>) {
        self.apply(&result);
        let discovery = self.observe(&result);
        events.push(CombatEvent::ActionResolved(result));
        events.extend(discovery);
    }

    fn apply(&mut self, result: &ActionResult) {
        match result {
            ActionResult::Attack(attack) => self.damage(attack.actor, attack.damage),
            ActionResult::Spell(technique) | ActionResult::Ability(technique) => {
                if technique.actor == Side::Player {
                    self.state.player.mp = self.state.player.mp.saturating_sub(technique.mp_cost);
                }
                self.apply_effect(technique.actor, &technique.effect);
            }
            ActionResult::Item(item) => self.apply_effect(Side::Player, &item.effect),
            ActionResult::Defend(defend) => match defend.actor {
                Side::Player => self.state.player.defending = true,
                Side::Monster => self.state.monster.defending = true,
            },
            ActionResult::Flee(_) => {}
        }
    }

    fn apply_effect(&mut self, actor: Side, effect: &EffectOutcome) {
        match *effect {
            EffectOutcome::Damage { amount, .. } => self.damage(actor, amount),
            EffectOutcome::Healing(amount) => match actor {
                Side::Player => {
                    self.state.player.heal(amount);
                }
                Side::Monster => {
                    self.state.monster.heal(amount);
                }
            },
            EffectOutcome::ManaRestored(amount) => {
                if actor == Side::Player {
                    self.state.player.restore_mana(amount);
                }
            }
        }
    }

    /// Damages whoever `attacker` is fighting. HP clamps at 0.
    fn damage(&mut self, attacker: Side, amount: u32) {
        match attacker {
            Side::Player => {
                self.state.monster.take_damage(amount);
            }
            Side::Monster => {
                self.state.player.take_damage(amount);
            }
        }
    }

    /// Feeds informative player attack totals to the AC tracker.
    ///
    /// Rolls made against a defending monster are skipped because their target
    /// AC is not the base AC.
    fn observe(&mut self, result: &ActionResult) -> Option<CombatEvent> {
        if result.actor() != Side::Player || self.state.monster.defending {
            return None;
        }
        let roll = result.attack_roll()?;
        if !roll.informs_armor_class() {
            return None;
        }
        if !self.state.tracker.observe(roll.total, roll.is_hit()) {
            return None;
        }
        let monster_id = self.state.monster.id().to_owned();
        self.codex.mark_ac_discovered(&monster_id);
        Some(CombatEvent::ArmorClassDiscovered {
            monster_id,
            armor_class: self.state.monster.template.armor_class,
        })
    }
}
