use crate::action::PlayerAction;
use crate::codex::MonsterCodex;
use crate::combat::{ActionResult, Resolver, Side, attempt_flee};
use crate::events::CombatEvent;
use crate::state::{ActionSlot, EncounterPhase};
use crate::stats::Ability;

use super::{ActionRejected, CombatEngine};

impl<C: MonsterCodex + ?Sized> CombatEngine<'_, C> {
    /// Validates, resolves and applies one player decision.
    ///
    /// Spending the turn action hands the turn to the monster; bonus actions
    /// keep the player in control.
    pub fn execute(&mut self, action: &PlayerAction) -> Result<Vec<CombatEvent>, ActionRejected> {
        match self.state.phase {
            EncounterPhase::PlayerTurn => {}
            phase if phase.is_terminal() => return Err(ActionRejected::EncounterOver),
            phase => return Err(ActionRejected::NotPlayersTurn { phase }),
        }

        let mut events = Vec::new();
        match action {
            PlayerAction::Attack => self.attack(&mut events)?,
            PlayerAction::Defend => self.defend(&mut events)?,
            PlayerAction::Cast(id) => self.cast(id, &mut events)?,
            PlayerAction::UseItem(id) => self.use_item(id, &mut events)?,
            PlayerAction::Flee => self.flee(&mut events)?,
        }

        events.extend(self.check_battle_end());
        if !self.state.is_over() && self.state.economy.turn_action_used {
            self.enter(EncounterPhase::MonsterTurn, &mut events);
        }
        Ok(events)
    }

    fn require_slot(&self, slot: ActionSlot) -> Result<(), ActionRejected> {
        let limit = self.env.config().max_items_per_turn;
        self.state
            .economy
            .require(slot)
            .map(|_| ())
            .map_err(|denied| ActionRejected::from_slot(denied, limit))
    }

    /// Main-hand attack, then the off-hand follow-up on a hit while the bonus
    /// action is free and the monster still stands.
    fn attack(&mut self, events: &mut Vec<CombatEvent>) -> Result<(), ActionRejected> {
        self.require_slot(ActionSlot::Turn)?;
        let config = self.env.config();

        let main = Resolver::new(&mut *self.dice, self.state.weather, config)
            .player_attack(&self.state.player, &self.state.monster);
        let hit = main.attack_roll().is_some_and(|roll| roll.is_hit());
        self.state.economy.spend(ActionSlot::Turn);
        self.record(main, events);

        if !hit || self.state.monster.is_down() || !self.state.economy.is_free(ActionSlot::Bonus) {
            return Ok(());
        }
        let off_hand = Resolver::new(&mut *self.dice, self.state.weather, config)
            .off_hand_attack(&self.state.player, &self.state.monster);
        if let Some(result) = off_hand {
            self.state.economy.spend(ActionSlot::Bonus);
            self.record(result, events);
        }
        Ok(())
    }

    fn defend(&mut self, events: &mut Vec<CombatEvent>) -> Result<(), ActionRejected> {
        self.require_slot(ActionSlot::Turn)?;
        let result = Resolver::new(&mut *self.dice, self.state.weather, self.env.config())
            .defend(Side::Player, &self.state.player.name);
        self.state.economy.spend(ActionSlot::Turn);
        self.record(result, events);
        Ok(())
    }

    fn cast(&mut self, id: &str, events: &mut Vec<CombatEvent>) -> Result<(), ActionRejected> {
        let technique = self
            .env
            .techniques()?
            .technique(id)
            .ok_or_else(|| ActionRejected::UnknownTechnique(id.to_owned()))?;
        if !self.state.player.knows(id) {
            return Err(ActionRejected::TechniqueNotKnown(technique.name));
        }
        let slot = ActionSlot::from(technique.timing);
        self.require_slot(slot)?;
        if self.state.player.mp < technique.mp_cost {
            return Err(ActionRejected::InsufficientMana {
                required: technique.mp_cost,
                available: self.state.player.mp,
            });
        }

        let result = Resolver::new(&mut *self.dice, self.state.weather, self.env.config())
            .technique(&self.state.player, &self.state.monster, &technique);
        self.state.economy.spend(slot);
        self.record(result, events);
        Ok(())
    }

    fn use_item(&mut self, id: &str, events: &mut Vec<CombatEvent>) -> Result<(), ActionRejected> {
        if !self.state.player.inventory.contains(id) {
            return Err(ActionRejected::ItemNotOwned(id.to_owned()));
        }
        let item = self
            .env
            .items()?
            .definition(id)
            .ok_or_else(|| ActionRejected::UnknownItem(id.to_owned()))?;
        if item.consumable_effect().is_none() {
            return Err(ActionRejected::ItemNotUsable(item.name));
        }
        let limit = self.env.config().max_items_per_turn;
        let slot = self
            .state
            .economy
            .item_slot(limit)
            .map_err(|denied| ActionRejected::from_slot(denied, limit))?;

        let result = Resolver::new(&mut *self.dice, self.state.weather, self.env.config())
            .item(&self.state.player, &self.state.monster, &item)
            .ok_or_else(|| ActionRejected::ItemNotUsable(item.name.clone()))?;
        self.state.player.inventory.take_one(id);
        self.state.economy.spend_item(slot);
        self.record(result, events);
        Ok(())
    }

    fn flee(&mut self, events: &mut Vec<CombatEvent>) -> Result<(), ActionRejected> {
        self.require_slot(ActionSlot::Turn)?;
        if self.state.monster.template.boss {
            return Err(ActionRejected::CannotFleeBoss);
        }

        let result = attempt_flee(
            &mut *self.dice,
            self.state.player.modifier(Ability::Dex),
            self.env.config(),
        );
        let escaped = result.escaped;
        self.state.economy.spend(ActionSlot::Turn);
        self.record(ActionResult::Flee(result), events);
        if escaped {
            self.enter(EncounterPhase::Fled, events);
        }
        Ok(())
    }
}
