use crate::codex::MonsterCodex;
use crate::combat::{ActionResult, Resolver, Side};
use crate::events::CombatEvent;
use crate::state::EncounterPhase;

use super::{ActionRejected, CombatEngine};

impl<C: MonsterCodex + ?Sized> CombatEngine<'_, C> {
    /// Picks and resolves the monster's action, then returns the turn to the
    /// player (or ends the encounter in defeat).
    ///
    /// Policy: a small chance to defend; otherwise the first special ability
    /// whose chance roll succeeds, in declaration order; otherwise a basic
    /// attack.
    pub fn run_monster_turn(&mut self) -> Result<Vec<CombatEvent>, ActionRejected> {
        match self.state.phase {
            EncounterPhase::MonsterTurn => {}
            phase if phase.is_terminal() => return Err(ActionRejected::EncounterOver),
            phase => return Err(ActionRejected::NotMonstersTurn { phase }),
        }

        let mut events = Vec::new();
        self.state.monster.defending = false;

        let result = self.choose_monster_action();
        self.record(result, &mut events);
        // the stance only lasts until the monster's reply has resolved
        self.state.player.defending = false;

        events.extend(self.check_battle_end());
        if !self.state.is_over() {
            self.enter(EncounterPhase::PlayerTurn, &mut events);
        }
        Ok(events)
    }

    fn choose_monster_action(&mut self) -> ActionResult {
        let config = self.env.config();
        let weather = self.state.weather;
        let monster = &self.state.monster;
        let player = &self.state.player;

        if self.dice.percent(config.monster_defend_chance) {
            return Resolver::new(&mut *self.dice, weather, config)
                .defend(Side::Monster, monster.name());
        }

        let dice = &mut *self.dice;
        let triggered = monster
            .template
            .abilities
            .iter()
            .find(|ability| dice.percent(ability.chance));

        let mut resolver = Resolver::new(dice, weather, config);
        match triggered {
            Some(ability) => resolver.monster_ability(monster, ability, player),
            None => resolver.monster_attack(monster, player),
        }
    }
}
