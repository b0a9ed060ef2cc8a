//! Simple policy for headless play.
//!
//! Below the heal threshold the autopilot reaches for a healing technique it
//! can afford, then for a healing consumable; otherwise it attacks. Every
//! choice it makes passes the engine's checks, so it never stalls a turn.

use async_trait::async_trait;
use combat_core::{
    ActionSlot, CombatState, ConsumableEffect, ItemOracle, PlayerAction, TechniqueEffect,
    TechniqueOracle,
};

use crate::api::{PlayerActionProvider, Result};
use crate::oracle::OracleManager;

pub struct AutoPilot {
    oracles: OracleManager,
    heal_below_percent: u32,
}

impl AutoPilot {
    pub const DEFAULT_HEAL_BELOW_PERCENT: u32 = 40;

    pub fn new(oracles: OracleManager) -> Self {
        Self {
            oracles,
            heal_below_percent: Self::DEFAULT_HEAL_BELOW_PERCENT,
        }
    }

    /// Heal when HP drops under `percent` of max HP.
    pub fn heal_below(mut self, percent: u32) -> Self {
        self.heal_below_percent = percent;
        self
    }

    /// The decision for the current state.
    pub fn choose(&self, state: &CombatState) -> PlayerAction {
        if self.is_hurt(state) {
            if let Some(id) = self.healing_technique(state) {
                return PlayerAction::Cast(id);
            }
            if let Some(id) = self.healing_item(state) {
                return PlayerAction::UseItem(id);
            }
        }
        PlayerAction::Attack
    }

    fn is_hurt(&self, state: &CombatState) -> bool {
        let player = &state.player;
        u64::from(player.hp) * 100 < u64::from(player.hp_max) * u64::from(self.heal_below_percent)
    }

    fn healing_technique(&self, state: &CombatState) -> Option<String> {
        let player = &state.player;
        player
            .known_techniques
            .iter()
            .filter_map(|id| self.oracles.techniques().technique(id))
            .find(|technique| {
                matches!(technique.effect, TechniqueEffect::Heal { .. })
                    && player.mp >= technique.mp_cost
                    && state
                        .economy
                        .require(ActionSlot::from(technique.timing))
                        .is_ok()
            })
            .map(|technique| technique.id)
    }

    fn healing_item(&self, state: &CombatState) -> Option<String> {
        let limit = self.oracles.config().max_items_per_turn;
        state.economy.item_slot(limit).ok()?;
        state
            .player
            .inventory
            .iter()
            .find(|(id, _)| {
                self.oracles.items().definition(id).is_some_and(|item| {
                    matches!(item.consumable_effect(), Some(ConsumableEffect::RestoreHp(_)))
                })
            })
            .map(|(id, _)| id.to_owned())
    }
}

#[async_trait]
impl PlayerActionProvider for AutoPilot {
    async fn provide_action(&self, state: &CombatState) -> Result<PlayerAction> {
        Ok(self.choose(state))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use combat_core::{
        AbilityScores, CombatConfig, DamageDice, Inventory, ItemDefinition, ItemKind,
        MonsterTemplate, PlayerState, TechniqueDefinition, WeatherModifiers,
    };

    use super::*;
    use crate::oracle::{ItemOracleImpl, TechniqueOracleImpl};

    fn oracles() -> OracleManager {
        let techniques: TechniqueOracleImpl = [TechniqueDefinition::ability(
            "second_wind",
            "Second Wind",
            TechniqueEffect::Heal {
                amount: DamageDice::new(1, 10),
                ability: None,
            },
        )
        .as_bonus()]
        .into_iter()
        .collect();
        let items: ItemOracleImpl = [ItemDefinition::new(
            "potion",
            "Potion",
            ItemKind::Consumable(ConsumableEffect::RestoreHp(DamageDice::new(2, 4))),
        )]
        .into_iter()
        .collect();
        OracleManager::new(
            Arc::new(techniques),
            Arc::new(items),
            Arc::new(CombatConfig::default()),
        )
    }

    fn state(hp: u32) -> CombatState {
        let mut player = PlayerState::new("Ayla", AbilityScores::default(), 1)
            .with_hp(20)
            .with_techniques(["second_wind"])
            .with_inventory(Inventory::new().with_item("potion", 1));
        player.hp = hp;
        CombatState::new(
            player,
            MonsterTemplate::new("rat", "Rat", 4, 10),
            WeatherModifiers::CLEAR,
        )
    }

    #[test]
    fn attacks_when_healthy() {
        assert_eq!(AutoPilot::new(oracles()).choose(&state(20)), PlayerAction::Attack);
    }

    #[test]
    fn prefers_technique_then_item_then_attack() {
        let pilot = AutoPilot::new(oracles());
        let mut state = state(5);
        assert_eq!(pilot.choose(&state), PlayerAction::cast("second_wind"));

        state.economy.spend(ActionSlot::Bonus);
        assert_eq!(pilot.choose(&state), PlayerAction::use_item("potion"));

        state.player.inventory.take_one("potion");
        assert_eq!(pilot.choose(&state), PlayerAction::Attack);
    }

    #[test]
    fn threshold_is_configurable() {
        let pilot = AutoPilot::new(oracles()).heal_below(90);
        assert_eq!(pilot.choose(&state(17)), PlayerAction::cast("second_wind"));
    }
}
