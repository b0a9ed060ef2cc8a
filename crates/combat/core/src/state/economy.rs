//! Per-turn action budget.

use crate::env::ActionTiming;

/// Slot of the turn economy an action consumes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum ActionSlot {
    Turn,
    Bonus,
}

impl From<ActionTiming> for ActionSlot {
    fn from(timing: ActionTiming) -> Self {
        match timing {
            ActionTiming::Turn => Self::Turn,
            ActionTiming::Bonus => Self::Bonus,
        }
    }
}

/// Why a slot could not be granted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotDenied {
    TurnActionUsed,
    BonusActionUsed,
    ItemLimitReached,
}

/// Action budget for the current player turn.
///
/// Only the engine mutates this; everyone else reads a copy. It is reset once,
/// when a player turn begins.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnEconomy {
    pub turn_action_used: bool,
    pub bonus_action_used: bool,
    pub items_used_this_turn: u8,
}

impl TurnEconomy {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_free(&self, slot: ActionSlot) -> bool {
        match slot {
            ActionSlot::Turn => !self.turn_action_used,
            ActionSlot::Bonus => !self.bonus_action_used,
        }
    }

    /// Checks that `slot` is still available.
    pub fn require(&self, slot: ActionSlot) -> Result<ActionSlot, SlotDenied> {
        match slot {
            _ if self.is_free(slot) => Ok(slot),
            ActionSlot::Turn => Err(SlotDenied::TurnActionUsed),
            ActionSlot::Bonus => Err(SlotDenied::BonusActionUsed),
        }
    }

    /// Picks the slot the next item use would consume.
    ///
    /// The first item takes the bonus slot when free and the turn action
    /// otherwise; every later item takes the turn action. Past `max_items`
    /// nothing is granted.
    pub fn item_slot(&self, max_items: u8) -> Result<ActionSlot, SlotDenied> {
        if self.items_used_this_turn >= max_items {
            return Err(SlotDenied::ItemLimitReached);
        }
        if self.items_used_this_turn == 0 && self.is_free(ActionSlot::Bonus) {
            return Ok(ActionSlot::Bonus);
        }
        self.require(ActionSlot::Turn)
    }

    pub fn spend(&mut self, slot: ActionSlot) {
        match slot {
            ActionSlot::Turn => self.turn_action_used = true,
            ActionSlot::Bonus => self.bonus_action_used = true,
        }
    }

    pub fn spend_item(&mut self, slot: ActionSlot) {
        self.spend(slot);
        self.items_used_this_turn = self.items_used_this_turn.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn items_take_bonus_then_turn_then_nothing() {
        let mut economy = TurnEconomy::default();

        let first = economy.item_slot(2).unwrap();
        assert_eq!(first, ActionSlot::Bonus);
        economy.spend_item(first);

        let second = economy.item_slot(2).unwrap();
        assert_eq!(second, ActionSlot::Turn);
        economy.spend_item(second);

        assert_eq!(economy.item_slot(2), Err(SlotDenied::ItemLimitReached));
    }

    #[test]
    fn first_item_falls_back_to_turn_action() {
        let mut economy = TurnEconomy::default();
        economy.spend(ActionSlot::Bonus);
        assert_eq!(economy.item_slot(2), Ok(ActionSlot::Turn));
    }

    #[test]
    fn second_item_needs_turn_action() {
        let mut economy = TurnEconomy::default();
        economy.spend_item(ActionSlot::Bonus);
        economy.spend(ActionSlot::Turn);
        assert_eq!(economy.item_slot(2), Err(SlotDenied::TurnActionUsed));
    }

    #[test]
    fn reset_clears_everything() {
        let mut economy = TurnEconomy {
            turn_action_used: true,
            bonus_action_used: true,
            items_used_this_turn: 2,
        };
        economy.reset();
        assert_eq!(economy, TurnEconomy::default());
    }
}
