//! Player combatant.
//!
//! The player snapshot is carried in from the overworld when an encounter
//! starts and handed back when it ends. Besides combat fields it carries the
//! persisted progression fields (gold, experience, inventory, location) that
//! the encounter outcome mutates.

use std::collections::BTreeMap;

use crate::dice::proficiency_bonus;
use crate::stats::{Ability, AbilityScores, Loadout};

/// Item-id to count map.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Inventory {
    items: BTreeMap<String, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(mut self, id: impl Into<String>, count: u32) -> Self {
        self.add(id, count);
        self
    }

    pub fn count(&self, id: &str) -> u32 {
        self.items.get(id).copied().unwrap_or(0)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.count(id) > 0
    }

    pub fn add(&mut self, id: impl Into<String>, count: u32) {
        if count == 0 {
            return;
        }
        *self.items.entry(id.into()).or_insert(0) += count;
    }

    /// Removes one of `id`; returns false if none were held.
    pub fn take_one(&mut self, id: &str) -> bool {
        match self.items.get_mut(id) {
            Some(count) if *count > 1 => {
                *count -= 1;
                true
            }
            Some(_) => {
                self.items.remove(id);
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.items.iter().map(|(id, count)| (id.as_str(), *count))
    }
}

/// Where the player stands in the overworld.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Location {
    Town(String),
    Wilds(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerState {
    pub name: String,
    pub abilities: AbilityScores,
    pub level: i32,
    pub hp: u32,
    pub hp_max: u32,
    pub mp: u32,
    pub mp_max: u32,
    pub loadout: Loadout,
    /// Spell and ability ids the player may use.
    pub known_techniques: Vec<String>,
    /// Temporary +AC stance; cleared once the monster's next action resolves.
    #[cfg_attr(feature = "serde", serde(default))]
    pub defending: bool,

    pub inventory: Inventory,
    pub gold: u32,
    pub experience: u32,
    /// Level-ups earned in combat and not yet applied by the overworld.
    #[cfg_attr(feature = "serde", serde(default))]
    pub pending_level_ups: u32,
    pub location: Location,
    pub last_safe_town: String,
}

impl PlayerState {
    pub fn new(name: impl Into<String>, abilities: AbilityScores, level: i32) -> Self {
        Self {
            name: name.into(),
            abilities,
            level: level.max(1),
            hp: 10,
            hp_max: 10,
            mp: 0,
            mp_max: 0,
            loadout: Loadout::unarmed(),
            known_techniques: Vec::new(),
            defending: false,
            inventory: Inventory::new(),
            gold: 0,
            experience: 0,
            pending_level_ups: 0,
            location: Location::Town("home".into()),
            last_safe_town: "home".into(),
        }
    }

    pub fn with_hp(mut self, hp_max: u32) -> Self {
        self.hp = hp_max;
        self.hp_max = hp_max;
        self
    }

    pub fn with_mp(mut self, mp_max: u32) -> Self {
        self.mp = mp_max;
        self.mp_max = mp_max;
        self
    }

    pub fn with_loadout(mut self, loadout: Loadout) -> Self {
        self.loadout = loadout;
        self
    }

    pub fn with_techniques<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.known_techniques = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_inventory(mut self, inventory: Inventory) -> Self {
        self.inventory = inventory;
        self
    }

    pub fn with_gold(mut self, gold: u32) -> Self {
        self.gold = gold;
        self
    }

    pub fn proficiency(&self) -> i32 {
        proficiency_bonus(self.level)
    }

    pub fn modifier(&self, ability: Ability) -> i32 {
        self.abilities.modifier(ability)
    }

    pub fn knows(&self, technique_id: &str) -> bool {
        self.known_techniques.iter().any(|id| id == technique_id)
    }

    /// AC from equipment and DEX, without the defending bonus.
    pub fn base_armor_class(&self) -> i32 {
        self.loadout.armor_class(&self.abilities)
    }

    pub fn is_down(&self) -> bool {
        self.hp == 0
    }

    /// Applies damage, clamping at 0. Returns the HP actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.hp);
        self.hp -= lost;
        lost
    }

    /// Restores HP up to the maximum. Returns the HP actually gained.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let gained = amount.min(self.hp_max.saturating_sub(self.hp));
        self.hp += gained;
        gained
    }

    /// Restores MP up to the maximum. Returns the MP actually gained.
    pub fn restore_mana(&mut self, amount: u32) -> u32 {
        let gained = amount.min(self.mp_max.saturating_sub(self.mp));
        self.mp += gained;
        gained
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inventory_take_removes_empty_entries() {
        let mut inventory = Inventory::new().with_item("potion", 2);
        assert!(inventory.take_one("potion"));
        assert_eq!(inventory.count("potion"), 1);
        assert!(inventory.take_one("potion"));
        assert!(!inventory.contains("potion"));
        assert!(!inventory.take_one("potion"));
        assert_eq!(inventory.iter().count(), 0);
    }

    #[test]
    fn hp_clamps_both_ways() {
        let mut player = PlayerState::new("Ayla", AbilityScores::default(), 1).with_hp(12);
        assert_eq!(player.take_damage(20), 12);
        assert!(player.is_down());
        assert_eq!(player.heal(5), 5);
        assert_eq!(player.heal(50), 7);
        assert_eq!(player.hp, 12);
    }

    #[test]
    fn proficiency_tracks_level() {
        let player = PlayerState::new("Ayla", AbilityScores::default(), 5);
        assert_eq!(player.proficiency(), 3);
    }
}
