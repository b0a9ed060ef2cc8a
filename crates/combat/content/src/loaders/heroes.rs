//! Hero preset loader.
//!
//! Presets name their gear by item id; [`HeroPreset::build`] resolves those ids
//! against the item catalog and validates the hand rules.

use std::path::Path;

use combat_core::{
    AbilityScores, Armor, Inventory, ItemDefinition, ItemKind, Loadout, Location, PlayerState,
    Shield, Weapon,
};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

fn default_level() -> i32 {
    1
}

fn default_town() -> String {
    "home".into()
}

/// A ready-made starting character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroPreset {
    pub id: String,
    pub name: String,
    pub abilities: AbilityScores,
    #[serde(default = "default_level")]
    pub level: i32,
    pub hp: u32,
    #[serde(default)]
    pub mp: u32,
    /// Weapon item id; bare hands when absent.
    #[serde(default)]
    pub main_hand: Option<String>,
    #[serde(default)]
    pub off_hand: Option<String>,
    #[serde(default)]
    pub shield: Option<String>,
    #[serde(default)]
    pub armor: Option<String>,
    #[serde(default)]
    pub techniques: Vec<String>,
    #[serde(default)]
    pub inventory: Vec<(String, u32)>,
    #[serde(default)]
    pub gold: u32,
    #[serde(default = "default_town")]
    pub town: String,
}

impl HeroPreset {
    /// Item ids this preset refers to (equipment and inventory).
    pub fn item_ids(&self) -> impl Iterator<Item = &str> {
        [&self.main_hand, &self.off_hand, &self.shield, &self.armor]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .chain(self.inventory.iter().map(|(id, _)| id.as_str()))
    }

    /// Builds the player, resolving equipment ids against `items`.
    pub fn build(&self, items: &[ItemDefinition]) -> LoadResult<PlayerState> {
        let main_hand = match &self.main_hand {
            Some(id) => self.weapon(items, id)?,
            None => Weapon::unarmed(),
        };
        let off_hand = self
            .off_hand
            .as_deref()
            .map(|id| self.weapon(items, id))
            .transpose()?;
        let shield = self
            .shield
            .as_deref()
            .map(|id| self.shield(items, id))
            .transpose()?;
        let armor = self
            .armor
            .as_deref()
            .map(|id| self.armor(items, id))
            .transpose()?;

        let loadout = Loadout::new(main_hand, off_hand, shield, armor)
            .map_err(|e| anyhow::anyhow!("Hero '{}': {}", self.id, e))?;

        let mut inventory = Inventory::new();
        for (id, count) in &self.inventory {
            lookup(items, &self.id, id)?;
            inventory.add(id.clone(), *count);
        }

        let mut player = PlayerState::new(self.name.clone(), self.abilities, self.level)
            .with_hp(self.hp)
            .with_mp(self.mp)
            .with_loadout(loadout)
            .with_techniques(self.techniques.iter().cloned())
            .with_inventory(inventory)
            .with_gold(self.gold);
        player.location = Location::Town(self.town.clone());
        player.last_safe_town = self.town.clone();
        Ok(player)
    }

    fn weapon(&self, items: &[ItemDefinition], id: &str) -> LoadResult<Weapon> {
        match &lookup(items, &self.id, id)?.kind {
            ItemKind::Weapon(weapon) => Ok(weapon.clone()),
            _ => anyhow::bail!("Hero '{}': item '{}' is not a weapon", self.id, id),
        }
    }

    fn shield(&self, items: &[ItemDefinition], id: &str) -> LoadResult<Shield> {
        match &lookup(items, &self.id, id)?.kind {
            ItemKind::Shield(shield) => Ok(shield.clone()),
            _ => anyhow::bail!("Hero '{}': item '{}' is not a shield", self.id, id),
        }
    }

    fn armor(&self, items: &[ItemDefinition], id: &str) -> LoadResult<Armor> {
        match &lookup(items, &self.id, id)?.kind {
            ItemKind::Armor(armor) => Ok(armor.clone()),
            _ => anyhow::bail!("Hero '{}': item '{}' is not armor", self.id, id),
        }
    }
}

fn lookup<'a>(items: &'a [ItemDefinition], hero: &str, id: &str) -> LoadResult<&'a ItemDefinition> {
    items
        .iter()
        .find(|item| item.id == id)
        .ok_or_else(|| anyhow::anyhow!("Hero '{}': unknown item '{}'", hero, id))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroCatalog {
    pub heroes: Vec<HeroPreset>,
}

/// Loader for hero presets from RON files.
pub struct HeroLoader;

impl HeroLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<HeroPreset>> {
        let content = read_file(path)?;
        let catalog: HeroCatalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse hero catalog RON: {}", e))?;

        Ok(catalog.heroes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::{DamageDice, WeaponProperties};

    fn items() -> Vec<ItemDefinition> {
        let rapier = Weapon::new("rapier", "Rapier", DamageDice::new(1, 8))
            .with_properties(WeaponProperties::FINESSE);
        let dagger = Weapon::new("dagger", "Dagger", DamageDice::new(1, 4))
            .with_properties(WeaponProperties::LIGHT | WeaponProperties::FINESSE);
        vec![
            ItemDefinition::new("rapier", "Rapier", ItemKind::Weapon(rapier)),
            ItemDefinition::new("dagger", "Dagger", ItemKind::Weapon(dagger)),
            ItemDefinition::new("pelt", "Pelt", ItemKind::Material),
        ]
    }

    fn preset() -> HeroPreset {
        HeroPreset {
            id: "rogue".into(),
            name: "Vex".into(),
            abilities: AbilityScores::new(10, 16, 12, 12, 10, 14),
            level: 1,
            hp: 9,
            mp: 0,
            main_hand: Some("dagger".into()),
            off_hand: Some("dagger".into()),
            shield: None,
            armor: None,
            techniques: Vec::new(),
            inventory: vec![("pelt".into(), 2)],
            gold: 10,
            town: "Riverside".into(),
        }
    }

    #[test]
    fn builds_dual_wielder() {
        let player = preset().build(&items()).unwrap();
        assert!(player.loadout.off_hand().is_some());
        assert_eq!(player.inventory.count("pelt"), 2);
        assert_eq!(player.last_safe_town, "Riverside");
        assert_eq!(player.hp, 9);
    }

    #[test]
    fn rejects_heavy_main_hand_with_off_hand() {
        let mut preset = preset();
        preset.main_hand = Some("rapier".into());
        let err = preset.build(&items()).unwrap_err();
        assert!(err.to_string().contains("rogue"));
    }

    #[test]
    fn rejects_non_weapon_in_hand() {
        let mut preset = preset();
        preset.off_hand = Some("pelt".into());
        let err = preset.build(&items()).unwrap_err();
        assert!(err.to_string().contains("not a weapon"));
    }

    #[test]
    fn lists_referenced_items() {
        let preset = preset();
        let ids: Vec<_> = preset.item_ids().collect();
        assert_eq!(ids, vec!["dagger", "dagger", "pelt"]);
    }
}
