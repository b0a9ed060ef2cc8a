use crate::dice::DamageDice;
use crate::stats::{Armor, Shield, Weapon};

pub trait ItemOracle: Send + Sync {
    fn definition(&self, id: &str) -> Option<ItemDefinition>;

    /// Returns all item definitions available in this oracle.
    fn all_definitions(&self) -> Vec<ItemDefinition>;
}

/// Item definition with common fields and type-specific data.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub id: String,
    pub name: String,
    pub kind: ItemKind,
}

impl ItemDefinition {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
        }
    }

    pub fn consumable_effect(&self) -> Option<&ConsumableEffect> {
        match &self.kind {
            ItemKind::Consumable(effect) => Some(effect),
            _ => None,
        }
    }
}

/// Item type with type-specific data.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKind {
    /// Usable in combat.
    Consumable(ConsumableEffect),
    Weapon(Weapon),
    Armor(Armor),
    Shield(Shield),
    /// Loot with no combat use (pelts, gems, crafting parts).
    Material,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConsumableEffect {
    RestoreHp(DamageDice),
    RestoreMp(DamageDice),
    /// Thrown item; always hits.
    Damage(DamageDice),
}
