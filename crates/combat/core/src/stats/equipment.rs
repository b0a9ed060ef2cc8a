//! Equipment carried into combat.
//!
//! A [`Loadout`] holds the weapons, shield and armor a player fights with and
//! enforces the hand rules at every mutation:
//! - an off-hand weapon requires a light, one-handed main-hand weapon
//! - a shield requires a main-hand weapon that is not two-handed

use bitflags::bitflags;

use crate::dice::DamageDice;
use crate::error::{ErrorSeverity, GameError};
use crate::stats::{Ability, AbilityScores};

bitflags! {
    /// Weapon traits that change how a weapon may be wielded.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct WeaponProperties: u8 {
        const LIGHT      = 1 << 0;
        const TWO_HANDED = 1 << 1;
        const FINESSE    = 1 << 2;
        const RANGED     = 1 << 3;
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Weapon {
    pub id: String,
    pub name: String,
    pub damage: DamageDice,
    #[cfg_attr(feature = "serde", serde(default))]
    pub properties: WeaponProperties,
    /// Magic/quality bonus added to attack rolls.
    #[cfg_attr(feature = "serde", serde(default))]
    pub attack_bonus: i32,
}

impl Weapon {
    pub fn new(id: impl Into<String>, name: impl Into<String>, damage: DamageDice) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            damage,
            properties: WeaponProperties::empty(),
            attack_bonus: 0,
        }
    }

    pub fn with_properties(mut self, properties: WeaponProperties) -> Self {
        self.properties = properties;
        self
    }

    pub fn with_attack_bonus(mut self, attack_bonus: i32) -> Self {
        self.attack_bonus = attack_bonus;
        self
    }

    /// Fists: a flat 1 damage, modified by STR.
    pub fn unarmed() -> Self {
        Self::new("unarmed", "Unarmed strike", DamageDice::flat(1))
    }

    pub fn is_light(&self) -> bool {
        self.properties.contains(WeaponProperties::LIGHT)
    }

    pub fn is_two_handed(&self) -> bool {
        self.properties.contains(WeaponProperties::TWO_HANDED)
    }

    /// Ability used for attack and damage rolls with this weapon.
    ///
    /// Ranged weapons use DEX, finesse weapons the better of STR and DEX,
    /// everything else STR.
    pub fn attack_ability(&self, scores: &AbilityScores) -> Ability {
        if self.properties.contains(WeaponProperties::RANGED) {
            Ability::Dex
        } else if self.properties.contains(WeaponProperties::FINESSE)
            && scores.modifier(Ability::Dex) > scores.modifier(Ability::Str)
        {
            Ability::Dex
        } else {
            Ability::Str
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Armor {
    pub id: String,
    pub name: String,
    pub base_ac: i32,
    /// Cap on the DEX modifier added to AC; `None` means uncapped.
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_dex_bonus: Option<i32>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shield {
    pub id: String,
    pub name: String,
    pub ac_bonus: i32,
}

/// Errors raised when an equip would break the hand rules.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LoadoutError {
    #[error("an off-hand weapon requires a light, one-handed main-hand weapon")]
    MainHandNotLight,

    #[error("off-hand weapon '{0}' is not light")]
    OffHandNotLight(String),

    #[error("a shield cannot be used with a two-handed weapon")]
    ShieldWithTwoHanded,

    #[error("cannot hold both an off-hand weapon and a shield")]
    HandsFull,
}

impl GameError for LoadoutError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MainHandNotLight => "LOADOUT_MAIN_HAND_NOT_LIGHT",
            Self::OffHandNotLight(_) => "LOADOUT_OFF_HAND_NOT_LIGHT",
            Self::ShieldWithTwoHanded => "LOADOUT_SHIELD_WITH_TWO_HANDED",
            Self::HandsFull => "LOADOUT_HANDS_FULL",
        }
    }
}

/// Validated set of equipped gear.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawLoadout", into = "RawLoadout"))]
pub struct Loadout {
    main_hand: Weapon,
    off_hand: Option<Weapon>,
    shield: Option<Shield>,
    armor: Option<Armor>,
}

impl Loadout {
    /// Bare hands, no armor.
    pub fn unarmed() -> Self {
        Self::wielding(Weapon::unarmed())
    }

    pub fn wielding(main_hand: Weapon) -> Self {
        Self {
            main_hand,
            off_hand: None,
            shield: None,
            armor: None,
        }
    }

    /// Builds a loadout, checking every hand rule.
    pub fn new(
        main_hand: Weapon,
        off_hand: Option<Weapon>,
        shield: Option<Shield>,
        armor: Option<Armor>,
    ) -> Result<Self, LoadoutError> {
        let mut loadout = Self::wielding(main_hand);
        loadout.armor = armor;
        if let Some(weapon) = off_hand {
            loadout.equip_off_hand(weapon)?;
        }
        if let Some(shield) = shield {
            loadout.equip_shield(shield)?;
        }
        Ok(loadout)
    }

    pub fn main_hand(&self) -> &Weapon {
        &self.main_hand
    }

    pub fn off_hand(&self) -> Option<&Weapon> {
        self.off_hand.as_ref()
    }

    pub fn shield(&self) -> Option<&Shield> {
        self.shield.as_ref()
    }

    pub fn armor(&self) -> Option<&Armor> {
        self.armor.as_ref()
    }

    /// Swaps the main-hand weapon; rejected if the new weapon would invalidate
    /// the current off-hand weapon or shield.
    pub fn equip_main_hand(&mut self, weapon: Weapon) -> Result<Weapon, LoadoutError> {
        if self.off_hand.is_some() && (!weapon.is_light() || weapon.is_two_handed()) {
            return Err(LoadoutError::MainHandNotLight);
        }
        if self.shield.is_some() && weapon.is_two_handed() {
            return Err(LoadoutError::ShieldWithTwoHanded);
        }
        Ok(core::mem::replace(&mut self.main_hand, weapon))
    }

    pub fn equip_off_hand(&mut self, weapon: Weapon) -> Result<Option<Weapon>, LoadoutError> {
        if !self.main_hand.is_light() || self.main_hand.is_two_handed() {
            return Err(LoadoutError::MainHandNotLight);
        }
        if !weapon.is_light() {
            return Err(LoadoutError::OffHandNotLight(weapon.id));
        }
        if self.shield.is_some() {
            return Err(LoadoutError::HandsFull);
        }
        Ok(self.off_hand.replace(weapon))
    }

    pub fn equip_shield(&mut self, shield: Shield) -> Result<Option<Shield>, LoadoutError> {
        if self.main_hand.is_two_handed() {
            return Err(LoadoutError::ShieldWithTwoHanded);
        }
        if self.off_hand.is_some() {
            return Err(LoadoutError::HandsFull);
        }
        Ok(self.shield.replace(shield))
    }

    pub fn equip_armor(&mut self, armor: Armor) -> Option<Armor> {
        self.armor.replace(armor)
    }

    pub fn unequip_off_hand(&mut self) -> Option<Weapon> {
        self.off_hand.take()
    }

    pub fn unequip_shield(&mut self) -> Option<Shield> {
        self.shield.take()
    }

    /// Armor class from armor, DEX and shield, before any stance bonus.
    ///
    /// Unarmored: `10 + DEX`. Armored: `base + min(DEX, cap)`.
    pub fn armor_class(&self, scores: &AbilityScores) -> i32 {
        let dex = scores.modifier(Ability::Dex);
        let body = match &self.armor {
            Some(armor) => {
                let dex = armor.max_dex_bonus.map_or(dex, |cap| dex.min(cap));
                armor.base_ac + dex
            }
            None => 10 + dex,
        };
        body + self.shield.as_ref().map_or(0, |shield| shield.ac_bonus)
    }
}

impl Default for Loadout {
    fn default() -> Self {
        Self::unarmed()
    }
}

/// Unvalidated loadout shape used at the serialization boundary.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawLoadout {
    pub main_hand: Weapon,
    #[cfg_attr(feature = "serde", serde(default))]
    pub off_hand: Option<Weapon>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub shield: Option<Shield>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub armor: Option<Armor>,
}

impl TryFrom<RawLoadout> for Loadout {
    type Error = LoadoutError;

    fn try_from(raw: RawLoadout) -> Result<Self, Self::Error> {
        Loadout::new(raw.main_hand, raw.off_hand, raw.shield, raw.armor)
    }
}

impl From<Loadout> for RawLoadout {
    fn from(loadout: Loadout) -> Self {
        Self {
            main_hand: loadout.main_hand,
            off_hand: loadout.off_hand,
            shield: loadout.shield,
            armor: loadout.armor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shortsword() -> Weapon {
        Weapon::new("shortsword", "Shortsword", DamageDice::new(1, 6))
            .with_properties(WeaponProperties::LIGHT | WeaponProperties::FINESSE)
    }

    fn greataxe() -> Weapon {
        Weapon::new("greataxe", "Greataxe", DamageDice::new(1, 12))
            .with_properties(WeaponProperties::TWO_HANDED)
    }

    fn buckler() -> Shield {
        Shield {
            id: "buckler".into(),
            name: "Buckler".into(),
            ac_bonus: 2,
        }
    }

    #[test]
    fn dual_wield_requires_light_main_hand() {
        let longsword = Weapon::new("longsword", "Longsword", DamageDice::new(1, 8));
        let result = Loadout::new(longsword, Some(shortsword()), None, None);
        assert_eq!(result, Err(LoadoutError::MainHandNotLight));

        let loadout = Loadout::new(shortsword(), Some(shortsword()), None, None);
        assert!(loadout.is_ok());
    }

    #[test]
    fn shield_rejected_with_two_handed() {
        let result = Loadout::new(greataxe(), None, Some(buckler()), None);
        assert_eq!(result, Err(LoadoutError::ShieldWithTwoHanded));
    }

    #[test]
    fn main_hand_swap_keeps_invariant() {
        let mut loadout = Loadout::new(shortsword(), None, Some(buckler()), None).unwrap();
        assert_eq!(
            loadout.equip_main_hand(greataxe()),
            Err(LoadoutError::ShieldWithTwoHanded)
        );
        assert_eq!(loadout.main_hand().id, "shortsword");
    }

    #[test]
    fn armor_class_caps_dex() {
        let scores = AbilityScores::new(10, 18, 10, 10, 10, 10);
        let mut loadout = Loadout::unarmed();
        assert_eq!(loadout.armor_class(&scores), 14);

        loadout.equip_armor(Armor {
            id: "chain".into(),
            name: "Chain shirt".into(),
            base_ac: 13,
            max_dex_bonus: Some(2),
        });
        assert_eq!(loadout.armor_class(&scores), 15);

        loadout.equip_shield(buckler()).unwrap();
        assert_eq!(loadout.armor_class(&scores), 17);
    }

    #[test]
    fn finesse_picks_better_ability() {
        let nimble = AbilityScores::new(10, 16, 10, 10, 10, 10);
        let strong = AbilityScores::new(16, 10, 10, 10, 10, 10);
        assert_eq!(shortsword().attack_ability(&nimble), Ability::Dex);
        assert_eq!(shortsword().attack_ability(&strong), Ability::Str);
        assert_eq!(greataxe().attack_ability(&nimble), Ability::Str);
    }
}
