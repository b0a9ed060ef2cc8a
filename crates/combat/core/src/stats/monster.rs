//! Monster stat blocks.
//!
//! [`MonsterTemplate`]s are read-only content. Each encounter clones one into
//! a [`MonsterState`] that tracks current HP and the defensive stance.

use crate::dice::DamageDice;

/// Effect of a monster special ability.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MonsterAbilityEffect {
    /// Attack roll with an extra to-hit bonus and its own damage.
    Strike { damage: DamageDice, to_hit_bonus: i32 },
    /// Unavoidable damage (breath, aura, curse).
    Breath { damage: DamageDice },
    /// Self-heal, capped at max HP.
    Regenerate { amount: DamageDice },
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterAbility {
    pub name: String,
    /// Activation chance in percent, checked once per monster turn.
    pub chance: u8,
    pub effect: MonsterAbilityEffect,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootEntry {
    pub item_id: String,
    /// Drop chance in percent.
    pub chance: u8,
}

impl LootEntry {
    pub fn new(item_id: impl Into<String>, chance: u8) -> Self {
        Self {
            item_id: item_id.into(),
            chance,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterTemplate {
    pub id: String,
    pub name: String,
    pub hp: u32,
    pub armor_class: i32,
    pub attack_bonus: i32,
    pub damage: DamageDice,
    /// Checked in declaration order; the first to trigger is used.
    #[cfg_attr(feature = "serde", serde(default))]
    pub abilities: Vec<MonsterAbility>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub loot: Vec<LootEntry>,
    pub experience: u32,
    pub gold: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub boss: bool,
}

impl MonsterTemplate {
    pub fn new(id: impl Into<String>, name: impl Into<String>, hp: u32, armor_class: i32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            hp,
            armor_class,
            attack_bonus: 0,
            damage: DamageDice::new(1, 4),
            abilities: Vec::new(),
            loot: Vec::new(),
            experience: 0,
            gold: 0,
            boss: false,
        }
    }

    pub fn with_attack(mut self, attack_bonus: i32, damage: DamageDice) -> Self {
        self.attack_bonus = attack_bonus;
        self.damage = damage;
        self
    }

    pub fn with_ability(mut self, ability: MonsterAbility) -> Self {
        self.abilities.push(ability);
        self
    }

    pub fn with_loot(mut self, entry: LootEntry) -> Self {
        self.loot.push(entry);
        self
    }

    pub fn with_rewards(mut self, experience: u32, gold: u32) -> Self {
        self.experience = experience;
        self.gold = gold;
        self
    }

    pub fn as_boss(mut self) -> Self {
        self.boss = true;
        self
    }
}

/// Per-encounter monster state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterState {
    pub template: MonsterTemplate,
    pub current_hp: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub defending: bool,
}

impl MonsterState {
    pub fn spawn(template: MonsterTemplate) -> Self {
        Self {
            current_hp: template.hp,
            template,
            defending: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.template.id
    }

    pub fn name(&self) -> &str {
        &self.template.name
    }

    pub fn is_down(&self) -> bool {
        self.current_hp == 0
    }

    /// Applies damage, clamping at 0. Returns the HP actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.current_hp);
        self.current_hp -= lost;
        lost
    }

    /// Restores HP up to the template maximum. Returns the HP actually gained.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let gained = amount.min(self.template.hp.saturating_sub(self.current_hp));
        self.current_hp += gained;
        gained
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_starts_at_full_hp() {
        let state = MonsterState::spawn(MonsterTemplate::new("slime", "Slime", 9, 8));
        assert_eq!(state.current_hp, 9);
        assert!(!state.defending);
    }

    #[test]
    fn damage_and_heal_clamp() {
        let mut state = MonsterState::spawn(MonsterTemplate::new("slime", "Slime", 9, 8));
        assert_eq!(state.take_damage(4), 4);
        assert_eq!(state.heal(10), 4);
        assert_eq!(state.take_damage(30), 9);
        assert!(state.is_down());
    }
}
