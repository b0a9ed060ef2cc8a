//! Action resolution.
//!
//! The [`Resolver`] turns one decision into one [`ActionResult`]. It reads
//! combatant state but never mutates it: applying damage, healing and mana
//! costs is the engine's job. Callers validate legality (phase, economy, mana)
//! before resolving, so every method here always produces a result.
//!
//! # Attack-like algorithm
//!
//! ```text
//! natural  = 1d20
//! modifier = ability mod + proficiency + equipment bonus - weather penalty
//! total    = natural + modifier
//! AC       = base AC + defend bonus (if defending)
//! natural 20 => critical, natural 1 => fumble, else hit iff total >= AC
//! damage   = dice (× crit multiplier) + flat bonus + ability mod, floored at 0
//! ```

use crate::config::CombatConfig;
use crate::dice::{DamageDice, Dice};
use crate::env::{
    ConsumableEffect, ItemDefinition, TechniqueDefinition, TechniqueEffect, TechniqueSource,
    WeatherModifiers,
};
use crate::stats::{MonsterAbility, MonsterAbilityEffect, MonsterState, PlayerState, Weapon};

use super::result::{
    ActionResult, AttackResult, AttackSource, DefendResult, EffectOutcome, ItemResult, Resolution,
    Side, TechniqueResult,
};
use super::roll::{AttackRoll, RollOutcome, effective_armor_class};

/// Resolves actions for one encounter against the shared dice.
pub struct Resolver<'a> {
    dice: &'a mut Dice,
    weather: WeatherModifiers,
    config: &'a CombatConfig,
}

impl<'a> Resolver<'a> {
    pub fn new(dice: &'a mut Dice, weather: WeatherModifiers, config: &'a CombatConfig) -> Self {
        Self {
            dice,
            weather,
            config,
        }
    }

    /// Main-hand weapon attack against the monster.
    pub fn player_attack(&mut self, player: &PlayerState, monster: &MonsterState) -> ActionResult {
        let weapon = player.loadout.main_hand();
        self.weapon_attack(player, monster, weapon, AttackSource::MainHand)
    }

    /// Follow-up attack with the light off-hand weapon, if one is equipped.
    ///
    /// The ability modifier is left out of damage unless it is negative.
    pub fn off_hand_attack(
        &mut self,
        player: &PlayerState,
        monster: &MonsterState,
    ) -> Option<ActionResult> {
        let weapon = player.loadout.off_hand()?;
        Some(self.weapon_attack(player, monster, weapon, AttackSource::OffHand))
    }

    fn weapon_attack(
        &mut self,
        player: &PlayerState,
        monster: &MonsterState,
        weapon: &Weapon,
        source: AttackSource,
    ) -> ActionResult {
        let ability_mod = player.modifier(weapon.attack_ability(&player.abilities));
        let modifier = ability_mod + player.proficiency() + weapon.attack_bonus
            - self.weather.accuracy_penalty;
        let target_ac = effective_armor_class(
            monster.template.armor_class,
            monster.defending,
            self.config,
        );
        let roll = AttackRoll::roll(self.dice, modifier, target_ac);

        let damage = if roll.is_hit() {
            let flat = match source {
                AttackSource::OffHand => ability_mod.min(0),
                _ => ability_mod,
            };
            self.roll_damage(&weapon.damage, flat, roll.dice_multiplier(self.config))
        } else {
            0
        };

        let message = describe_attack(&player.name, monster.name(), &weapon.name, &roll, damage, 0);
        ActionResult::Attack(AttackResult {
            actor: Side::Player,
            source,
            weapon: weapon.name.clone(),
            roll,
            damage,
            blocked: 0,
            message,
        })
    }

    /// Spell or ability cast by the player.
    ///
    /// Reports `mp_cost` for the caller to deduct; the caller must already have
    /// checked the player can pay it.
    pub fn technique(
        &mut self,
        player: &PlayerState,
        monster: &MonsterState,
        technique: &TechniqueDefinition,
    ) -> ActionResult {
        let (resolution, effect) = match &technique.effect {
            TechniqueEffect::Attack { damage, ability } => {
                let ability_mod = player.modifier(*ability);
                let modifier =
                    ability_mod + player.proficiency() - self.weather.accuracy_penalty;
                let target_ac = effective_armor_class(
                    monster.template.armor_class,
                    monster.defending,
                    self.config,
                );
                let roll = AttackRoll::roll(self.dice, modifier, target_ac);
                let amount = if roll.is_hit() {
                    self.roll_damage(damage, ability_mod, roll.dice_multiplier(self.config))
                } else {
                    0
                };
                (
                    Resolution::Rolled(roll),
                    EffectOutcome::Damage { amount, blocked: 0 },
                )
            }
            TechniqueEffect::Blast { damage, ability } => {
                let flat = ability.map_or(0, |ability| player.modifier(ability));
                let amount = self.roll_damage(damage, flat, 1);
                (
                    Resolution::Automatic,
                    EffectOutcome::Damage { amount, blocked: 0 },
                )
            }
            TechniqueEffect::Heal { amount, ability } => {
                let flat = ability.map_or(0, |ability| player.modifier(ability));
                let healed = self.roll_damage(amount, flat, 1);
                (Resolution::Automatic, EffectOutcome::Healing(healed))
            }
        };

        let message = describe_technique(
            &player.name,
            monster.name(),
            &technique.name,
            &resolution,
            &effect,
        );
        let result = TechniqueResult {
            actor: Side::Player,
            id: technique.id.clone(),
            name: technique.name.clone(),
            resolution,
            effect,
            mp_cost: technique.mp_cost,
            message,
        };
        match technique.source {
            TechniqueSource::Spell => ActionResult::Spell(result),
            TechniqueSource::Ability => ActionResult::Ability(result),
        }
    }

    /// Consumable used by the player. Returns `None` for items with no combat use.
    pub fn item(
        &mut self,
        player: &PlayerState,
        monster: &MonsterState,
        item: &ItemDefinition,
    ) -> Option<ActionResult> {
        let (effect, message) = match item.consumable_effect()? {
            ConsumableEffect::RestoreHp(amount) => {
                let healed = self.roll_damage(amount, 0, 1);
                (
                    EffectOutcome::Healing(healed),
                    format!("{} uses {} and recovers {healed} HP.", player.name, item.name),
                )
            }
            ConsumableEffect::RestoreMp(amount) => {
                let restored = self.roll_damage(amount, 0, 1);
                (
                    EffectOutcome::ManaRestored(restored),
                    format!("{} uses {} and recovers {restored} MP.", player.name, item.name),
                )
            }
            ConsumableEffect::Damage(damage) => {
                let amount = self.roll_damage(damage, 0, 1);
                (
                    EffectOutcome::Damage { amount, blocked: 0 },
                    format!(
                        "{} throws {} at {} for {amount} damage.",
                        player.name,
                        item.name,
                        monster.name()
                    ),
                )
            }
        };
        Some(ActionResult::Item(ItemResult {
            item_id: item.id.clone(),
            name: item.name.clone(),
            effect,
            message,
        }))
    }

    /// The monster's basic attack against the player.
    pub fn monster_attack(&mut self, monster: &MonsterState, player: &PlayerState) -> ActionResult {
        let template = &monster.template;
        let modifier = template.attack_bonus + self.weather.monster_attack_bonus();
        let roll = AttackRoll::roll(self.dice, modifier, self.player_armor_class(player));

        let (damage, blocked) = if roll.is_hit() {
            let raw = self.roll_damage(&template.damage, 0, roll.dice_multiplier(self.config));
            self.apply_block(player, raw)
        } else {
            (0, 0)
        };

        let message = describe_attack(
            monster.name(),
            &player.name,
            "its attack",
            &roll,
            damage,
            blocked,
        );
        ActionResult::Attack(AttackResult {
            actor: Side::Monster,
            source: AttackSource::Natural,
            weapon: template.name.clone(),
            roll,
            damage,
            blocked,
            message,
        })
    }

    /// A monster special ability that triggered this turn.
    pub fn monster_ability(
        &mut self,
        monster: &MonsterState,
        ability: &MonsterAbility,
        player: &PlayerState,
    ) -> ActionResult {
        let (resolution, effect) = match &ability.effect {
            MonsterAbilityEffect::Strike {
                damage,
                to_hit_bonus,
            } => {
                let modifier = monster.template.attack_bonus
                    + to_hit_bonus
                    + self.weather.monster_attack_bonus();
                let roll = AttackRoll::roll(self.dice, modifier, self.player_armor_class(player));
                let (amount, blocked) = if roll.is_hit() {
                    let raw = self.roll_damage(damage, 0, roll.dice_multiplier(self.config));
                    self.apply_block(player, raw)
                } else {
                    (0, 0)
                };
                (Resolution::Rolled(roll), EffectOutcome::Damage { amount, blocked })
            }
            MonsterAbilityEffect::Breath { damage } => {
                let raw = self.roll_damage(damage, 0, 1);
                let (amount, blocked) = self.apply_block(player, raw);
                (Resolution::Automatic, EffectOutcome::Damage { amount, blocked })
            }
            MonsterAbilityEffect::Regenerate { amount } => {
                let healed = self.roll_damage(amount, 0, 1);
                (Resolution::Automatic, EffectOutcome::Healing(healed))
            }
        };

        let message = describe_technique(
            monster.name(),
            &player.name,
            &ability.name,
            &resolution,
            &effect,
        );
        ActionResult::Ability(TechniqueResult {
            actor: Side::Monster,
            id: ability.name.clone(),
            name: ability.name.clone(),
            resolution,
            effect,
            mp_cost: 0,
            message,
        })
    }

    /// Defensive stance taken instead of attacking.
    pub fn defend(&self, actor: Side, name: &str) -> ActionResult {
        ActionResult::Defend(DefendResult {
            actor,
            message: format!("{name} takes a defensive stance."),
        })
    }

    fn player_armor_class(&self, player: &PlayerState) -> i32 {
        effective_armor_class(player.base_armor_class(), player.defending, self.config)
    }

    /// Rolls `damage` plus `flat`, floored at 0.
    fn roll_damage(&mut self, damage: &DamageDice, flat: i32, multiplier: u32) -> u32 {
        let rolled = damage.roll_dice(self.dice, multiplier) as i32;
        (rolled + damage.bonus + flat).max(0) as u32
    }

    /// A defending player with a usable shield absorbs a little damage.
    ///
    /// Returns `(damage taken, damage blocked)`.
    fn apply_block(&self, player: &PlayerState, damage: u32) -> (u32, u32) {
        let shielded = player.defending
            && player.loadout.shield().is_some()
            && !player.loadout.main_hand().is_two_handed();
        if !shielded {
            return (damage, 0);
        }
        let blocked = self.config.shield_block.min(damage);
        (damage - blocked, blocked)
    }
}

fn describe_roll(roll: &AttackRoll) -> String {
    format!("{} {:+} = {}", roll.natural, roll.modifier, roll.total)
}

fn describe_attack(
    actor: &str,
    target: &str,
    weapon: &str,
    roll: &AttackRoll,
    damage: u32,
    blocked: u32,
) -> String {
    let rolled = describe_roll(roll);
    let mut message = match roll.outcome {
        RollOutcome::Critical => {
            format!("Critical hit! {actor} strikes {target} with {weapon} for {damage} damage.")
        }
        RollOutcome::Hit => {
            format!("{actor} hits {target} with {weapon} ({rolled}) for {damage} damage.")
        }
        RollOutcome::Miss => format!("{actor} misses {target} with {weapon} ({rolled})."),
        RollOutcome::Fumble => format!("{actor} fumbles with {weapon}."),
    };
    if blocked > 0 {
        message.push_str(&format!(" The shield absorbs {blocked}."));
    }
    message
}

fn describe_technique(
    actor: &str,
    target: &str,
    name: &str,
    resolution: &Resolution,
    effect: &EffectOutcome,
) -> String {
    match (resolution, effect) {
        (Resolution::Rolled(roll), _) if !roll.is_hit() => {
            format!("{actor}'s {name} misses {target} ({}).", describe_roll(roll))
        }
        (Resolution::Rolled(roll), EffectOutcome::Damage { amount, .. }) if roll.is_critical() => {
            format!("Critical! {actor}'s {name} hits {target} for {amount} damage.")
        }
        (_, EffectOutcome::Damage { amount, blocked }) if *blocked > 0 => format!(
            "{actor}'s {name} hits {target} for {amount} damage. The shield absorbs {blocked}."
        ),
        (_, EffectOutcome::Damage { amount, .. }) => {
            format!("{actor}'s {name} hits {target} for {amount} damage.")
        }
        (_, EffectOutcome::Healing(amount)) => {
            format!("{actor} uses {name} and recovers {amount} HP.")
        }
        (_, EffectOutcome::ManaRestored(amount)) => {
            format!("{actor} uses {name} and recovers {amount} MP.")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{AbilityScores, Loadout, MonsterTemplate, Shield, WeaponProperties};

    fn fighter() -> PlayerState {
        let sword = Weapon::new("longsword", "Longsword", DamageDice::new(1, 8));
        PlayerState::new("Ayla", AbilityScores::new(16, 12, 14, 10, 10, 10), 1)
            .with_hp(20)
            .with_loadout(Loadout::wielding(sword))
    }

    fn goblin() -> MonsterState {
        MonsterState::spawn(
            MonsterTemplate::new("goblin", "Goblin", 12, 13)
                .with_attack(4, DamageDice::new(1, 6).with_bonus(2)),
        )
    }

    #[test]
    fn hit_adds_ability_modifier() {
        let config = CombatConfig::default();
        let mut dice = Dice::scripted([10, 5]);
        let mut resolver = Resolver::new(&mut dice, WeatherModifiers::CLEAR, &config);

        let result = resolver.player_attack(&fighter(), &goblin());
        let ActionResult::Attack(attack) = result else {
            panic!("expected attack result");
        };
        // STR 16 => +3, proficiency +2
        assert_eq!(attack.roll.modifier, 5);
        assert_eq!(attack.roll.total, 15);
        assert_eq!(attack.roll.target_ac, 13);
        assert!(attack.roll.is_hit());
        assert_eq!(attack.damage, 8);
    }

    #[test]
    fn critical_doubles_dice_not_modifier() {
        let config = CombatConfig::default();
        let mut dice = Dice::scripted([20, 5, 6]);
        let mut resolver = Resolver::new(&mut dice, WeatherModifiers::CLEAR, &config);

        let result = resolver.player_attack(&fighter(), &goblin());
        assert_eq!(result.attack_roll().map(|roll| roll.outcome), Some(RollOutcome::Critical));
        assert_eq!(result.damage(), 5 + 6 + 3);
    }

    #[test]
    fn fumble_deals_nothing_and_rolls_no_damage() {
        let config = CombatConfig::default();
        let mut dice = Dice::scripted([1]);
        let mut resolver = Resolver::new(&mut dice, WeatherModifiers::CLEAR, &config);

        let result = resolver.player_attack(&fighter(), &goblin());
        assert_eq!(result.damage(), 0);
        assert!(result.message().contains("fumbles"));
    }

    #[test]
    fn weather_penalty_and_defending_monster() {
        let config = CombatConfig::default();
        let mut dice = Dice::scripted([11]);
        let mut resolver = Resolver::new(&mut dice, WeatherModifiers::new(2), &config);
        let mut monster = goblin();
        monster.defending = true;

        let result = resolver.player_attack(&fighter(), &monster);
        let roll = result.attack_roll().copied().unwrap();
        assert_eq!(roll.modifier, 3);
        assert_eq!(roll.target_ac, 15);
        assert!(!roll.is_hit());
    }

    #[test]
    fn off_hand_omits_positive_modifier() {
        let config = CombatConfig::default();
        let dagger = Weapon::new("dagger", "Dagger", DamageDice::new(1, 4))
            .with_properties(WeaponProperties::LIGHT | WeaponProperties::FINESSE);
        let loadout = Loadout::new(dagger.clone(), Some(dagger), None, None).unwrap();
        let player = fighter().with_loadout(loadout);

        let mut dice = Dice::scripted([15, 3]);
        let mut resolver = Resolver::new(&mut dice, WeatherModifiers::CLEAR, &config);
        let result = resolver.off_hand_attack(&player, &goblin()).unwrap();
        assert_eq!(result.damage(), 3);
    }

    #[test]
    fn off_hand_keeps_negative_modifier() {
        let config = CombatConfig::default();
        let dagger = Weapon::new("dagger", "Dagger", DamageDice::new(1, 4))
            .with_properties(WeaponProperties::LIGHT);
        let loadout = Loadout::new(dagger.clone(), Some(dagger), None, None).unwrap();
        let weakling = PlayerState::new("Pip", AbilityScores::new(6, 10, 10, 10, 10, 10), 1)
            .with_loadout(loadout);

        let mut dice = Dice::scripted([19, 1]);
        let mut resolver = Resolver::new(&mut dice, WeatherModifiers::CLEAR, &config);
        let result = resolver.off_hand_attack(&weakling, &goblin()).unwrap();
        // 1 - 2 floors at 0
        assert_eq!(result.damage(), 0);
    }

    #[test]
    fn no_off_hand_no_attack() {
        let config = CombatConfig::default();
        let mut dice = Dice::scripted([]);
        let mut resolver = Resolver::new(&mut dice, WeatherModifiers::CLEAR, &config);
        assert!(resolver.off_hand_attack(&fighter(), &goblin()).is_none());
    }

    #[test]
    fn shield_blocks_while_defending() {
        let config = CombatConfig::default();
        let sword = Weapon::new("longsword", "Longsword", DamageDice::new(1, 8));
        let shield = Shield {
            id: "buckler".into(),
            name: "Buckler".into(),
            ac_bonus: 2,
        };
        let mut player = fighter()
            .with_loadout(Loadout::new(sword, None, Some(shield), None).unwrap());
        player.defending = true;

        // AC 10 + 1 (DEX 12) + 2 shield + 2 defending = 15; 12 + 4 = 16 hits
        let mut dice = Dice::scripted([12, 3]);
        let mut resolver = Resolver::new(&mut dice, WeatherModifiers::CLEAR, &config);
        let ActionResult::Attack(attack) = resolver.monster_attack(&goblin(), &player) else {
            panic!("expected attack result");
        };
        assert_eq!(attack.roll.target_ac, 15);
        assert_eq!(attack.blocked, 1);
        assert_eq!(attack.damage, 4);
    }

    #[test]
    fn monster_weather_boost_applies() {
        let config = CombatConfig::default();
        let weather = WeatherModifiers::CLEAR.with_monster_boost(3, 0);
        let mut dice = Dice::scripted([5, 1]);
        let mut resolver = Resolver::new(&mut dice, weather, &config);

        let result = resolver.monster_attack(&goblin(), &fighter());
        let roll = result.attack_roll().copied().unwrap();
        assert_eq!(roll.modifier, 7);
        assert_eq!(roll.total, 12);
        // AC 11 from DEX 12
        assert!(roll.is_hit());
        assert_eq!(result.damage(), 3);
    }

    #[test]
    fn heal_technique_is_automatic() {
        let config = CombatConfig::default();
        let heal = TechniqueDefinition::spell(
            "cure",
            "Cure Wounds",
            TechniqueEffect::Heal {
                amount: DamageDice::new(1, 8),
                ability: Some(crate::stats::Ability::Wis),
            },
        )
        .costing(3);
        let cleric = PlayerState::new("Bram", AbilityScores::new(10, 10, 10, 10, 16, 10), 1);

        let mut dice = Dice::scripted([4]);
        let mut resolver = Resolver::new(&mut dice, WeatherModifiers::CLEAR, &config);
        let result = resolver.technique(&cleric, &goblin(), &heal);

        assert_eq!(result.kind(), crate::combat::ActionKind::Spell);
        assert!(result.attack_roll().is_none());
        assert_eq!(result.mp_cost(), 3);
        let ActionResult::Spell(spell) = result else {
            panic!("expected spell");
        };
        assert_eq!(spell.effect, EffectOutcome::Healing(7));
    }

    #[test]
    fn regenerate_reports_healing() {
        let config = CombatConfig::default();
        let ability = MonsterAbility {
            name: "Regrow".into(),
            chance: 50,
            effect: MonsterAbilityEffect::Regenerate {
                amount: DamageDice::flat(3),
            },
        };
        let mut dice = Dice::scripted([]);
        let mut resolver = Resolver::new(&mut dice, WeatherModifiers::CLEAR, &config);
        let result = resolver.monster_ability(&goblin(), &ability, &fighter());
        assert_eq!(result.actor(), Side::Monster);
        let ActionResult::Ability(ability) = result else {
            panic!("expected ability");
        };
        assert_eq!(ability.effect, EffectOutcome::Healing(3));
    }

    proptest::proptest! {
        #[test]
        fn weak_hits_floor_at_zero(seed in proptest::prelude::any::<u64>()) {
            let config = CombatConfig::default();
            let dagger = Weapon::new("dagger", "Dagger", DamageDice::new(1, 4));
            // STR 1 => -5 on every damage roll
            let weakling = PlayerState::new("Pip", AbilityScores::new(1, 10, 10, 10, 10, 10), 1)
                .with_loadout(Loadout::wielding(dagger));
            let mut dice = Dice::seeded(seed);
            let mut resolver = Resolver::new(&mut dice, WeatherModifiers::CLEAR, &config);

            let ActionResult::Attack(attack) = resolver.player_attack(&weakling, &goblin()) else {
                panic!("expected attack result");
            };
            let ceiling = if attack.roll.is_critical() { 3 } else { 0 };
            proptest::prop_assert!(attack.damage <= ceiling);
        }
    }
}
