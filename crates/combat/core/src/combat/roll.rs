//! d20 attack rolls and their classification.

use crate::config::CombatConfig;
use crate::dice::Dice;

pub const NATURAL_CRITICAL: u32 = 20;
pub const NATURAL_FUMBLE: u32 = 1;

/// Outcome of an attack roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum RollOutcome {
    /// Natural 20: hits regardless of total, doubles damage dice.
    Critical,
    Hit,
    Miss,
    /// Natural 1: misses regardless of total.
    Fumble,
}

impl RollOutcome {
    pub fn is_hit(self) -> bool {
        matches!(self, Self::Critical | Self::Hit)
    }

    pub fn is_critical(self) -> bool {
        matches!(self, Self::Critical)
    }

    pub fn is_fumble(self) -> bool {
        matches!(self, Self::Fumble)
    }
}

/// A resolved d20 attack roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackRoll {
    pub natural: u32,
    pub modifier: i32,
    pub total: i32,
    /// Effective AC at the time of the roll (stance bonus included).
    pub target_ac: i32,
    pub outcome: RollOutcome,
}

impl AttackRoll {
    /// Classifies a natural roll against an effective AC.
    ///
    /// Natural 20 is always a critical and natural 1 always a fumble; any other
    /// roll hits iff `natural + modifier >= target_ac`.
    pub fn classify(natural: u32, modifier: i32, target_ac: i32) -> Self {
        let total = natural as i32 + modifier;
        let outcome = match natural {
            NATURAL_CRITICAL => RollOutcome::Critical,
            NATURAL_FUMBLE => RollOutcome::Fumble,
            _ if total >= target_ac => RollOutcome::Hit,
            _ => RollOutcome::Miss,
        };
        Self {
            natural,
            modifier,
            total,
            target_ac,
            outcome,
        }
    }

    /// Rolls 1d20 and classifies it.
    pub fn roll(dice: &mut Dice, modifier: i32, target_ac: i32) -> Self {
        Self::classify(dice.d20(), modifier, target_ac)
    }

    pub fn is_hit(&self) -> bool {
        self.outcome.is_hit()
    }

    pub fn is_critical(&self) -> bool {
        self.outcome.is_critical()
    }

    /// Auto-resolved rolls (natural 1 or 20) say nothing about the target AC.
    pub fn informs_armor_class(&self) -> bool {
        !matches!(self.natural, NATURAL_CRITICAL | NATURAL_FUMBLE)
    }

    /// Dice multiplier for the damage roll that follows.
    pub fn dice_multiplier(&self, config: &CombatConfig) -> u32 {
        if self.is_critical() {
            config.critical_dice_multiplier
        } else {
            1
        }
    }
}

/// AC after the defensive-stance bonus.
pub fn effective_armor_class(base: i32, defending: bool, config: &CombatConfig) -> i32 {
    if defending {
        base + config.defend_ac_bonus
    } else {
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn exact_total_hits() {
        let roll = AttackRoll::classify(10, 3, 13);
        assert_eq!(roll.total, 13);
        assert_eq!(roll.outcome, RollOutcome::Hit);
    }

    #[test]
    fn one_below_misses() {
        let roll = AttackRoll::classify(9, 3, 13);
        assert_eq!(roll.outcome, RollOutcome::Miss);
    }

    #[test]
    fn defending_adds_bonus() {
        let config = CombatConfig::default();
        assert_eq!(effective_armor_class(12, true, &config), 14);
        assert_eq!(effective_armor_class(12, false, &config), 12);
    }

    proptest! {
        #[test]
        fn natural_twenty_always_crits(modifier in -20i32..20, ac in -5i32..40) {
            let roll = AttackRoll::classify(20, modifier, ac);
            prop_assert_eq!(roll.outcome, RollOutcome::Critical);
            prop_assert!(roll.is_hit());
        }

        #[test]
        fn natural_one_always_misses(modifier in -20i32..40, ac in -5i32..40) {
            let roll = AttackRoll::classify(1, modifier, ac);
            prop_assert_eq!(roll.outcome, RollOutcome::Fumble);
            prop_assert!(!roll.is_hit());
        }

        #[test]
        fn middle_rolls_compare_total(natural in 2u32..20, modifier in -10i32..15, ac in 0i32..30) {
            let roll = AttackRoll::classify(natural, modifier, ac);
            prop_assert_eq!(roll.is_hit(), natural as i32 + modifier >= ac);
            prop_assert!(!roll.is_critical());
            prop_assert!(roll.informs_armor_class());
        }
    }
}
