//! Initiative and flee checks: plain d20 rolls against each other or a fixed DC.

use crate::config::CombatConfig;
use crate::dice::Dice;

use super::result::{FleeResult, Side};

/// Opening initiative rolls for both sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Initiative {
    pub player_total: i32,
    pub monster_total: i32,
    pub first: Side,
}

/// Rolls 1d20 + modifier for each side, player first. Ties go to the player.
pub fn roll_initiative(dice: &mut Dice, player_modifier: i32, monster_modifier: i32) -> Initiative {
    let player_total = dice.d20() as i32 + player_modifier;
    let monster_total = dice.d20() as i32 + monster_modifier;
    let first = if player_total >= monster_total {
        Side::Player
    } else {
        Side::Monster
    };
    Initiative {
        player_total,
        monster_total,
        first,
    }
}

/// Rolls 1d20 + DEX against the configured flee difficulty.
pub fn attempt_flee(dice: &mut Dice, dex_modifier: i32, config: &CombatConfig) -> FleeResult {
    let natural = dice.d20();
    let total = natural as i32 + dex_modifier;
    let difficulty = config.flee_difficulty;
    let escaped = total >= difficulty;
    let message = if escaped {
        format!("You escape! ({natural} {dex_modifier:+} = {total})")
    } else {
        format!("You fail to get away. ({natural} {dex_modifier:+} = {total})")
    };
    FleeResult {
        natural,
        modifier: dex_modifier,
        total,
        difficulty,
        escaped,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tie_goes_to_player() {
        let mut dice = Dice::scripted([13, 12]);
        let initiative = roll_initiative(&mut dice, 2, 3);
        assert_eq!(initiative.player_total, 15);
        assert_eq!(initiative.monster_total, 15);
        assert_eq!(initiative.first, Side::Player);
    }

    #[test]
    fn higher_monster_total_goes_first() {
        let mut dice = Dice::scripted([5, 12]);
        let initiative = roll_initiative(&mut dice, 0, 1);
        assert_eq!(initiative.first, Side::Monster);
    }

    #[test]
    fn flee_meets_difficulty() {
        let config = CombatConfig::default();
        let mut dice = Dice::scripted([8, 7]);
        assert!(attempt_flee(&mut dice, 2, &config).escaped);
        let failed = attempt_flee(&mut dice, 2, &config);
        assert!(!failed.escaped);
        assert_eq!(failed.total, 9);
        assert_eq!(failed.difficulty, 10);
    }
}
