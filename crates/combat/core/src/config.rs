/// Combat rules constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// d20 + DEX must meet this to escape.
    pub flee_difficulty: i32,
    /// AC bonus while defending.
    pub defend_ac_bonus: i32,
    /// Percent chance the monster defends instead of acting.
    pub monster_defend_chance: u8,
    /// Items usable per player turn.
    pub max_items_per_turn: u8,
    /// Damage a shield absorbs while its bearer is defending.
    pub shield_block: u32,
    /// Percent of gold kept after a defeat.
    pub defeat_gold_retention_percent: u32,
    /// HP and MP are restored to max / divisor after a defeat.
    pub defeat_restore_divisor: u32,
    /// Dice multiplier on critical hits.
    pub critical_dice_multiplier: u32,
}

impl CombatConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_FLEE_DIFFICULTY: i32 = 10;
    pub const DEFAULT_DEFEND_AC_BONUS: i32 = 2;
    pub const DEFAULT_MONSTER_DEFEND_CHANCE: u8 = 8;
    pub const DEFAULT_MAX_ITEMS_PER_TURN: u8 = 2;
    pub const DEFAULT_SHIELD_BLOCK: u32 = 1;
    pub const DEFAULT_DEFEAT_GOLD_RETENTION_PERCENT: u32 = 70;
    pub const DEFAULT_DEFEAT_RESTORE_DIVISOR: u32 = 2;
    pub const DEFAULT_CRITICAL_DICE_MULTIPLIER: u32 = 2;

    pub fn new() -> Self {
        Self {
            flee_difficulty: Self::DEFAULT_FLEE_DIFFICULTY,
            defend_ac_bonus: Self::DEFAULT_DEFEND_AC_BONUS,
            monster_defend_chance: Self::DEFAULT_MONSTER_DEFEND_CHANCE,
            max_items_per_turn: Self::DEFAULT_MAX_ITEMS_PER_TURN,
            shield_block: Self::DEFAULT_SHIELD_BLOCK,
            defeat_gold_retention_percent: Self::DEFAULT_DEFEAT_GOLD_RETENTION_PERCENT,
            defeat_restore_divisor: Self::DEFAULT_DEFEAT_RESTORE_DIVISOR,
            critical_dice_multiplier: Self::DEFAULT_CRITICAL_DICE_MULTIPLIER,
        }
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
