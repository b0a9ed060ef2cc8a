//! Dice engine.
//!
//! Uniform die rolls plus the two pure conversions every other component leans
//! on: ability score to modifier, and level to proficiency bonus. All rolls flow
//! through a [`Dice`] built around an injected [`RandomSource`].

mod notation;
mod rng;

pub use notation::DamageDice;
pub use rng::{PcgRng, RandomSource, ScriptedRng, compute_seed};

/// Dice engine backed by an injected random source.
pub struct Dice {
    source: Box<dyn RandomSource>,
}

impl Dice {
    pub fn new(source: impl RandomSource + 'static) -> Self {
        Self {
            source: Box::new(source),
        }
    }

    /// Production dice seeded with a PCG generator.
    pub fn seeded(seed: u64) -> Self {
        Self::new(PcgRng::new(seed))
    }

    /// Test dice replaying the given faces in order.
    pub fn scripted(faces: impl IntoIterator<Item = u32>) -> Self {
        Self::new(ScriptedRng::new(faces))
    }

    /// Integer drawn uniformly from `1..=sides`.
    pub fn roll(&mut self, sides: u32) -> u32 {
        self.source.roll_die(sides)
    }

    /// Sum of `count` rolls of a `sides`-sided die.
    pub fn roll_many(&mut self, count: u32, sides: u32) -> u32 {
        (0..count).map(|_| self.roll(sides)).sum()
    }

    pub fn d20(&mut self) -> u32 {
        self.roll(20)
    }

    /// Returns true with probability `chance`/100 (d100 ≤ chance).
    ///
    /// A chance of 0 never succeeds and never consumes a roll; 100 or more
    /// always succeeds without rolling either.
    pub fn percent(&mut self, chance: u8) -> bool {
        match chance {
            0 => false,
            100.. => true,
            _ => self.roll(100) <= u32::from(chance),
        }
    }
}

impl core::fmt::Debug for Dice {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Dice").finish_non_exhaustive()
    }
}

/// `floor((score - 10) / 2)`
pub const fn ability_modifier(score: i32) -> i32 {
    (score - 10).div_euclid(2)
}

/// `floor((level - 1) / 4) + 2`
pub const fn proficiency_bonus(level: i32) -> i32 {
    (level - 1).div_euclid(4) + 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifier_floors_toward_negative_infinity() {
        assert_eq!(ability_modifier(1), -5);
        assert_eq!(ability_modifier(8), -1);
        assert_eq!(ability_modifier(9), -1);
        assert_eq!(ability_modifier(10), 0);
        assert_eq!(ability_modifier(11), 0);
        assert_eq!(ability_modifier(16), 3);
        assert_eq!(ability_modifier(30), 10);
    }

    #[test]
    fn proficiency_by_level() {
        assert_eq!(proficiency_bonus(1), 2);
        assert_eq!(proficiency_bonus(4), 2);
        assert_eq!(proficiency_bonus(5), 3);
        assert_eq!(proficiency_bonus(9), 4);
        assert_eq!(proficiency_bonus(17), 6);
        assert_eq!(proficiency_bonus(20), 6);
    }

    #[test]
    fn scripted_dice_sum_many() {
        let mut dice = Dice::scripted([3, 5, 6]);
        assert_eq!(dice.roll_many(3, 6), 14);
    }

    #[test]
    fn percent_edges_do_not_roll() {
        let mut dice = Dice::scripted([]);
        assert!(!dice.percent(0));
        assert!(dice.percent(100));
    }

    #[test]
    fn percent_compares_d100() {
        let mut dice = Dice::scripted([8, 9]);
        assert!(dice.percent(8));
        assert!(!dice.percent(8));
    }
}
