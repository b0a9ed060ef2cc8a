use super::Dice;

/// Damage expression such as `2d6+3`.
///
/// The dice portion and the flat bonus are kept apart because critical hits
/// multiply only the dice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageDice {
    pub count: u8,
    pub sides: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bonus: i32,
}

impl DamageDice {
    pub const fn new(count: u8, sides: u8) -> Self {
        Self {
            count,
            sides,
            bonus: 0,
        }
    }

    /// A fixed amount with no dice (unarmed strikes, flat heals).
    pub const fn flat(bonus: i32) -> Self {
        Self {
            count: 0,
            sides: 0,
            bonus,
        }
    }

    pub const fn with_bonus(mut self, bonus: i32) -> Self {
        self.bonus = bonus;
        self
    }

    /// Rolls the dice portion `multiplier` times over (critical hits pass 2).
    pub fn roll_dice(&self, dice: &mut Dice, multiplier: u32) -> u32 {
        if self.sides == 0 {
            return 0;
        }
        dice.roll_many(u32::from(self.count) * multiplier, u32::from(self.sides))
    }

    /// Largest value the dice portion can produce without a critical.
    pub fn max_dice(&self) -> u32 {
        u32::from(self.count) * u32::from(self.sides)
    }
}

impl core::fmt::Display for DamageDice {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match (self.count, self.bonus) {
            (0, bonus) => write!(f, "{bonus}"),
            (count, 0) => write!(f, "{count}d{}", self.sides),
            (count, bonus) if bonus > 0 => write!(f, "{count}d{}+{bonus}", self.sides),
            (count, bonus) => write!(f, "{count}d{}{bonus}", self.sides),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_forms() {
        assert_eq!(DamageDice::new(1, 8).to_string(), "1d8");
        assert_eq!(DamageDice::new(2, 6).with_bonus(3).to_string(), "2d6+3");
        assert_eq!(DamageDice::new(1, 4).with_bonus(-1).to_string(), "1d4-1");
        assert_eq!(DamageDice::flat(1).to_string(), "1");
    }

    #[test]
    fn critical_multiplier_rolls_extra_dice() {
        let mut dice = Dice::scripted([4, 2]);
        assert_eq!(DamageDice::new(1, 6).roll_dice(&mut dice, 2), 6);
    }

    #[test]
    fn flat_damage_rolls_nothing() {
        let mut dice = Dice::scripted([]);
        assert_eq!(DamageDice::flat(3).roll_dice(&mut dice, 2), 0);
    }
}
