/// Per-monster bonus granted by the current weather (e.g. frost wolves in a
/// blizzard).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeatherBoost {
    pub attack_bonus: i32,
    pub initiative_bonus: i32,
}

/// Weather inputs supplied by the overworld for one encounter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeatherModifiers {
    /// Subtracted from the player's attack rolls.
    #[cfg_attr(feature = "serde", serde(default))]
    pub accuracy_penalty: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub monster_boost: Option<WeatherBoost>,
}

impl WeatherModifiers {
    pub const CLEAR: Self = Self {
        accuracy_penalty: 0,
        monster_boost: None,
    };

    pub fn new(accuracy_penalty: i32) -> Self {
        Self {
            accuracy_penalty,
            monster_boost: None,
        }
    }

    pub fn with_monster_boost(mut self, attack_bonus: i32, initiative_bonus: i32) -> Self {
        self.monster_boost = Some(WeatherBoost {
            attack_bonus,
            initiative_bonus,
        });
        self
    }

    pub fn monster_attack_bonus(&self) -> i32 {
        self.monster_boost.map_or(0, |boost| boost.attack_bonus)
    }

    pub fn monster_initiative_bonus(&self) -> i32 {
        self.monster_boost.map_or(0, |boost| boost.initiative_bonus)
    }
}
