use crate::dice::DamageDice;
use crate::stats::Ability;

/// Read-only catalog of spells and abilities.
pub trait TechniqueOracle: Send + Sync {
    fn technique(&self, id: &str) -> Option<TechniqueDefinition>;

    /// Returns all technique definitions available in this oracle.
    fn all_techniques(&self) -> Vec<TechniqueDefinition>;
}

/// Whether a technique is magical (spell) or martial (ability).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum TechniqueSource {
    Spell,
    Ability,
}

/// Which slot of the turn economy an action spends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum ActionTiming {
    #[default]
    Turn,
    Bonus,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TechniqueEffect {
    /// Attack roll against the monster's AC, then damage.
    Attack { damage: DamageDice, ability: Ability },
    /// Unavoidable damage.
    Blast {
        damage: DamageDice,
        #[cfg_attr(feature = "serde", serde(default))]
        ability: Option<Ability>,
    },
    /// Unavoidable healing on the caster.
    Heal {
        amount: DamageDice,
        #[cfg_attr(feature = "serde", serde(default))]
        ability: Option<Ability>,
    },
}

impl TechniqueEffect {
    pub fn rolls_to_hit(&self) -> bool {
        matches!(self, Self::Attack { .. })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TechniqueDefinition {
    pub id: String,
    pub name: String,
    pub source: TechniqueSource,
    #[cfg_attr(feature = "serde", serde(default))]
    pub mp_cost: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub timing: ActionTiming,
    pub effect: TechniqueEffect,
}

impl TechniqueDefinition {
    pub fn spell(id: impl Into<String>, name: impl Into<String>, effect: TechniqueEffect) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            source: TechniqueSource::Spell,
            mp_cost: 0,
            timing: ActionTiming::Turn,
            effect,
        }
    }

    pub fn ability(id: impl Into<String>, name: impl Into<String>, effect: TechniqueEffect) -> Self {
        Self {
            source: TechniqueSource::Ability,
            ..Self::spell(id, name, effect)
        }
    }

    pub fn costing(mut self, mp_cost: u32) -> Self {
        self.mp_cost = mp_cost;
        self
    }

    pub fn as_bonus(mut self) -> Self {
        self.timing = ActionTiming::Bonus;
        self
    }
}
