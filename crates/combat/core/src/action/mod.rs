//! Player decisions submitted to the engine.
//!
//! Monster decisions are never submitted from outside: the engine picks them
//! in [`crate::engine::CombatEngine::run_monster_turn`].

/// One decision taken by the player during their turn.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerAction {
    /// Main-hand attack, followed by an off-hand attack when dual-wielding.
    Attack,
    /// +AC until the monster's next action resolves.
    Defend,
    /// Spell or ability by id. Its slot (turn or bonus) comes from the definition.
    Cast(String),
    /// Consumable by item id.
    UseItem(String),
    Flee,
}

impl PlayerAction {
    pub fn cast(technique_id: impl Into<String>) -> Self {
        Self::Cast(technique_id.into())
    }

    pub fn use_item(item_id: impl Into<String>) -> Self {
        Self::UseItem(item_id.into())
    }

    /// Short label for logs.
    pub fn label(&self) -> &str {
        match self {
            Self::Attack => "attack",
            Self::Defend => "defend",
            Self::Cast(id) | Self::UseItem(id) => id,
            Self::Flee => "flee",
        }
    }
}

impl core::fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Attack => f.write_str("attack"),
            Self::Defend => f.write_str("defend"),
            Self::Cast(id) => write!(f, "cast {id}"),
            Self::UseItem(id) => write!(f, "use {id}"),
            Self::Flee => f.write_str("flee"),
        }
    }
}
