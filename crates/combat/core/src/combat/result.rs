//! Action result records.
//!
//! Every resolution produces exactly one [`ActionResult`]. The variants are
//! tagged per action kind so that, for example, an attack result always carries
//! a d20 roll while an auto-hit heal never does.

use super::roll::AttackRoll;

/// Which side of the encounter performed an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum Side {
    Player,
    Monster,
}

/// Discriminant of [`ActionResult`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum ActionKind {
    Attack,
    Spell,
    Ability,
    Item,
    Defend,
    Flee,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackSource {
    MainHand,
    OffHand,
    /// A monster's basic attack.
    Natural,
}

/// How a technique reached its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Resolution {
    Rolled(AttackRoll),
    /// No attack roll; always succeeds.
    Automatic,
}

impl Resolution {
    pub fn succeeded(&self) -> bool {
        match self {
            Self::Rolled(roll) => roll.is_hit(),
            Self::Automatic => true,
        }
    }
}

/// Amount produced by a technique or item, before clamping to the target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectOutcome {
    /// Damage to the opposing side, after any shield block.
    Damage { amount: u32, blocked: u32 },
    /// Healing on the acting side.
    Healing(u32),
    ManaRestored(u32),
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackResult {
    pub actor: Side,
    pub source: AttackSource,
    pub weapon: String,
    pub roll: AttackRoll,
    /// Damage after any shield block; 0 on a miss.
    pub damage: u32,
    pub blocked: u32,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TechniqueResult {
    pub actor: Side,
    pub id: String,
    pub name: String,
    pub resolution: Resolution,
    pub effect: EffectOutcome,
    /// Mana the caller must deduct; the resolver never touches MP.
    pub mp_cost: u32,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemResult {
    pub item_id: String,
    pub name: String,
    pub effect: EffectOutcome,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DefendResult {
    pub actor: Side,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FleeResult {
    pub natural: u32,
    pub modifier: i32,
    pub total: i32,
    pub difficulty: i32,
    pub escaped: bool,
    pub message: String,
}

/// The atomic, immutable outcome of one resolved action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionResult {
    Attack(AttackResult),
    Spell(TechniqueResult),
    Ability(TechniqueResult),
    Item(ItemResult),
    Defend(DefendResult),
    Flee(FleeResult),
}

impl ActionResult {
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Attack(_) => ActionKind::Attack,
            Self::Spell(_) => ActionKind::Spell,
            Self::Ability(_) => ActionKind::Ability,
            Self::Item(_) => ActionKind::Item,
            Self::Defend(_) => ActionKind::Defend,
            Self::Flee(_) => ActionKind::Flee,
        }
    }

    pub fn actor(&self) -> Side {
        match self {
            Self::Attack(result) => result.actor,
            Self::Spell(result) | Self::Ability(result) => result.actor,
            Self::Defend(result) => result.actor,
            Self::Item(_) | Self::Flee(_) => Side::Player,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Attack(result) => &result.message,
            Self::Spell(result) | Self::Ability(result) => &result.message,
            Self::Item(result) => &result.message,
            Self::Defend(result) => &result.message,
            Self::Flee(result) => &result.message,
        }
    }

    /// The d20 roll, for results that made one.
    pub fn attack_roll(&self) -> Option<&AttackRoll> {
        match self {
            Self::Attack(result) => Some(&result.roll),
            Self::Spell(result) | Self::Ability(result) => match &result.resolution {
                Resolution::Rolled(roll) => Some(roll),
                Resolution::Automatic => None,
            },
            _ => None,
        }
    }

    /// Damage dealt to the opposing side (0 for non-damaging results).
    pub fn damage(&self) -> u32 {
        match self {
            Self::Attack(result) => result.damage,
            Self::Spell(result) | Self::Ability(result) => match result.effect {
                EffectOutcome::Damage { amount, .. } => amount,
                _ => 0,
            },
            Self::Item(result) => match result.effect {
                EffectOutcome::Damage { amount, .. } => amount,
                _ => 0,
            },
            _ => 0,
        }
    }

    pub fn mp_cost(&self) -> u32 {
        match self {
            Self::Spell(result) | Self::Ability(result) => result.mp_cost,
            _ => 0,
        }
    }
}
