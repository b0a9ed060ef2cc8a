//! Action resolution: attack rolls, damage, techniques, items, initiative and
//! flee checks.
//!
//! Nothing here mutates combatants. Every entry point returns an immutable
//! [`ActionResult`] (or [`Initiative`]) that the engine applies afterwards.

mod initiative;
mod resolver;
mod result;
mod roll;

pub use initiative::{Initiative, attempt_flee, roll_initiative};
pub use resolver::Resolver;
pub use result::{
    ActionKind, ActionResult, AttackResult, AttackSource, DefendResult, EffectOutcome,
    FleeResult, ItemResult, Resolution, Side, TechniqueResult,
};
pub use roll::{AttackRoll, NATURAL_CRITICAL, NATURAL_FUMBLE, RollOutcome, effective_armor_class};
