//! Combatant data: ability scores, equipment, player and monster state.
//!
//! # Layers
//!
//! - **Scores**: the six stored abilities ([`AbilityScores`])
//! - **Equipment**: validated [`Loadout`] (hand rules enforced on mutation)
//! - **Combatants**: [`PlayerState`] (carried across encounters) and
//!   [`MonsterState`] (spawned fresh from a [`MonsterTemplate`])

mod abilities;
mod equipment;
mod monster;
mod player;
pub mod progression;

pub use abilities::{Ability, AbilityScores, RawAbilityScores, ScoreOutOfRange};
pub use equipment::{Armor, Loadout, LoadoutError, RawLoadout, Shield, Weapon, WeaponProperties};
pub use monster::{LootEntry, MonsterAbility, MonsterAbilityEffect, MonsterState, MonsterTemplate};
pub use player::{Inventory, Location, PlayerState};
