//! Deterministic turn-based combat rules.
//!
//! `combat-core` resolves one-on-one encounters between a player and a monster
//! using d20 dice. It exposes pure APIs: every roll comes from an injected
//! [`dice::Dice`], every mutation flows through [`engine::CombatEngine`], and
//! nothing here performs I/O or logging. Content loading, pacing and
//! persistence live in the crates that embed it.
pub mod action;
pub mod codex;
pub mod combat;
pub mod config;
pub mod dice;
pub mod engine;
pub mod env;
pub mod error;
pub mod events;
pub mod outcome;
pub mod state;
pub mod stats;

pub use action::PlayerAction;
pub use codex::{ArmorClassDisplay, ArmorClassTracker, CodexEntry, InMemoryCodex, MonsterCodex};
pub use combat::{
    ActionKind, ActionResult, AttackRoll, AttackSource, EffectOutcome, Initiative, Resolution,
    Resolver, RollOutcome, Side,
};
pub use config::CombatConfig;
pub use dice::{DamageDice, Dice, PcgRng, RandomSource, ScriptedRng, compute_seed};
pub use engine::{ActionRejected, CombatEngine};
pub use env::{
    ActionTiming, CombatEnv, ConsumableEffect, ItemDefinition, ItemKind, ItemOracle, OracleError,
    TechniqueDefinition, TechniqueEffect, TechniqueOracle, TechniqueSource, WeatherBoost,
    WeatherModifiers,
};
pub use error::{ErrorSeverity, GameError};
pub use events::CombatEvent;
pub use outcome::{DefeatReport, EncounterOutcome, VictoryReport};
pub use state::{ActionSlot, CombatState, EncounterPhase, TurnEconomy};
pub use stats::{
    Ability, AbilityScores, Armor, Inventory, Loadout, LoadoutError, Location, LootEntry,
    MonsterAbility, MonsterAbilityEffect, MonsterState, MonsterTemplate, PlayerState,
    ScoreOutOfRange, Shield, Weapon, WeaponProperties,
};
