//! Runtime embedding for the combat rules.
//!
//! `combat-core` is pure and synchronous. This crate wraps it for a
//! presentation layer: an [`EncounterSession`] that never lets a faulting
//! action corrupt the encounter, a topic-based [`EventBus`], player action
//! providers, and an async [`EncounterRunner`] that paces the monster's
//! replies.
//!
//! Modules are organized by responsibility:
//! - [`api`] exposes the error type and the provider trait
//! - [`session`] hosts the defensive step boundary
//! - [`runner`] drives whole encounters
//! - [`events`] provides topic-based event routing
//! - [`oracle`] adapts loaded content to the core oracle traits
//! - [`providers`] ships the autopilot and a scripted provider
pub mod api;
pub mod config;
pub mod events;
pub mod oracle;
pub mod providers;
pub mod runner;
pub mod session;

pub use api::{AttackProvider, PlayerActionProvider, Result, RuntimeError};
pub use config::RuntimeConfig;
pub use events::{EventBus, Topic};
pub use oracle::{ItemOracleImpl, OracleManager, TechniqueOracleImpl};
pub use providers::{AutoPilot, ScriptedProvider};
pub use runner::{EncounterReport, EncounterRunner};
pub use session::{EncounterSession, FAULT_MESSAGE, SessionReply};
