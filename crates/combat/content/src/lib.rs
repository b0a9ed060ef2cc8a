//! Data-driven encounter content and loaders.
//!
//! This crate reads static content from RON/TOML data files:
//! - Monster stat blocks (RON)
//! - Spell and ability catalogs (RON)
//! - Item catalogs: consumables and equipment (RON)
//! - Hero presets referencing catalog items by id (RON)
//! - Combat rules (TOML)
//!
//! Content is consumed by the runtime's oracles and never appears in encounter
//! state. All loaders deserialize combat-core types directly via serde.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentBundle, ContentFactory, HeroLoader, HeroPreset, ItemLoader, LoadResult,
    MonsterLoader, TechniqueLoader,
};
