//! Content loaders for reading encounter data from files.
//!
//! Each loader turns one RON/TOML file into combat-core types. The
//! [`ContentFactory`] knows the directory layout and loads everything at once.

pub mod config;
pub mod factory;
pub mod heroes;
pub mod items;
pub mod monsters;
pub mod techniques;

pub use config::ConfigLoader;
pub use factory::{ContentBundle, ContentFactory};
pub use heroes::{HeroLoader, HeroPreset};
pub use items::ItemLoader;
pub use monsters::MonsterLoader;
pub use techniques::TechniqueLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
