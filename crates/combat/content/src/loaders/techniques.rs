//! Spell and ability catalog loader.

use std::path::Path;

use combat_core::TechniqueDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechniqueCatalog {
    pub techniques: Vec<TechniqueDefinition>,
}

/// Loader for spells and abilities from RON files.
pub struct TechniqueLoader;

impl TechniqueLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<TechniqueDefinition>> {
        let content = read_file(path)?;
        let catalog: TechniqueCatalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse technique catalog RON: {}", e))?;

        Ok(catalog.techniques)
    }
}
