//! Monster stat block loader.

use std::collections::HashSet;
use std::path::Path;

use combat_core::MonsterTemplate;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Monster catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonsterCatalog {
    pub monsters: Vec<MonsterTemplate>,
}

/// Loader for monster templates from RON files.
pub struct MonsterLoader;

impl MonsterLoader {
    /// Load monster templates from a RON file.
    ///
    /// Rejects duplicate ids and ability or loot chances above 100.
    pub fn load(path: &Path) -> LoadResult<Vec<MonsterTemplate>> {
        let content = read_file(path)?;
        let catalog: MonsterCatalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse monster catalog RON: {}", e))?;

        let mut seen = HashSet::new();
        for monster in &catalog.monsters {
            if !seen.insert(monster.id.as_str()) {
                anyhow::bail!("Duplicate monster id '{}'", monster.id);
            }
            let chances = monster
                .abilities
                .iter()
                .map(|ability| (ability.name.as_str(), ability.chance))
                .chain(
                    monster
                        .loot
                        .iter()
                        .map(|entry| (entry.item_id.as_str(), entry.chance)),
                );
            for (what, chance) in chances {
                if chance > 100 {
                    anyhow::bail!(
                        "Monster '{}': chance {} for '{}' exceeds 100",
                        monster.id,
                        chance,
                        what
                    );
                }
            }
        }

        Ok(catalog.monsters)
    }
}
