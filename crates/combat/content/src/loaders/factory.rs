//! Content factory for loading encounter content from a data directory.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use combat_core::{CombatConfig, ItemDefinition, MonsterTemplate, PlayerState, TechniqueDefinition};

use crate::loaders::{
    ConfigLoader, HeroLoader, HeroPreset, ItemLoader, LoadResult, MonsterLoader, TechniqueLoader,
};

/// Content factory that loads all encounter content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── rules.toml
/// ├── monsters.ron
/// ├── techniques.ron
/// ├── items.ron
/// └── heroes.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load combat rules from `rules.toml`, or the defaults when it is absent.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        let path = self.data_dir.join("rules.toml");
        if !path.exists() {
            return Ok(CombatConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load monster stat blocks from `monsters.ron`.
    pub fn load_monsters(&self) -> LoadResult<Vec<MonsterTemplate>> {
        MonsterLoader::load(&self.data_dir.join("monsters.ron"))
    }

    /// Load spells and abilities from `techniques.ron`.
    pub fn load_techniques(&self) -> LoadResult<Vec<TechniqueDefinition>> {
        TechniqueLoader::load(&self.data_dir.join("techniques.ron"))
    }

    /// Load the item catalog from `items.ron`.
    pub fn load_items(&self) -> LoadResult<Vec<ItemDefinition>> {
        ItemLoader::load(&self.data_dir.join("items.ron"))
    }

    /// Load hero presets from `heroes.ron`.
    pub fn load_heroes(&self) -> LoadResult<Vec<HeroPreset>> {
        HeroLoader::load(&self.data_dir.join("heroes.ron"))
    }

    /// Loads every file and cross-checks the references between them.
    pub fn load_all(&self) -> LoadResult<ContentBundle> {
        let bundle = ContentBundle {
            config: self.load_config()?,
            monsters: self.load_monsters()?,
            techniques: self.load_techniques()?,
            items: self.load_items()?,
            heroes: self.load_heroes()?,
        };
        bundle.validate()?;
        Ok(bundle)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

/// Everything one data directory provides.
#[derive(Debug, Clone)]
pub struct ContentBundle {
    pub config: CombatConfig,
    pub monsters: Vec<MonsterTemplate>,
    pub techniques: Vec<TechniqueDefinition>,
    pub items: Vec<ItemDefinition>,
    pub heroes: Vec<HeroPreset>,
}

impl ContentBundle {
    pub fn monster(&self, id: &str) -> Option<&MonsterTemplate> {
        self.monsters.iter().find(|monster| monster.id == id)
    }

    pub fn preset(&self, id: &str) -> Option<&HeroPreset> {
        self.heroes.iter().find(|hero| hero.id == id)
    }

    /// Builds a fresh player from the named preset.
    pub fn hero(&self, id: &str) -> LoadResult<PlayerState> {
        let preset = self
            .preset(id)
            .ok_or_else(|| anyhow::anyhow!("Unknown hero '{}'", id))?;
        preset.build(&self.items)
    }

    /// Checks that every id referenced across files exists.
    ///
    /// All problems are collected and reported together.
    pub fn validate(&self) -> LoadResult<()> {
        let items: HashSet<&str> = self.items.iter().map(|item| item.id.as_str()).collect();
        let techniques: HashSet<&str> = self
            .techniques
            .iter()
            .map(|technique| technique.id.as_str())
            .collect();
        let mut problems = Vec::new();

        for monster in &self.monsters {
            for entry in &monster.loot {
                if !items.contains(entry.item_id.as_str()) {
                    problems.push(format!(
                        "Monster '{}' drops unknown item '{}'",
                        monster.id, entry.item_id
                    ));
                }
            }
        }

        let mut seen = HashSet::new();
        for hero in &self.heroes {
            if !seen.insert(hero.id.as_str()) {
                problems.push(format!("Duplicate hero id '{}'", hero.id));
            }
            for technique in &hero.techniques {
                if !techniques.contains(technique.as_str()) {
                    problems.push(format!(
                        "Hero '{}' knows unknown technique '{}'",
                        hero.id, technique
                    ));
                }
            }
            if let Err(err) = hero.build(&self.items) {
                problems.push(err.to_string());
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            anyhow::bail!("Invalid content:\n  {}", problems.join("\n  "))
        }
    }
}
