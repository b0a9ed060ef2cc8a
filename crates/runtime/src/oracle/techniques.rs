//! Spell and ability catalog implementing [`combat_core::TechniqueOracle`].
use combat_core::{TechniqueDefinition, TechniqueOracle};
use std::collections::HashMap;

pub struct TechniqueOracleImpl {
    techniques: HashMap<String, TechniqueDefinition>,
}

impl TechniqueOracleImpl {
    pub fn new() -> Self {
        Self {
            techniques: HashMap::new(),
        }
    }

    pub fn add_technique(&mut self, technique: TechniqueDefinition) {
        self.techniques.insert(technique.id.clone(), technique);
    }

    pub fn len(&self) -> usize {
        self.techniques.len()
    }

    pub fn is_empty(&self) -> bool {
        self.techniques.is_empty()
    }
}

impl Default for TechniqueOracleImpl {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<TechniqueDefinition> for TechniqueOracleImpl {
    fn from_iter<I: IntoIterator<Item = TechniqueDefinition>>(iter: I) -> Self {
        let mut oracle = Self::new();
        for technique in iter {
            oracle.add_technique(technique);
        }
        oracle
    }
}

impl TechniqueOracle for TechniqueOracleImpl {
    fn technique(&self, id: &str) -> Option<TechniqueDefinition> {
        self.techniques.get(id).cloned()
    }

    fn all_techniques(&self) -> Vec<TechniqueDefinition> {
        self.techniques.values().cloned().collect()
    }
}
