//! Monster codex: long-lived knowledge about each species.
//!
//! The codex is owned by the save/profile layer. Combat only talks to it
//! through [`MonsterCodex`], whose `record_defeat` is an upsert that may be
//! replayed without duplicating seen drops.

mod tracker;

pub use tracker::{ArmorClassDisplay, ArmorClassTracker};

use std::collections::{BTreeMap, BTreeSet};

/// Knowledge about one monster species.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CodexEntry {
    pub defeats: u32,
    pub ac_discovered: bool,
    /// Every item id this species has ever dropped.
    pub seen_drops: BTreeSet<String>,
}

/// Persistent per-species knowledge consulted and updated by combat.
pub trait MonsterCodex {
    fn is_ac_discovered(&self, monster_id: &str) -> bool;

    /// Permanently unlocks the species' AC.
    fn mark_ac_discovered(&mut self, monster_id: &str);

    /// Counts one defeat, OR-merges the discovered flag and unions the drops.
    fn record_defeat(&mut self, monster_id: &str, ac_discovered: bool, dropped: &[String]);

    fn entry(&self, monster_id: &str) -> Option<CodexEntry>;
}

/// Codex kept in memory (and persisted with serde by the embedding layer).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct InMemoryCodex {
    entries: BTreeMap<String, CodexEntry>,
}

impl InMemoryCodex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CodexEntry)> {
        self.entries.iter().map(|(id, entry)| (id.as_str(), entry))
    }

    fn entry_mut(&mut self, monster_id: &str) -> &mut CodexEntry {
        self.entries.entry(monster_id.to_owned()).or_default()
    }
}

impl MonsterCodex for InMemoryCodex {
    fn is_ac_discovered(&self, monster_id: &str) -> bool {
        self.entries
            .get(monster_id)
            .is_some_and(|entry| entry.ac_discovered)
    }

    fn mark_ac_discovered(&mut self, monster_id: &str) {
        self.entry_mut(monster_id).ac_discovered = true;
    }

    fn record_defeat(&mut self, monster_id: &str, ac_discovered: bool, dropped: &[String]) {
        let entry = self.entry_mut(monster_id);
        entry.defeats = entry.defeats.saturating_add(1);
        entry.ac_discovered |= ac_discovered;
        entry.seen_drops.extend(dropped.iter().cloned());
    }

    fn entry(&self, monster_id: &str) -> Option<CodexEntry> {
        self.entries.get(monster_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_defeat_unions_drops() {
        let mut codex = InMemoryCodex::new();
        codex.record_defeat("wolf", false, &["pelt".into()]);
        codex.record_defeat("wolf", false, &["pelt".into(), "fang".into()]);

        let entry = codex.entry("wolf").unwrap();
        assert_eq!(entry.defeats, 2);
        assert_eq!(entry.seen_drops.len(), 2);
        assert!(!entry.ac_discovered);
    }

    #[test]
    fn discovery_is_never_forgotten() {
        let mut codex = InMemoryCodex::new();
        codex.mark_ac_discovered("wolf");
        codex.record_defeat("wolf", false, &[]);
        assert!(codex.is_ac_discovered("wolf"));
        assert!(!codex.is_ac_discovered("slime"));
    }
}
