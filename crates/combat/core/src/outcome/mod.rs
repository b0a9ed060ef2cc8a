//! Encounter outcome: rewards on victory, recovery penalties on defeat.
//!
//! These functions run exactly once per encounter. The engine guarantees that
//! by recording the [`EncounterOutcome`] on the state and skipping any later
//! battle-end check.

use crate::codex::MonsterCodex;
use crate::config::CombatConfig;
use crate::dice::Dice;
use crate::stats::progression::level_ups_earned;
use crate::stats::{Location, MonsterTemplate, PlayerState};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VictoryReport {
    pub experience: u32,
    pub gold: u32,
    /// Item ids that dropped, in loot-table order.
    pub items: Vec<String>,
    pub levels_gained: u32,
    pub ac_discovered: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DefeatReport {
    pub hp: u32,
    pub mp: u32,
    pub gold_lost: u32,
    pub gold: u32,
    /// Town the player was sent back to.
    pub town: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EncounterOutcome {
    Victory(VictoryReport),
    Defeat(DefeatReport),
    /// No rewards and no penalties.
    Fled,
}

/// Rolls every loot entry independently against its drop chance.
pub fn roll_loot(dice: &mut Dice, template: &MonsterTemplate) -> Vec<String> {
    template
        .loot
        .iter()
        .filter(|entry| dice.percent(entry.chance))
        .map(|entry| entry.item_id.clone())
        .collect()
}

/// Awards loot, gold and experience and records the defeat in the codex.
pub fn apply_victory<C>(
    player: &mut PlayerState,
    template: &MonsterTemplate,
    dice: &mut Dice,
    codex: &mut C,
    ac_discovered: bool,
) -> VictoryReport
where
    C: MonsterCodex + ?Sized,
{
    let items = roll_loot(dice, template);
    for item in &items {
        player.inventory.add(item.clone(), 1);
    }

    player.gold = player.gold.saturating_add(template.gold);
    player.experience = player.experience.saturating_add(template.experience);
    let levels_gained =
        level_ups_earned(player.level, player.pending_level_ups, player.experience);
    player.pending_level_ups += levels_gained;

    codex.record_defeat(&template.id, ac_discovered, &items);

    VictoryReport {
        experience: template.experience,
        gold: template.gold,
        items,
        levels_gained,
        ac_discovered,
    }
}

/// Restores part of HP/MP, takes a share of the gold and sends the player to
/// the last safe town.
pub fn apply_defeat(player: &mut PlayerState, config: &CombatConfig) -> DefeatReport {
    let divisor = config.defeat_restore_divisor.max(1);
    player.hp = player.hp_max / divisor;
    player.mp = player.mp_max / divisor;
    player.defending = false;

    let kept = (u64::from(player.gold) * u64::from(config.defeat_gold_retention_percent) / 100)
        .min(u64::from(player.gold)) as u32;
    let gold_lost = player.gold - kept;
    player.gold = kept;

    player.location = Location::Town(player.last_safe_town.clone());

    DefeatReport {
        hp: player.hp,
        mp: player.mp,
        gold_lost,
        gold: player.gold,
        town: player.last_safe_town.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codex::InMemoryCodex;
    use crate::stats::{AbilityScores, LootEntry};

    fn hero() -> PlayerState {
        PlayerState::new("Ayla", AbilityScores::default(), 1)
    }

    #[test]
    fn defeat_restores_half_and_keeps_seventy_percent() {
        let mut player = hero().with_hp(40).with_mp(20).with_gold(100);
        player.hp = 0;
        player.mp = 3;
        player.last_safe_town = "Riverside".into();
        player.location = Location::Wilds("Old Road".into());

        let report = apply_defeat(&mut player, &CombatConfig::default());

        assert_eq!((player.hp, player.mp, player.gold), (20, 10, 70));
        assert_eq!(report.gold_lost, 30);
        assert_eq!(player.location, Location::Town("Riverside".into()));
    }

    #[test]
    fn defeat_floors_odd_values() {
        let mut player = hero().with_hp(41).with_mp(5).with_gold(15);
        apply_defeat(&mut player, &CombatConfig::default());
        assert_eq!((player.hp, player.mp, player.gold), (20, 2, 10));
    }

    #[test]
    fn victory_awards_everything_and_updates_codex() {
        let template = MonsterTemplate::new("wolf", "Wolf", 11, 13)
            .with_rewards(350, 12)
            .with_loot(LootEntry::new("pelt", 50))
            .with_loot(LootEntry::new("fang", 100))
            .with_loot(LootEntry::new("gem", 0));
        let mut player = hero();
        let mut codex = InMemoryCodex::new();
        // pelt rolls 40 <= 50; fang and gem never roll
        let mut dice = Dice::scripted([40]);

        let report = apply_victory(&mut player, &template, &mut dice, &mut codex, true);

        assert_eq!(report.items, vec!["pelt".to_string(), "fang".to_string()]);
        assert_eq!(report.levels_gained, 1);
        assert_eq!(player.gold, 12);
        assert_eq!(player.experience, 350);
        assert_eq!(player.pending_level_ups, 1);
        assert_eq!(player.inventory.count("pelt"), 1);

        let entry = codex.entry("wolf").unwrap();
        assert_eq!(entry.defeats, 1);
        assert!(entry.ac_discovered);
        assert!(entry.seen_drops.contains("fang"));
    }

    #[test]
    fn pending_level_ups_are_not_double_counted() {
        let template = MonsterTemplate::new("rat", "Rat", 3, 10).with_rewards(100, 0);
        let mut player = hero();
        player.experience = 850;
        player.pending_level_ups = 1;
        let mut codex = InMemoryCodex::new();

        let report = apply_victory(&mut player, &template, &mut Dice::scripted([]), &mut codex, false);
        // 950 xp reaches level 3; level 2 was already pending
        assert_eq!(report.levels_gained, 1);
        assert_eq!(player.pending_level_ups, 2);
    }
}
