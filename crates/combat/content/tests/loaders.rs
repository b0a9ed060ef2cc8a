use std::fs;
use std::path::{Path, PathBuf};

use combat_content::{
    ConfigLoader, ContentFactory, HeroLoader, ItemLoader, MonsterLoader, TechniqueLoader,
};
use combat_core::{
    ActionTiming, ConsumableEffect, ItemKind, MonsterAbilityEffect, TechniqueEffect,
    WeaponProperties,
};
use tempfile::TempDir;

fn shipped_data() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../data")
}

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn shipped_content_loads_and_validates() {
    let bundle = ContentFactory::new(shipped_data()).load_all().unwrap();

    assert!(bundle.monster("goblin").is_some());
    assert!(bundle.monster("ogre_chieftain").is_some_and(|m| m.boss));
    for preset in &bundle.heroes {
        bundle.hero(&preset.id).unwrap();
    }
}

#[test]
fn shipped_rogue_dual_wields() {
    let bundle = ContentFactory::new(shipped_data()).load_all().unwrap();
    let rogue = bundle.hero("rogue").unwrap();

    let off_hand = rogue.loadout.off_hand().unwrap();
    assert!(off_hand.properties.contains(WeaponProperties::LIGHT));
    assert_eq!(rogue.inventory.count("alchemist_fire"), 2);
}

#[test]
fn partial_rules_keep_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "rules.toml", "flee_difficulty = 12\n");

    let config = ConfigLoader::load(&path).unwrap();
    assert_eq!(config.flee_difficulty, 12);
    assert_eq!(config.max_items_per_turn, 2);
    assert_eq!(config.defeat_gold_retention_percent, 70);
}

#[test]
fn missing_rules_file_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let config = ContentFactory::new(dir.path()).load_config().unwrap();
    assert_eq!(config, combat_core::CombatConfig::default());
}

#[test]
fn parses_nested_item_kinds() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "items.ron",
        r#"(
            items: [
                (id: "tonic", name: "Tonic", kind: Consumable(RestoreHp((count: 2, sides: 4, bonus: 2)))),
                (
                    id: "rapier",
                    name: "Rapier",
                    kind: Weapon((id: "rapier", name: "Rapier", damage: (count: 1, sides: 8), properties: "FINESSE")),
                ),
                (id: "bone", name: "Bone", kind: Material),
            ],
        )"#,
    );

    let items = ItemLoader::load(&path).unwrap();
    assert_eq!(items.len(), 3);
    match &items[0].kind {
        ItemKind::Consumable(ConsumableEffect::RestoreHp(dice)) => {
            assert_eq!((dice.count, dice.sides, dice.bonus), (2, 4, 2));
        }
        other => panic!("unexpected kind {other:?}"),
    }
    match &items[1].kind {
        ItemKind::Weapon(weapon) => assert_eq!(weapon.properties, WeaponProperties::FINESSE),
        other => panic!("unexpected kind {other:?}"),
    }
}

#[test]
fn technique_defaults_apply() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "techniques.ron",
        r#"(
            techniques: [
                (id: "jab", name: "Jab", source: Ability, effect: Attack(damage: (count: 1, sides: 4), ability: Str)),
            ],
        )"#,
    );

    let techniques = TechniqueLoader::load(&path).unwrap();
    assert_eq!(techniques[0].mp_cost, 0);
    assert_eq!(techniques[0].timing, ActionTiming::Turn);
    assert!(matches!(techniques[0].effect, TechniqueEffect::Attack { .. }));
}

#[test]
fn monster_ability_order_is_preserved() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "monsters.ron",
        r#"(
            monsters: [
                (
                    id: "imp",
                    name: "Imp",
                    hp: 10,
                    armor_class: 13,
                    attack_bonus: 5,
                    damage: (count: 1, sides: 4, bonus: 3),
                    abilities: [
                        (name: "Sting", chance: 30, effect: Strike(damage: (count: 3, sides: 6), to_hit_bonus: 0)),
                        (name: "Mend", chance: 10, effect: Regenerate(amount: (count: 1, sides: 4))),
                    ],
                    experience: 200,
                    gold: 0,
                ),
            ],
        )"#,
    );

    let monsters = MonsterLoader::load(&path).unwrap();
    let imp = &monsters[0];
    assert!(!imp.boss);
    assert!(imp.loot.is_empty());
    assert!(matches!(imp.abilities[0].effect, MonsterAbilityEffect::Strike { .. }));
    assert!(matches!(imp.abilities[1].effect, MonsterAbilityEffect::Regenerate { .. }));
}

#[test]
fn rejects_duplicate_monsters_and_bad_chances() {
    let dir = TempDir::new().unwrap();
    let duplicate = write(
        &dir,
        "dupes.ron",
        r#"(monsters: [
            (id: "rat", name: "Rat", hp: 1, armor_class: 10, attack_bonus: 0, damage: (count: 1, sides: 1), experience: 10, gold: 0),
            (id: "rat", name: "Rat", hp: 1, armor_class: 10, attack_bonus: 0, damage: (count: 1, sides: 1), experience: 10, gold: 0),
        ])"#,
    );
    let err = MonsterLoader::load(&duplicate).unwrap_err();
    assert!(err.to_string().contains("Duplicate monster id 'rat'"));

    let chance = write(
        &dir,
        "chance.ron",
        r#"(monsters: [
            (id: "rat", name: "Rat", hp: 1, armor_class: 10, attack_bonus: 0, damage: (count: 1, sides: 1),
             loot: [(item_id: "tail", chance: 101)], experience: 10, gold: 0),
        ])"#,
    );
    let err = MonsterLoader::load(&chance).unwrap_err();
    assert!(err.to_string().contains("exceeds 100"));
}

#[test]
fn load_all_rejects_dangling_hero_gear() {
    let dir = TempDir::new().unwrap();
    write(&dir, "items.ron", "(items: [])");
    write(&dir, "techniques.ron", "(techniques: [])");
    write(&dir, "monsters.ron", "(monsters: [])");
    write(
        &dir,
        "heroes.ron",
        r#"(heroes: [
            (
                id: "knight",
                name: "Knight",
                abilities: (str: 15, dex: 10, con: 14, int: 10, wis: 10, cha: 12),
                hp: 12,
                main_hand: Some("lance"),
            ),
        ])"#,
    );

    let err = ContentFactory::new(dir.path()).load_all().unwrap_err();
    assert!(err.to_string().contains("unknown item 'lance'"));
}

#[test]
fn hero_scores_outside_range_are_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "heroes.ron",
        r#"(heroes: [
            (
                id: "giant",
                name: "Giant",
                abilities: (str: 40, dex: 0, con: 14, int: 10, wis: 10, cha: 12),
                hp: 30,
            ),
        ])"#,
    );

    let err = HeroLoader::load(&path).unwrap_err();
    assert!(err.to_string().contains("STR score 40 is outside 1-30"));
}

#[test]
fn missing_file_names_the_path() {
    let dir = TempDir::new().unwrap();
    let err = ContentFactory::new(dir.path()).load_items().unwrap_err();
    assert!(err.to_string().contains("items.ron"));
}
