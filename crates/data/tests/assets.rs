use hotseat_core::{
    build_deck, Card, CardMode, CardType, GameConfig, RngState, RulesConfig, SpecialEffect,
    CUSTOM_ID_PREFIX,
};
use hotseat_data::{load_catalog, load_cards, load_rules};
use std::fs;
use std::path::PathBuf;

fn assets_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("assets")
}

fn temp_dir(name: &str) -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let dir = std::env::temp_dir().join(format!(
        "hotseat_assets_{name}_{}_{nanos}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

#[test]
fn shipped_cards_parse_and_cover_every_category() {
    let cards = load_cards(&assets_root()).expect("load cards");
    assert!(cards.len() >= 20);
    for category in hotseat_core::Category::ALL {
        assert!(
            cards.iter().any(|card| card.category == category && card.special_effect.is_none()),
            "no plain card for {category:?}"
        );
    }
    assert!(cards.iter().any(|card| card.is_effect(SpecialEffect::Roulette)));
    assert!(cards
        .iter()
        .any(|card| matches!(card.special_effect, Some(SpecialEffect::Minigame(_)))));
    assert!(cards.iter().all(|card| !card.id.starts_with(CUSTOM_ID_PREFIX)));
}

#[test]
fn shipped_rules_match_defaults() {
    let rules = load_rules(&assets_root()).expect("load rules");
    assert_eq!(rules, RulesConfig::default());
}

#[test]
fn missing_rules_file_uses_defaults() {
    let dir = temp_dir("no_rules");
    let rules = load_rules(&dir).expect("defaults");
    assert_eq!(rules.initial_target, 30);
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn partial_rules_file_keeps_other_defaults() {
    let dir = temp_dir("partial_rules");
    fs::write(dir.join("rules.json"), r#"{ "steal_amount": 7, "turn_seconds": 20 }"#)
        .expect("write rules");
    let rules = load_rules(&dir).expect("load rules");
    assert_eq!(rules.steal_amount, 7);
    assert_eq!(rules.turn_seconds, Some(20));
    assert_eq!(rules.gift_amount, 5);
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn empty_effect_string_means_no_effect() {
    let dir = temp_dir("empty_effect");
    fs::write(
        dir.join("cards.json"),
        r#"[{ "id": "a", "text": "A", "type": "rule", "mode": "rule", "specialEffect": "" }]"#,
    )
    .expect("write cards");
    let cards = load_cards(&dir).expect("load cards");
    assert_eq!(cards[0].special_effect, None);
    assert_eq!(cards[0].points, 1);
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn duplicate_ids_are_rejected() {
    let dir = temp_dir("dup_ids");
    fs::write(
        dir.join("cards.json"),
        r#"[{ "id": "a", "text": "A", "type": "rule", "mode": "rule" },
            { "id": "a", "text": "B", "type": "rule", "mode": "rule" }]"#,
    )
    .expect("write cards");
    let err = load_cards(&dir).expect_err("duplicate");
    assert!(err.to_string().contains("duplicate card id a"));
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn missing_catalog_reports_path() {
    let dir = temp_dir("no_cards");
    let err = load_cards(&dir).expect_err("missing");
    assert!(format!("{err:#}").contains("cards.json"));
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn custom_cards_join_the_deck() {
    let custom = Card::new(
        "custom-1",
        "Sing the chorus of your favourite song.",
        CardType::Challenge,
        CardMode::Statement,
    );
    let catalog = load_catalog(&assets_root(), vec![custom]).expect("catalog");
    let mut rng = RngState::from_seed(3);
    let deck = build_deck(&catalog, &GameConfig::default(), 1, &mut rng);
    assert!(deck.iter().any(|card| card.id == "custom-1"));
    assert!(deck.iter().all(|card| card.special_effect.is_none()));
}
