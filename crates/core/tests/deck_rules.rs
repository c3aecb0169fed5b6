use hotseat_core::{
    build_deck, Card, CardCatalog, CardMode, CardType, Category, GameConfig, Intensity, RngState,
    SpecialEffect,
};
use std::collections::HashMap;

fn card(id: &str, category: Category, intensity: Intensity) -> Card {
    Card::new(id, id, CardType::Question, CardMode::Binary)
        .with_category(category)
        .with_intensity(intensity)
}

fn catalog() -> CardCatalog {
    CardCatalog::new(vec![
        card("fun-soft", Category::Fun, Intensity::Soft),
        card("fun-spicy", Category::Fun, Intensity::Spicy),
        card("rom-medium", Category::Romantic, Intensity::Medium),
        card("gen-medium", Category::General, Intensity::Medium),
        card("gen-bomb", Category::General, Intensity::Soft).with_effect(SpecialEffect::Bomb),
        card("spicy-steal", Category::Spicy, Intensity::Spicy).with_effect(SpecialEffect::Steal),
    ])
}

#[test]
fn shuffle_is_roughly_uniform() {
    let catalog = CardCatalog::new(vec![
        card("a", Category::General, Intensity::Soft),
        card("b", Category::General, Intensity::Soft),
        card("c", Category::General, Intensity::Soft),
    ]);
    let config = GameConfig::default();
    let mut rng = RngState::from_seed(2024);
    let trials = 6_000;
    let mut counts: HashMap<String, usize> = HashMap::new();
    for _ in 0..trials {
        let order: String = build_deck(&catalog, &config, 1, &mut rng)
            .iter()
            .map(|card| card.id.as_str())
            .collect();
        *counts.entry(order).or_insert(0) += 1;
    }
    assert_eq!(counts.len(), 6);
    for (order, count) in counts {
        assert!(
            (850..=1150).contains(&count),
            "permutation {order} seen {count} times"
        );
    }
}

#[test]
fn every_single_category_configuration_yields_cards() {
    let catalog = catalog();
    let mut rng = RngState::from_seed(1);
    for category in Category::ALL {
        for intensity in [Intensity::Soft, Intensity::Medium, Intensity::Spicy] {
            let config = GameConfig {
                categories: [category].into_iter().collect(),
                intensity,
                ..GameConfig::default()
            };
            for round in [1, 2] {
                let deck = build_deck(&catalog, &config, round, &mut rng);
                assert!(
                    !deck.is_empty(),
                    "{category:?}/{intensity:?} round {round} built an empty deck"
                );
            }
        }
    }
}

#[test]
fn special_cards_wait_for_round_two() {
    let catalog = catalog();
    let config = GameConfig {
        intensity: Intensity::Spicy,
        ..GameConfig::default()
    };
    let mut rng = RngState::from_seed(8);
    let first = build_deck(&catalog, &config, 1, &mut rng);
    assert_eq!(first.len(), 4);
    assert!(first.iter().all(|card| card.special_effect.is_none()));

    let second = build_deck(&catalog, &config, 2, &mut rng);
    assert_eq!(second.len(), 6);
    assert_eq!(second.iter().filter(|card| card.has_effect()).count(), 2);
}

#[test]
fn intensity_is_a_ceiling() {
    let catalog = catalog();
    let config = GameConfig {
        intensity: Intensity::Soft,
        ..GameConfig::default()
    };
    let mut rng = RngState::from_seed(8);
    let deck = build_deck(&catalog, &config, 2, &mut rng);
    let mut ids: Vec<&str> = deck.iter().map(|card| card.id.as_str()).collect();
    ids.sort();
    assert_eq!(ids, vec!["fun-soft", "gen-bomb"]);
}
