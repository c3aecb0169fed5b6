use crate::{card_eligible, Card, CardCatalog, GameConfig, RngState};
use std::collections::HashSet;
use tracing::{debug, warn};

/// The eligible pool for a round, unshuffled. Falls back to every card
/// without a special effect when the configuration filters everything out.
pub fn deck_candidates(catalog: &CardCatalog, config: &GameConfig, round: u32) -> Vec<Card> {
    let filtered: Vec<Card> = catalog
        .iter()
        .filter(|card| card_eligible(card, config, round))
        .cloned()
        .collect();
    if !filtered.is_empty() {
        return filtered;
    }
    warn!(round, "configuration filtered out every card; using plain pool");
    catalog
        .iter()
        .filter(|card| !card.has_effect())
        .cloned()
        .collect()
}

pub fn build_deck(
    catalog: &CardCatalog,
    config: &GameConfig,
    round: u32,
    rng: &mut RngState,
) -> Vec<Card> {
    let mut deck = deck_candidates(catalog, config, round);
    rng.shuffle(&mut deck);
    debug!(round, size = deck.len(), "deck built");
    deck
}

/// Drops already-used cards from `candidates`. When nothing is left the used
/// set is cleared and the whole pool comes back.
pub fn replenish(
    candidates: &[Card],
    used: &mut HashSet<String>,
    rng: &mut RngState,
) -> Vec<Card> {
    let mut remaining: Vec<Card> = candidates
        .iter()
        .filter(|card| !used.contains(&card.id))
        .cloned()
        .collect();
    if remaining.is_empty() {
        debug!(pool = candidates.len(), "every candidate used; clearing used set");
        used.clear();
        remaining = candidates.to_vec();
    }
    rng.shuffle(&mut remaining);
    remaining
}

#[derive(Debug, Default, Clone)]
pub struct ActiveDeck {
    cards: Vec<Card>,
    cursor: usize,
}

impl ActiveDeck {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards, cursor: 0 }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> Option<&Card> {
        self.cards.get(self.cursor)
    }

    /// Index after the cursor, wrapped to the front past the end.
    pub fn next_index(&self) -> usize {
        if self.cards.is_empty() || self.cursor + 1 >= self.cards.len() {
            0
        } else {
            self.cursor + 1
        }
    }

    pub fn at(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn is_last(&self) -> bool {
        self.cursor + 1 >= self.cards.len()
    }

    pub fn set_cursor(&mut self, index: usize) {
        if index < self.cards.len() {
            self.cursor = index;
        }
    }

    pub fn replace(&mut self, cards: Vec<Card>) {
        self.cards = cards;
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CardMode, CardType, Category, Intensity, SpecialEffect};

    fn card(id: &str, category: Category, intensity: Intensity) -> Card {
        Card::new(id, id, CardType::Question, CardMode::Binary)
            .with_category(category)
            .with_intensity(intensity)
    }

    fn catalog() -> CardCatalog {
        CardCatalog::new(vec![
            card("a", Category::Fun, Intensity::Soft),
            card("b", Category::Fun, Intensity::Spicy),
            card("c", Category::Romantic, Intensity::Medium),
            card("d", Category::Spicy, Intensity::Spicy).with_effect(SpecialEffect::Bomb),
        ])
    }

    #[test]
    fn fallback_ignores_category_and_intensity() {
        let config = GameConfig {
            categories: [Category::General].into_iter().collect(),
            intensity: Intensity::Soft,
            ..GameConfig::default()
        };
        let mut ids: Vec<String> = deck_candidates(&catalog(), &config, 1)
            .into_iter()
            .map(|card| card.id)
            .collect();
        ids.sort();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn replenish_excludes_used_then_resets() {
        let pool = catalog().builtin().to_vec();
        let mut rng = RngState::from_seed(3);
        let mut used: HashSet<String> = ["a", "b"].iter().map(|id| id.to_string()).collect();
        let deck = replenish(&pool, &mut used, &mut rng);
        assert_eq!(deck.len(), 2);
        assert!(deck.iter().all(|card| card.id == "c" || card.id == "d"));
        assert_eq!(used.len(), 2);

        used.extend(["c", "d"].iter().map(|id| id.to_string()));
        let deck = replenish(&pool, &mut used, &mut rng);
        assert_eq!(deck.len(), 4);
        assert!(used.is_empty());
    }

    #[test]
    fn next_index_wraps() {
        let mut deck = ActiveDeck::new(catalog().builtin().to_vec());
        assert_eq!(deck.next_index(), 1);
        deck.set_cursor(3);
        assert!(deck.is_last());
        assert_eq!(deck.next_index(), 0);
        deck.set_cursor(9);
        assert_eq!(deck.cursor(), 3);
    }
}
