use crate::{Card, GameConfig};
use std::collections::HashSet;

pub const CUSTOM_ID_PREFIX: &str = "custom-";

/// Rounds before this one never see special-effect cards.
pub const SPECIAL_EFFECT_ROUND: u32 = 2;

#[derive(Debug, Clone, Default)]
pub struct CardCatalog {
    builtin: Vec<Card>,
    custom: Vec<Card>,
}

impl CardCatalog {
    pub fn new(builtin: Vec<Card>) -> Self {
        Self {
            builtin,
            custom: Vec::new(),
        }
    }

    pub fn with_custom(mut self, custom: Vec<Card>) -> Self {
        for card in custom {
            self.add_custom(card);
        }
        self
    }

    pub fn builtin(&self) -> &[Card] {
        &self.builtin
    }

    pub fn custom(&self) -> &[Card] {
        &self.custom
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> + '_ {
        self.builtin.iter().chain(self.custom.iter())
    }

    pub fn len(&self) -> usize {
        self.builtin.len() + self.custom.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: &str) -> Option<&Card> {
        self.iter().find(|card| card.id == id)
    }

    /// Custom cards are re-keyed under the custom prefix so they can never
    /// shadow a built-in id. Returns the id the card was stored under.
    pub fn add_custom(&mut self, mut card: Card) -> String {
        let taken: HashSet<&str> = self.iter().map(|card| card.id.as_str()).collect();
        if !card.id.starts_with(CUSTOM_ID_PREFIX) || taken.contains(card.id.as_str()) {
            let mut n = self.custom.len() + 1;
            loop {
                let candidate = format!("{CUSTOM_ID_PREFIX}{n}");
                if !taken.contains(candidate.as_str()) {
                    card.id = candidate;
                    break;
                }
                n += 1;
            }
        }
        let id = card.id.clone();
        self.custom.push(card);
        id
    }

    pub fn remove_custom(&mut self, id: &str) -> Option<Card> {
        let idx = self.custom.iter().position(|card| card.id == id)?;
        Some(self.custom.remove(idx))
    }
}

pub fn card_eligible(card: &Card, config: &GameConfig, round: u32) -> bool {
    if !config.categories.contains(&card.category) {
        return false;
    }
    if card.intensity.level() > config.intensity.level() {
        return false;
    }
    round >= SPECIAL_EFFECT_ROUND || !card.has_effect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CardMode, CardType, Category, Intensity, SpecialEffect};

    fn card(id: &str) -> Card {
        Card::new(id, id, CardType::Rule, CardMode::Rule)
    }

    #[test]
    fn custom_cards_are_rekeyed() {
        let mut catalog = CardCatalog::new(vec![card("q1"), card("custom-1")]);
        let id = catalog.add_custom(card("q1"));
        assert_eq!(id, "custom-2");
        let id = catalog.add_custom(card("custom-9"));
        assert_eq!(id, "custom-9");
        assert_eq!(catalog.len(), 4);
        assert!(catalog.remove_custom("custom-2").is_some());
        assert!(catalog.remove_custom("q1").is_none());
    }

    #[test]
    fn eligibility_checks_category_intensity_and_round() {
        let config = GameConfig {
            categories: [Category::Fun].into_iter().collect(),
            intensity: Intensity::Medium,
            ..GameConfig::default()
        };
        let fun = card("a").with_category(Category::Fun);
        assert!(card_eligible(&fun, &config, 1));
        assert!(!card_eligible(&card("b"), &config, 1));
        let spicy = fun.clone().with_intensity(Intensity::Spicy);
        assert!(!card_eligible(&spicy, &config, 1));
        let special = fun.with_effect(SpecialEffect::Bomb);
        assert!(!card_eligible(&special, &config, 1));
        assert!(card_eligible(&special, &config, 2));
    }
}
