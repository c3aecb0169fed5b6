use anyhow::{bail, Context};
use hotseat_core::{Card, CardCatalog, RulesConfig, CUSTOM_ID_PREFIX};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

pub const CARDS_FILE: &str = "cards.json";
pub const RULES_FILE: &str = "rules.json";

pub fn load_cards(dir: &Path) -> anyhow::Result<Vec<Card>> {
    let cards: Vec<Card> = load_json(dir.join(CARDS_FILE))?;
    validate_cards(&cards)?;
    debug!(count = cards.len(), "loaded built-in cards");
    Ok(cards)
}

/// Built-in cards from `dir` merged with previously saved custom cards.
pub fn load_catalog(dir: &Path, custom: Vec<Card>) -> anyhow::Result<CardCatalog> {
    let builtin = load_cards(dir)?;
    Ok(CardCatalog::new(builtin).with_custom(custom))
}

/// `rules.json` is optional; a missing file means every default applies.
pub fn load_rules(dir: &Path) -> anyhow::Result<RulesConfig> {
    let path = dir.join(RULES_FILE);
    if !path.exists() {
        info!(path = %path.display(), "no rules file; using defaults");
        return Ok(RulesConfig::default());
    }
    load_json(path)
}

fn validate_cards(cards: &[Card]) -> anyhow::Result<()> {
    let mut seen = HashSet::new();
    for card in cards {
        if card.id.trim().is_empty() {
            bail!("card with empty id: {:?}", card.text);
        }
        if card.id.starts_with(CUSTOM_ID_PREFIX) {
            bail!("built-in card id {} uses the custom prefix", card.id);
        }
        if !seen.insert(card.id.as_str()) {
            bail!("duplicate card id {}", card.id);
        }
    }
    Ok(())
}

pub(crate) fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}
