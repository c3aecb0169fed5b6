use crate::RankOrder;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

pub const PLAYERS_KEY: &str = "players";
pub const CUSTOM_CARDS_KEY: &str = "custom_cards";
pub const HIGH_SCORES_PREFIX: &str = "highscores_";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(String),
    #[error("serialize error: {0}")]
    Serialize(String),
}

/// Key → JSON array persistence. Last write wins.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HighScoreEntry {
    #[serde(rename = "playerName", alias = "player_name")]
    pub player_name: String,
    pub score: i64,
    pub date: String,
}

pub trait HighScoreStore {
    fn get(&self, game_id: &str) -> Vec<HighScoreEntry>;
    /// True when the entry made it into the retained top-N.
    fn put(&mut self, game_id: &str, entry: HighScoreEntry, order: RankOrder) -> bool;
}

/// Inserts `entry`, re-sorts, keeps `capacity` entries. Ties keep the older
/// entry ahead.
pub fn insert_ranked(
    list: &mut Vec<HighScoreEntry>,
    entry: HighScoreEntry,
    order: RankOrder,
    capacity: usize,
) -> bool {
    list.push(entry.clone());
    match order {
        RankOrder::Ascending => list.sort_by(|a, b| a.score.cmp(&b.score)),
        RankOrder::Descending => list.sort_by(|a, b| b.score.cmp(&a.score)),
    }
    // Stable sort leaves the new entry behind any equal score already held.
    let kept = list
        .iter()
        .rposition(|held| *held == entry)
        .map_or(false, |pos| pos < capacity);
    list.truncate(capacity);
    kept
}

#[derive(Debug, Clone)]
pub struct MemoryHighScores {
    capacity: usize,
    tables: HashMap<String, Vec<HighScoreEntry>>,
}

impl MemoryHighScores {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            tables: HashMap::new(),
        }
    }
}

impl HighScoreStore for MemoryHighScores {
    fn get(&self, game_id: &str) -> Vec<HighScoreEntry> {
        self.tables.get(game_id).cloned().unwrap_or_default()
    }

    fn put(&mut self, game_id: &str, entry: HighScoreEntry, order: RankOrder) -> bool {
        let list = self.tables.entry(game_id.to_string()).or_default();
        insert_ranked(list, entry, order, self.capacity)
    }
}
