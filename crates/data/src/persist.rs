use hotseat_core::{
    insert_ranked, Card, HighScoreEntry, HighScoreStore, KeyValueStore, RankOrder, StoreError,
    CUSTOM_CARDS_KEY, CUSTOM_ID_PREFIX, HIGH_SCORES_PREFIX, PLAYERS_KEY,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use time::OffsetDateTime;
use tracing::warn;

/// Saved roster, custom cards and high-score tables on top of any key-value
/// backend. Reads never fail: unreadable data comes back empty.
#[derive(Debug, Clone)]
pub struct Profile<S> {
    store: S,
    high_score_capacity: usize,
}

impl<S: KeyValueStore> Profile<S> {
    pub fn new(store: S, high_score_capacity: usize) -> Self {
        Self {
            store,
            high_score_capacity,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn players(&self) -> Vec<String> {
        self.read_list(PLAYERS_KEY)
    }

    pub fn save_players(&mut self, players: &[String]) -> Result<(), StoreError> {
        self.write_list(PLAYERS_KEY, players)
    }

    /// Only cards carrying the custom id prefix survive a reload.
    pub fn custom_cards(&self) -> Vec<Card> {
        let mut cards: Vec<Card> = self.read_list(CUSTOM_CARDS_KEY);
        cards.retain(|card| card.id.starts_with(CUSTOM_ID_PREFIX));
        cards
    }

    pub fn save_custom_cards(&mut self, cards: &[Card]) -> Result<(), StoreError> {
        self.write_list(CUSTOM_CARDS_KEY, cards)
    }

    fn read_list<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        self.try_read_list(key).unwrap_or_else(|err| {
            warn!(key, error = %err, "failed to read saved data");
            Vec::new()
        })
    }

    fn try_read_list<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, StoreError> {
        match self.store.get(key)? {
            Some(body) => {
                serde_json::from_str(&body).map_err(|err| StoreError::Serialize(err.to_string()))
            }
            None => Ok(Vec::new()),
        }
    }

    fn write_list<T: Serialize>(&mut self, key: &str, list: &[T]) -> Result<(), StoreError> {
        let body =
            serde_json::to_string(list).map_err(|err| StoreError::Serialize(err.to_string()))?;
        self.store.set(key, &body)
    }
}

impl<S: KeyValueStore> HighScoreStore for Profile<S> {
    fn get(&self, game_id: &str) -> Vec<HighScoreEntry> {
        self.read_list(&high_score_key(game_id))
    }

    fn put(&mut self, game_id: &str, entry: HighScoreEntry, order: RankOrder) -> bool {
        let key = high_score_key(game_id);
        // An unreadable table is never overwritten.
        let mut list = match self.try_read_list(&key) {
            Ok(list) => list,
            Err(err) => {
                warn!(game_id, error = %err, "skipping high score; saved table unreadable");
                return false;
            }
        };
        if !insert_ranked(&mut list, entry, order, self.high_score_capacity) {
            return false;
        }
        match self.write_list(&key, &list) {
            Ok(()) => true,
            Err(err) => {
                warn!(game_id, error = %err, "failed to save high scores");
                false
            }
        }
    }
}

pub fn high_score_key(game_id: &str) -> String {
    format!("{HIGH_SCORES_PREFIX}{game_id}")
}

/// A high-score row stamped with today's UTC date.
pub fn high_score_entry(player: &str, score: i64) -> HighScoreEntry {
    HighScoreEntry {
        player_name: player.to_string(),
        score,
        date: OffsetDateTime::now_utc().date().to_string(),
    }
}
