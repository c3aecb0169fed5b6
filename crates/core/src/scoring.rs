use std::collections::HashMap;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Victory {
    pub player: String,
    pub score: i64,
    pub target: i64,
}

#[derive(Debug, Clone)]
pub struct ScoreBoard {
    scores: HashMap<String, i64>,
    target: i64,
    step: i64,
    winner: Option<String>,
}

impl ScoreBoard {
    pub fn new(target: i64, step: i64) -> Self {
        Self {
            scores: HashMap::new(),
            target,
            step,
            winner: None,
        }
    }

    pub fn reset<'a, I>(&mut self, players: I, target: i64)
    where
        I: IntoIterator<Item = &'a String>,
    {
        self.scores = players.into_iter().map(|name| (name.clone(), 0)).collect();
        self.target = target;
        self.winner = None;
    }

    pub fn score(&self, player: &str) -> i64 {
        self.scores.get(player).copied().unwrap_or(0)
    }

    pub fn contains(&self, player: &str) -> bool {
        self.scores.contains_key(player)
    }

    pub fn target(&self) -> i64 {
        self.target
    }

    pub fn winner(&self) -> Option<&str> {
        self.winner.as_deref()
    }

    pub fn insert_player(&mut self, player: &str) {
        self.scores.entry(player.to_string()).or_insert(0);
    }

    pub fn remove_player(&mut self, player: &str) {
        self.scores.remove(player);
    }

    /// The single clamped entrypoint: scores never drop below zero through
    /// here, and the first player to reach the target wins the round.
    pub fn add_points(&mut self, player: &str, delta: i64) -> Option<Victory> {
        let entry = self.scores.get_mut(player)?;
        let next = entry.saturating_add(delta).max(0);
        *entry = next;
        if next >= self.target && self.winner.is_none() {
            self.winner = Some(player.to_string());
            info!(player, score = next, target = self.target, "victory");
            return Some(Victory {
                player: player.to_string(),
                score: next,
                target: self.target,
            });
        }
        None
    }

    /// Raw adjustment used by steal and bomb; may go negative and never
    /// decides a winner.
    pub fn adjust_unclamped(&mut self, player: &str, delta: i64) -> Option<i64> {
        let entry = self.scores.get_mut(player)?;
        *entry = entry.saturating_add(delta);
        Some(*entry)
    }

    pub fn continue_after_victory(&mut self) -> i64 {
        self.target = self.target.saturating_add(self.step);
        self.winner = None;
        self.target
    }

    /// Highest score among everyone except `exclude`; ties keep the first
    /// player in `order`.
    pub fn leader_excluding<'a>(&self, order: &'a [String], exclude: &str) -> Option<(&'a str, i64)> {
        let mut best: Option<(&'a str, i64)> = None;
        for name in order.iter().filter(|name| name.as_str() != exclude) {
            let score = self.score(name);
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((name.as_str(), score));
            }
        }
        best
    }

    pub fn standings(&self, order: &[String]) -> Vec<(String, i64)> {
        let mut rows: Vec<(String, i64)> = order
            .iter()
            .map(|name| (name.clone(), self.score(name)))
            .collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1));
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(names: &[&str]) -> ScoreBoard {
        let players: Vec<String> = names.iter().map(|name| name.to_string()).collect();
        let mut board = ScoreBoard::new(30, 30);
        board.reset(&players, 30);
        board
    }

    #[test]
    fn add_points_floors_at_zero() {
        let mut board = board(&["A"]);
        board.add_points("A", 4);
        board.add_points("A", -10);
        assert_eq!(board.score("A"), 0);
        assert!(board.add_points("Nobody", 5).is_none());
    }

    #[test]
    fn unclamped_path_goes_negative() {
        let mut board = board(&["A"]);
        board.add_points("A", 3);
        assert_eq!(board.adjust_unclamped("A", -10), Some(-7));
    }

    #[test]
    fn first_winner_sticks() {
        let mut board = board(&["A", "B"]);
        board.add_points("A", 28);
        board.add_points("B", 29);
        let victory = board.add_points("A", 2).expect("victory");
        assert_eq!(victory.player, "A");
        assert!(board.add_points("B", 5).is_none());
        assert_eq!(board.winner(), Some("A"));
        assert_eq!(board.continue_after_victory(), 60);
        assert_eq!(board.winner(), None);
        assert_eq!(board.score("B"), 34);
    }

    #[test]
    fn leader_excludes_current_and_prefers_first_on_ties() {
        let order: Vec<String> = ["A", "B", "C"].iter().map(|s| s.to_string()).collect();
        let mut board = board(&["A", "B", "C"]);
        board.add_points("A", 50);
        board.add_points("B", 7);
        board.add_points("C", 7);
        assert_eq!(board.leader_excluding(&order, "A"), Some(("B", 7)));
    }
}
