use crate::{ActiveDeck, MinigameTicket, SpecialAction, TimerToken};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

impl Direction {
    pub fn step(self) -> i64 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }
}

/// Doubling applies to one scoring event. `Spent` marks that it was used on
/// the card being resolved and is cleared when the turn advances.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DoublePoints {
    #[default]
    Off,
    Armed,
    Spent,
}

impl DoublePoints {
    pub fn is_armed(self) -> bool {
        self == Self::Armed
    }

    pub fn arm(&mut self) {
        *self = Self::Armed;
    }

    pub fn consume(&mut self) -> bool {
        if *self == Self::Armed {
            *self = Self::Spent;
            return true;
        }
        false
    }

    pub fn settle(&mut self) {
        if *self == Self::Spent {
            *self = Self::Off;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrinkPrompt {
    pub player: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Setup,
    AwaitingChoice,
    AwaitingSpecialTarget(SpecialAction),
    AwaitingMinigameResult(MinigameTicket),
    AwaitingDrink(DrinkPrompt),
    AwaitingRoulette(TimerToken),
    AdvancingTurn,
    Victory,
}

#[derive(Debug, Clone)]
pub struct TurnState {
    pub players: Vec<String>,
    pub current: usize,
    pub direction: Direction,
    pub round: u32,
    pub deck: ActiveDeck,
    pub used: HashSet<String>,
    pub double_points: DoublePoints,
    pub skip_next: bool,
    pub pending_action: Option<SpecialAction>,
    /// Drink prompt held back by a victory, shown on continue.
    pub pending_drink: Option<DrinkPrompt>,
    /// Text of the current card with `{player}` filled in.
    pub rendered: Option<String>,
    /// Card whose roulette/minigame tag already fired once.
    pub intercepted: Option<String>,
    pub phase: Phase,
}

impl TurnState {
    pub fn new(players: Vec<String>) -> Self {
        Self {
            players,
            current: 0,
            direction: Direction::Forward,
            round: 1,
            deck: ActiveDeck::default(),
            used: HashSet::new(),
            double_points: DoublePoints::Off,
            skip_next: false,
            pending_action: None,
            pending_drink: None,
            rendered: None,
            intercepted: None,
            phase: Phase::Setup,
        }
    }

    pub fn current_player(&self) -> Option<&str> {
        self.players.get(self.current).map(String::as_str)
    }

    /// Index `steps` seats away in the current direction.
    pub fn seat_after(&self, steps: i64) -> usize {
        let len = self.players.len() as i64;
        if len == 0 {
            return 0;
        }
        (self.current as i64 + self.direction.step() * steps).rem_euclid(len) as usize
    }

    pub fn is_running(&self) -> bool {
        self.phase != Phase::Setup
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seats_wrap_both_ways() {
        let mut turn = TurnState::new(vec!["A".into(), "B".into(), "C".into()]);
        assert_eq!(turn.seat_after(1), 1);
        assert_eq!(turn.seat_after(2), 2);
        turn.direction = turn.direction.flipped();
        assert_eq!(turn.seat_after(1), 2);
        assert_eq!(turn.seat_after(2), 1);
    }

    #[test]
    fn double_points_single_use() {
        let mut flag = DoublePoints::default();
        assert!(!flag.consume());
        flag.arm();
        assert!(flag.consume());
        assert!(!flag.consume());
        flag.settle();
        assert_eq!(flag, DoublePoints::Off);
        flag.arm();
        flag.settle();
        assert!(flag.is_armed());
    }
}
