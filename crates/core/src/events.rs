use crate::{MinigameKind, SpecialAction, SpecialEffect, WheelResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LaunchReason {
    MinigameOnly,
    CardEffect,
    Arcade,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    GameStarted {
        players: usize,
        deck: usize,
        target: i64,
    },
    CardShown {
        card_id: String,
        player: String,
        text: String,
    },
    PointsChanged {
        player: String,
        delta: i64,
        total: i64,
    },
    EffectApplied {
        effect: SpecialEffect,
        player: String,
    },
    DirectionReversed { direction: i8 },
    TargetRequested { action: SpecialAction, player: String },
    DrinkPrompted { player: String, message: String },
    MinigameLaunched {
        kind: MinigameKind,
        player: String,
        reason: LaunchReason,
    },
    MinigameResolved {
        kind: MinigameKind,
        player: String,
        won: Option<bool>,
    },
    MinigameScored {
        kind: MinigameKind,
        player: String,
        score: i64,
    },
    WheelLanded { player: String, result: WheelResult },
    RouletteArmed,
    RouletteLanded { player: String },
    TurnTimedOut { player: String },
    RoundAdvanced { round: u32 },
    DeckReplenished { size: usize },
    Victory { player: String, score: i64, target: i64 },
    TargetRaised { target: i64 },
    GameEnded,
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
