use crate::{
    Card, CardCatalog, CardMode, GameConfig, MinigameTicket, Phase, RngState, RulesConfig,
    ScoreBoard, TimerPurpose, TimerSlots, TimerToken, TurnState,
};
use thiserror::Error;

mod choice;
mod lifecycle;
mod minigame;
mod turn;


pub const MIN_PLAYERS: usize = 2;
pub const ROULETTE_SPIN_MS: u64 = 3_000;
pub const DEFAULT_DRINK_MESSAGE: &str = "Drink!";
pub const TIME_UP_MESSAGE: &str = "Time's up! Take a sip.";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("invalid phase: {0:?}")]
    InvalidPhase(Phase),
    #[error("no game running")]
    NoGameRunning,
    #[error("game already running")]
    GameRunning,
    #[error("need at least {needed} players, have {have}")]
    NotEnoughPlayers { needed: usize, have: usize },
    #[error("player name is empty")]
    EmptyName,
    #[error("player {0} already exists")]
    DuplicatePlayer(String),
    #[error("unknown player {0}")]
    UnknownPlayer(String),
    #[error("card does not accept this choice (mode {0:?})")]
    WrongCardMode(CardMode),
    #[error("card catalog is empty")]
    EmptyCatalog,
    #[error("no current card")]
    NoCurrentCard,
}

/// One game on one device: configuration, roster, turn state and scores.
#[derive(Debug)]
pub struct GameSession {
    pub config: GameConfig,
    pub rules: RulesConfig,
    pub catalog: CardCatalog,
    pub rng: RngState,
    turn: TurnState,
    scores: ScoreBoard,
    timers: TimerSlots,
    next_ticket: u64,
}

impl GameSession {
    pub fn new(catalog: CardCatalog, rules: RulesConfig, seed: u64) -> Self {
        Self::with_rng(catalog, rules, RngState::from_seed(seed))
    }

    pub fn with_rng(catalog: CardCatalog, rules: RulesConfig, rng: RngState) -> Self {
        let scores = ScoreBoard::new(rules.initial_target, rules.target_step);
        Self {
            config: GameConfig::default(),
            rules,
            catalog,
            rng,
            turn: TurnState::new(Vec::new()),
            scores,
            timers: TimerSlots::default(),
            next_ticket: 0,
        }
    }

    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    pub fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    pub fn phase(&self) -> &Phase {
        &self.turn.phase
    }

    pub fn players(&self) -> &[String] {
        &self.turn.players
    }

    pub fn current_player(&self) -> Option<&str> {
        self.turn.current_player()
    }

    pub fn current_card(&self) -> Option<&Card> {
        if self.config.modes.minigame_only() {
            return None;
        }
        self.turn.deck.current()
    }

    pub fn current_text(&self) -> Option<&str> {
        self.turn.rendered.as_deref()
    }

    pub fn score(&self, player: &str) -> i64 {
        self.scores.score(player)
    }

    pub fn standings(&self) -> Vec<(String, i64)> {
        self.scores.standings(&self.turn.players)
    }

    pub fn pending_minigame(&self) -> Option<MinigameTicket> {
        match self.turn.phase {
            Phase::AwaitingMinigameResult(ticket) => Some(ticket),
            _ => None,
        }
    }

    pub fn pending_roulette(&self) -> Option<TimerToken> {
        match self.turn.phase {
            Phase::AwaitingRoulette(token) => Some(token),
            _ => None,
        }
    }

    pub fn turn_timer(&self) -> Option<TimerToken> {
        self.timers.live(TimerPurpose::TurnCountdown)
    }

    /// Players a steal or gift may target: everyone but the actor.
    pub fn selectable_targets(&self) -> Vec<&str> {
        let current = self.turn.current_player();
        self.turn
            .players
            .iter()
            .map(String::as_str)
            .filter(|name| Some(*name) != current)
            .collect()
    }

    fn expect_phase(&self, expected: &Phase) -> Result<(), SessionError> {
        if self.turn.phase == Phase::Setup {
            return Err(SessionError::NoGameRunning);
        }
        if &self.turn.phase != expected {
            return Err(SessionError::InvalidPhase(self.turn.phase.clone()));
        }
        Ok(())
    }
}
