use super::*;
use crate::*;
use tracing::{debug, info, warn};

impl GameSession {
    /// Moves play to the next turn. Interceptions are checked in a fixed
    /// order and at most one fires: minigame-only mode, a roulette card, a
    /// minigame card, the arcade roll. Roulette mode and plain rotation come
    /// last and fall through to deck continuation.
    pub(crate) fn advance_turn(&mut self, events: &mut EventBus) {
        self.turn.phase = Phase::AdvancingTurn;
        self.timers.cancel(TimerPurpose::TurnCountdown);
        let minigame_only = self.config.modes.minigame_only();

        if !minigame_only {
            if let Some(card) = self.turn.deck.current() {
                self.turn.used.insert(card.id.clone());
            }
        }

        let next_card = self.turn.deck.next_index();
        let exhausted = self.turn.deck.is_last();
        let next_player = if self.turn.skip_next {
            self.turn.skip_next = false;
            self.turn.seat_after(2)
        } else {
            self.turn.seat_after(1)
        };

        if minigame_only {
            self.turn.current = next_player;
            let kind = MinigameKind::random(&mut self.rng);
            self.launch_minigame(kind, LaunchReason::MinigameOnly, events);
            return;
        }

        let (candidate_id, effect) = match self.turn.deck.at(next_card) {
            Some(card) => (Some(card.id.clone()), card.special_effect),
            None => (None, None),
        };
        let already_fired = candidate_id.is_some() && candidate_id == self.turn.intercepted;
        if !already_fired {
            match effect {
                Some(SpecialEffect::Roulette) => {
                    debug!(card = ?candidate_id, "roulette card intercepts turn");
                    self.turn.intercepted = candidate_id;
                    self.arm_roulette(events);
                    return;
                }
                Some(SpecialEffect::Minigame(kind)) => {
                    debug!(card = ?candidate_id, game = kind.key(), "minigame card intercepts turn");
                    self.turn.intercepted = candidate_id;
                    self.launch_minigame(kind, LaunchReason::CardEffect, events);
                    return;
                }
                _ => {}
            }
        }
        self.turn.intercepted = None;

        if self.config.modes.arcade() && effect.is_none() {
            let roll = self.rng.roll();
            if let Some(kind) = self.rules.arcade_pick(roll) {
                debug!(roll, game = kind.key(), "arcade roll intercepts turn");
                self.launch_minigame(kind, LaunchReason::Arcade, events);
                return;
            }
        }

        let roulette = self.config.modes.roulette();
        if !roulette {
            self.turn.current = next_player;
        }

        if exhausted {
            self.refill_deck(events);
        } else {
            self.turn.deck.set_cursor(next_card);
        }

        self.turn.double_points.settle();

        if roulette {
            self.arm_roulette(events);
        } else {
            self.show_current_card(events);
        }
    }

    fn refill_deck(&mut self, events: &mut EventBus) {
        if self.turn.round < SPECIAL_EFFECT_ROUND {
            self.turn.round = SPECIAL_EFFECT_ROUND;
            info!(round = self.turn.round, "deck exhausted; special cards unlocked");
            events.push(Event::RoundAdvanced {
                round: self.turn.round,
            });
        }
        let candidates = deck_candidates(&self.catalog, &self.config, self.turn.round);
        let cards = replenish(&candidates, &mut self.turn.used, &mut self.rng);
        debug!(size = cards.len(), used = self.turn.used.len(), "deck replenished");
        events.push(Event::DeckReplenished { size: cards.len() });
        self.turn.deck.replace(cards);
    }

    pub(crate) fn show_current_card(&mut self, events: &mut EventBus) {
        let Some(card) = self.turn.deck.current().cloned() else {
            warn!("no card available; falling back to a minigame");
            let kind = MinigameKind::random(&mut self.rng);
            self.launch_minigame(kind, LaunchReason::MinigameOnly, events);
            return;
        };
        let player = self.turn.current_player().unwrap_or_default().to_string();
        let other = if card.renders_player() {
            let others: Vec<&String> = self
                .turn
                .players
                .iter()
                .filter(|name| **name != player)
                .collect();
            self.rng.pick(&others).map(|name| name.to_string())
        } else {
            None
        };
        let text = card.render(other.as_deref());
        self.turn.rendered = Some(text.clone());
        self.turn.phase = Phase::AwaitingChoice;
        if let Some(seconds) = self.rules.turn_seconds {
            self.timers
                .start(TimerPurpose::TurnCountdown, u64::from(seconds) * 1_000);
        }
        events.push(Event::CardShown {
            card_id: card.id,
            player,
            text,
        });
    }

    pub(crate) fn launch_minigame(
        &mut self,
        kind: MinigameKind,
        reason: LaunchReason,
        events: &mut EventBus,
    ) {
        self.next_ticket = self.next_ticket.wrapping_add(1);
        let ticket = MinigameTicket {
            id: self.next_ticket,
            kind,
        };
        self.turn.rendered = None;
        self.turn.phase = Phase::AwaitingMinigameResult(ticket);
        let player = self.turn.current_player().unwrap_or_default().to_string();
        debug!(game = kind.key(), ?reason, %player, "minigame launched");
        events.push(Event::MinigameLaunched {
            kind,
            player,
            reason,
        });
    }

    fn arm_roulette(&mut self, events: &mut EventBus) {
        let token = self.timers.start(TimerPurpose::RouletteSpin, ROULETTE_SPIN_MS);
        self.turn.phase = Phase::AwaitingRoulette(token);
        events.push(Event::RouletteArmed);
    }

    /// Called when the spin animation stops. The acting player is drawn from
    /// the roster as it stands now. The card under the cursor is shown to
    /// them, including after a roulette card intercepted the turn.
    pub fn settle_roulette(&mut self, token: TimerToken, events: &mut EventBus) -> bool {
        if self.turn.phase != Phase::AwaitingRoulette(token) || !self.timers.fire(token) {
            return false;
        }
        let Some(idx) = self.rng.pick_index(self.turn.players.len()) else {
            return false;
        };
        self.turn.current = idx;
        let player = self.turn.players[idx].clone();
        debug!(%player, "roulette landed");
        events.push(Event::RouletteLanded { player });
        self.show_current_card(events);
        true
    }

    /// Turn countdown expiry. Stale tokens and resolved cards are ignored.
    pub fn turn_timed_out(&mut self, token: TimerToken, events: &mut EventBus) -> bool {
        if self.turn.phase != Phase::AwaitingChoice || !self.timers.fire(token) {
            return false;
        }
        let player = self.turn.current_player().unwrap_or_default().to_string();
        events.push(Event::TurnTimedOut {
            player: player.clone(),
        });
        self.prompt_drink(player, TIME_UP_MESSAGE.to_string(), events);
        true
    }

    pub(crate) fn prompt_drink(&mut self, player: String, message: String, events: &mut EventBus) {
        events.push(Event::DrinkPrompted {
            player: player.clone(),
            message: message.clone(),
        });
        self.turn.phase = Phase::AwaitingDrink(DrinkPrompt { player, message });
    }

    /// Acknowledging the drink prompt advances the turn; repeats are no-ops.
    pub fn acknowledge_drink(&mut self, events: &mut EventBus) -> bool {
        if !matches!(self.turn.phase, Phase::AwaitingDrink(_)) {
            return false;
        }
        self.advance_turn(events);
        true
    }
}
