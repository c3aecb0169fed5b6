use super::*;
use crate::*;
use tracing::{debug, warn};

impl GameSession {
    pub fn resolve_binary_choice(
        &mut self,
        choice: Choice,
        events: &mut EventBus,
    ) -> Result<(), SessionError> {
        let card = self.card_awaiting_choice()?;
        if card.mode != CardMode::Binary {
            return Err(SessionError::WrongCardMode(card.mode));
        }
        self.timers.cancel(TimerPurpose::TurnCountdown);
        let points = self.card_points(&card);
        // Question cards reward the honest "I haven't".
        let delta = if card.kind == CardType::Question && choice == Choice::Yes {
            -points
        } else {
            points
        };
        let player = self.acting_player();
        self.award(&player, delta, events);
        self.finish_card(&card, choice.trigger(), events);
        Ok(())
    }

    pub fn resolve_statement_or_rule(&mut self, events: &mut EventBus) -> Result<(), SessionError> {
        let card = self.card_awaiting_choice()?;
        if card.mode == CardMode::Binary {
            return Err(SessionError::WrongCardMode(card.mode));
        }
        self.timers.cancel(TimerPurpose::TurnCountdown);
        let points = self.card_points(&card);
        let player = self.acting_player();
        self.award(&player, points, events);
        self.finish_card(&card, DrinkTrigger::Always, events);
        Ok(())
    }

    /// Applies a pending steal or gift. An unknown or self target leaves the
    /// session waiting and returns `Ok(false)`.
    pub fn resolve_special_target(
        &mut self,
        target: &str,
        events: &mut EventBus,
    ) -> Result<bool, SessionError> {
        let action = match self.turn.phase {
            Phase::AwaitingSpecialTarget(action) => action,
            Phase::Setup => return Err(SessionError::NoGameRunning),
            ref other => return Err(SessionError::InvalidPhase(other.clone())),
        };
        let actor = self.acting_player();
        let deltas = resolve_target(action, &actor, target, &self.turn.players, &self.rules);
        if deltas.is_empty() {
            warn!(%actor, target, ?action, "ignoring invalid special target");
            return Ok(false);
        }
        self.turn.pending_action = None;
        self.apply_deltas(deltas, events);
        if self.turn.phase != Phase::Victory {
            self.resume_turn(events);
        }
        Ok(true)
    }

    fn card_awaiting_choice(&self) -> Result<Card, SessionError> {
        self.expect_phase(&Phase::AwaitingChoice)?;
        self.turn
            .deck
            .current()
            .cloned()
            .ok_or(SessionError::NoCurrentCard)
    }

    pub(crate) fn acting_player(&self) -> String {
        self.turn.current_player().unwrap_or_default().to_string()
    }

    fn card_points(&mut self, card: &Card) -> i64 {
        if self.turn.double_points.consume() {
            debug!(card = %card.id, "double points consumed");
            card.points.saturating_mul(2)
        } else {
            card.points
        }
    }

    /// Effect, then drink prompt, then advance; any step may park the turn.
    /// A victory only pauses the follow-up steps until play continues.
    fn finish_card(&mut self, card: &Card, chosen: DrinkTrigger, events: &mut EventBus) {
        let player = self.acting_player();
        if let Some(effect) = card.special_effect {
            let deltas = resolve_effect(
                effect,
                EffectContext {
                    current: &player,
                    players: &self.turn.players,
                    scores: &self.scores,
                    rules: &self.rules,
                },
            );
            events.push(Event::EffectApplied {
                effect,
                player: player.clone(),
            });
            self.apply_deltas(deltas, events);
        }
        // Steal and gift advance straight after the target is picked.
        let targeted = card.special_effect.map_or(false, SpecialEffect::needs_target);
        if !targeted && card.drink_trigger == Some(chosen) {
            let message = card
                .drink_action
                .clone()
                .unwrap_or_else(|| DEFAULT_DRINK_MESSAGE.to_string());
            self.turn.pending_drink = Some(DrinkPrompt { player, message });
        }
        if self.turn.phase == Phase::Victory {
            return;
        }
        self.resume_turn(events);
    }

    /// Runs whatever the resolved card still owes: a target pick, then a
    /// drink prompt, then the advance.
    pub(crate) fn resume_turn(&mut self, events: &mut EventBus) {
        if let Some(action) = self.turn.pending_action {
            self.turn.phase = Phase::AwaitingSpecialTarget(action);
            events.push(Event::TargetRequested {
                action,
                player: self.acting_player(),
            });
            return;
        }
        if let Some(prompt) = self.turn.pending_drink.take() {
            self.prompt_drink(prompt.player, prompt.message, events);
            return;
        }
        self.advance_turn(events);
    }

    pub(crate) fn award(&mut self, player: &str, delta: i64, events: &mut EventBus) {
        if !self.scores.contains(player) {
            return;
        }
        let victory = self.scores.add_points(player, delta);
        events.push(Event::PointsChanged {
            player: player.to_string(),
            delta,
            total: self.scores.score(player),
        });
        if let Some(victory) = victory {
            self.timers.cancel_all();
            self.turn.phase = Phase::Victory;
            events.push(Event::Victory {
                player: victory.player,
                score: victory.score,
                target: victory.target,
            });
        }
    }

    pub(crate) fn apply_deltas(&mut self, deltas: Vec<EffectDelta>, events: &mut EventBus) {
        for delta in deltas {
            match delta {
                EffectDelta::ArmDoublePoints => self.turn.double_points.arm(),
                EffectDelta::FlipDirection => {
                    self.turn.direction = self.turn.direction.flipped();
                    events.push(Event::DirectionReversed {
                        direction: self.turn.direction.step() as i8,
                    });
                }
                EffectDelta::ArmSkip => self.turn.skip_next = true,
                EffectDelta::AwaitTarget(action) => self.turn.pending_action = Some(action),
                EffectDelta::AddPoints { player, delta } => self.award(&player, delta, events),
                EffectDelta::AdjustUnclamped { player, delta } => {
                    if let Some(total) = self.scores.adjust_unclamped(&player, delta) {
                        events.push(Event::PointsChanged {
                            player,
                            delta,
                            total,
                        });
                    }
                }
            }
        }
    }
}
