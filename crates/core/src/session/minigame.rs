use super::*;
use crate::*;
use tracing::{debug, warn};

impl GameSession {
    /// Completion handshake for a running minigame. Only the report carrying
    /// the live ticket is applied; anything else returns `false` untouched.
    pub fn complete_minigame(
        &mut self,
        ticket: MinigameTicket,
        report: MinigameReport,
        events: &mut EventBus,
    ) -> bool {
        if self.turn.phase != Phase::AwaitingMinigameResult(ticket) {
            debug!(ticket = ticket.id, "ignoring stale minigame completion");
            return false;
        }
        if !report.outcome.fits(ticket.kind) {
            warn!(
                ticket = ticket.id,
                game = ticket.kind.key(),
                outcome = ?report.outcome,
                "rejecting minigame report of the wrong shape"
            );
            return false;
        }
        let player = self.acting_player();
        let won = match report.outcome {
            MinigameOutcome::Wheel(_) => None,
            outcome => Some(!outcome.is_failure()),
        };
        events.push(Event::MinigameResolved {
            kind: ticket.kind,
            player: player.clone(),
            won,
        });
        if let Some(score) = report.score {
            events.push(Event::MinigameScored {
                kind: ticket.kind,
                player: player.clone(),
                score,
            });
        }
        // Leave the awaiting phase before anything else so a re-entrant
        // completion cannot match again.
        self.turn.phase = Phase::AdvancingTurn;
        match report.outcome {
            MinigameOutcome::Won => self.advance_turn(events),
            MinigameOutcome::Lost => {
                self.prompt_drink(player, ticket.kind.failure_message().to_string(), events)
            }
            MinigameOutcome::Wheel(result) => self.apply_wheel(&player, result, events),
        }
        true
    }

    fn apply_wheel(&mut self, player: &str, result: WheelResult, events: &mut EventBus) {
        events.push(Event::WheelLanded {
            player: player.to_string(),
            result,
        });
        let deltas = resolve_wheel(
            result,
            EffectContext {
                current: player,
                players: &self.turn.players,
                scores: &self.scores,
                rules: &self.rules,
            },
        );
        self.apply_deltas(deltas, events);
        if self.turn.phase != Phase::Victory {
            self.advance_turn(events);
        }
    }

    /// Spins the configured wheel table with the session's rng.
    pub fn spin_wheel(&mut self) -> WheelResult {
        spin_wheel(&self.rules.wheel_segments, &mut self.rng)
    }
}
