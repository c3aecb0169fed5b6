use super::*;
use crate::*;
use tracing::info;

impl GameSession {
    pub fn add_player(&mut self, name: &str) -> Result<(), SessionError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SessionError::EmptyName);
        }
        if self.turn.players.iter().any(|existing| existing == name) {
            return Err(SessionError::DuplicatePlayer(name.to_string()));
        }
        self.turn.players.push(name.to_string());
        if self.turn.is_running() {
            self.scores.insert_player(name);
        }
        Ok(())
    }

    /// Replaces the roster, skipping blanks and duplicates. Only allowed
    /// between games.
    pub fn set_players<I, S>(&mut self, names: I) -> Result<(), SessionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if self.turn.is_running() {
            return Err(SessionError::GameRunning);
        }
        self.turn.players.clear();
        for name in names {
            match self.add_player(name.as_ref()) {
                Ok(()) | Err(SessionError::EmptyName) | Err(SessionError::DuplicatePlayer(_)) => {}
                Err(err) => return Err(err),
            }
        }
        self.turn.current = 0;
        Ok(())
    }

    pub fn remove_player(&mut self, name: &str, events: &mut EventBus) -> Result<(), SessionError> {
        let idx = self
            .turn
            .players
            .iter()
            .position(|existing| existing == name)
            .ok_or_else(|| SessionError::UnknownPlayer(name.to_string()))?;
        self.turn.players.remove(idx);
        self.scores.remove_player(name);
        if idx < self.turn.current {
            self.turn.current -= 1;
        }
        if self.turn.current >= self.turn.players.len() {
            self.turn.current = 0;
        }
        if self.turn.is_running() && self.turn.players.len() < MIN_PLAYERS {
            info!("roster fell below minimum; ending game");
            self.end_game(events);
        }
        Ok(())
    }

    pub fn start_game(&mut self, events: &mut EventBus) -> Result<(), SessionError> {
        if self.turn.is_running() {
            return Err(SessionError::GameRunning);
        }
        let have = self.turn.players.len();
        if have < MIN_PLAYERS {
            return Err(SessionError::NotEnoughPlayers {
                needed: MIN_PLAYERS,
                have,
            });
        }
        let minigame_only = self.config.modes.minigame_only();
        if self.catalog.is_empty() && !minigame_only {
            return Err(SessionError::EmptyCatalog);
        }
        self.timers.cancel_all();
        let players = std::mem::take(&mut self.turn.players);
        self.turn = TurnState::new(players);
        self.scores
            .reset(&self.turn.players, self.rules.initial_target);
        if !minigame_only {
            let deck = build_deck(&self.catalog, &self.config, self.turn.round, &mut self.rng);
            self.turn.deck = ActiveDeck::new(deck);
        }
        info!(
            players = have,
            deck = self.turn.deck.len(),
            target = self.scores.target(),
            "game started"
        );
        events.push(Event::GameStarted {
            players: have,
            deck: self.turn.deck.len(),
            target: self.scores.target(),
        });
        if minigame_only {
            let kind = MinigameKind::random(&mut self.rng);
            self.launch_minigame(kind, LaunchReason::MinigameOnly, events);
        } else {
            self.show_current_card(events);
        }
        Ok(())
    }

    /// Drops all turn and score state; the roster stays.
    pub fn end_game(&mut self, events: &mut EventBus) {
        self.timers.cancel_all();
        let players = std::mem::take(&mut self.turn.players);
        self.turn = TurnState::new(players);
        self.scores
            .reset(&self.turn.players, self.rules.initial_target);
        info!("game ended");
        events.push(Event::GameEnded);
    }

    pub fn continue_after_victory(&mut self, events: &mut EventBus) -> Result<(), SessionError> {
        self.expect_phase(&Phase::Victory)?;
        let target = self.scores.continue_after_victory();
        events.push(Event::TargetRaised { target });
        self.resume_turn(events);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> GameSession {
        let cards = (0..6)
            .map(|idx| Card::new(format!("c{idx}"), "text", CardType::Rule, CardMode::Rule))
            .collect();
        GameSession::new(CardCatalog::new(cards), RulesConfig::default(), 1)
    }

    #[test]
    fn roster_rejects_blank_and_duplicate_names() {
        let mut session = session();
        assert_eq!(session.add_player("  "), Err(SessionError::EmptyName));
        session.add_player(" Ana ").expect("add");
        assert_eq!(
            session.add_player("Ana"),
            Err(SessionError::DuplicatePlayer("Ana".into()))
        );
        session
            .set_players(["Bea", "", "Bea", "Cy"])
            .expect("set players");
        assert_eq!(session.players(), ["Bea".to_string(), "Cy".to_string()]);
    }

    #[test]
    fn start_needs_two_players() {
        let mut session = session();
        let mut events = EventBus::default();
        session.add_player("Solo").expect("add");
        assert_eq!(
            session.start_game(&mut events),
            Err(SessionError::NotEnoughPlayers { needed: 2, have: 1 })
        );
        session.add_player("Duo").expect("add");
        session.start_game(&mut events).expect("start");
        assert_eq!(session.phase(), &Phase::AwaitingChoice);
        assert_eq!(session.start_game(&mut events), Err(SessionError::GameRunning));
    }

    #[test]
    fn removing_players_keeps_index_in_range() {
        let mut session = session();
        let mut events = EventBus::default();
        session.set_players(["A", "B", "C"]).expect("set");
        session.start_game(&mut events).expect("start");
        session.turn.current = 2;
        session.remove_player("A", &mut events).expect("remove");
        assert_eq!(session.current_player(), Some("C"));
        session.remove_player("C", &mut events).expect("remove");
        assert!(!session.turn().is_running());
        assert_eq!(session.current_player(), Some("B"));
    }

    #[test]
    fn end_game_keeps_roster_and_zeroes_scores() {
        let mut session = session();
        let mut events = EventBus::default();
        session.set_players(["A", "B"]).expect("set");
        session.start_game(&mut events).expect("start");
        session.scores.add_points("A", 12);
        session.end_game(&mut events);
        assert_eq!(session.players().len(), 2);
        assert_eq!(session.score("A"), 0);
        assert_eq!(session.phase(), &Phase::Setup);
    }
}
