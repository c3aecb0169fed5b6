use hotseat_core::{
    Card, CardMode, Event, GameSession, HighScoreEntry, LaunchReason, MinigameKind, Phase,
    SpecialAction, WheelResult,
};

pub const CARD_ADD_USAGE: &str =
    "card add <question|challenge|rule|viral> <category> <intensity> <text>";

pub fn print_help() {
    println!("setup:");
    println!("  players | add <name> | remove <name>");
    println!("  cats <romantic,spicy,fun,general> | intensity <soft|medium|spicy>");
    println!("  mode <normal|roulette|arcade|minigame> [on|off]");
    println!("  card list | card rm <id>");
    println!("  {CARD_ADD_USAGE}");
    println!("  start | end");
    println!("play:");
    println!("  yes | no | ok              answer the current card");
    println!("  target <name>              pick the steal/gift target");
    println!("  drink                      acknowledge a drink prompt");
    println!("  win [score] | lose [score] report the running minigame");
    println!("  wheel [points <n>|steal|drink|challenge]  report or spin the fortune wheel");
    println!("  spin                       stop the roulette");
    println!("  timeout                    let the turn timer run out");
    println!("  continue                   keep playing after a victory");
    println!("  scores | highscores <game> | status | help | quit");
}

pub fn format_event(event: &Event) -> String {
    match event {
        Event::GameStarted {
            players,
            deck,
            target,
        } => format!("game started: {players} players, {deck} cards, first to {target}"),
        Event::CardShown { player, .. } => format!("{player} draws a card"),
        Event::PointsChanged {
            player,
            delta,
            total,
        } => format!("{player} {delta:+} -> {total}"),
        Event::EffectApplied { effect, player } => format!("{effect} effect for {player}"),
        Event::DirectionReversed { direction } => {
            let label = if *direction > 0 { "forward" } else { "backward" };
            format!("play now goes {label}")
        }
        Event::TargetRequested { action, player } => {
            format!("{player} must choose who to {}", action_label(*action))
        }
        Event::DrinkPrompted { player, message } => format!("{player}: {message}"),
        Event::MinigameLaunched {
            kind,
            player,
            reason,
        } => {
            let why = match reason {
                LaunchReason::MinigameOnly => "minigame round",
                LaunchReason::CardEffect => "card effect",
                LaunchReason::Arcade => "arcade",
            };
            format!("{} for {player} ({why})", kind.display_name())
        }
        Event::MinigameResolved { kind, player, won } => match won {
            Some(true) => format!("{player} beat {}", kind.display_name()),
            Some(false) => format!("{player} lost {}", kind.display_name()),
            None => format!("{player} finished {}", kind.display_name()),
        },
        Event::MinigameScored {
            kind,
            player,
            score,
        } => format!("{player} scored {score} in {}", kind.display_name()),
        Event::WheelLanded { player, result } => {
            format!("wheel for {player}: {}", wheel_label(*result))
        }
        Event::RouletteArmed => "the roulette is spinning".to_string(),
        Event::RouletteLanded { player } => format!("the roulette picks {player}"),
        Event::TurnTimedOut { player } => format!("{player} ran out of time"),
        Event::RoundAdvanced { round } => format!("round {round}: special cards unlocked"),
        Event::DeckReplenished { size } => format!("deck reshuffled ({size} cards)"),
        Event::Victory {
            player,
            score,
            target,
        } => format!("{player} wins with {score}/{target}!"),
        Event::TargetRaised { target } => format!("new target: {target}"),
        Event::GameEnded => "game ended".to_string(),
    }
}

fn action_label(action: SpecialAction) -> &'static str {
    match action {
        SpecialAction::Steal => "steal from",
        SpecialAction::Gift => "gift",
    }
}

pub fn wheel_label(result: WheelResult) -> String {
    match result {
        WheelResult::Points { value } => format!("{value:+} points"),
        WheelResult::Steal => "steal".to_string(),
        WheelResult::Drink => "drink".to_string(),
        WheelResult::Challenge => "challenge".to_string(),
    }
}

/// What the session is waiting for, as one or two lines.
pub fn print_status(session: &GameSession) {
    let player = session.current_player().unwrap_or("-");
    match session.phase() {
        Phase::Setup => {
            println!(
                "setup: {} player(s); `add <name>` then `start`",
                session.players().len()
            );
        }
        Phase::AwaitingChoice => {
            let text = session.current_text().unwrap_or("");
            println!("[{player}] {text}");
            match session.current_card().map(|card| card.mode) {
                Some(CardMode::Binary) => println!("  yes / no"),
                Some(_) => println!("  ok"),
                None => {}
            }
            if let Some(token) = session.turn_timer() {
                println!("  {}s on the clock (`timeout`)", token.duration_ms / 1_000);
            }
        }
        Phase::AwaitingSpecialTarget(action) => {
            println!(
                "[{player}] choose who to {}: {}",
                action_label(*action),
                session.selectable_targets().join(", ")
            );
        }
        Phase::AwaitingMinigameResult(ticket) => {
            if ticket.kind == MinigameKind::Wheel {
                println!("[{player}] {}: `wheel` to spin", ticket.kind.display_name());
            } else {
                println!(
                    "[{player}] {}: `win` or `lose` [score]",
                    ticket.kind.display_name()
                );
            }
        }
        Phase::AwaitingDrink(prompt) => {
            println!("[{}] {} (`drink`)", prompt.player, prompt.message);
        }
        Phase::AwaitingRoulette(_) => println!("roulette spinning (`spin`)"),
        Phase::AdvancingTurn => {}
        Phase::Victory => {
            let winner = session.scores().winner().unwrap_or(player);
            println!("{winner} reached {}: `continue` or `end`", session.scores().target());
        }
    }
}

pub fn print_scores(session: &GameSession) {
    println!("target {}", session.scores().target());
    for (player, score) in session.standings() {
        let marker = if Some(player.as_str()) == session.current_player() {
            "*"
        } else {
            " "
        };
        println!("{marker} {player:<12} {score}");
    }
}

pub fn print_high_scores(kind: MinigameKind, entries: &[HighScoreEntry]) {
    println!("{} high scores", kind.display_name());
    if entries.is_empty() {
        println!("  none yet");
    }
    for (idx, entry) in entries.iter().enumerate() {
        println!(
            "  {}. {:<12} {:>6}  {}",
            idx + 1,
            entry.player_name,
            entry.score,
            entry.date
        );
    }
}

pub fn print_card(card: &Card) {
    let effect = card
        .special_effect
        .map(|effect| format!(" [{effect}]"))
        .unwrap_or_default();
    println!(
        "  {:<20} {:?}/{:?} {}pt{effect}  {}",
        card.id, card.category, card.intensity, card.points, card.text
    );
}
