mod options;
mod render;
mod telemetry;

use anyhow::{anyhow, bail, Context};
use hotseat_core::{
    Card, CardMode, CardType, Category, Choice, Event, EventBus, GameSession, HighScoreStore,
    Intensity, MinigameKind, MinigameOutcome, MinigameReport, MinigameRun, RngState,
    WheelResult,
};
use hotseat_data::{high_score_entry, load_catalog, load_rules, JsonFileStore, Profile};
use options::{parse_cli_options, CliOptions};
use std::io::{self, BufRead, Write};
use tracing::{info, warn};

fn main() -> anyhow::Result<()> {
    telemetry::init();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_cli_options(&args);
    let mut host = Host::open(&options)?;
    run(&mut host)
}

fn run(host: &mut Host) -> anyhow::Result<()> {
    render::print_help();
    render::print_status(&host.session);
    prompt()?;
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("read command")?;
        let input = line.trim();
        if input.is_empty() {
            prompt()?;
            continue;
        }
        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");
        let args: Vec<&str> = parts.collect();
        if matches!(cmd, "quit" | "exit" | "q") {
            break;
        }
        if let Err(err) = host.execute(cmd, &args) {
            println!("error: {err}");
        }
        host.drain_events();
        host.sync_minigame();
        render::print_status(&host.session);
        prompt()?;
    }
    Ok(())
}

fn prompt() -> anyhow::Result<()> {
    print!("> ");
    io::stdout().flush().context("flush stdout")
}

struct Host {
    session: GameSession,
    profile: Profile<JsonFileStore>,
    events: EventBus,
    minigame: Option<MinigameRun>,
}

impl Host {
    fn open(options: &CliOptions) -> anyhow::Result<Self> {
        let rules = load_rules(&options.assets).context("load rules")?;
        let profile = Profile::new(
            JsonFileStore::new(&options.data),
            rules.high_score_capacity,
        );
        let catalog =
            load_catalog(&options.assets, profile.custom_cards()).context("load card catalog")?;
        let rng = options
            .seed
            .map(RngState::from_seed)
            .unwrap_or_else(RngState::from_entropy);
        info!(
            seed = rng.seed(),
            cards = catalog.len(),
            data = %options.data.display(),
            "session ready"
        );
        let mut session = GameSession::with_rng(catalog, rules, rng);
        session
            .set_players(profile.players())
            .context("restore saved players")?;
        Ok(Self {
            session,
            profile,
            events: EventBus::default(),
            minigame: None,
        })
    }

    fn execute(&mut self, cmd: &str, args: &[&str]) -> anyhow::Result<()> {
        match cmd {
            "help" | "h" | "?" => render::print_help(),
            "status" => {}
            "players" => println!("{}", self.session.players().join(", ")),
            "add" => {
                self.session.add_player(&args.join(" "))?;
                self.save_players();
            }
            "remove" | "rm" => {
                self.session
                    .remove_player(&args.join(" "), &mut self.events)?;
                self.save_players();
            }
            "cats" => self.select_categories(args)?,
            "intensity" => {
                let key = args.first().copied().unwrap_or("");
                self.session.config.intensity = Intensity::from_key(key)
                    .ok_or_else(|| anyhow!("unknown intensity '{key}'"))?;
            }
            "mode" => self.set_mode(args)?,
            "card" => self.edit_cards(args)?,
            "start" => self.session.start_game(&mut self.events)?,
            "end" => self.session.end_game(&mut self.events),
            "yes" | "y" => self
                .session
                .resolve_binary_choice(Choice::Yes, &mut self.events)?,
            "no" | "n" => self
                .session
                .resolve_binary_choice(Choice::No, &mut self.events)?,
            "ok" => self.session.resolve_statement_or_rule(&mut self.events)?,
            "target" => {
                let target = args.join(" ");
                if !self
                    .session
                    .resolve_special_target(&target, &mut self.events)?
                {
                    println!("'{target}' cannot be chosen");
                }
            }
            "drink" => {
                if !self.session.acknowledge_drink(&mut self.events) {
                    println!("nobody needs to drink right now");
                }
            }
            "win" | "lose" => {
                self.report_minigame(MinigameOutcome::from_bool(cmd == "win"), args)?
            }
            "wheel" => {
                let result = self.wheel_result(args)?;
                self.report_minigame(MinigameOutcome::Wheel(result), &[])?;
            }
            "spin" => {
                let token = self
                    .session
                    .pending_roulette()
                    .ok_or_else(|| anyhow!("no roulette is spinning"))?;
                self.session.settle_roulette(token, &mut self.events);
            }
            "timeout" => {
                let token = self
                    .session
                    .turn_timer()
                    .ok_or_else(|| anyhow!("no turn timer running"))?;
                self.session.turn_timed_out(token, &mut self.events);
            }
            "continue" => self.session.continue_after_victory(&mut self.events)?,
            "scores" => render::print_scores(&self.session),
            "highscores" => self.show_high_scores(args)?,
            _ => println!("unknown command '{cmd}' (try `help`)"),
        }
        Ok(())
    }

    fn select_categories(&mut self, args: &[&str]) -> anyhow::Result<()> {
        let mut selected = Vec::new();
        for key in args.iter().flat_map(|arg| arg.split(',')) {
            if key.trim().is_empty() {
                continue;
            }
            let category =
                Category::from_key(key).ok_or_else(|| anyhow!("unknown category '{key}'"))?;
            selected.push(category);
        }
        if !self.session.config.select_categories(selected) {
            bail!("select at least one category");
        }
        Ok(())
    }

    fn set_mode(&mut self, args: &[&str]) -> anyhow::Result<()> {
        let enabled = match args.get(1).copied() {
            None | Some("on") => true,
            Some("off") => false,
            Some(other) => bail!("expected on/off, got '{other}'"),
        };
        let modes = &mut self.session.config.modes;
        match args.first().copied() {
            Some("normal") => {
                modes.set_roulette(false);
                modes.set_arcade(false);
                modes.set_minigame_only(false);
            }
            Some("roulette") => modes.set_roulette(enabled),
            Some("arcade") => modes.set_arcade(enabled),
            Some("minigame") => modes.set_minigame_only(enabled),
            other => bail!("unknown mode {:?}", other.unwrap_or("")),
        }
        println!(
            "roulette={} arcade={} minigame-only={}",
            modes.roulette(),
            modes.arcade(),
            modes.minigame_only()
        );
        Ok(())
    }

    fn edit_cards(&mut self, args: &[&str]) -> anyhow::Result<()> {
        match args.first().copied() {
            Some("list") | None => {
                println!("{} built-in cards", self.session.catalog.builtin().len());
                for card in self.session.catalog.custom() {
                    render::print_card(card);
                }
            }
            Some("add") => {
                let [kind, category, intensity, words @ ..] = &args[1..] else {
                    bail!("usage: {}", render::CARD_ADD_USAGE);
                };
                let (kind, mode) = parse_card_type(kind)?;
                let category = Category::from_key(category)
                    .ok_or_else(|| anyhow!("unknown category '{category}'"))?;
                let intensity = Intensity::from_key(intensity)
                    .ok_or_else(|| anyhow!("unknown intensity '{intensity}'"))?;
                let text = words.join(" ");
                if text.is_empty() {
                    bail!("card text is empty");
                }
                let card = Card::new("", text, kind, mode)
                    .with_category(category)
                    .with_intensity(intensity);
                let id = self.session.catalog.add_custom(card);
                println!("added {id}");
                self.save_custom_cards();
            }
            Some("rm") => {
                let id = args.get(1).copied().unwrap_or("");
                if self.session.catalog.remove_custom(id).is_none() {
                    bail!("no custom card '{id}'");
                }
                self.save_custom_cards();
            }
            Some(other) => bail!("unknown card command '{other}'"),
        }
        Ok(())
    }

    fn wheel_result(&mut self, args: &[&str]) -> anyhow::Result<WheelResult> {
        let result = match args {
            [] => self.session.spin_wheel(),
            ["points", value] => WheelResult::Points {
                value: value
                    .parse()
                    .with_context(|| format!("invalid points '{value}'"))?,
            },
            ["steal"] => WheelResult::Steal,
            ["drink"] => WheelResult::Drink,
            ["challenge"] => WheelResult::Challenge,
            _ => bail!("usage: wheel [points <n>|steal|drink|challenge]"),
        };
        Ok(result)
    }

    fn report_minigame(&mut self, outcome: MinigameOutcome, args: &[&str]) -> anyhow::Result<()> {
        let run = self
            .minigame
            .as_mut()
            .ok_or_else(|| anyhow!("no minigame running"))?;
        let kind = run.ticket().kind;
        if !outcome.fits(kind) {
            match kind {
                MinigameKind::Wheel => bail!("{} reports with `wheel`", kind.display_name()),
                _ => bail!("{} reports with `win` or `lose`", kind.display_name()),
            }
        }
        let mut report = MinigameReport::new(outcome);
        if let Some(raw) = args.first() {
            let score = raw
                .parse::<i64>()
                .with_context(|| format!("invalid score '{raw}'"))?;
            report = report.with_score(score);
        }
        match run.finish(report) {
            Some((ticket, report)) => {
                if !self
                    .session
                    .complete_minigame(ticket, report, &mut self.events)
                {
                    println!("result ignored: minigame already closed");
                }
            }
            None => println!("minigame already finished"),
        }
        Ok(())
    }

    /// Tracks one host-side run per ticket the session hands out.
    fn sync_minigame(&mut self) {
        match self.session.pending_minigame() {
            Some(ticket) => {
                let current = self.minigame.as_ref().map(MinigameRun::ticket);
                if current != Some(ticket) {
                    self.minigame = Some(MinigameRun::new(ticket));
                }
            }
            None => self.minigame = None,
        }
    }

    fn drain_events(&mut self) {
        for event in self.events.drain() {
            println!("* {}", render::format_event(&event));
            if let Event::MinigameScored {
                kind,
                player,
                score,
            } = &event
            {
                let entry = high_score_entry(player, *score);
                if self.profile.put(kind.key(), entry, kind.rank_order()) {
                    println!("* new {} high score!", kind.display_name());
                }
            }
        }
    }

    fn show_high_scores(&self, args: &[&str]) -> anyhow::Result<()> {
        let kinds: Vec<MinigameKind> = match args.first() {
            Some(key) => vec![MinigameKind::from_key(key)
                .ok_or_else(|| anyhow!("unknown minigame '{key}'"))?],
            None => MinigameKind::ALL.to_vec(),
        };
        for kind in kinds {
            render::print_high_scores(kind, &self.profile.get(kind.key()));
        }
        Ok(())
    }

    fn save_players(&mut self) {
        if let Err(err) = self.profile.save_players(self.session.players()) {
            warn!(error = %err, "failed to save players");
        }
    }

    fn save_custom_cards(&mut self) {
        if let Err(err) = self.profile.save_custom_cards(self.session.catalog.custom()) {
            warn!(error = %err, "failed to save custom cards");
        }
    }
}

fn parse_card_type(key: &str) -> anyhow::Result<(CardType, CardMode)> {
    let parsed = match key.to_ascii_lowercase().as_str() {
        "question" => (CardType::Question, CardMode::Binary),
        "challenge" => (CardType::Challenge, CardMode::Binary),
        "rule" => (CardType::Rule, CardMode::Rule),
        "viral" => (CardType::Viral, CardMode::Statement),
        other => bail!("unknown card type '{other}'"),
    };
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_types_pick_their_mode() {
        assert_eq!(
            parse_card_type("Question").expect("question"),
            (CardType::Question, CardMode::Binary)
        );
        assert_eq!(
            parse_card_type("viral").expect("viral"),
            (CardType::Viral, CardMode::Statement)
        );
        assert!(parse_card_type("dare").is_err());
    }

    #[test]
    fn card_add_usage_lists_parsable_types() {
        let types = render::CARD_ADD_USAGE
            .split_whitespace()
            .nth(2)
            .expect("type placeholder");
        for key in types.trim_matches(|ch| ch == '<' || ch == '>').split('|') {
            assert!(parse_card_type(key).is_ok(), "{key} does not parse");
        }
    }
}
