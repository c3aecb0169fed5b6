use crate::RngState;
use serde::{Deserialize, Serialize};

/// Every minigame the host knows how to launch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MinigameKind {
    Reflex,
    Timing,
    Memory,
    Shake,
    Brick,
    Flappy,
    Tapper,
    Wheel,
}

/// Whether a lower or higher recorded score ranks first.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RankOrder {
    Ascending,
    Descending,
}

impl MinigameKind {
    pub const ALL: [MinigameKind; 8] = [
        MinigameKind::Reflex,
        MinigameKind::Timing,
        MinigameKind::Memory,
        MinigameKind::Shake,
        MinigameKind::Brick,
        MinigameKind::Flappy,
        MinigameKind::Tapper,
        MinigameKind::Wheel,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Reflex => "reflex",
            Self::Timing => "timing",
            Self::Memory => "memory",
            Self::Shake => "shake",
            Self::Brick => "brick",
            Self::Flappy => "flappy",
            Self::Tapper => "tapper",
            Self::Wheel => "wheel",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.key().eq_ignore_ascii_case(key.trim()))
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Reflex => "Reflex Duel",
            Self::Timing => "Stop the Clock",
            Self::Memory => "Memory Sequence",
            Self::Shake => "Shake It",
            Self::Brick => "Brick Breaker",
            Self::Flappy => "Flappy Shot",
            Self::Tapper => "Speed Tapper",
            Self::Wheel => "Fortune Wheel",
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            Self::Reflex => "Too slow on the draw! Take a sip.",
            Self::Timing => "Missed the mark. Drink up!",
            Self::Memory => "Memory failed you. Take two sips.",
            Self::Shake => "Not enough shaking. Drink!",
            Self::Brick => "The ball got past you. Take a sip.",
            Self::Flappy => "Crashed! Drink to recover.",
            Self::Tapper => "Fingers too slow. Take a sip.",
            Self::Wheel => "The wheel was not kind. Drink!",
        }
    }

    /// Reaction and timing games rank by elapsed milliseconds.
    pub fn rank_order(self) -> RankOrder {
        match self {
            Self::Reflex | Self::Timing => RankOrder::Ascending,
            _ => RankOrder::Descending,
        }
    }

    pub fn random(rng: &mut RngState) -> Self {
        let idx = rng.pick_index(Self::ALL.len()).unwrap_or(0);
        Self::ALL[idx]
    }
}

/// Structured reward a fortune-wheel spin reports.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WheelResult {
    Points { value: i64 },
    Steal,
    Drink,
    Challenge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinigameOutcome {
    Won,
    Lost,
    Wheel(WheelResult),
}

impl MinigameOutcome {
    pub fn from_bool(won: bool) -> Self {
        if won {
            Self::Won
        } else {
            Self::Lost
        }
    }

    pub fn is_failure(self) -> bool {
        matches!(self, Self::Lost)
    }

    /// The fortune wheel reports a reward; every other game reports win/lose.
    pub fn fits(self, kind: MinigameKind) -> bool {
        matches!(self, Self::Wheel(_)) == (kind == MinigameKind::Wheel)
    }
}

/// What the host hands back when a minigame closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinigameReport {
    pub outcome: MinigameOutcome,
    pub score: Option<i64>,
}

impl MinigameReport {
    pub fn new(outcome: MinigameOutcome) -> Self {
        Self {
            outcome,
            score: None,
        }
    }

    pub fn with_score(mut self, score: i64) -> Self {
        self.score = Some(score);
        self
    }
}

/// Handed to the host on launch; completing with a stale ticket is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinigameTicket {
    pub id: u64,
    pub kind: MinigameKind,
}

/// One activation of a minigame on the host side. Internal events may keep
/// arriving after the game decided; only the first `finish` yields a report.
#[derive(Debug)]
pub struct MinigameRun {
    ticket: MinigameTicket,
    closing: bool,
}

impl MinigameRun {
    pub fn new(ticket: MinigameTicket) -> Self {
        Self {
            ticket,
            closing: false,
        }
    }

    pub fn ticket(&self) -> MinigameTicket {
        self.ticket
    }

    pub fn is_closing(&self) -> bool {
        self.closing
    }

    pub fn finish(&mut self, report: MinigameReport) -> Option<(MinigameTicket, MinigameReport)> {
        if self.closing {
            return None;
        }
        self.closing = true;
        Some((self.ticket, report))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct WheelSegment {
    pub result: WheelResult,
    pub weight: u32,
}

pub fn default_wheel_segments() -> Vec<WheelSegment> {
    vec![
        WheelSegment {
            result: WheelResult::Points { value: 5 },
            weight: 3,
        },
        WheelSegment {
            result: WheelResult::Points { value: 10 },
            weight: 1,
        },
        WheelSegment {
            result: WheelResult::Points { value: -3 },
            weight: 2,
        },
        WheelSegment {
            result: WheelResult::Steal,
            weight: 2,
        },
        WheelSegment {
            result: WheelResult::Drink,
            weight: 2,
        },
        WheelSegment {
            result: WheelResult::Challenge,
            weight: 2,
        },
    ]
}

pub fn spin_wheel(segments: &[WheelSegment], rng: &mut RngState) -> WheelResult {
    let total: u64 = segments.iter().map(|segment| u64::from(segment.weight)).sum();
    if total == 0 {
        return WheelResult::Drink;
    }
    let mut ticket = rng.next_u64() % total;
    for segment in segments {
        let weight = u64::from(segment.weight);
        if ticket < weight {
            return segment.result;
        }
        ticket -= weight;
    }
    WheelResult::Drink
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_finishes_once() {
        let ticket = MinigameTicket {
            id: 4,
            kind: MinigameKind::Tapper,
        };
        let mut run = MinigameRun::new(ticket);
        let first = run.finish(MinigameReport::new(MinigameOutcome::Won));
        let second = run.finish(MinigameReport::new(MinigameOutcome::Lost));
        assert_eq!(first.map(|(t, r)| (t.id, r.outcome)), Some((4, MinigameOutcome::Won)));
        assert!(second.is_none());
        assert!(run.is_closing());
    }

    #[test]
    fn outcome_shape_follows_game() {
        let wheel = MinigameOutcome::Wheel(WheelResult::Drink);
        assert!(wheel.fits(MinigameKind::Wheel));
        assert!(!wheel.fits(MinigameKind::Reflex));
        assert!(MinigameOutcome::from_bool(false).fits(MinigameKind::Memory));
        assert!(!MinigameOutcome::from_bool(true).fits(MinigameKind::Wheel));
        assert!(MinigameOutcome::from_bool(false).is_failure());
        assert!(!wheel.is_failure());
    }

    #[test]
    fn keys_roundtrip_through_lookup() {
        for kind in MinigameKind::ALL {
            assert_eq!(MinigameKind::from_key(kind.key()), Some(kind));
        }
        assert_eq!(MinigameKind::Reflex.rank_order(), RankOrder::Ascending);
        assert_eq!(MinigameKind::Brick.rank_order(), RankOrder::Descending);
    }

    #[test]
    fn wheel_only_lands_on_weighted_segments() {
        let segments = vec![
            WheelSegment {
                result: WheelResult::Steal,
                weight: 0,
            },
            WheelSegment {
                result: WheelResult::Points { value: 2 },
                weight: 4,
            },
        ];
        let mut rng = RngState::from_seed(11);
        for _ in 0..64 {
            assert_eq!(
                spin_wheel(&segments, &mut rng),
                WheelResult::Points { value: 2 }
            );
        }
    }

    #[test]
    fn wheel_result_json_shape() {
        let raw = serde_json::to_string(&WheelResult::Points { value: -3 }).expect("encode");
        assert_eq!(raw, r#"{"type":"points","value":-3}"#);
        let steal: WheelResult = serde_json::from_str(r#"{"type":"steal"}"#).expect("decode");
        assert_eq!(steal, WheelResult::Steal);
    }
}
