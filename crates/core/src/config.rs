use crate::{default_wheel_segments, Category, Intensity, MinigameKind, WheelSegment};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModeFlags {
    roulette: bool,
    arcade: bool,
    minigame_only: bool,
}

impl ModeFlags {
    pub fn roulette(self) -> bool {
        self.roulette
    }

    pub fn arcade(self) -> bool {
        self.arcade
    }

    pub fn minigame_only(self) -> bool {
        self.minigame_only
    }

    pub fn set_roulette(&mut self, enabled: bool) {
        self.roulette = enabled;
    }

    /// Arcade and minigame-only each switch every other mode off.
    pub fn set_arcade(&mut self, enabled: bool) {
        if enabled {
            *self = Self::default();
        }
        self.arcade = enabled;
    }

    pub fn set_minigame_only(&mut self, enabled: bool) {
        if enabled {
            *self = Self::default();
        }
        self.minigame_only = enabled;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameConfig {
    pub categories: BTreeSet<Category>,
    pub intensity: Intensity,
    #[serde(default)]
    pub modes: ModeFlags,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            categories: Category::ALL.into_iter().collect(),
            intensity: Intensity::Medium,
            modes: ModeFlags::default(),
        }
    }
}

impl GameConfig {
    /// An empty selection is refused; the previous one stays in place.
    pub fn select_categories<I>(&mut self, categories: I) -> bool
    where
        I: IntoIterator<Item = Category>,
    {
        let selected: BTreeSet<Category> = categories.into_iter().collect();
        if selected.is_empty() {
            return false;
        }
        self.categories = selected;
        true
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ArcadeBand {
    pub threshold: f64,
    pub game: MinigameKind,
}

fn default_arcade_bands() -> Vec<ArcadeBand> {
    vec![
        ArcadeBand {
            threshold: 0.95,
            game: MinigameKind::Brick,
        },
        ArcadeBand {
            threshold: 0.90,
            game: MinigameKind::Flappy,
        },
        ArcadeBand {
            threshold: 0.85,
            game: MinigameKind::Tapper,
        },
        ArcadeBand {
            threshold: 0.80,
            game: MinigameKind::Reflex,
        },
        ArcadeBand {
            threshold: 0.75,
            game: MinigameKind::Memory,
        },
    ]
}

fn default_target() -> i64 {
    30
}

fn default_steal() -> i64 {
    10
}

fn default_five() -> i64 {
    5
}

fn default_bomb() -> i64 {
    3
}

fn default_star_ceiling() -> i64 {
    20
}

fn default_capacity() -> usize {
    5
}

/// Tunable constants of the scoring and turn rules.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RulesConfig {
    #[serde(default = "default_target")]
    pub initial_target: i64,
    #[serde(default = "default_target")]
    pub target_step: i64,
    #[serde(default = "default_steal")]
    pub steal_amount: i64,
    #[serde(default = "default_five")]
    pub gift_amount: i64,
    #[serde(default = "default_five")]
    pub bonus_amount: i64,
    #[serde(default = "default_bomb")]
    pub bomb_penalty: i64,
    #[serde(default = "default_star_ceiling")]
    pub star_ceiling: i64,
    #[serde(default = "default_five")]
    pub wheel_steal_cap: i64,
    #[serde(default = "default_capacity")]
    pub high_score_capacity: usize,
    #[serde(default = "default_arcade_bands")]
    pub arcade_bands: Vec<ArcadeBand>,
    #[serde(default = "default_wheel_segments")]
    pub wheel_segments: Vec<WheelSegment>,
    #[serde(default)]
    pub turn_seconds: Option<u32>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            initial_target: default_target(),
            target_step: default_target(),
            steal_amount: default_steal(),
            gift_amount: default_five(),
            bonus_amount: default_five(),
            bomb_penalty: default_bomb(),
            star_ceiling: default_star_ceiling(),
            wheel_steal_cap: default_five(),
            high_score_capacity: default_capacity(),
            arcade_bands: default_arcade_bands(),
            wheel_segments: default_wheel_segments(),
            turn_seconds: None,
        }
    }
}

impl RulesConfig {
    /// Bands are checked from the highest threshold down.
    pub fn arcade_pick(&self, roll: f64) -> Option<MinigameKind> {
        let mut bands = self.arcade_bands.clone();
        bands.sort_by(|a, b| b.threshold.total_cmp(&a.threshold));
        bands
            .into_iter()
            .find(|band| roll > band.threshold)
            .map(|band| band.game)
    }
}
