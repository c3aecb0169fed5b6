use crate::MinigameKind;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const PLAYER_PLACEHOLDER: &str = "{player}";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Question,
    Challenge,
    Rule,
    Viral,
}

/// Which choice affordances a card offers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CardMode {
    Binary,
    Statement,
    Rule,
}

#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Romantic,
    Spicy,
    Fun,
    #[default]
    General,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Romantic,
        Category::Spicy,
        Category::Fun,
        Category::General,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Romantic => "romantic",
            Self::Spicy => "spicy",
            Self::Fun => "fun",
            Self::General => "general",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.key().eq_ignore_ascii_case(key.trim()))
    }
}

#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Soft,
    #[default]
    Medium,
    Spicy,
}

impl Intensity {
    pub fn level(self) -> u8 {
        match self {
            Self::Soft => 1,
            Self::Medium => 2,
            Self::Spicy => 3,
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "soft" | "1" => Some(Self::Soft),
            "medium" | "2" => Some(Self::Medium),
            "spicy" | "3" => Some(Self::Spicy),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DrinkTrigger {
    Yes,
    No,
    Always,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Choice {
    Yes,
    No,
}

impl Choice {
    pub fn trigger(self) -> DrinkTrigger {
        match self {
            Self::Yes => DrinkTrigger::Yes,
            Self::No => DrinkTrigger::No,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SpecialEffect {
    Double,
    Reverse,
    Skip,
    Steal,
    Gift,
    Bonus,
    Bomb,
    Star,
    Roulette,
    Minigame(MinigameKind),
}

impl SpecialEffect {
    pub fn parse(tag: &str) -> Option<Self> {
        let tag = tag.trim().to_ascii_lowercase();
        let effect = match tag.as_str() {
            "double" => Self::Double,
            "reverse" => Self::Reverse,
            "skip" => Self::Skip,
            "steal" => Self::Steal,
            "gift" => Self::Gift,
            "bonus" => Self::Bonus,
            "bomb" => Self::Bomb,
            "star" => Self::Star,
            "roulette" => Self::Roulette,
            other => {
                let key = other.strip_prefix("minigame_")?;
                Self::Minigame(MinigameKind::from_key(key)?)
            }
        };
        Some(effect)
    }

    /// Steal and gift park the turn until a target player is chosen.
    pub fn needs_target(self) -> bool {
        matches!(self, Self::Steal | Self::Gift)
    }
}

impl fmt::Display for SpecialEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Double => f.write_str("double"),
            Self::Reverse => f.write_str("reverse"),
            Self::Skip => f.write_str("skip"),
            Self::Steal => f.write_str("steal"),
            Self::Gift => f.write_str("gift"),
            Self::Bonus => f.write_str("bonus"),
            Self::Bomb => f.write_str("bomb"),
            Self::Star => f.write_str("star"),
            Self::Roulette => f.write_str("roulette"),
            Self::Minigame(kind) => write!(f, "minigame_{}", kind.key()),
        }
    }
}

impl TryFrom<String> for SpecialEffect {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("unknown special effect `{value}`"))
    }
}

impl From<SpecialEffect> for String {
    fn from(value: SpecialEffect) -> Self {
        value.to_string()
    }
}

fn default_points() -> i64 {
    1
}

// Authored content sometimes carries `""` for "no effect".
fn effect_or_empty<'de, D>(deserializer: D) -> Result<Option<SpecialEffect>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(tag) => SpecialEffect::parse(tag)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("unknown special effect `{tag}`"))),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Card {
    pub id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: CardType,
    pub mode: CardMode,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub intensity: Intensity,
    #[serde(default = "default_points")]
    pub points: i64,
    #[serde(
        default,
        rename = "specialEffect",
        alias = "special_effect",
        deserialize_with = "effect_or_empty"
    )]
    pub special_effect: Option<SpecialEffect>,
    #[serde(default, rename = "drinkTrigger", alias = "drink_trigger")]
    pub drink_trigger: Option<DrinkTrigger>,
    #[serde(default, rename = "drinkAction", alias = "drink_action")]
    pub drink_action: Option<String>,
}

impl Card {
    pub fn new(id: impl Into<String>, text: impl Into<String>, kind: CardType, mode: CardMode) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            kind,
            mode,
            category: Category::General,
            intensity: Intensity::Medium,
            points: 1,
            special_effect: None,
            drink_trigger: None,
            drink_action: None,
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_intensity(mut self, intensity: Intensity) -> Self {
        self.intensity = intensity;
        self
    }

    pub fn with_points(mut self, points: i64) -> Self {
        self.points = points;
        self
    }

    pub fn with_effect(mut self, effect: SpecialEffect) -> Self {
        self.special_effect = Some(effect);
        self
    }

    pub fn with_drink(mut self, trigger: DrinkTrigger, action: impl Into<String>) -> Self {
        self.drink_trigger = Some(trigger);
        self.drink_action = Some(action.into());
        self
    }

    pub fn has_effect(&self) -> bool {
        self.special_effect.is_some()
    }

    pub fn is_effect(&self, effect: SpecialEffect) -> bool {
        self.special_effect == Some(effect)
    }

    pub fn renders_player(&self) -> bool {
        self.text.contains(PLAYER_PLACEHOLDER)
    }

    pub fn render(&self, other_player: Option<&str>) -> String {
        match other_player {
            Some(name) => self.text.replace(PLAYER_PLACEHOLDER, name),
            None => self.text.clone(),
        }
    }
}
