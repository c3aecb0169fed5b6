use crate::{RulesConfig, ScoreBoard, SpecialEffect, WheelResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SpecialAction {
    Steal,
    Gift,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EffectDelta {
    ArmDoublePoints,
    FlipDirection,
    ArmSkip,
    AwaitTarget(SpecialAction),
    /// Goes through the clamped scoring entrypoint.
    AddPoints { player: String, delta: i64 },
    /// Bypasses the floor.
    AdjustUnclamped { player: String, delta: i64 },
}

#[derive(Debug, Clone, Copy)]
pub struct EffectContext<'a> {
    pub current: &'a str,
    pub players: &'a [String],
    pub scores: &'a ScoreBoard,
    pub rules: &'a RulesConfig,
}

/// Roulette and minigame tags act at turn-advance time, not here.
pub fn resolve_effect(effect: SpecialEffect, ctx: EffectContext<'_>) -> Vec<EffectDelta> {
    match effect {
        SpecialEffect::Double => vec![EffectDelta::ArmDoublePoints],
        SpecialEffect::Reverse => vec![EffectDelta::FlipDirection],
        SpecialEffect::Skip => vec![EffectDelta::ArmSkip],
        SpecialEffect::Steal => vec![EffectDelta::AwaitTarget(SpecialAction::Steal)],
        SpecialEffect::Gift => vec![EffectDelta::AwaitTarget(SpecialAction::Gift)],
        SpecialEffect::Bonus => vec![EffectDelta::AddPoints {
            player: ctx.current.to_string(),
            delta: ctx.rules.bonus_amount,
        }],
        SpecialEffect::Bomb => ctx
            .players
            .iter()
            .filter(|name| name.as_str() != ctx.current)
            .map(|name| EffectDelta::AdjustUnclamped {
                player: name.clone(),
                delta: -ctx.rules.bomb_penalty,
            })
            .collect(),
        SpecialEffect::Star => {
            let score = ctx.scores.score(ctx.current);
            if score > 0 && score < ctx.rules.star_ceiling {
                vec![EffectDelta::AddPoints {
                    player: ctx.current.to_string(),
                    delta: score,
                }]
            } else {
                Vec::new()
            }
        }
        SpecialEffect::Roulette | SpecialEffect::Minigame(_) => Vec::new(),
    }
}

/// Deltas for a chosen steal/gift target. Unknown or self targets yield none.
pub fn resolve_target(
    action: SpecialAction,
    actor: &str,
    target: &str,
    players: &[String],
    rules: &RulesConfig,
) -> Vec<EffectDelta> {
    if actor == target || !players.iter().any(|name| name == target) {
        return Vec::new();
    }
    match action {
        SpecialAction::Steal => vec![
            EffectDelta::AdjustUnclamped {
                player: target.to_string(),
                delta: -rules.steal_amount,
            },
            EffectDelta::AddPoints {
                player: actor.to_string(),
                delta: rules.steal_amount,
            },
        ],
        SpecialAction::Gift => vec![EffectDelta::AddPoints {
            player: target.to_string(),
            delta: rules.gift_amount,
        }],
    }
}

pub fn resolve_wheel(result: WheelResult, ctx: EffectContext<'_>) -> Vec<EffectDelta> {
    match result {
        WheelResult::Points { value } => vec![EffectDelta::AddPoints {
            player: ctx.current.to_string(),
            delta: value,
        }],
        WheelResult::Steal => {
            let Some((victim, top)) = ctx.scores.leader_excluding(ctx.players, ctx.current) else {
                return Vec::new();
            };
            if top <= 0 {
                return Vec::new();
            }
            let amount = top.min(ctx.rules.wheel_steal_cap);
            vec![
                EffectDelta::AdjustUnclamped {
                    player: victim.to_string(),
                    delta: -amount,
                },
                EffectDelta::AddPoints {
                    player: ctx.current.to_string(),
                    delta: amount,
                },
            ]
        }
        WheelResult::Drink | WheelResult::Challenge => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(scores: &[(&str, i64)]) -> (Vec<String>, ScoreBoard) {
        let players: Vec<String> = scores.iter().map(|(name, _)| name.to_string()).collect();
        let mut board = ScoreBoard::new(1000, 30);
        board.reset(&players, 1000);
        for (name, score) in scores {
            board.adjust_unclamped(name, *score);
        }
        (players, board)
    }

    #[test]
    fn bomb_hits_everyone_but_current() {
        let (players, board) = setup(&[("A", 0), ("B", 1), ("C", 9)]);
        let rules = RulesConfig::default();
        let ctx = EffectContext {
            current: "A",
            players: &players,
            scores: &board,
            rules: &rules,
        };
        let deltas = resolve_effect(SpecialEffect::Bomb, ctx);
        assert_eq!(
            deltas,
            vec![
                EffectDelta::AdjustUnclamped {
                    player: "B".into(),
                    delta: -3
                },
                EffectDelta::AdjustUnclamped {
                    player: "C".into(),
                    delta: -3
                },
            ]
        );
    }

    #[test]
    fn star_only_doubles_inside_window() {
        let rules = RulesConfig::default();
        for (score, expected) in [(0, None), (7, Some(7)), (19, Some(19)), (20, None)] {
            let (players, board) = setup(&[("A", score), ("B", 0)]);
            let ctx = EffectContext {
                current: "A",
                players: &players,
                scores: &board,
                rules: &rules,
            };
            let deltas = resolve_effect(SpecialEffect::Star, ctx);
            let got = deltas.first().map(|delta| match delta {
                EffectDelta::AddPoints { delta, .. } => *delta,
                other => panic!("unexpected {other:?}"),
            });
            assert_eq!(got, expected, "score {score}");
        }
    }

    #[test]
    fn targets_must_be_other_known_players() {
        let players: Vec<String> = vec!["A".into(), "B".into()];
        let rules = RulesConfig::default();
        assert!(resolve_target(SpecialAction::Steal, "A", "A", &players, &rules).is_empty());
        assert!(resolve_target(SpecialAction::Gift, "A", "Z", &players, &rules).is_empty());
        assert_eq!(
            resolve_target(SpecialAction::Gift, "A", "B", &players, &rules),
            vec![EffectDelta::AddPoints {
                player: "B".into(),
                delta: 5
            }]
        );
    }

    #[test]
    fn wheel_steal_skips_when_nobody_has_points() {
        let (players, board) = setup(&[("A", 4), ("B", 0), ("C", -2)]);
        let rules = RulesConfig::default();
        let ctx = EffectContext {
            current: "A",
            players: &players,
            scores: &board,
            rules: &rules,
        };
        assert!(resolve_wheel(WheelResult::Steal, ctx).is_empty());
        assert!(resolve_wheel(WheelResult::Challenge, ctx).is_empty());
    }
}
