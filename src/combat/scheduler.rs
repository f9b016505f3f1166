//! Speed-accumulator turn scheduler
//!
//! `speed_delta` starts at `Speed(A) - Speed(B)`. Whoever the sign favors
//! acts; after acting, the delta moves toward the other side by the other
//! side's current Speed. A unit twice as fast gets roughly two turns for
//! every one of its opponent's, and the remainder carries over.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::combat::events::EventKind;
use crate::core::context::ArenaContext;
use crate::core::error::Result;
use crate::unit::Unit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleOutcome {
    Victory(Side),
    /// Both units at or below zero HP
    Draw,
    /// Turn limit reached with both units standing
    Undecided,
}

impl Default for BattleOutcome {
    fn default() -> Self {
        Self::Undecided
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleReport {
    pub outcome: BattleOutcome,
    pub winner: Option<String>,
    pub turns: u32,
}

/// Decide who acts for the current delta
fn next_actor(speed_delta: i32, a: &Unit, b: &Unit, ctx: &mut ArenaContext) -> Side {
    match speed_delta.cmp(&0) {
        Ordering::Greater => Side::A,
        Ordering::Less => Side::B,
        Ordering::Equal => match a.stats().skill.cmp(&b.stats().skill) {
            Ordering::Greater => Side::A,
            Ordering::Less => Side::B,
            Ordering::Equal => {
                if ctx.dice().coin_flip() {
                    Side::A
                } else {
                    Side::B
                }
            }
        },
    }
}

fn outcome_of(a: &Unit, b: &Unit) -> BattleOutcome {
    match (a.is_alive(), b.is_alive()) {
        (true, false) => BattleOutcome::Victory(Side::A),
        (false, true) => BattleOutcome::Victory(Side::B),
        (false, false) => BattleOutcome::Draw,
        (true, true) => BattleOutcome::Undecided,
    }
}

/// Fight until one side drops or the turn limit is reached
///
/// Both units start from their base stats with every skill ready. Only
/// damage taken earlier carries over. An error means a unit had nothing
/// castable, which is a broken unit rather than a battle result.
pub fn run_battle(a: &mut Unit, b: &mut Unit, ctx: &mut ArenaContext) -> Result<BattleReport> {
    a.prepare_for_battle();
    b.prepare_for_battle();

    let mut speed_delta = a.stats().speed.saturating_sub(b.stats().speed);
    let max_turns = ctx.config.max_turns;

    tracing::info!(
        unit_a = a.name(),
        unit_b = b.name(),
        speed_delta,
        "Battle started"
    );
    ctx.emit(EventKind::BattleStarted {
        unit_a: a.name().to_string(),
        unit_b: b.name().to_string(),
        speed_delta,
    });

    let mut turns = 0;
    while a.is_alive() && b.is_alive() && turns < max_turns {
        turns += 1;
        ctx.log.set_turn(turns);

        let actor = next_actor(speed_delta, a, b, ctx);
        match actor {
            Side::A => {
                ctx.emit(EventKind::TurnStarted {
                    unit: a.name().to_string(),
                    speed_delta,
                });
                a.take_turn(b, ctx)?;
                speed_delta = speed_delta.saturating_sub(b.stats().speed);
            }
            Side::B => {
                ctx.emit(EventKind::TurnStarted {
                    unit: b.name().to_string(),
                    speed_delta,
                });
                b.take_turn(a, ctx)?;
                speed_delta = speed_delta.saturating_add(a.stats().speed);
            }
        }
    }

    let outcome = outcome_of(a, b);
    let winner = match outcome {
        BattleOutcome::Victory(Side::A) => Some(a.name().to_string()),
        BattleOutcome::Victory(Side::B) => Some(b.name().to_string()),
        BattleOutcome::Draw | BattleOutcome::Undecided => None,
    };

    if outcome == BattleOutcome::Undecided {
        tracing::warn!(turns, "Battle hit the turn limit");
    }
    tracing::info!(?outcome, winner = winner.as_deref(), turns, "Battle ended");

    ctx.emit(EventKind::BattleEnded {
        outcome,
        winner: winner.clone(),
        turns,
    });
    ctx.log.set_turn(0);

    Ok(BattleReport {
        outcome,
        winner,
        turns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ArenaConfig;
    use crate::core::dice::ScriptedDice;
    use crate::core::types::StatBlock;
    use crate::combat::events::HitResult;
    use crate::skills::{ActiveSkillId, PassiveSkillId};

    fn fighter(name: &str, stats: StatBlock, ctx: &mut ArenaContext) -> Unit {
        let mut unit = Unit::with_stats(name, stats, StatBlock::uniform(0), &ctx.config);
        unit.learn_active(ActiveSkillId::BasicMelee, ctx);
        unit
    }

    fn turn_order(ctx: &ArenaContext) -> Vec<String> {
        ctx.log
            .events()
            .iter()
            .filter_map(|e| match &e.kind {
                EventKind::TurnStarted { unit, .. } => Some(unit.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_fast_unit_acts_several_times() {
        let config = ArenaConfig {
            max_turns: 10,
            ..ArenaConfig::default()
        };
        // Every d100 is 100: nothing connects, so the limit ends the battle
        let mut ctx = ArenaContext::with_dice(config, ScriptedDice::new());
        let fast_stats = StatBlock {
            speed: 20,
            ..StatBlock::uniform(10)
        };
        let slow_stats = StatBlock {
            speed: 5,
            ..StatBlock::uniform(10)
        };
        let mut fast = fighter("Fast", fast_stats, &mut ctx);
        let mut slow = fighter("Slow", slow_stats, &mut ctx);

        let report = run_battle(&mut fast, &mut slow, &mut ctx).unwrap();

        assert_eq!(report.outcome, BattleOutcome::Undecided);
        assert_eq!(report.turns, 10);
        assert!(report.winner.is_none());

        // 15, 10, 5, then 0 ties on Skill and the coin goes to A
        let order = turn_order(&ctx);
        assert_eq!(&order[..5], &["Fast", "Fast", "Fast", "Fast", "Slow"]);
        assert_eq!(order.iter().filter(|u| *u == "Slow").count(), 2);
    }

    #[test]
    fn test_tie_goes_to_higher_skill() {
        let config = ArenaConfig {
            max_turns: 1,
            ..ArenaConfig::default()
        };
        let mut ctx = ArenaContext::with_dice(config, ScriptedDice::new());
        let mut a = fighter("A", StatBlock::uniform(10), &mut ctx);
        let sharper = StatBlock {
            skill: 11,
            ..StatBlock::uniform(10)
        };
        let mut b = fighter("B", sharper, &mut ctx);

        run_battle(&mut a, &mut b, &mut ctx).unwrap();

        assert_eq!(turn_order(&ctx), vec!["B"]);
    }

    #[test]
    fn test_full_tie_uses_coin() {
        let config = ArenaConfig {
            max_turns: 1,
            ..ArenaConfig::default()
        };
        let mut ctx = ArenaContext::with_dice(config, ScriptedDice::new().with_coins([false]));
        let mut a = fighter("A", StatBlock::uniform(10), &mut ctx);
        let mut b = fighter("B", StatBlock::uniform(10), &mut ctx);

        run_battle(&mut a, &mut b, &mut ctx).unwrap();

        assert_eq!(turn_order(&ctx), vec!["B"]);
    }

    #[test]
    fn test_dead_on_arrival_ends_immediately() {
        let mut ctx = ArenaContext::seeded(ArenaConfig::default(), 3);
        let mut a = fighter("A", StatBlock::uniform(10), &mut ctx);
        let fallen = StatBlock {
            hp: 0,
            ..StatBlock::uniform(10)
        };
        let mut b = fighter("B", fallen, &mut ctx);

        let report = run_battle(&mut a, &mut b, &mut ctx).unwrap();

        assert_eq!(report.outcome, BattleOutcome::Victory(Side::A));
        assert_eq!(report.winner.as_deref(), Some("A"));
        assert_eq!(report.turns, 0);
    }

    #[test]
    fn test_both_dead_is_draw() {
        let mut ctx = ArenaContext::seeded(ArenaConfig::default(), 3);
        let fallen = StatBlock {
            hp: 0,
            ..StatBlock::uniform(10)
        };
        let mut a = fighter("A", fallen, &mut ctx);
        let mut b = fighter("B", StatBlock { hp: -1, ..fallen }, &mut ctx);

        let report = run_battle(&mut a, &mut b, &mut ctx).unwrap();

        assert_eq!(report.outcome, BattleOutcome::Draw);
        assert_eq!(report.turns, 0);
    }

    #[test]
    fn test_unit_without_skills_errors() {
        let mut ctx = ArenaContext::seeded(ArenaConfig::default(), 3);
        let fast = StatBlock {
            speed: 20,
            ..StatBlock::uniform(10)
        };
        let mut a = Unit::with_stats("Empty", fast, StatBlock::uniform(0), &ctx.config);
        let mut b = fighter("B", StatBlock::uniform(10), &mut ctx);

        let result = run_battle(&mut a, &mut b, &mut ctx);

        assert!(matches!(
            result,
            Err(crate::core::error::ArenaError::NoEligibleSkill { ref unit }) if unit == "Empty"
        ));
    }

    #[test]
    fn test_lethal_battle_ends_with_winner() {
        let mut ctx = ArenaContext::seeded(ArenaConfig::default(), 11);
        let stats = StatBlock {
            hp: 20,
            strength: 15,
            ..StatBlock::uniform(10)
        };
        let mut a = fighter("A", stats, &mut ctx);
        let mut b = fighter("B", stats, &mut ctx);

        let report = run_battle(&mut a, &mut b, &mut ctx).unwrap();

        assert!(matches!(report.outcome, BattleOutcome::Victory(_)));
        assert!(report.turns < ctx.config.max_turns);
        let (winner, loser) = match report.outcome {
            BattleOutcome::Victory(Side::A) => (&a, &b),
            _ => (&b, &a),
        };
        assert!(winner.hp() > 0);
        assert!(loser.hp() <= 0);
        assert_eq!(report.winner.as_deref(), Some(winner.name()));
    }

    #[test]
    fn test_second_battle_starts_from_base_stats() {
        let config = ArenaConfig {
            max_turns: 3,
            ..ArenaConfig::default()
        };
        // Every roll is 1: every strike lands and Bolster always procs
        let mut ctx = ArenaContext::with_dice(config, ScriptedDice::new().with_fallback_d100(1));
        let mut a = fighter("A", StatBlock::uniform(10), &mut ctx);
        a.learn_passive(PassiveSkillId::BoostStrength, &mut ctx);
        let wall = StatBlock {
            hp: 1000,
            ..StatBlock::uniform(10)
        };
        let mut b = fighter("B", wall, &mut ctx);

        run_battle(&mut a, &mut b, &mut ctx).unwrap();
        assert!(a.stats().strength > a.base_stats().strength);

        let second_start = ctx.log.len();
        run_battle(&mut a, &mut b, &mut ctx).unwrap();

        let first_hit = ctx.log.events()[second_start..]
            .iter()
            .find_map(|e| match &e.kind {
                EventKind::AttackResolved(report) if report.attacker == "A" => Some(report),
                _ => None,
            })
            .unwrap();
        // One Bolster proc on top of base Strength 10
        assert!(matches!(first_hit.result, HitResult::Hit { raw_damage: 12, .. }));
    }

    #[test]
    fn test_extreme_speed_saturates_delta() {
        let config = ArenaConfig {
            max_turns: 4,
            ..ArenaConfig::default()
        };
        let mut ctx = ArenaContext::with_dice(config, ScriptedDice::new());
        let blur = StatBlock {
            speed: i32::MAX,
            ..StatBlock::uniform(10)
        };
        // -2 - MAX would underflow the starting delta
        let crawl = StatBlock {
            hp: 1000,
            speed: -2,
            ..StatBlock::uniform(10)
        };
        let mut a = fighter("Crawl", crawl, &mut ctx);
        let mut b = fighter("Blur", blur, &mut ctx);

        let report = run_battle(&mut a, &mut b, &mut ctx).unwrap();

        assert_eq!(report.turns, 4);
        // Delta pinned at i32::MIN: Blur keeps the initiative
        assert_eq!(turn_order(&ctx), vec!["Blur", "Blur", "Blur", "Blur"]);
    }
}
