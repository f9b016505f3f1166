//! Attack resolution: skill selection, hit/dodge, crits and mitigation
//!
//! Flow for one cast:
//! 1. `next_attack` picks a castable skill and starts its cooldown
//! 2. `initial_attack` rolls offensive passives and dispatches on the
//!    skill's execution (strike N times, haste, purify)
//! 3. each strike builds an [`IncomingAttack`] that the defender resolves
//!    against its own stats in `incoming_attack`

use crate::combat::events::{AttackReport, EventKind, HitResult};
use crate::core::context::ArenaContext;
use crate::core::error::{ArenaError, Result};
use crate::core::types::{multiply_stat, Rounding, Stat, StatBlock};
use crate::skills::{
    castable_indices, ActiveSkillDef, ActiveSkillId, Execution, Mitigation, Trigger,
};
use crate::unit::Unit;

/// Above this net hit chance the hit roll is the mean of two d100s
pub const DOUBLE_ROLL_THRESHOLD: i32 = 50;

/// `2 * (Speed + 1.5 Skill + 0.5 Luck)`, each product rounded up
pub fn base_hit_chance(stats: &StatBlock) -> i32 {
    stats
        .speed
        .saturating_add(multiply_stat(stats.skill, 1.5, Rounding::Up))
        .saturating_add(multiply_stat(stats.luck, 0.5, Rounding::Up))
        .saturating_mul(2)
}

/// `1.5 Speed + Skill + 0.5 Luck`, products rounded up
pub fn dodge_chance(stats: &StatBlock) -> i32 {
    multiply_stat(stats.speed, 1.5, Rounding::Up)
        .saturating_add(stats.skill)
        .saturating_add(multiply_stat(stats.luck, 0.5, Rounding::Up))
}

/// `Skill + c * Luck`. Used both to land crits and to avoid them.
pub fn crit_chance(stats: &StatBlock, luck_coefficient: f64) -> i32 {
    stats
        .skill
        .saturating_add(multiply_stat(stats.luck, luck_coefficient, Rounding::Up))
}

/// A strike as seen by the defender
#[derive(Debug, Clone)]
pub struct IncomingAttack {
    pub attacker: String,
    pub skill: ActiveSkillId,
    /// Skill accuracy plus the attacker's base hit chance
    pub hit_chance: i32,
    /// Attacker's crit chance before the defender's avoidance
    pub crit_chance: i32,
    /// Scaled damage before mitigation
    pub damage: i32,
    pub mitigation: Mitigation,
}

impl Unit {
    /// Pick a castable active skill at random and start its cooldown
    ///
    /// Basic attacks are always castable, so an empty pool means the
    /// unit's skill set is broken.
    pub fn next_attack(&mut self, ctx: &mut ArenaContext) -> Result<ActiveSkillId> {
        let candidates = castable_indices(&self.active_skills);
        if candidates.is_empty() {
            return Err(ArenaError::NoEligibleSkill {
                unit: self.name.clone(),
            });
        }

        let chosen = candidates[ctx.dice().pick_index(candidates.len())];
        let skill = &mut self.active_skills[chosen];
        skill.use_skill();
        let id = skill.id();

        ctx.emit(EventKind::SkillActivated {
            unit: self.name.clone(),
            skill: id,
            name: id.name().to_string(),
        });

        Ok(id)
    }

    /// Cast `skill` at `target`
    pub fn initial_attack(
        &mut self,
        skill: ActiveSkillId,
        target: &mut Unit,
        ctx: &mut ArenaContext,
    ) {
        self.trigger_passives(Trigger::Offensive, ctx);

        let def = skill.definition();
        match def.execution {
            Execution::Strike { hits } => {
                for _ in 0..hits {
                    self.outgoing_attack(def, target, ctx);
                }
            }
            Execution::Haste { speed_multiplier } => {
                let speed = multiply_stat(self.current.speed, speed_multiplier, Rounding::Up);
                self.change_stat(Stat::Speed, speed, def.name, ctx);
                // Extra tick on top of the turn's own, Hasten included
                self.tick_all_cooldowns();
            }
            // Nothing to purify until debuffs exist
            Execution::Purify => {}
        }
    }

    /// Start of turn, pick a skill and cast it at `target`
    pub fn take_turn(
        &mut self,
        target: &mut Unit,
        ctx: &mut ArenaContext,
    ) -> Result<ActiveSkillId> {
        self.next_turn();
        let skill = self.next_attack(ctx)?;
        self.initial_attack(skill, target, ctx);
        Ok(skill)
    }

    fn outgoing_attack(&self, def: &ActiveSkillDef, target: &mut Unit, ctx: &mut ArenaContext) {
        let scaling = self.current.get(def.scaling.stat());
        let attack = IncomingAttack {
            attacker: self.name.clone(),
            skill: def.id,
            hit_chance: def.accuracy.saturating_add(base_hit_chance(&self.current)),
            crit_chance: crit_chance(&self.current, ctx.config.crit_luck_coefficient),
            damage: multiply_stat(scaling, def.damage_multiplier, Rounding::Up),
            mitigation: def.mitigation,
        };
        target.incoming_attack(&attack, ctx);
    }

    /// Resolve a strike against this unit and apply its damage
    pub fn incoming_attack(
        &mut self,
        attack: &IncomingAttack,
        ctx: &mut ArenaContext,
    ) -> AttackReport {
        self.trigger_passives(Trigger::Defensive, ctx);

        let dodge = dodge_chance(&self.current);
        let crit_avoid = crit_chance(&self.current, ctx.config.crit_luck_coefficient);

        let net_hit_chance = attack.hit_chance.saturating_sub(dodge).max(0);
        let mut hit_roll = ctx.roll_d100();
        if net_hit_chance > DOUBLE_ROLL_THRESHOLD {
            hit_roll = (hit_roll + ctx.roll_d100()) / 2;
        }

        let (result, damage) = if hit_roll <= net_hit_chance {
            let bonus_crit = net_hit_chance.saturating_sub(100).max(0);
            let final_crit = attack
                .crit_chance
                .saturating_sub(crit_avoid)
                .saturating_add(bonus_crit);
            let crit_roll = ctx.roll_d100();

            if crit_roll <= final_crit {
                (
                    HitResult::Critical {
                        crit_chance: final_crit,
                        crit_roll,
                        raw_damage: attack.damage,
                    },
                    attack.damage,
                )
            } else {
                let mitigation = self.current.get(attack.mitigation.stat());
                (
                    HitResult::Hit {
                        crit_chance: final_crit,
                        crit_roll,
                        raw_damage: attack.damage,
                        mitigation,
                    },
                    attack.damage.saturating_sub(mitigation).max(0),
                )
            }
        } else {
            (HitResult::Miss, 0)
        };

        let hp_before = self.current.hp;
        if damage > 0 {
            self.current.hp = self.current.hp.saturating_sub(damage);
        }

        let report = AttackReport {
            attacker: attack.attacker.clone(),
            defender: self.name.clone(),
            skill: attack.skill,
            skill_name: attack.skill.name().to_string(),
            hit_chance: attack.hit_chance,
            dodge_chance: dodge,
            net_hit_chance,
            hit_roll,
            result,
            damage,
            hp_before,
            hp_after: self.current.hp,
            max_hp: self.base.hp,
        };
        ctx.emit(EventKind::AttackResolved(report.clone()));

        if damage > 0 && !self.is_alive() {
            ctx.emit(EventKind::UnitSlain {
                unit: self.name.clone(),
                overkill: self.current.hp,
            });
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ArenaConfig;
    use crate::core::dice::ScriptedDice;
    use crate::skills::{ActiveSkill, PassiveSkillId};

    fn unit_with(name: &str, stats: StatBlock, config: &ArenaConfig) -> Unit {
        Unit::with_stats(name, stats, StatBlock::uniform(0), config)
    }

    fn incoming(hit_chance: i32, crit_chance: i32, damage: i32) -> IncomingAttack {
        IncomingAttack {
            attacker: "Attacker".into(),
            skill: ActiveSkillId::BasicMelee,
            hit_chance,
            crit_chance,
            damage,
            mitigation: Mitigation::Defense,
        }
    }

    #[test]
    fn test_formulas_default_stats() {
        let stats = StatBlock::uniform(10);
        // 2 * (10 + 15 + 5)
        assert_eq!(base_hit_chance(&stats), 60);
        // 15 + 10 + 5
        assert_eq!(dodge_chance(&stats), 30);
        assert_eq!(crit_chance(&stats, 0.5), 15);
        assert_eq!(crit_chance(&stats, 0.25), 13);
    }

    #[test]
    fn test_formulas_round_up() {
        let stats = StatBlock {
            speed: 7,
            skill: 7,
            luck: 7,
            ..StatBlock::default()
        };
        // 2 * (7 + 11 + 4)
        assert_eq!(base_hit_chance(&stats), 44);
        // 11 + 7 + 4
        assert_eq!(dodge_chance(&stats), 22);
    }

    #[test]
    fn test_normal_hit_is_mitigated() {
        let config = ArenaConfig::default();
        // Net 40 -> single hit roll 10, crit roll 100
        let dice = ScriptedDice::new().with_d100([10, 100]);
        let mut ctx = ArenaContext::with_dice(config.clone(), dice);
        let mut defender = unit_with("Defender", StatBlock::uniform(10), &config);

        let report = defender.incoming_attack(&incoming(70, 15, 14), &mut ctx);

        assert_eq!(report.net_hit_chance, 40);
        assert_eq!(report.damage, 4);
        assert_eq!(defender.hp(), 6);
        assert!(report.connected());
        assert!(!report.is_critical());
    }

    #[test]
    fn test_high_accuracy_averages_two_rolls() {
        let config = ArenaConfig::default();
        // Net 70 > 50: (61 + 80) / 2 = 70 -> hit
        let dice = ScriptedDice::new().with_d100([61, 80, 100]);
        let mut ctx = ArenaContext::with_dice(config.clone(), dice);
        let mut defender = unit_with("Defender", StatBlock::uniform(10), &config);

        let report = defender.incoming_attack(&incoming(100, 0, 12), &mut ctx);

        assert_eq!(report.hit_roll, 70);
        assert!(report.connected());
    }

    #[test]
    fn test_net_hit_chance_floored_at_zero() {
        let config = ArenaConfig::default();
        let dice = ScriptedDice::new().with_d100([1]);
        let mut ctx = ArenaContext::with_dice(config.clone(), dice);
        let mut defender = unit_with("Defender", StatBlock::uniform(10), &config);

        let report = defender.incoming_attack(&incoming(-40, 100, 50), &mut ctx);

        assert_eq!(report.net_hit_chance, 0);
        assert_eq!(report.result, HitResult::Miss);
        assert_eq!(defender.hp(), 10);
    }

    #[test]
    fn test_crit_ignores_mitigation() {
        let config = ArenaConfig::default();
        let dice = ScriptedDice::new().with_d100([1, 1]);
        let mut ctx = ArenaContext::with_dice(config.clone(), dice);
        let mut defender = unit_with(
            "Wall",
            StatBlock {
                hp: 100,
                defense: 50,
                ..StatBlock::default()
            },
            &config,
        );

        let report = defender.incoming_attack(&incoming(40, 30, 20), &mut ctx);

        assert!(report.is_critical());
        assert_eq!(report.damage, 20);
        assert_eq!(defender.hp(), 80);
    }

    #[test]
    fn test_overflow_accuracy_feeds_crit() {
        let config = ArenaConfig::default();
        // Net 130 -> bonus 30; crit base 0 - avoid 0 + 30
        let dice = ScriptedDice::new().with_d100([100, 100, 30]);
        let mut ctx = ArenaContext::with_dice(config.clone(), dice);
        let open = StatBlock {
            hp: 50,
            ..StatBlock::default()
        };
        let mut defender = unit_with("Defender", open, &config);

        let report = defender.incoming_attack(&incoming(130, 0, 9), &mut ctx);

        assert!(matches!(report.result, HitResult::Critical { crit_chance: 30, .. }));
    }

    #[test]
    fn test_slain_event_reports_overkill() {
        let config = ArenaConfig::default();
        let dice = ScriptedDice::new().with_d100([1, 100]);
        let mut ctx = ArenaContext::with_dice(config.clone(), dice);
        let frail = StatBlock {
            hp: 3,
            ..StatBlock::default()
        };
        let mut defender = unit_with("Frail", frail, &config);

        defender.incoming_attack(&incoming(40, 0, 8), &mut ctx);

        assert!(!defender.is_alive());
        assert!(ctx
            .log
            .events()
            .iter()
            .any(|e| matches!(e.kind, EventKind::UnitSlain { overkill: -5, .. })));
    }

    #[test]
    fn test_next_attack_sets_cooldown() {
        let config = ArenaConfig::default();
        let dice = ScriptedDice::new().with_picks([1]);
        let mut ctx = ArenaContext::with_dice(config.clone(), dice);
        let mut unit = unit_with("Caster", StatBlock::uniform(10), &config);
        unit.learn_active(ActiveSkillId::BasicMagic, &mut ctx);
        unit.learn_active(ActiveSkillId::StrongMagic, &mut ctx);

        let picked = unit.next_attack(&mut ctx).unwrap();

        assert_eq!(picked, ActiveSkillId::StrongMagic);
        assert_eq!(unit.active_skills()[1].remaining_cooldown(), 3);
    }

    #[test]
    fn test_next_attack_without_skills_fails() {
        let config = ArenaConfig::default();
        let mut ctx = ArenaContext::seeded(config.clone(), 1);
        let mut unit = unit_with("Empty", StatBlock::uniform(10), &config);

        let err = unit.next_attack(&mut ctx).unwrap_err();
        assert!(matches!(err, ArenaError::NoEligibleSkill { .. }));
    }

    #[test]
    fn test_double_strike_resolves_twice() {
        let config = ArenaConfig::default();
        let mut ctx = ArenaContext::with_dice(config.clone(), ScriptedDice::new());
        let mut attacker = unit_with("Twin", StatBlock::uniform(10), &config);
        let mut target = unit_with("Target", StatBlock::uniform(10), &config);

        attacker.initial_attack(ActiveSkillId::DoubleMelee, &mut target, &mut ctx);

        assert_eq!(ctx.log.attacks().count(), 2);
    }

    #[test]
    fn test_hasten_boosts_speed_and_ticks_cooldowns() {
        let config = ArenaConfig::default();
        let mut ctx = ArenaContext::with_dice(config.clone(), ScriptedDice::new());
        let mut caster = unit_with("Quick", StatBlock::uniform(10), &config);
        let mut target = unit_with("Target", StatBlock::uniform(10), &config);
        caster.max_active_skills = 3;
        caster.learn_active(ActiveSkillId::BasicMelee, &mut ctx);
        caster.learn_active(ActiveSkillId::StrongMelee, &mut ctx);
        caster.learn_passive(PassiveSkillId::Cleanse, &mut ctx);
        caster.active_skills[1].use_skill();
        caster.passive_skills[0].use_skill();

        caster.initial_attack(ActiveSkillId::Hasten, &mut target, &mut ctx);

        assert_eq!(caster.stats().speed, 12);
        assert_eq!(caster.active_skills()[1].remaining_cooldown(), 2);
        assert_eq!(caster.passive_skills()[0].remaining_cooldown(), 1);
        assert_eq!(ctx.log.attacks().count(), 0);
        assert_eq!(target.hp(), 10);
    }

    #[test]
    fn test_purify_does_nothing() {
        let config = ArenaConfig::default();
        let mut ctx = ArenaContext::with_dice(config.clone(), ScriptedDice::new());
        let mut caster = unit_with("Cleric", StatBlock::uniform(10), &config);
        let mut target = unit_with("Target", StatBlock::uniform(10), &config);
        let before = *caster.stats();

        caster.initial_attack(ActiveSkillId::Purify, &mut target, &mut ctx);

        assert_eq!(*caster.stats(), before);
        assert_eq!(target.hp(), 10);
        assert!(ctx.log.is_empty());
    }

    #[test]
    fn test_take_turn_ticks_before_selecting() {
        let config = ArenaConfig::default();
        let mut ctx = ArenaContext::with_dice(config.clone(), ScriptedDice::new().with_picks([1]));
        let mut unit = unit_with("Turner", StatBlock::uniform(10), &config);
        let mut target = unit_with("Target", StatBlock::uniform(10), &config);
        unit.active_skills.push(ActiveSkill::new(ActiveSkillId::BasicMelee));
        unit.active_skills.push(ActiveSkill::new(ActiveSkillId::StrongMelee));
        unit.active_skills[1].use_skill();
        unit.active_skills[1].tick_cooldown();
        unit.active_skills[1].tick_cooldown();

        // One turn left: next_turn clears it, so index 1 is castable
        let picked = unit.take_turn(&mut target, &mut ctx).unwrap();
        assert_eq!(picked, ActiveSkillId::StrongMelee);
    }

    #[test]
    fn test_defensive_passive_rolls_before_each_strike() {
        let config = ArenaConfig::default();
        // Strike 1: Fortune fails (90 > 6), hit misses.
        // Strike 2: Fortune procs (3 <= 6), hit misses.
        let dice = ScriptedDice::new().with_d100([90, 100, 3, 100]);
        let mut ctx = ArenaContext::with_dice(config.clone(), dice);
        let mut attacker = unit_with("Twin", StatBlock::uniform(10), &config);
        let sturdy = StatBlock {
            hp: 30,
            ..StatBlock::uniform(10)
        };
        let mut defender = unit_with("Lucky", sturdy, &config);
        defender.learn_passive(PassiveSkillId::ReactiveLuck, &mut ctx);
        defender.current.hp = 10;
        let start = ctx.log.len();

        attacker.initial_attack(ActiveSkillId::DoubleMelee, &mut defender, &mut ctx);

        let sequence: Vec<&str> = ctx.log.events()[start..]
            .iter()
            .filter_map(|e| match &e.kind {
                EventKind::PassiveRolled { procced: false, .. } => Some("fail"),
                EventKind::PassiveRolled { procced: true, .. } => Some("proc"),
                EventKind::AttackResolved(_) => Some("strike"),
                _ => None,
            })
            .collect();
        assert_eq!(sequence, vec!["fail", "strike", "proc", "strike"]);

        // Heal of ceil(30 * 0.2) and luck 10 -> 12 land before the second strike
        assert_eq!(defender.hp(), 16);
        let reports: Vec<_> = ctx.log.attacks().collect();
        assert_eq!(reports[0].dodge_chance, 30);
        assert_eq!(reports[1].dodge_chance, 31);
    }

    #[test]
    fn test_extreme_stats_saturate() {
        let huge = StatBlock::uniform(i32::MAX);
        assert_eq!(base_hit_chance(&huge), i32::MAX);
        assert_eq!(dodge_chance(&huge), i32::MAX);
        assert_eq!(crit_chance(&huge, 0.5), i32::MAX);

        let config = ArenaConfig::default();
        let mut ctx = ArenaContext::with_dice(config.clone(), ScriptedDice::new());
        let wreck = StatBlock {
            hp: 100,
            ..StatBlock::uniform(i32::MIN)
        };
        let mut defender = unit_with("Wreck", wreck, &config);

        let report = defender.incoming_attack(&incoming(i32::MAX, i32::MAX, 10), &mut ctx);

        assert_eq!(report.net_hit_chance, i32::MAX);
        assert!(report.is_critical());
        assert_eq!(defender.hp(), 90);
    }
}
