//! Passive proc engine
//!
//! Offensive passives roll before the owner attacks, defensive ones before
//! each strike the owner receives. Passives are rolled one at a time in
//! learned order, so an earlier proc can raise the chance of a later one.

use crate::combat::events::EventKind;
use crate::core::context::ArenaContext;
use crate::core::types::{multiply_stat, Rounding, Stat, StatBlock};
use crate::skills::{PassiveEffect, PassiveSkillDef, Trigger};
use crate::unit::Unit;

/// `Skill * coefficient * (1 + Luck / 100)`, rounded up
pub fn proc_chance(stats: &StatBlock, skill_coefficient: f64) -> i32 {
    let luck_factor = 1.0 + stats.luck as f64 / 100.0;
    multiply_stat(stats.skill, skill_coefficient * luck_factor, Rounding::Up)
}

impl Unit {
    /// Roll every ready passive with the given trigger
    pub fn trigger_passives(&mut self, trigger: Trigger, ctx: &mut ArenaContext) {
        for i in 0..self.passive_skills.len() {
            let skill = &self.passive_skills[i];
            if skill.def().trigger != trigger || !skill.is_ready() {
                continue;
            }
            let def = skill.def();

            let chance = proc_chance(&self.current, def.skill_coefficient);
            let roll = ctx.roll_d100();
            let procced = roll <= chance;

            ctx.emit(EventKind::PassiveRolled {
                unit: self.name.clone(),
                skill: def.id,
                name: def.name.to_string(),
                trigger,
                chance,
                roll,
                procced,
            });

            if procced {
                self.passive_skills[i].use_skill();
                self.apply_passive_effect(def, ctx);
            }
        }
    }

    fn apply_passive_effect(&mut self, def: &'static PassiveSkillDef, ctx: &mut ArenaContext) {
        match def.effect {
            PassiveEffect::Boost { stats, factor } => {
                for &stat in stats {
                    let value = multiply_stat(self.current.get(stat), factor, Rounding::Up);
                    self.change_stat(stat, value, def.name, ctx);
                }
            }
            PassiveEffect::Sacrifice {
                hp_factor,
                boost_factor,
            } => {
                // Never kills the caster
                let hp = multiply_stat(self.current.hp, hp_factor, Rounding::Down).max(1);
                self.change_stat(Stat::Hp, hp, def.name, ctx);

                for stat in Stat::ALL.into_iter().filter(|&s| s != Stat::Hp) {
                    let value = multiply_stat(self.current.get(stat), boost_factor, Rounding::Up);
                    self.change_stat(stat, value, def.name, ctx);
                }
            }
            PassiveEffect::Rally {
                hp_fraction,
                luck_factor,
            } => {
                let heal = multiply_stat(self.base.hp, hp_fraction, Rounding::Up);
                self.change_stat(Stat::Hp, self.current.hp.saturating_add(heal), def.name, ctx);

                let luck = multiply_stat(self.current.luck, luck_factor, Rounding::Up);
                self.change_stat(Stat::Luck, luck, def.name, ctx);
            }
            // Buffs and debuffs are not modeled yet
            PassiveEffect::Block | PassiveEffect::Cleanse => {}
        }
    }
}
