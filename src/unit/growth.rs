//! Experience, level-ups and randomized stat growth
//!
//! Each stat grows independently: a d100 under the growth rate adds to
//! the base stat, and a failed roll gets a second chance against Luck.

use crate::combat::events::EventKind;
use crate::core::context::ArenaContext;
use crate::core::dice::Dice;
use crate::core::types::{Stat, StatBlock};
use crate::unit::Unit;

/// Deal the multipliers 1..=8 to the eight stats in random order
///
/// Every unit gets one stat at each of `default_growth * 1` through
/// `default_growth * 8`.
pub fn roll_growth_rates(default_growth: i32, dice: &mut dyn Dice) -> StatBlock {
    let mut multipliers: Vec<i32> = (1..=8).collect();
    let mut growth = StatBlock::default();

    for stat in Stat::ALL {
        let pick = dice.pick_index(multipliers.len());
        let multiplier = multipliers.remove(pick);
        growth.set(stat, default_growth * multiplier);
    }

    growth
}

impl Unit {
    /// Add experience, levelling up as many times as it covers
    pub fn gain_xp(&mut self, amount: i64, ctx: &mut ArenaContext) {
        self.xp_to_next_level -= amount;
        while self.xp_to_next_level <= 0 {
            self.xp_to_next_level += self.xp_per_level;
            self.level_up(ctx);
        }
    }

    pub(crate) fn level_up(&mut self, ctx: &mut ArenaContext) {
        let from = self.level;
        self.level += 1;
        ctx.emit(EventKind::LevelUp {
            unit: self.name.clone(),
            from,
            to: self.level,
        });

        if self.level % ctx.config.slot_cadence == 0 {
            self.max_active_skills += 1;
            self.max_passive_skills += 1;
            ctx.emit(EventKind::SkillSlotsIncreased {
                unit: self.name.clone(),
                active_slots: self.max_active_skills,
                passive_slots: self.max_passive_skills,
            });
        }

        if self.level % ctx.config.active_learn_cadence == 0 {
            self.learn_random_active(ctx);
        }

        if self.level % ctx.config.passive_learn_cadence == 0 {
            self.learn_random_passive(ctx);
        }

        for stat in Stat::ALL {
            self.roll_stat_growth(stat, ctx);
        }

        ctx.emit(EventKind::BaseStats {
            unit: self.name.clone(),
            stats: self.base,
        });

        self.reset_current_stats();

        debug_assert!(self.active_skills.len() <= self.max_active_skills);
        debug_assert!(self.passive_skills.len() <= self.max_passive_skills);
    }

    /// Growth roll, then a luck roll if the growth roll failed
    fn roll_stat_growth(&mut self, stat: Stat, ctx: &mut ArenaContext) {
        let growth_rate = self.growth.get(stat);

        let roll = ctx.roll_d100();
        let (gained, lucky, roll) = if roll <= growth_rate {
            (true, false, roll)
        } else {
            let luck_roll = ctx.roll_d100();
            (luck_roll <= self.current.luck, true, luck_roll)
        };

        if !gained {
            return;
        }

        let from = self.base.get(stat);
        let to = from + stat.growth_step();
        self.base.set(stat, to);
        ctx.emit(EventKind::StatGrowth {
            unit: self.name.clone(),
            stat,
            from,
            to,
            growth_rate,
            roll,
            lucky,
        });
    }

    /// No-op when every active skill is already known
    fn learn_random_active(&mut self, ctx: &mut ArenaContext) {
        if self.active_available.is_empty() {
            return;
        }
        let pick = ctx.dice().pick_index(self.active_available.len());
        let id = self.active_available[pick];
        self.learn_active(id, ctx);
    }

    /// No-op when every passive skill is already known
    fn learn_random_passive(&mut self, ctx: &mut ArenaContext) {
        if self.passive_available.is_empty() {
            return;
        }
        let pick = ctx.dice().pick_index(self.passive_available.len());
        let id = self.passive_available[pick];
        self.learn_passive(id, ctx);
    }
}
