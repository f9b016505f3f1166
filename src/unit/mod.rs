//! Combatants: stats, progression and learned skills
//!
//! A unit is mutated by level-ups (stat growth, skill learning) and by
//! battle turns (cooldowns, HP, passive stat boosts). All rolls and
//! reports go through the [`ArenaContext`] passed in.

pub mod attack;
pub mod growth;
pub mod passive;

pub use attack::{base_hit_chance, crit_chance, dodge_chance, IncomingAttack};
pub use growth::roll_growth_rates;
pub use passive::proc_chance;

use crate::combat::events::EventKind;
use crate::core::config::ArenaConfig;
use crate::core::context::ArenaContext;
use crate::core::types::{Stat, StatBlock};
use crate::skills::{ActiveSkill, ActiveSkillId, PassiveSkill, PassiveSkillId, SkillId};

#[derive(Debug, Clone)]
pub struct Unit {
    name: String,
    level: u32,
    xp_per_level: i64,
    /// May dip to zero or below inside `gain_xp` before rolling over
    xp_to_next_level: i64,
    /// Only ever grows
    base: StatBlock,
    /// Reset to `base` on level-up and at battle start; HP carries damage
    current: StatBlock,
    growth: StatBlock,
    max_active_skills: usize,
    max_passive_skills: usize,
    active_skills: Vec<ActiveSkill>,
    passive_skills: Vec<PassiveSkill>,
    /// Not yet learned, in catalog order
    active_available: Vec<ActiveSkillId>,
    passive_available: Vec<PassiveSkillId>,
}

/// Level-0 base stats from config: HP is doubled
pub fn starting_stats(config: &ArenaConfig) -> StatBlock {
    let mut stats = StatBlock::uniform(config.default_stat);
    stats.hp = config.default_stat * config.hp_multiplier;
    stats
}

impl Unit {
    /// Create a unit, level it up once and grant a basic attack matching
    /// whichever of Strength and Magic is higher (Magic on ties)
    pub fn new(name: impl Into<String>, ctx: &mut ArenaContext) -> Self {
        let base = starting_stats(&ctx.config);
        let growth = roll_growth_rates(ctx.config.default_growth, ctx.dice());
        let mut unit = Self::with_stats(name, base, growth, &ctx.config);

        ctx.emit(EventKind::UnitCreated {
            unit: unit.name.clone(),
        });

        unit.level_up(ctx);

        let basic = if unit.current.strength > unit.current.magic {
            ActiveSkillId::BasicMelee
        } else {
            ActiveSkillId::BasicMagic
        };
        unit.learn_active(basic, ctx);
        debug_assert!(unit.has_basic_attack());

        unit
    }

    /// A level-0 unit with the given stats and no skills
    ///
    /// Nothing is rolled and nothing is reported. Callers must teach a
    /// basic attack before the unit fights.
    pub fn with_stats(
        name: impl Into<String>,
        base: StatBlock,
        growth: StatBlock,
        config: &ArenaConfig,
    ) -> Self {
        Self {
            name: name.into(),
            level: 0,
            xp_per_level: config.xp_per_level,
            xp_to_next_level: config.xp_per_level,
            base,
            current: base,
            growth,
            max_active_skills: config.starting_active_slots,
            max_passive_skills: config.starting_passive_slots,
            active_skills: Vec::new(),
            passive_skills: Vec::new(),
            active_available: ActiveSkillId::ALL.to_vec(),
            passive_available: PassiveSkillId::ALL.to_vec(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn xp_to_next_level(&self) -> i64 {
        self.xp_to_next_level
    }

    pub fn base_stats(&self) -> &StatBlock {
        &self.base
    }

    /// Current (in-battle) stats
    pub fn stats(&self) -> &StatBlock {
        &self.current
    }

    pub fn growth_rates(&self) -> &StatBlock {
        &self.growth
    }

    pub fn stat(&self, stat: Stat) -> i32 {
        self.current.get(stat)
    }

    pub fn hp(&self) -> i32 {
        self.current.hp
    }

    pub fn max_hp(&self) -> i32 {
        self.base.hp
    }

    pub fn is_alive(&self) -> bool {
        self.current.hp > 0
    }

    pub fn active_skills(&self) -> &[ActiveSkill] {
        &self.active_skills
    }

    pub fn passive_skills(&self) -> &[PassiveSkill] {
        &self.passive_skills
    }

    pub fn active_slots(&self) -> usize {
        self.max_active_skills
    }

    pub fn passive_slots(&self) -> usize {
        self.max_passive_skills
    }

    pub fn unlearned_active(&self) -> &[ActiveSkillId] {
        &self.active_available
    }

    pub fn unlearned_passive(&self) -> &[PassiveSkillId] {
        &self.passive_available
    }

    pub fn has_basic_attack(&self) -> bool {
        self.active_skills.iter().any(|s| {
            matches!(s.id(), ActiveSkillId::BasicMelee | ActiveSkillId::BasicMagic)
        })
    }

    /// Learn an active skill if it is still unlearned and a slot is free
    pub fn learn_active(&mut self, id: ActiveSkillId, ctx: &mut ArenaContext) -> bool {
        let Some(pos) = self.active_available.iter().position(|&a| a == id) else {
            return false;
        };
        if self.active_skills.len() >= self.max_active_skills {
            return false;
        }

        self.active_available.remove(pos);
        self.active_skills.push(ActiveSkill::new(id));
        ctx.emit(EventKind::SkillLearned {
            unit: self.name.clone(),
            skill: SkillId::Active(id),
            name: id.name().to_string(),
        });
        true
    }

    /// Learn a passive skill if it is still unlearned and a slot is free
    pub fn learn_passive(&mut self, id: PassiveSkillId, ctx: &mut ArenaContext) -> bool {
        let Some(pos) = self.passive_available.iter().position(|&p| p == id) else {
            return false;
        };
        if self.passive_skills.len() >= self.max_passive_skills {
            return false;
        }

        self.passive_available.remove(pos);
        self.passive_skills.push(PassiveSkill::new(id));
        ctx.emit(EventKind::SkillLearned {
            unit: self.name.clone(),
            skill: SkillId::Passive(id),
            name: id.name().to_string(),
        });
        true
    }

    /// Start of this unit's turn
    pub fn next_turn(&mut self) {
        self.tick_all_cooldowns();
    }

    fn tick_all_cooldowns(&mut self) {
        for skill in &mut self.active_skills {
            skill.tick_cooldown();
        }
        for skill in &mut self.passive_skills {
            skill.tick_cooldown();
        }
    }

    /// Drop last battle's boosts and cooldowns. HP keeps its damage.
    pub fn prepare_for_battle(&mut self) {
        let hp = self.current.hp;
        self.reset_current_stats();
        self.current.hp = hp;
    }

    /// Copy base stats over current stats and clear every cooldown
    fn reset_current_stats(&mut self) {
        self.current = self.base;
        for skill in &mut self.active_skills {
            skill.reset_cooldown();
        }
        for skill in &mut self.passive_skills {
            skill.reset_cooldown();
        }
    }

    /// Set a current stat and report the change
    fn change_stat(&mut self, stat: Stat, value: i32, source: &str, ctx: &mut ArenaContext) {
        let from = self.current.get(stat);
        self.current.set(stat, value);
        ctx.emit(EventKind::StatChanged {
            unit: self.name.clone(),
            stat,
            from,
            to: value,
            source: source.to_string(),
        });
    }
}
