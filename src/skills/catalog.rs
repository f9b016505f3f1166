//! Static skill definitions - the global catalog all units reference
//!
//! Tuning lives only here. Runtime state (cooldowns) lives in
//! [`crate::skills::instance`].

use serde::{Deserialize, Serialize};

use crate::core::error::{ArenaError, Result};
use crate::core::types::Stat;

/// Identifiers of every active skill, in catalog order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActiveSkillId {
    /// Basic melee auto
    BasicMelee,
    /// Basic magic auto
    BasicMagic,
    StrongMelee,
    StrongMagic,
    /// Melee twice at an accuracy penalty
    DoubleMelee,
    /// Magic twice at an accuracy penalty
    DoubleMagic,
    MagicBurning,
    MagicPoison,
    MeleeBleeding,
    /// Cut own cooldowns and gain speed
    Hasten,
    /// Remove debuffs (debuffs do not exist yet)
    Purify,
}

impl ActiveSkillId {
    pub const ALL: [ActiveSkillId; 11] = [
        ActiveSkillId::BasicMelee,
        ActiveSkillId::BasicMagic,
        ActiveSkillId::StrongMelee,
        ActiveSkillId::StrongMagic,
        ActiveSkillId::DoubleMelee,
        ActiveSkillId::DoubleMagic,
        ActiveSkillId::MagicBurning,
        ActiveSkillId::MagicPoison,
        ActiveSkillId::MeleeBleeding,
        ActiveSkillId::Hasten,
        ActiveSkillId::Purify,
    ];

    pub fn definition(self) -> &'static ActiveSkillDef {
        &ACTIVE_SKILLS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.definition().name
    }
}

/// Identifiers of every passive skill, in catalog order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PassiveSkillId {
    BoostStrength,
    /// Chance to block the next hit
    ProtectAll,
    BoostMagic,
    /// Trade health for every other stat
    Sacrifice,
    BoostSkill,
    /// Cure the worst debuff
    Cleanse,
    /// Heal and gain luck when attacked
    ReactiveLuck,
}

impl PassiveSkillId {
    pub const ALL: [PassiveSkillId; 7] = [
        PassiveSkillId::BoostStrength,
        PassiveSkillId::ProtectAll,
        PassiveSkillId::BoostMagic,
        PassiveSkillId::Sacrifice,
        PassiveSkillId::BoostSkill,
        PassiveSkillId::Cleanse,
        PassiveSkillId::ReactiveLuck,
    ];

    pub fn definition(self) -> &'static PassiveSkillDef {
        &PASSIVE_SKILLS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.definition().name
    }
}

/// Either kind of skill identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillId {
    Active(ActiveSkillId),
    Passive(PassiveSkillId),
}

/// Stat that a damaging skill scales with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scaling {
    Strength,
    Magic,
}

impl Scaling {
    pub fn stat(self) -> Stat {
        match self {
            Scaling::Strength => Stat::Strength,
            Scaling::Magic => Stat::Magic,
        }
    }
}

/// Stat that reduces a non-critical hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mitigation {
    Defense,
    Resistance,
}

impl Mitigation {
    pub fn stat(self) -> Stat {
        match self {
            Mitigation::Defense => Stat::Defense,
            Mitigation::Resistance => Stat::Resistance,
        }
    }
}

/// What happens when an active skill is cast
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Execution {
    /// Run standard attack resolution `hits` times
    Strike { hits: u8 },
    /// Multiply own speed, then tick all own cooldowns one extra step
    Haste { speed_multiplier: f64 },
    /// Placeholder until debuffs exist
    Purify,
}

/// Situational gate checked on top of the cooldown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    Always,
    /// Only when some other learned active skill is on cooldown
    OtherOnCooldown,
    Never,
}

#[derive(Debug, Clone)]
pub struct ActiveSkillDef {
    pub id: ActiveSkillId,
    pub name: &'static str,
    pub cooldown: u32,
    pub damage_multiplier: f64,
    pub accuracy: i32,
    pub scaling: Scaling,
    pub mitigation: Mitigation,
    pub execution: Execution,
    pub eligibility: Eligibility,
    /// Lingering effect length. Not applied by combat yet.
    pub duration: Option<u32>,
}

/// When a passive rolls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trigger {
    /// Before the owner attacks
    Offensive,
    /// Before the owner is attacked
    Defensive,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PassiveEffect {
    /// Multiply the listed current stats, rounding up
    Boost {
        stats: &'static [Stat],
        factor: f64,
    },
    /// HP times `hp_factor` (rounded down, never below 1), every other
    /// current stat times `boost_factor` (rounded up)
    Sacrifice { hp_factor: f64, boost_factor: f64 },
    /// Heal a fraction of base HP and multiply luck
    Rally { hp_fraction: f64, luck_factor: f64 },
    /// Placeholder until buffs exist
    Block,
    /// Placeholder until debuffs exist
    Cleanse,
}

#[derive(Debug, Clone)]
pub struct PassiveSkillDef {
    pub id: PassiveSkillId,
    pub name: &'static str,
    pub cooldown: u32,
    pub trigger: Trigger,
    /// Proc chance scales with `Skill * skill_coefficient`
    pub skill_coefficient: f64,
    pub effect: PassiveEffect,
    /// Effect length. Not applied by combat yet.
    pub duration: Option<u32>,
}

/// Global active skill table, indexed by `ActiveSkillId as usize`
pub static ACTIVE_SKILLS: &[ActiveSkillDef] = &[
    ActiveSkillDef {
        id: ActiveSkillId::BasicMelee,
        name: "Basic Melee",
        cooldown: 0,
        damage_multiplier: 1.0,
        accuracy: 0,
        scaling: Scaling::Strength,
        mitigation: Mitigation::Defense,
        execution: Execution::Strike { hits: 1 },
        eligibility: Eligibility::Always,
        duration: None,
    },
    ActiveSkillDef {
        id: ActiveSkillId::BasicMagic,
        name: "Basic Magic",
        cooldown: 0,
        damage_multiplier: 1.0,
        accuracy: 0,
        scaling: Scaling::Magic,
        mitigation: Mitigation::Resistance,
        execution: Execution::Strike { hits: 1 },
        eligibility: Eligibility::Always,
        duration: None,
    },
    ActiveSkillDef {
        id: ActiveSkillId::StrongMelee,
        name: "Overpower",
        cooldown: 3,
        damage_multiplier: 1.5,
        accuracy: -10,
        scaling: Scaling::Strength,
        mitigation: Mitigation::Defense,
        execution: Execution::Strike { hits: 1 },
        eligibility: Eligibility::Always,
        duration: None,
    },
    ActiveSkillDef {
        id: ActiveSkillId::StrongMagic,
        name: "Fireball",
        cooldown: 3,
        damage_multiplier: 1.5,
        accuracy: -10,
        scaling: Scaling::Magic,
        mitigation: Mitigation::Resistance,
        execution: Execution::Strike { hits: 1 },
        eligibility: Eligibility::Always,
        duration: None,
    },
    ActiveSkillDef {
        id: ActiveSkillId::DoubleMelee,
        name: "Flurry",
        cooldown: 2,
        damage_multiplier: 1.0,
        accuracy: -25,
        scaling: Scaling::Strength,
        mitigation: Mitigation::Defense,
        execution: Execution::Strike { hits: 2 },
        eligibility: Eligibility::Always,
        duration: None,
    },
    ActiveSkillDef {
        id: ActiveSkillId::DoubleMagic,
        name: "Twin Bolt",
        cooldown: 2,
        damage_multiplier: 1.0,
        accuracy: -25,
        scaling: Scaling::Magic,
        mitigation: Mitigation::Resistance,
        execution: Execution::Strike { hits: 2 },
        eligibility: Eligibility::Always,
        duration: None,
    },
    ActiveSkillDef {
        id: ActiveSkillId::MagicBurning,
        name: "Immolate",
        cooldown: 2,
        damage_multiplier: 1.2,
        accuracy: -5,
        scaling: Scaling::Magic,
        mitigation: Mitigation::Resistance,
        execution: Execution::Strike { hits: 1 },
        eligibility: Eligibility::Always,
        duration: Some(3),
    },
    ActiveSkillDef {
        id: ActiveSkillId::MagicPoison,
        name: "Venom",
        cooldown: 2,
        damage_multiplier: 1.1,
        accuracy: 0,
        scaling: Scaling::Magic,
        mitigation: Mitigation::Resistance,
        execution: Execution::Strike { hits: 1 },
        eligibility: Eligibility::Always,
        duration: Some(3),
    },
    ActiveSkillDef {
        id: ActiveSkillId::MeleeBleeding,
        name: "Lacerate",
        cooldown: 2,
        damage_multiplier: 1.2,
        accuracy: -5,
        scaling: Scaling::Strength,
        mitigation: Mitigation::Defense,
        execution: Execution::Strike { hits: 1 },
        eligibility: Eligibility::Always,
        duration: Some(3),
    },
    ActiveSkillDef {
        id: ActiveSkillId::Hasten,
        name: "Hasten",
        cooldown: 4,
        damage_multiplier: 0.0,
        accuracy: 0,
        scaling: Scaling::Strength,
        mitigation: Mitigation::Defense,
        execution: Execution::Haste {
            speed_multiplier: 1.2,
        },
        eligibility: Eligibility::OtherOnCooldown,
        duration: None,
    },
    ActiveSkillDef {
        id: ActiveSkillId::Purify,
        name: "Purify",
        cooldown: 3,
        damage_multiplier: 0.0,
        accuracy: 0,
        scaling: Scaling::Magic,
        mitigation: Mitigation::Resistance,
        execution: Execution::Purify,
        eligibility: Eligibility::Never,
        duration: None,
    },
];

/// Global passive skill table, indexed by `PassiveSkillId as usize`
pub static PASSIVE_SKILLS: &[PassiveSkillDef] = &[
    PassiveSkillDef {
        id: PassiveSkillId::BoostStrength,
        name: "Bolster",
        cooldown: 0,
        trigger: Trigger::Offensive,
        skill_coefficient: 1.0,
        effect: PassiveEffect::Boost {
            stats: &[Stat::Strength, Stat::Defense],
            factor: 1.2,
        },
        duration: None,
    },
    PassiveSkillDef {
        id: PassiveSkillId::ProtectAll,
        name: "Deflect",
        cooldown: 1,
        trigger: Trigger::Defensive,
        skill_coefficient: 0.5,
        effect: PassiveEffect::Block,
        duration: Some(1),
    },
    PassiveSkillDef {
        id: PassiveSkillId::BoostMagic,
        name: "Study",
        cooldown: 0,
        trigger: Trigger::Offensive,
        skill_coefficient: 1.0,
        effect: PassiveEffect::Boost {
            stats: &[Stat::Magic, Stat::Resistance],
            factor: 1.2,
        },
        duration: None,
    },
    PassiveSkillDef {
        id: PassiveSkillId::Sacrifice,
        name: "Dark Pact",
        cooldown: 0,
        trigger: Trigger::Offensive,
        skill_coefficient: 0.5,
        effect: PassiveEffect::Sacrifice {
            hp_factor: 0.8,
            boost_factor: 1.1,
        },
        duration: None,
    },
    PassiveSkillDef {
        id: PassiveSkillId::BoostSkill,
        name: "Focus",
        cooldown: 1,
        trigger: Trigger::Offensive,
        skill_coefficient: 0.75,
        effect: PassiveEffect::Boost {
            stats: &[Stat::Skill, Stat::Speed],
            factor: 1.2,
        },
        duration: None,
    },
    PassiveSkillDef {
        id: PassiveSkillId::Cleanse,
        name: "Cleanse",
        cooldown: 2,
        trigger: Trigger::Defensive,
        skill_coefficient: 0.5,
        effect: PassiveEffect::Cleanse,
        duration: None,
    },
    PassiveSkillDef {
        id: PassiveSkillId::ReactiveLuck,
        name: "Fortune",
        cooldown: 2,
        trigger: Trigger::Defensive,
        skill_coefficient: 0.5,
        effect: PassiveEffect::Rally {
            hp_fraction: 0.2,
            luck_factor: 1.2,
        },
        duration: None,
    },
];

/// Result of a catalog lookup by name
#[derive(Debug, Clone, Copy)]
pub enum CatalogEntry {
    Active(&'static ActiveSkillDef),
    Passive(&'static PassiveSkillDef),
}

impl CatalogEntry {
    pub fn id(&self) -> SkillId {
        match self {
            CatalogEntry::Active(def) => SkillId::Active(def.id),
            CatalogEntry::Passive(def) => SkillId::Passive(def.id),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CatalogEntry::Active(def) => def.name,
            CatalogEntry::Passive(def) => def.name,
        }
    }

    pub fn cooldown(&self) -> u32 {
        match self {
            CatalogEntry::Active(def) => def.cooldown,
            CatalogEntry::Passive(def) => def.cooldown,
        }
    }
}

/// Look up a skill by identifier (`"DoubleMelee"`) or display name
/// (`"Flurry"`), ignoring case
pub fn lookup(name: &str) -> Result<CatalogEntry> {
    let wanted = name.trim();

    for def in ACTIVE_SKILLS {
        if format!("{:?}", def.id).eq_ignore_ascii_case(wanted)
            || def.name.eq_ignore_ascii_case(wanted)
        {
            return Ok(CatalogEntry::Active(def));
        }
    }

    for def in PASSIVE_SKILLS {
        if format!("{:?}", def.id).eq_ignore_ascii_case(wanted)
            || def.name.eq_ignore_ascii_case(wanted)
        {
            return Ok(CatalogEntry::Passive(def));
        }
    }

    Err(ArenaError::UnknownSkill(name.to_string()))
}
