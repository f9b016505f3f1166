//! Skill catalog and cooldown model
//!
//! Definitions are static data. A unit holds [`SkillInstance`]s that add
//! cooldown state on top of a definition.

pub mod catalog;
pub mod eligibility;
pub mod instance;

pub use catalog::{
    lookup, ActiveSkillDef, ActiveSkillId, CatalogEntry, Eligibility, Execution, Mitigation,
    PassiveEffect, PassiveSkillDef, PassiveSkillId, Scaling, SkillId, Trigger, ACTIVE_SKILLS,
    PASSIVE_SKILLS,
};
pub use eligibility::{castable_indices, is_castable, other_skill_on_cooldown};
pub use instance::{ActiveSkill, PassiveSkill, SkillDef, SkillInstance};
