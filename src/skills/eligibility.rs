//! Situational gating of active skills
//!
//! A skill is castable when it is off cooldown and its situational rule
//! holds for the caster's current skill set.

use crate::skills::catalog::Eligibility;
use crate::skills::instance::ActiveSkill;

/// Some learned active skill other than `index` is on cooldown
pub fn other_skill_on_cooldown(learned: &[ActiveSkill], index: usize) -> bool {
    learned
        .iter()
        .enumerate()
        .any(|(i, skill)| i != index && !skill.is_ready())
}

/// Can the skill at `index` be cast right now?
pub fn is_castable(learned: &[ActiveSkill], index: usize) -> bool {
    let Some(skill) = learned.get(index) else {
        return false;
    };

    if !skill.is_ready() {
        return false;
    }

    match skill.def().eligibility {
        Eligibility::Always => true,
        Eligibility::OtherOnCooldown => other_skill_on_cooldown(learned, index),
        // Purify stays locked until debuffs exist
        Eligibility::Never => false,
    }
}

/// Indices of every castable learned skill, in learned order
pub fn castable_indices(learned: &[ActiveSkill]) -> Vec<usize> {
    (0..learned.len())
        .filter(|&i| is_castable(learned, i))
        .collect()
}
