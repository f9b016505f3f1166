//! Learned skills with runtime cooldown state

use crate::skills::catalog::{ActiveSkillDef, ActiveSkillId, PassiveSkillDef, PassiveSkillId};

/// Fields shared by active and passive definitions
pub trait SkillDef: 'static {
    fn name(&self) -> &'static str;
    fn cooldown(&self) -> u32;
}

impl SkillDef for ActiveSkillDef {
    fn name(&self) -> &'static str {
        self.name
    }

    fn cooldown(&self) -> u32 {
        self.cooldown
    }
}

impl SkillDef for PassiveSkillDef {
    fn name(&self) -> &'static str {
        self.name
    }

    fn cooldown(&self) -> u32 {
        self.cooldown
    }
}

/// A catalog entry plus its remaining cooldown
///
/// Only `remaining_cooldown` ever changes; it stays within
/// `0..=def.cooldown()`.
#[derive(Debug, Clone)]
pub struct SkillInstance<D: SkillDef> {
    def: &'static D,
    remaining_cooldown: u32,
}

pub type ActiveSkill = SkillInstance<ActiveSkillDef>;
pub type PassiveSkill = SkillInstance<PassiveSkillDef>;

impl<D: SkillDef> SkillInstance<D> {
    /// New instances start ready
    pub fn from_def(def: &'static D) -> Self {
        Self {
            def,
            remaining_cooldown: 0,
        }
    }

    pub fn def(&self) -> &'static D {
        self.def
    }

    pub fn name(&self) -> &'static str {
        self.def.name()
    }

    pub fn cooldown(&self) -> u32 {
        self.def.cooldown()
    }

    pub fn remaining_cooldown(&self) -> u32 {
        self.remaining_cooldown
    }

    pub fn is_ready(&self) -> bool {
        self.remaining_cooldown == 0
    }

    /// Start the cooldown
    pub fn use_skill(&mut self) {
        self.remaining_cooldown = self.def.cooldown();
    }

    /// One turn passes
    pub fn tick_cooldown(&mut self) {
        self.remaining_cooldown = self.remaining_cooldown.saturating_sub(1);
    }

    pub fn reset_cooldown(&mut self) {
        self.remaining_cooldown = 0;
    }

    /// "Name, ready now" or "Name, ready in N turns"
    pub fn display_cooldown(&self) -> String {
        if self.is_ready() {
            format!("{}, ready now", self.name())
        } else {
            format!("{}, ready in {} turns", self.name(), self.remaining_cooldown)
        }
    }
}

impl ActiveSkill {
    pub fn new(id: ActiveSkillId) -> Self {
        Self::from_def(id.definition())
    }

    pub fn id(&self) -> ActiveSkillId {
        self.def.id
    }
}

impl PassiveSkill {
    pub fn new(id: PassiveSkillId) -> Self {
        Self::from_def(id.definition())
    }

    pub fn id(&self) -> PassiveSkillId {
        self.def.id
    }
}

impl<D: SkillDef> std::fmt::Display for SkillInstance<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
