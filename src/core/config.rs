//! Arena configuration with documented constants
//!
//! Progression pacing and combat tuning live here so a run can be
//! reproduced from a seed plus one TOML file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::{ArenaError, Result};

/// Configuration for unit progression and battles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    // === PROGRESSION ===
    /// Experience needed for each level
    pub xp_per_level: i64,

    /// Starting value for every base stat except HP
    pub default_stat: i32,

    /// HP starts at `default_stat * hp_multiplier`
    pub hp_multiplier: i32,

    /// Growth rates are `default_growth * m` where the multipliers 1..=8
    /// are dealt to the eight stats in random order.
    ///
    /// At 10, every unit has exactly one stat at each of 10%, 20%, ... 80%.
    pub default_growth: i32,

    // === SKILL SLOTS ===
    /// Active skill cap at level 0
    pub starting_active_slots: usize,

    /// Passive skill cap at level 0
    pub starting_passive_slots: usize,

    /// Both caps grow by one on every level divisible by this
    pub slot_cadence: u32,

    /// A random active skill is learned on every level divisible by this
    pub active_learn_cadence: u32,

    /// A random passive skill is learned on every level divisible by this
    pub passive_learn_cadence: u32,

    // === COMBAT ===
    /// Luck coefficient in `Skill + c * Luck` for crit and crit avoidance
    ///
    /// Tuning passes used both 0.25 and 0.5. 0.5 is canonical.
    pub crit_luck_coefficient: f64,

    /// Turns after which a battle is called undecided
    ///
    /// Basic attacks keep every battle moving, so this only trips if a
    /// skill change leaves a unit with nothing to cast.
    pub max_turns: u32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            xp_per_level: 250,
            default_stat: 10,
            hp_multiplier: 2,
            default_growth: 10,

            starting_active_slots: 2,
            starting_passive_slots: 1,
            slot_cadence: 4,
            active_learn_cadence: 2,
            passive_learn_cadence: 3,

            crit_luck_coefficient: 0.5,
            max_turns: 10_000,
        }
    }
}

impl ArenaConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML. Missing keys keep their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: ArenaConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.xp_per_level <= 0 {
            return Err(ArenaError::InvalidConfig(format!(
                "xp_per_level ({}) must be positive",
                self.xp_per_level
            )));
        }

        if self.default_stat <= 0 || self.hp_multiplier <= 0 {
            return Err(ArenaError::InvalidConfig(
                "default_stat and hp_multiplier must be positive".into(),
            ));
        }

        // Cadences are used as divisors
        if self.slot_cadence == 0
            || self.active_learn_cadence == 0
            || self.passive_learn_cadence == 0
        {
            return Err(ArenaError::InvalidConfig("cadences must be non-zero".into()));
        }

        // Basic attack needs a slot
        if self.starting_active_slots == 0 {
            return Err(ArenaError::InvalidConfig(
                "starting_active_slots must be at least 1".into(),
            ));
        }

        // A level-1 learn would otherwise take the only slot
        if self.active_learn_cadence == 1 && self.starting_active_slots < 2 {
            return Err(ArenaError::InvalidConfig(
                "active_learn_cadence of 1 needs at least 2 starting active slots".into(),
            ));
        }

        if self.max_turns == 0 {
            return Err(ArenaError::InvalidConfig("max_turns must be non-zero".into()));
        }

        if !(0.0..=1.0).contains(&self.crit_luck_coefficient) {
            return Err(ArenaError::InvalidConfig(format!(
                "crit_luck_coefficient ({}) must be within 0..=1",
                self.crit_luck_coefficient
            )));
        }

        Ok(())
    }
}
