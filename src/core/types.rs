//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;

/// Slack applied before rounding so that products like `10 * 1.2` land on
/// the integer they are meant to be instead of one past it.
pub const EPSILON: f64 = 1e-9;

/// The eight unit stats, in growth-roll order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stat {
    Hp,
    Strength,
    Defense,
    Magic,
    Resistance,
    Speed,
    Skill,
    Luck,
}

impl Stat {
    pub const ALL: [Stat; 8] = [
        Stat::Hp,
        Stat::Strength,
        Stat::Defense,
        Stat::Magic,
        Stat::Resistance,
        Stat::Speed,
        Stat::Skill,
        Stat::Luck,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Stat::Hp => "HP",
            Stat::Strength => "Strength",
            Stat::Defense => "Defense",
            Stat::Magic => "Magic",
            Stat::Resistance => "Resistance",
            Stat::Speed => "Speed",
            Stat::Skill => "Skill",
            Stat::Luck => "Luck",
        }
    }

    /// Amount a successful growth roll adds to this stat
    pub fn growth_step(&self) -> i32 {
        match self {
            Stat::Hp => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One value per stat. Used for base stats, current stats and growth rates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBlock {
    pub hp: i32,
    pub strength: i32,
    pub defense: i32,
    pub magic: i32,
    pub resistance: i32,
    pub speed: i32,
    pub skill: i32,
    pub luck: i32,
}

impl StatBlock {
    /// Every stat set to the same value
    pub fn uniform(value: i32) -> Self {
        Self {
            hp: value,
            strength: value,
            defense: value,
            magic: value,
            resistance: value,
            speed: value,
            skill: value,
            luck: value,
        }
    }

    pub fn get(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Hp => self.hp,
            Stat::Strength => self.strength,
            Stat::Defense => self.defense,
            Stat::Magic => self.magic,
            Stat::Resistance => self.resistance,
            Stat::Speed => self.speed,
            Stat::Skill => self.skill,
            Stat::Luck => self.luck,
        }
    }

    pub fn get_mut(&mut self, stat: Stat) -> &mut i32 {
        match stat {
            Stat::Hp => &mut self.hp,
            Stat::Strength => &mut self.strength,
            Stat::Defense => &mut self.defense,
            Stat::Magic => &mut self.magic,
            Stat::Resistance => &mut self.resistance,
            Stat::Speed => &mut self.speed,
            Stat::Skill => &mut self.skill,
            Stat::Luck => &mut self.luck,
        }
    }

    pub fn set(&mut self, stat: Stat, value: i32) {
        *self.get_mut(stat) = value;
    }

    /// True when no stat in `self` is below the same stat in `other`
    pub fn dominates(&self, other: &StatBlock) -> bool {
        Stat::ALL.iter().all(|&s| self.get(s) >= other.get(s))
    }
}

/// Rounding direction for stat multiplication
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    Up,
    Down,
}

/// Multiply an integer stat by a factor and round back to an integer
pub fn multiply_stat(stat: i32, multiplier: f64, rounding: Rounding) -> i32 {
    let product = stat as f64 * multiplier;
    match rounding {
        Rounding::Up => (product - EPSILON).ceil() as i32,
        Rounding::Down => (product + EPSILON).floor() as i32,
    }
}
