//! Arena Sim - turn-based duels between stat-driven units
//!
//! Units grow through randomized level-ups, learn active and passive
//! skills, and fight on a speed-accumulator schedule. Every roll comes
//! from the dice owned by an [`ArenaContext`], and everything observable
//! is recorded as a structured [`CombatEvent`].

pub mod combat;
pub mod core;
pub mod skills;
pub mod unit;

pub use crate::combat::{
    run_battle, run_series, BattleOutcome, BattleReport, CombatEvent, EventLog, Side,
};
pub use crate::core::{
    ArenaConfig, ArenaContext, ArenaError, Dice, Result, ScriptedDice, SeededDice,
};
pub use crate::unit::Unit;
