pub mod config;
pub mod context;
pub mod dice;
pub mod error;
pub mod types;

pub use config::ArenaConfig;
pub use context::ArenaContext;
pub use dice::{Dice, ScriptedDice, SeededDice};
pub use error::{ArenaError, Result};
pub use types::{multiply_stat, Rounding, Stat, StatBlock};
