//! Per-run simulation context
//!
//! Owns the config, the dice and the event log. Every operation that rolls
//! or reports takes `&mut ArenaContext`; there is no global state.

use crate::combat::events::{EventKind, EventLog};
use crate::core::config::ArenaConfig;
use crate::core::dice::{Dice, SeededDice};

pub struct ArenaContext {
    pub config: ArenaConfig,
    pub log: EventLog,
    dice: Box<dyn Dice>,
}

impl ArenaContext {
    /// Context with ChaCha8 dice seeded from `seed`
    pub fn seeded(config: ArenaConfig, seed: u64) -> Self {
        Self::with_dice(config, SeededDice::new(seed))
    }

    pub fn with_dice(config: ArenaConfig, dice: impl Dice + 'static) -> Self {
        Self {
            config,
            log: EventLog::new(),
            dice: Box::new(dice),
        }
    }

    pub fn dice(&mut self) -> &mut dyn Dice {
        self.dice.as_mut()
    }

    pub fn roll_d100(&mut self) -> i32 {
        self.dice.roll_d100()
    }

    pub fn emit(&mut self, kind: EventKind) {
        self.log.push(kind);
    }
}

impl std::fmt::Debug for ArenaContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArenaContext")
            .field("config", &self.config)
            .field("events", &self.log.len())
            .finish_non_exhaustive()
    }
}
