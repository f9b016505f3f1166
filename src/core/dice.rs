//! Random rolls for growth, skill selection, hit/crit and procs
//!
//! All randomness flows through [`Dice`]. A run owns exactly one instance,
//! so the same seed always replays the same battle.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of every random roll in a simulation run
pub trait Dice {
    /// Uniform integer in `1..=100`
    fn roll_d100(&mut self) -> i32;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn pick_index(&mut self, len: usize) -> usize;

    /// Fair coin
    fn coin_flip(&mut self) -> bool;
}

/// Deterministic dice backed by ChaCha8
#[derive(Debug, Clone)]
pub struct SeededDice {
    rng: ChaCha8Rng,
}

impl SeededDice {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Dice for SeededDice {
    fn roll_d100(&mut self) -> i32 {
        self.rng.gen_range(1..=100)
    }

    fn pick_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    fn coin_flip(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }
}

/// Dice that replay queued values, for forcing specific outcomes
///
/// Each kind of roll has its own queue. Once a queue runs dry the
/// fallback is used: `fallback_d100` for d100 rolls, index 0 for picks
/// and `true` for coin flips.
#[derive(Debug, Clone)]
pub struct ScriptedDice {
    d100: VecDeque<i32>,
    picks: VecDeque<usize>,
    coins: VecDeque<bool>,
    fallback_d100: i32,
}

impl ScriptedDice {
    /// Empty script. Every d100 roll returns 100 until values are queued.
    pub fn new() -> Self {
        Self {
            d100: VecDeque::new(),
            picks: VecDeque::new(),
            coins: VecDeque::new(),
            fallback_d100: 100,
        }
    }

    pub fn with_d100(mut self, rolls: impl IntoIterator<Item = i32>) -> Self {
        self.d100.extend(rolls);
        self
    }

    pub fn with_picks(mut self, picks: impl IntoIterator<Item = usize>) -> Self {
        self.picks.extend(picks);
        self
    }

    pub fn with_coins(mut self, coins: impl IntoIterator<Item = bool>) -> Self {
        self.coins.extend(coins);
        self
    }

    pub fn with_fallback_d100(mut self, roll: i32) -> Self {
        self.fallback_d100 = roll;
        self
    }

    /// d100 values not yet consumed
    pub fn remaining_d100(&self) -> usize {
        self.d100.len()
    }
}

impl Default for ScriptedDice {
    fn default() -> Self {
        Self::new()
    }
}

impl Dice for ScriptedDice {
    fn roll_d100(&mut self) -> i32 {
        self.d100.pop_front().unwrap_or(self.fallback_d100)
    }

    fn pick_index(&mut self, len: usize) -> usize {
        self.picks.pop_front().unwrap_or(0).min(len.saturating_sub(1))
    }

    fn coin_flip(&mut self) -> bool {
        self.coins.pop_front().unwrap_or(true)
    }
}
