//! Parallel battle series
//!
//! Each battle gets a fresh context seeded from `base_seed + index`, so a
//! series is reproducible no matter how rayon splits the work.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::combat::scheduler::{run_battle, BattleOutcome, BattleReport, Side};
use crate::core::config::ArenaConfig;
use crate::core::context::ArenaContext;
use crate::core::error::Result;
use crate::unit::Unit;

/// Create a unit and feed it `levels` levels' worth of experience
pub fn train_unit(name: &str, levels: u32, ctx: &mut ArenaContext) -> Unit {
    let mut unit = Unit::new(name, ctx);
    let xp = ctx.config.xp_per_level;
    for _ in 0..levels {
        unit.gain_xp(xp, ctx);
    }
    unit
}

/// Train both units from one seed and fight them
pub fn seeded_battle(
    config: &ArenaConfig,
    names: (&str, &str),
    levels: u32,
    seed: u64,
) -> Result<(BattleReport, ArenaContext)> {
    let mut ctx = ArenaContext::seeded(config.clone(), seed);
    let mut a = train_unit(names.0, levels, &mut ctx);
    let mut b = train_unit(names.1, levels, &mut ctx);
    let report = run_battle(&mut a, &mut b, &mut ctx)?;
    Ok((report, ctx))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub battles: u32,
    pub a_wins: u32,
    pub b_wins: u32,
    pub draws: u32,
    pub undecided: u32,
    pub total_turns: u64,
}

impl SeriesSummary {
    fn record(&mut self, report: &BattleReport) {
        self.battles += 1;
        self.total_turns += report.turns as u64;
        match report.outcome {
            BattleOutcome::Victory(Side::A) => self.a_wins += 1,
            BattleOutcome::Victory(Side::B) => self.b_wins += 1,
            BattleOutcome::Draw => self.draws += 1,
            BattleOutcome::Undecided => self.undecided += 1,
        }
    }

    pub fn average_turns(&self) -> f64 {
        if self.battles == 0 {
            return 0.0;
        }
        self.total_turns as f64 / self.battles as f64
    }
}

/// Run `count` independent battles in parallel
pub fn run_series(
    config: &ArenaConfig,
    names: (&str, &str),
    levels: u32,
    base_seed: u64,
    count: u32,
) -> Result<SeriesSummary> {
    config.validate()?;

    let reports: Vec<BattleReport> = (0..count)
        .into_par_iter()
        .map(|i| {
            let seed = base_seed.wrapping_add(i as u64);
            seeded_battle(config, names, levels, seed).map(|(report, _)| report)
        })
        .collect::<Result<Vec<_>>>()?;

    let mut summary = SeriesSummary::default();
    for report in &reports {
        summary.record(report);
    }

    tracing::info!(
        battles = summary.battles,
        a_wins = summary.a_wins,
        b_wins = summary.b_wins,
        undecided = summary.undecided,
        "Series complete"
    );

    Ok(summary)
}
