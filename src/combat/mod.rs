//! Battles: the turn scheduler, the event stream and parallel series

pub mod events;
pub mod scheduler;
pub mod series;

pub use events::{AttackReport, CombatEvent, EventKind, EventLog, HitResult};
pub use scheduler::{run_battle, BattleOutcome, BattleReport, Side};
pub use series::{run_series, seeded_battle, train_unit, SeriesSummary};
