//! Structured combat events
//!
//! The core never formats output. Everything observable is pushed here as
//! data; [`CombatEvent::describe`] renders a line for consoles.

use serde::{Deserialize, Serialize};

use crate::combat::scheduler::BattleOutcome;
use crate::core::error::Result;
use crate::core::types::{Stat, StatBlock};
use crate::skills::{ActiveSkillId, PassiveSkillId, SkillId, Trigger};

/// One entry in the event log
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CombatEvent {
    pub id: u32,
    /// Battle turn the event happened in (0 outside battles)
    pub turn: u32,
    pub kind: EventKind,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EventKind {
    // Progression
    UnitCreated {
        unit: String,
    },
    LevelUp {
        unit: String,
        from: u32,
        to: u32,
    },
    SkillSlotsIncreased {
        unit: String,
        active_slots: usize,
        passive_slots: usize,
    },
    SkillLearned {
        unit: String,
        skill: SkillId,
        name: String,
    },
    StatGrowth {
        unit: String,
        stat: Stat,
        from: i32,
        to: i32,
        growth_rate: i32,
        roll: i32,
        /// Gained through the luck fallback rather than the growth roll
        lucky: bool,
    },
    BaseStats {
        unit: String,
        stats: StatBlock,
    },

    // Battle flow
    BattleStarted {
        unit_a: String,
        unit_b: String,
        speed_delta: i32,
    },
    TurnStarted {
        unit: String,
        speed_delta: i32,
    },
    BattleEnded {
        outcome: BattleOutcome,
        winner: Option<String>,
        turns: u32,
    },

    // Skills
    SkillActivated {
        unit: String,
        skill: ActiveSkillId,
        name: String,
    },
    PassiveRolled {
        unit: String,
        skill: PassiveSkillId,
        name: String,
        trigger: Trigger,
        chance: i32,
        roll: i32,
        procced: bool,
    },
    StatChanged {
        unit: String,
        stat: Stat,
        from: i32,
        to: i32,
        source: String,
    },

    // Attacks
    AttackResolved(AttackReport),
    UnitSlain {
        unit: String,
        overkill: i32,
    },
}

/// Everything computed while resolving one strike
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttackReport {
    pub attacker: String,
    pub defender: String,
    pub skill: ActiveSkillId,
    pub skill_name: String,
    pub hit_chance: i32,
    pub dodge_chance: i32,
    /// `hit_chance - dodge_chance`, floored at 0
    pub net_hit_chance: i32,
    pub hit_roll: i32,
    pub result: HitResult,
    pub damage: i32,
    pub hp_before: i32,
    pub hp_after: i32,
    pub max_hp: i32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "result")]
pub enum HitResult {
    Miss,
    Hit {
        crit_chance: i32,
        crit_roll: i32,
        raw_damage: i32,
        mitigation: i32,
    },
    /// Mitigation ignored
    Critical {
        crit_chance: i32,
        crit_roll: i32,
        raw_damage: i32,
    },
}

impl CombatEvent {
    /// Human-readable line for console output
    pub fn describe(&self) -> String {
        match &self.kind {
            EventKind::UnitCreated { unit } => format!("{} enters the arena", unit),
            EventKind::LevelUp { unit, from, to } => {
                format!("{} leveled up! Level {} -> {}", unit, from, to)
            }
            EventKind::SkillSlotsIncreased {
                unit,
                active_slots,
                passive_slots,
            } => format!(
                "{} can now hold {} active and {} passive skills",
                unit, active_slots, passive_slots
            ),
            EventKind::SkillLearned { unit, name, .. } => format!("{} learned {}!", unit, name),
            EventKind::StatGrowth {
                stat,
                from,
                to,
                growth_rate,
                lucky,
                ..
            } => {
                if *lucky {
                    format!("Lucky! {} {} -> {}", stat, from, to)
                } else {
                    format!("Gained {} ({}%)! {} -> {}", stat, growth_rate, from, to)
                }
            }
            EventKind::BaseStats { unit, stats } => format!(
                "{}: HP {} | Strength {} | Defense {} | Magic {} | Resistance {} | Speed {} | Skill {} | Luck {}",
                unit,
                stats.hp,
                stats.strength,
                stats.defense,
                stats.magic,
                stats.resistance,
                stats.speed,
                stats.skill,
                stats.luck
            ),
            EventKind::BattleStarted {
                unit_a,
                unit_b,
                speed_delta,
            } => format!(
                "{} vs {} (speed delta {})",
                unit_a, unit_b, speed_delta
            ),
            EventKind::TurnStarted { unit, speed_delta } => {
                format!("{}'s turn (speed delta {})", unit, speed_delta)
            }
            EventKind::BattleEnded {
                outcome,
                winner,
                turns,
            } => match winner {
                Some(name) => format!("{} wins after {} turns", name, turns),
                None => format!("Battle ended {:?} after {} turns", outcome, turns),
            },
            EventKind::SkillActivated { unit, name, .. } => {
                format!("{} activates {}!", unit, name)
            }
            EventKind::PassiveRolled {
                unit,
                name,
                trigger,
                chance,
                roll,
                procced,
                ..
            } => {
                let window = match trigger {
                    Trigger::Offensive => "offensively",
                    Trigger::Defensive => "defensively",
                };
                if *procced {
                    format!("{} {} procs {}! ({} <= {}%)", unit, window, name, roll, chance)
                } else {
                    format!("{} fails to proc {} ({} > {}%)", unit, name, roll, chance)
                }
            }
            EventKind::StatChanged {
                unit,
                stat,
                from,
                to,
                source,
            } => format!("{} {} {} -> {} ({})", unit, stat, from, to, source),
            EventKind::AttackResolved(report) => report.describe(),
            EventKind::UnitSlain { unit, overkill } => {
                format!("{} is slain! Overkill: {}", unit, overkill)
            }
        }
    }
}

impl AttackReport {
    pub fn describe(&self) -> String {
        let outcome = match &self.result {
            HitResult::Miss => format!(
                "{} ({}% hit) uses {} to attack {} and misses!",
                self.attacker, self.net_hit_chance, self.skill_name, self.defender
            ),
            HitResult::Hit {
                raw_damage,
                mitigation,
                ..
            } => format!(
                "{} ({}% hit) uses {} to attack {} and hits for {} - {} = {} damage!",
                self.attacker,
                self.net_hit_chance,
                self.skill_name,
                self.defender,
                raw_damage,
                mitigation,
                self.damage
            ),
            HitResult::Critical { crit_chance, .. } => format!(
                "{} ({}% hit)({}% crit) uses {} to attack {} and crits for {} damage!",
                self.attacker,
                self.net_hit_chance,
                crit_chance,
                self.skill_name,
                self.defender,
                self.damage
            ),
        };

        if self.damage > 0 && self.hp_after > 0 {
            format!(
                "{} {} HP: {}/{} -> {}/{}",
                outcome, self.defender, self.hp_before, self.max_hp, self.hp_after, self.max_hp
            )
        } else {
            outcome
        }
    }

    pub fn connected(&self) -> bool {
        !matches!(self.result, HitResult::Miss)
    }

    pub fn is_critical(&self) -> bool {
        matches!(self.result, HitResult::Critical { .. })
    }
}

/// Ordered event stream for one context
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<CombatEvent>,
    next_event_id: u32,
    turn: u32,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: EventKind) -> u32 {
        let id = self.next_event_id;
        self.next_event_id += 1;

        let event = CombatEvent {
            id,
            turn: self.turn,
            kind,
        };
        tracing::debug!(id, turn = self.turn, "{}", event.describe());
        self.events.push(event);

        id
    }

    /// Stamp subsequent events with `turn`
    pub fn set_turn(&mut self, turn: u32) {
        self.turn = turn;
    }

    pub fn events(&self) -> &[CombatEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events_for_turn(&self, turn: u32) -> impl Iterator<Item = &CombatEvent> {
        self.events.iter().filter(move |e| e.turn == turn)
    }

    /// Attack reports in order
    pub fn attacks(&self) -> impl Iterator<Item = &AttackReport> {
        self.events.iter().filter_map(|e| match &e.kind {
            EventKind::AttackResolved(report) => Some(report),
            _ => None,
        })
    }

    /// Drop all events, keeping id numbering monotonic
    pub fn clear(&mut self) {
        self.events.clear();
        self.turn = 0;
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.events)?)
    }

    pub fn render_text(&self) -> String {
        self.events
            .iter()
            .map(|e| format!("[{}] {}", e.turn, e.describe()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
