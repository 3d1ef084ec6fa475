//! Energy and spirit cost tiers.

use serde::{Deserialize, Serialize};

/// Three-level scale used for task importance, interest, and todo urgency.
/// Serialized as the lowercase strings the persisted blob has always used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Low,
    Medium,
    High,
}

impl Default for Tier {
    fn default() -> Self {
        Tier::Medium
    }
}

/// A full working day of daily-task minutes; costs 100 energy.
pub const DAILY_REFERENCE_MINUTES: u32 = 480;

/// A full working day in hours; the reference for todos and projects.
pub const REFERENCE_HOURS: f64 = 8.0;

/// Energy cost for a daily task, proportional to its planned minutes.
pub fn daily_energy_cost(duration_minutes: u32) -> u32 {
    ((duration_minutes as f64 / DAILY_REFERENCE_MINUTES as f64) * 100.0).round() as u32
}

/// Energy cost for an hour-denominated task (todo or project session).
pub fn hourly_energy_cost(hours: f64) -> u32 {
    if !hours.is_finite() || hours <= 0.0 {
        return 0;
    }
    ((hours / REFERENCE_HOURS) * 100.0).round() as u32
}

/// Spirit cost by interest tier. High interest *restores* spirit
/// (a negative cost), low interest drains it hardest.
pub fn interest_spirit_cost(interest: Tier) -> i32 {
    match interest {
        Tier::High => -20,
        Tier::Medium => 20,
        Tier::Low => 40,
    }
}

/// Spirit cost for a todo, tiered by its planned duration in hours.
/// Todos carry urgency rather than interest, so the drain scales with
/// how long the character has to grind.
pub fn todo_spirit_cost(duration_hours: f64) -> i32 {
    if duration_hours <= 0.5 {
        10
    } else if duration_hours <= 1.0 {
        20
    } else if duration_hours <= 2.0 {
        40
    } else {
        100
    }
}
