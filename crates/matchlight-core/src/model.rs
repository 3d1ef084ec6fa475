//! Canonical game state model.
//!
//! Every type here serializes with the camelCase field names the persisted
//! JSON blob has always used, and tolerates missing fields via defaults so
//! that the additive-only migration chain stays cheap.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use matchlight_logic::Tier;

/// Schema version written into every persisted envelope.
pub const CURRENT_VERSION: u32 = 1;

/// Task ids are millisecond timestamps taken at add-time, bumped to stay
/// strictly monotonic within one state graph.
pub type TaskId = i64;

// ───────────────────────────────────────────────────────────────────────
// Character stats
// ───────────────────────────────────────────────────────────────────────

/// The character's vitals and resource counters.
///
/// `energy` and `spirit` live in [0, 100]; the resource counters only
/// ever saturate at zero, never go negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CharacterStats {
    pub energy: u32,
    pub spirit: u32,
    pub sawdust: u32,
    pub flame: u32,
    pub ash: u32,
    pub total_days: u32,
    pub burning_days: u32,
}

impl Default for CharacterStats {
    fn default() -> Self {
        Self {
            energy: 100,
            spirit: 50,
            sawdust: 100,
            flame: 100,
            ash: 10_000,
            total_days: 1,
            burning_days: 0,
        }
    }
}

impl CharacterStats {
    /// Apply a spirit cost (negative cost restores), clamped to [0, 100].
    pub fn apply_spirit_cost(&mut self, cost: i32) {
        self.spirit = (self.spirit as i32 - cost).clamp(0, 100) as u32;
    }

    /// Restore spirit, clamped to 100.
    pub fn restore_spirit(&mut self, amount: u32) {
        self.spirit = (self.spirit + amount).min(100);
    }

    /// Restore energy, clamped to 100.
    pub fn restore_energy(&mut self, amount: u32) {
        self.energy = (self.energy + amount).min(100);
    }

    pub fn spend_energy(&mut self, cost: u32) {
        self.energy = self.energy.saturating_sub(cost);
    }
}

// ───────────────────────────────────────────────────────────────────────
// Tasks
// ───────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Daily,
    Project,
    Todo,
}

/// A recurring task completed (at most once per simulated day) to build
/// streaks. Never auto-deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTask {
    pub id: TaskId,
    pub name: String,
    pub duration_minutes: u32,
    #[serde(default)]
    pub importance: Tier,
    #[serde(default)]
    pub interest: Tier,
    #[serde(default)]
    pub completed_times: u32,
    #[serde(default)]
    pub streak_days: u32,
    #[serde(default)]
    pub last_completed: Option<NaiveDate>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// An ordered sub-goal within a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub name: String,
    #[serde(default)]
    pub target_date: Option<NaiveDate>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    /// Percent complete, 0-100.
    #[serde(default)]
    pub progress: u8,
    #[serde(default)]
    pub time_spent_hours: f64,
}

impl Milestone {
    pub fn new(name: impl Into<String>, target_date: Option<NaiveDate>) -> Self {
        Self {
            name: name.into(),
            target_date,
            completed: false,
            completed_at: None,
            progress: 0,
            time_spent_hours: 0.0,
        }
    }
}

/// A multi-milestone undertaking; completed when all milestones are done.
/// `completed_at` is set once and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: TaskId,
    pub name: String,
    pub deadline: NaiveDate,
    pub daily_time_hours: f64,
    #[serde(default)]
    pub importance: Tier,
    #[serde(default)]
    pub interest: Tier,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
    #[serde(default)]
    pub current_milestone: usize,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Project {
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Aggregate progress across milestones, 0-100.
    pub fn progress(&self) -> u8 {
        if self.milestones.is_empty() {
            return 0;
        }
        let done = self.milestones.iter().filter(|m| m.completed).count();
        (done * 100 / self.milestones.len()) as u8
    }
}

/// A one-shot task; terminal once completed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TaskId,
    pub name: String,
    pub deadline: NaiveDate,
    pub duration_hours: f64,
    #[serde(default)]
    pub importance: Tier,
    #[serde(default)]
    pub urgency: Tier,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    /// Quality rating given at completion, 0-5 stars.
    #[serde(default)]
    pub satisfaction: Option<u8>,
    #[serde(default)]
    pub actual_seconds: Option<u32>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

// ───────────────────────────────────────────────────────────────────────
// Shop effects
// ───────────────────────────────────────────────────────────────────────

/// Which purchased effects are currently active.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShopEffects {
    pub fire_starter: bool,
    pub mirror: bool,
    pub oxygen_chamber: bool,
    pub memory_chessboard: bool,
    pub glowing_pen: bool,
    pub whispering_music_box: bool,
    pub ash_rune: bool,
    pub black_dog_collar: bool,
    pub flame_light: bool,
}

/// Consumed flags for the one-shot effects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EffectStatus {
    pub whispering_music_box_used: bool,
    pub black_dog_collar_used: bool,
    pub flame_light_used: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShopState {
    pub active_effects: ShopEffects,
    pub effect_status: EffectStatus,
}

impl ShopState {
    /// Expire every overnight effect at day end. The oxygen chamber is
    /// permanent and the flame light persists until consumed.
    pub fn expire_overnight(&mut self) {
        self.active_effects.fire_starter = false;
        self.active_effects.mirror = false;
        self.active_effects.memory_chessboard = false;
        self.active_effects.glowing_pen = false;
        self.active_effects.whispering_music_box = false;
        self.active_effects.ash_rune = false;
        self.active_effects.black_dog_collar = false;
        self.effect_status.whispering_music_box_used = false;
        self.effect_status.black_dog_collar_used = false;
    }
}

// ───────────────────────────────────────────────────────────────────────
// Depression track
// ───────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepressionMilestone {
    pub status: String,
    pub spirit: u32,
}

/// Recovery track driven by accumulated burning days. `next_milestone`
/// always points at the smallest unpassed threshold, or None once all
/// thresholds are passed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DepressionTrack {
    pub status: String,
    pub daily_spirit: u32,
    pub next_milestone: Option<u32>,
    pub milestones: BTreeMap<u32, DepressionMilestone>,
}

impl Default for DepressionTrack {
    fn default() -> Self {
        let mut milestones = BTreeMap::new();
        milestones.insert(
            7,
            DepressionMilestone {
                status: "Black Dog Retreating".to_string(),
                spirit: 60,
            },
        );
        milestones.insert(
            30,
            DepressionMilestone {
                status: "Black Dog Scattered".to_string(),
                spirit: 75,
            },
        );
        milestones.insert(
            60,
            DepressionMilestone {
                status: "Black Dog Conquered".to_string(),
                spirit: 100,
            },
        );
        Self {
            status: "Black Dog Looming".to_string(),
            daily_spirit: 50,
            next_milestone: Some(7),
            milestones,
        }
    }
}

impl DepressionTrack {
    /// Advance the track if `burning_days` hit the next threshold.
    /// Returns the milestone that was just reached, if any.
    pub fn advance(&mut self, burning_days: u32) -> Option<DepressionMilestone> {
        if self.next_milestone != Some(burning_days) {
            return None;
        }
        let reached = self.milestones.get(&burning_days)?.clone();
        self.status = reached.status.clone();
        self.daily_spirit = reached.spirit;
        self.next_milestone = self
            .milestones
            .range(burning_days + 1..)
            .next()
            .map(|(&days, _)| days);
        Some(reached)
    }
}

// ───────────────────────────────────────────────────────────────────────
// Combo and vacation
// ───────────────────────────────────────────────────────────────────────

/// Black-dog combo counters. `combo` resets on any non-qualifying
/// completion and at day end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComboTrack {
    pub combo: u32,
    pub completed_today: u32,
    pub total_completed: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VacationKind {
    Short,
    Long,
}

impl VacationKind {
    pub fn cost(self) -> u32 {
        match self {
            VacationKind::Short => 5_000,
            VacationKind::Long => 20_000,
        }
    }

    pub fn days(self) -> u32 {
        match self {
            VacationKind::Short => 7,
            VacationKind::Long => 30,
        }
    }
}

/// While a vacation is active the flame neither grows nor decays.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VacationState {
    pub active: bool,
    pub kind: Option<VacationKind>,
    pub start_day: Option<NaiveDate>,
    pub end_day: Option<NaiveDate>,
}

impl VacationState {
    pub fn clear(&mut self) {
        *self = VacationState::default();
    }
}

// ───────────────────────────────────────────────────────────────────────
// Life state and the full graph
// ───────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifeState {
    #[default]
    Alive,
    /// Terminal: the flame dropped below 1 at day end. Only a manual
    /// reset leaves this state.
    Extinguished,
}

/// The whole game state graph. The state container owns the only live
/// instance; persistence only ever holds serialized snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameState {
    pub version: u32,
    pub stats: CharacterStats,
    pub daily_tasks: Vec<DailyTask>,
    pub projects: Vec<Project>,
    pub todos: Vec<Todo>,
    pub depression: DepressionTrack,
    pub combo: ComboTrack,
    pub shop: ShopState,
    pub vacation: VacationState,
    pub current_day: NaiveDate,
    pub life: LifeState,
    pub logs: Vec<String>,
}

impl Default for GameState {
    fn default() -> Self {
        // Calendar start for states that predate the `currentDay` field.
        Self::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default())
    }
}

impl GameState {
    /// Fresh initial state starting its simulated calendar on `start_day`.
    pub fn new(start_day: NaiveDate) -> Self {
        Self {
            version: CURRENT_VERSION,
            stats: CharacterStats::default(),
            daily_tasks: Vec::new(),
            projects: Vec::new(),
            todos: Vec::new(),
            depression: DepressionTrack::default(),
            combo: ComboTrack::default(),
            shop: ShopState::default(),
            vacation: VacationState::default(),
            current_day: start_day,
            life: LifeState::Alive,
            logs: Vec::new(),
        }
    }

    /// Append a settlement log line tagged with the current day number.
    pub fn log(&mut self, message: impl AsRef<str>) {
        self.logs
            .push(format!("[Day {}] {}", self.stats.total_days, message.as_ref()));
    }
}
