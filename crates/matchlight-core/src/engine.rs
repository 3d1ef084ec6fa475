//! Settlement engine: task completion and day-end transactions.
//!
//! Commands are atomic from the caller's point of view. Preconditions are
//! checked against the unmodified costs before anything mutates, so a
//! failed command never consumes a one-shot discount or flips a flag.
//! Persistence runs after each applied transaction and is never fatal;
//! the in-memory state stays authoritative if the store misbehaves.

use chrono::Utc;

use matchlight_logic::{combo, costs, rewards};

use crate::error::{EngineError, PersistenceError};
use crate::model::{
    CharacterStats, DailyTask, DepressionTrack, GameState, LifeState, Project, ShopState, TaskId,
    TaskKind, Todo, VacationKind,
};
use crate::modifiers::{self, Domain, RewardContext};
use crate::persistence::Storage;
use crate::shop::{self, ShopItemId};
use crate::state::{StateManager, SubscriberId};
use crate::store::KeyValueStore;
use crate::tasks::{self, TaskRegistry};

/// What a single task completion settled to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionSummary {
    pub kind: TaskKind,
    pub name: String,
    /// Simulated day number the completion landed on.
    pub day: u32,
    pub sawdust_reward: u32,
    pub flame_reward: u32,
    /// Extra ash from a black-dog completion (equal to the final flame).
    pub ash_bonus: u32,
    pub energy_cost: u32,
    /// Net spirit change, restore positive.
    pub spirit_delta: i32,
    /// New streak length, daily tasks only.
    pub streak_days: Option<u32>,
    pub combo: u32,
    pub project_completed: bool,
    pub energy: u32,
    pub spirit: u32,
}

/// A stat's value on both sides of the day-end settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatDelta {
    pub before: u32,
    pub after: u32,
}

impl StatDelta {
    fn of(before: u32, after: u32) -> Self {
        Self { before, after }
    }

    pub fn change(self) -> i64 {
        i64::from(self.after) - i64::from(self.before)
    }
}

/// Everything the day-end settlement changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySummary {
    /// Day number after the advance.
    pub day: u32,
    pub flame: StatDelta,
    pub ash: StatDelta,
    pub energy: StatDelta,
    pub spirit: StatDelta,
    pub burning_days: StatDelta,
    /// New depression status, when a milestone was reached overnight.
    pub status_change: Option<String>,
    pub vacation_ended: bool,
    pub extinguished: bool,
}

/// The engine: owns the state container and the persistence front-end.
pub struct Engine<S: KeyValueStore> {
    state: StateManager,
    storage: Storage<S>,
}

impl<S: KeyValueStore> Engine<S> {
    /// Open an engine over `store`, resuming the persisted state when one
    /// exists, otherwise starting a fresh run dated today.
    pub fn new(store: S) -> Result<Self, PersistenceError> {
        let mut storage = Storage::new(store);
        let state = match storage.load()? {
            Some(state) => state,
            None => GameState::new(Utc::now().date_naive()),
        };
        Ok(Self {
            state: StateManager::new(state),
            storage,
        })
    }

    /// Open an engine seeded with an explicit state. The state is saved
    /// immediately so the store and memory agree.
    pub fn with_state(store: S, state: GameState) -> Self {
        let mut engine = Self {
            state: StateManager::new(state),
            storage: Storage::new(store),
        };
        engine.persist();
        engine
    }

    // ── snapshot API ──

    pub fn stats(&self) -> &CharacterStats {
        &self.state.state().stats
    }

    pub fn daily_tasks(&self) -> &[DailyTask] {
        &self.state.state().daily_tasks
    }

    pub fn projects(&self) -> &[Project] {
        &self.state.state().projects
    }

    pub fn todos(&self) -> &[Todo] {
        &self.state.state().todos
    }

    pub fn shop(&self) -> &ShopState {
        &self.state.state().shop
    }

    pub fn depression(&self) -> &DepressionTrack {
        &self.state.state().depression
    }

    pub fn life(&self) -> LifeState {
        self.state.state().life
    }

    pub fn logs(&self) -> &[String] {
        &self.state.state().logs
    }

    pub fn game_state(&self) -> &GameState {
        self.state.state()
    }

    /// Task CRUD view. Registry mutations notify subscribers but are not
    /// auto-persisted; call a command or [`Engine::save`] after a batch.
    pub fn registry(&mut self) -> TaskRegistry<'_> {
        TaskRegistry::new(&mut self.state)
    }

    pub fn subscribe(
        &mut self,
        f: impl FnMut(&str, &serde_json::Value, &GameState) + 'static,
    ) -> SubscriberId {
        self.state.subscribe(f)
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) {
        self.state.unsubscribe(id);
    }

    // ── persistence passthrough ──

    pub fn save(&mut self) -> Result<(), PersistenceError> {
        self.storage.save(self.state.state())
    }

    pub fn export(&mut self) -> Result<String, PersistenceError> {
        self.storage.export()
    }

    /// Import an exported document, replacing both the store and the live
    /// state.
    pub fn import(&mut self, raw: &str) -> Result<(), PersistenceError> {
        let state = self.storage.import(raw)?;
        self.state.replace(state);
        Ok(())
    }

    // ── commands ──

    /// Settle a daily-task completion.
    pub fn complete_daily_task(
        &mut self,
        id: TaskId,
        actual_seconds: u32,
        rating: u8,
    ) -> Result<CompletionSummary, EngineError> {
        self.ensure_alive()?;
        let (task, stats) = {
            let s = self.state.state();
            let task = tasks::find_daily(s, id)
                .cloned()
                .ok_or(EngineError::NotFound { kind: "daily task", id })?;
            (task, s.stats.clone())
        };
        if task.last_completed == Some(self.state.state().current_day) {
            return Err(EngineError::AlreadyCompleted { kind: "daily task", id });
        }

        let energy_cost = costs::daily_energy_cost(task.duration_minutes);
        let spirit_cost = costs::interest_spirit_cost(task.interest);
        let black_dog = combo::is_black_dog(task.importance, task.interest);
        check_resources(&stats, energy_cost, spirit_cost, black_dog)?;

        let base = rewards::early_finish_boost(
            rewards::quality_reward(rating),
            actual_seconds,
            task.duration_minutes * 60,
        );

        let summary = self.state.transaction(|s| {
            let done = tasks::mark_daily_completed(s, id)?;
            let ctx = RewardContext::new(TaskKind::Daily, black_dog);
            let mut summary = settle_completion(s, &ctx, &done.name, base, base, energy_cost, spirit_cost);
            summary.streak_days = Some(done.streak_days);
            Ok::<_, EngineError>(summary)
        })?;
        self.persist();
        Ok(summary)
    }

    /// Settle a todo completion. Todos reward no sawdust and never
    /// qualify as black-dog work (they carry urgency, not interest).
    pub fn complete_todo(
        &mut self,
        id: TaskId,
        actual_seconds: u32,
        rating: u8,
    ) -> Result<CompletionSummary, EngineError> {
        self.ensure_alive()?;
        let (todo, stats) = {
            let s = self.state.state();
            let todo = tasks::find_todo(s, id)
                .cloned()
                .ok_or(EngineError::NotFound { kind: "todo", id })?;
            (todo, s.stats.clone())
        };
        if todo.completed {
            return Err(EngineError::AlreadyCompleted { kind: "todo", id });
        }

        let energy_cost = costs::hourly_energy_cost(todo.duration_hours);
        let spirit_cost = costs::todo_spirit_cost(todo.duration_hours);
        check_resources(&stats, energy_cost, spirit_cost, false)?;

        let planned_seconds = (todo.duration_hours * 3600.0).max(0.0) as u32;
        let base = rewards::early_finish_boost(
            rewards::quality_reward(rating),
            actual_seconds,
            planned_seconds,
        );

        let summary = self.state.transaction(|s| {
            let done =
                tasks::mark_todo_completed(s, id, Utc::now(), Some(actual_seconds), rating)?;
            let ctx = RewardContext::new(TaskKind::Todo, false);
            Ok::<_, EngineError>(settle_completion(
                s, &ctx, &done.name, base, 0, energy_cost, spirit_cost,
            ))
        })?;
        self.persist();
        Ok(summary)
    }

    /// Settle the current milestone of a project. Finishing the last
    /// milestone also pays the project completion rewards.
    pub fn complete_milestone(
        &mut self,
        project_id: TaskId,
        actual_seconds: u32,
    ) -> Result<CompletionSummary, EngineError> {
        self.ensure_alive()?;
        let (project, stats) = {
            let s = self.state.state();
            let project = tasks::find_project(s, project_id)
                .cloned()
                .ok_or(EngineError::NotFound { kind: "project", id: project_id })?;
            (project, s.stats.clone())
        };
        if project.is_completed() {
            return Err(EngineError::AlreadyCompleted { kind: "project", id: project_id });
        }

        let energy_cost = costs::hourly_energy_cost(project.daily_time_hours);
        let spirit_cost = costs::interest_spirit_cost(project.interest);
        let black_dog = combo::is_black_dog(project.importance, project.interest);
        check_resources(&stats, energy_cost, spirit_cost, black_dog)?;

        let work_hours = f64::from(actual_seconds) / 3600.0;
        let summary = self.state.transaction(|s| {
            let done = tasks::mark_milestone_completed(s, project_id, Utc::now(), work_hours)?;
            // The final milestone pays the project reward instead of the
            // per-milestone one, not on top of it.
            let (sawdust, flame_base) = if done.project_completed {
                (rewards::PROJECT_SAWDUST_REWARD, rewards::PROJECT_FLAME_REWARD)
            } else {
                (rewards::MILESTONE_SAWDUST_REWARD, rewards::MILESTONE_FLAME_REWARD)
            };
            let ctx = RewardContext::new(TaskKind::Project, black_dog);
            let name = format!("{} / {}", done.project_name, done.milestone_name);
            let flame =
                modifiers::apply_modifiers(s, Domain::MilestoneReward, &ctx, i64::from(flame_base))
                    as u32;
            let mut summary =
                settle_rewards(s, &ctx, &name, sawdust, flame, energy_cost, spirit_cost);
            summary.kind = TaskKind::Project;
            summary.project_completed = done.project_completed;
            if done.project_completed {
                s.log(format!("Project finished: {}", done.project_name));
            }
            Ok::<_, EngineError>(summary)
        })?;
        self.persist();
        Ok(summary)
    }

    /// Buy a shop item with ash.
    pub fn purchase_item(&mut self, item: ShopItemId) -> Result<(), EngineError> {
        self.ensure_alive()?;
        shop::validate_purchase(self.state.state(), item)?;
        self.state.transaction(|s| {
            shop::apply_purchase(s, item);
            s.log(format!("Bought {} for {} ash", item.name(), item.cost()));
        });
        self.persist();
        Ok(())
    }

    /// Start a vacation; the flame neither grows nor decays until it ends.
    pub fn start_vacation(&mut self, kind: VacationKind) -> Result<(), EngineError> {
        self.ensure_alive()?;
        let s = self.state.state();
        if s.vacation.active {
            return Err(EngineError::AlreadyActive("vacation"));
        }
        if s.stats.ash < kind.cost() {
            return Err(EngineError::InsufficientResources {
                reason: format!("need {} ash for the vacation, have {}", kind.cost(), s.stats.ash),
            });
        }
        self.state.transaction(|s| {
            s.stats.ash -= kind.cost();
            let end = s
                .current_day
                .checked_add_days(chrono::Days::new(u64::from(kind.days())))
                .unwrap_or(s.current_day);
            s.vacation.active = true;
            s.vacation.kind = Some(kind);
            s.vacation.start_day = Some(s.current_day);
            s.vacation.end_day = Some(end);
            s.log(format!("Vacation started ({} days)", kind.days()));
        });
        self.persist();
        Ok(())
    }

    /// End the running vacation early. No refund.
    pub fn end_vacation(&mut self) -> Result<(), EngineError> {
        self.ensure_alive()?;
        if !self.state.state().vacation.active {
            return Err(EngineError::NotOnVacation);
        }
        self.state.transaction(|s| {
            s.vacation.clear();
            s.log("Vacation ended early");
        });
        self.persist();
        Ok(())
    }

    /// Advance the simulation by one day.
    pub fn end_day(&mut self) -> Result<DaySummary, EngineError> {
        self.ensure_alive()?;
        let summary = self.state.transaction(|s| {
            let before = s.stats.clone();
            let flame = s.stats.flame;
            let protected = s.vacation.active || s.shop.active_effects.fire_starter;

            let new_flame = if protected { flame } else { rewards::halved_flame(flame) };
            let ctx = RewardContext::new(TaskKind::Daily, false);
            let ash_gain = if s.vacation.active {
                0
            } else {
                modifiers::apply_modifiers(
                    s,
                    Domain::AshConversionRate,
                    &ctx,
                    i64::from(rewards::halved_flame(flame)),
                ) as u32
            };

            s.stats.total_days += 1;
            let mut status_change = None;
            if flame >= 100 {
                s.stats.burning_days += 1;
                if let Some(reached) = s.depression.advance(s.stats.burning_days) {
                    s.log(format!("The black dog retreats: {}", reached.status));
                    status_change = Some(reached.status);
                }
            }

            s.stats.flame = new_flame;
            s.stats.ash += ash_gain;
            s.stats.energy = 100;
            s.stats.spirit = s.depression.daily_spirit.min(100);
            s.combo.combo = 0;
            s.combo.completed_today = 0;
            s.shop.expire_overnight();
            if let Some(next) = s.current_day.succ_opt() {
                s.current_day = next;
            }

            let mut vacation_ended = false;
            if s.vacation.active {
                if let Some(end) = s.vacation.end_day {
                    if s.current_day >= end {
                        s.vacation.clear();
                        vacation_ended = true;
                        s.log("Vacation over");
                    }
                }
            }

            let extinguished = new_flame < 1;
            if extinguished {
                s.life = LifeState::Extinguished;
                s.log("The flame went out");
            } else {
                s.log(format!("Day settled: flame {flame} -> {new_flame}, +{ash_gain} ash"));
            }

            DaySummary {
                day: s.stats.total_days,
                flame: StatDelta::of(before.flame, s.stats.flame),
                ash: StatDelta::of(before.ash, s.stats.ash),
                energy: StatDelta::of(before.energy, s.stats.energy),
                spirit: StatDelta::of(before.spirit, s.stats.spirit),
                burning_days: StatDelta::of(before.burning_days, s.stats.burning_days),
                status_change,
                vacation_ended,
                extinguished,
            }
        });
        self.persist();
        Ok(summary)
    }

    /// Back up the persisted save and start over from the initial state.
    /// The only way out of [`LifeState::Extinguished`].
    pub fn reset_to_initial(&mut self) {
        if let Err(err) = self.storage.clear() {
            log::warn!("could not back up the save before reset: {err}");
        }
        self.state.replace(GameState::new(Utc::now().date_naive()));
        self.persist();
    }

    fn ensure_alive(&self) -> Result<(), EngineError> {
        match self.state.state().life {
            LifeState::Alive => Ok(()),
            LifeState::Extinguished => Err(EngineError::Extinguished),
        }
    }

    fn persist(&mut self) {
        if let Err(err) = self.storage.save(self.state.state()) {
            log::warn!("state not persisted: {err}");
        }
    }
}

/// Precondition check against the unmodified costs. Black-dog work
/// bypasses the spirit gate (it restores spirit instead of spending it).
fn check_resources(
    stats: &CharacterStats,
    energy_cost: u32,
    spirit_cost: i32,
    black_dog: bool,
) -> Result<(), EngineError> {
    if stats.energy < energy_cost {
        return Err(EngineError::InsufficientResources {
            reason: format!("need {energy_cost} energy, have {}", stats.energy),
        });
    }
    if !black_dog && spirit_cost > 0 && stats.spirit < spirit_cost as u32 {
        return Err(EngineError::InsufficientResources {
            reason: format!("need {spirit_cost} spirit, have {}", stats.spirit),
        });
    }
    Ok(())
}

/// Shared settlement for quality-rated completions: runs the flame base
/// through the pipeline, then applies every delta.
fn settle_completion(
    s: &mut GameState,
    ctx: &RewardContext,
    name: &str,
    base: u32,
    sawdust_reward: u32,
    energy_cost: u32,
    spirit_cost: i32,
) -> CompletionSummary {
    let domain = Domain::FlameReward;
    let flame =
        modifiers::apply_modifiers(s, domain, ctx, i64::from(rewards::flame_base(base))) as u32;
    settle_rewards(s, ctx, name, sawdust_reward, flame, energy_cost, spirit_cost)
}

/// Apply the settled numbers: costs, rewards, combo, collar, log line.
fn settle_rewards(
    s: &mut GameState,
    ctx: &RewardContext,
    name: &str,
    sawdust_reward: u32,
    flame_reward: u32,
    energy_cost: u32,
    spirit_cost: i32,
) -> CompletionSummary {
    let spirit_before = s.stats.spirit;
    s.stats.spend_energy(energy_cost);

    let mut ash_bonus = 0;
    if ctx.black_dog {
        s.stats.restore_spirit(combo::BLACK_DOG_SPIRIT_RESTORE as u32);
        ash_bonus = flame_reward;
        s.stats.ash += ash_bonus;
        s.combo.combo += 1;
    } else {
        let modified = modifiers::apply_modifiers(s, Domain::SpiritCost, ctx, i64::from(spirit_cost));
        s.stats.apply_spirit_cost(modified as i32);
        s.combo.combo = 0;
    }
    s.combo.completed_today += 1;
    s.combo.total_completed += 1;

    s.stats.sawdust += sawdust_reward;
    s.stats.flame += flame_reward;

    // Collar auto-heal fires at most once per purchase
    if s.stats.spirit < 20
        && s.shop.active_effects.black_dog_collar
        && !s.shop.effect_status.black_dog_collar_used
    {
        s.stats.restore_spirit(10);
        s.shop.effect_status.black_dog_collar_used = true;
        s.log("The black dog collar glows: +10 spirit");
    }

    s.log(format!(
        "Completed {name}: +{sawdust_reward} sawdust, +{flame_reward} flame"
    ));

    CompletionSummary {
        kind: ctx.task_kind,
        name: name.to_string(),
        day: s.stats.total_days,
        sawdust_reward,
        flame_reward,
        ash_bonus,
        energy_cost,
        spirit_delta: s.stats.spirit as i32 - spirit_before as i32,
        streak_days: None,
        combo: s.combo.combo,
        project_completed: false,
        energy: s.stats.energy,
        spirit: s.stats.spirit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use matchlight_logic::Tier;

    fn engine() -> Engine<MemoryStore> {
        Engine::with_state(MemoryStore::new(), GameState::default())
    }

    #[test]
    fn test_daily_completion_settles_rewards() {
        let mut e = engine();
        // 48 minutes -> energy cost 10; medium interest -> spirit cost 20
        let id = e.registry().add_daily("journal", 48, Tier::Medium, Tier::Medium);

        let summary = e.complete_daily_task(id, 48 * 60, 5).unwrap();
        assert_eq!(summary.sawdust_reward, 10);
        assert_eq!(summary.flame_reward, 5);
        assert_eq!(summary.energy_cost, 10);
        assert_eq!(summary.spirit_delta, -20);
        assert_eq!(summary.streak_days, Some(1));

        assert_eq!(e.stats().energy, 90);
        assert_eq!(e.stats().spirit, 30);
        assert_eq!(e.stats().sawdust, 110);
        assert_eq!(e.stats().flame, 105);
    }

    #[test]
    fn test_high_interest_restores_spirit() {
        let mut e = engine();
        let id = e.registry().add_daily("paint", 48, Tier::Low, Tier::High);
        let summary = e.complete_daily_task(id, 48 * 60, 5).unwrap();
        assert_eq!(summary.spirit_delta, 20);
        assert_eq!(e.stats().spirit, 70);
    }

    #[test]
    fn test_insufficient_energy_rejected_without_change() {
        let mut e = engine();
        // 480 minutes -> energy cost 100
        let id = e.registry().add_daily("marathon", 480, Tier::Medium, Tier::Medium);
        e.state.transaction(|s| s.stats.energy = 50);

        let err = e.complete_daily_task(id, 1000, 5).unwrap_err();
        assert!(matches!(err, EngineError::InsufficientResources { .. }));
        assert_eq!(e.stats().energy, 50);
        assert_eq!(e.daily_tasks()[0].completed_times, 0);
    }

    #[test]
    fn test_black_dog_bypasses_spirit_and_builds_combo() {
        let mut e = engine();
        let id = e.registry().add_daily("chores", 48, Tier::High, Tier::Low);
        e.state.transaction(|s| s.stats.spirit = 0);

        let summary = e.complete_daily_task(id, 48 * 60, 5).unwrap();
        // Crit: flame base 5 doubled, no combo yet
        assert_eq!(summary.flame_reward, 10);
        assert_eq!(summary.ash_bonus, 10);
        assert_eq!(summary.combo, 1);
        assert_eq!(e.stats().spirit, 20);
    }

    #[test]
    fn test_combo_resets_on_non_qualifying_completion() {
        let mut e = engine();
        let dog = e.registry().add_daily("chores", 48, Tier::High, Tier::Low);
        let fun = e.registry().add_daily("paint", 48, Tier::Low, Tier::High);

        e.complete_daily_task(dog, 0, 5).unwrap();
        assert_eq!(e.game_state().combo.combo, 1);
        e.complete_daily_task(fun, 0, 5).unwrap();
        assert_eq!(e.game_state().combo.combo, 0);
    }

    #[test]
    fn test_todo_rewards_no_sawdust() {
        let mut e = engine();
        let id = e
            .registry()
            .add_todo("taxes", "2024-04-15".parse().unwrap(), 2.0, Tier::High, Tier::High);
        let summary = e.complete_todo(id, 7200, 5).unwrap();
        assert_eq!(summary.sawdust_reward, 0);
        assert_eq!(e.stats().sawdust, 100);
        assert!(summary.flame_reward > 0);
    }

    #[test]
    fn test_milestone_and_project_rewards() {
        let mut e = engine();
        let id = e.registry().add_project(
            "thesis",
            "2024-06-01".parse().unwrap(),
            2.0,
            Tier::Medium,
            Tier::Medium,
            vec![
                crate::model::Milestone::new("outline", None),
                crate::model::Milestone::new("draft", None),
            ],
        );

        let first = e.complete_milestone(id, 3600).unwrap();
        assert_eq!(first.sawdust_reward, 60);
        assert_eq!(first.flame_reward, 40);
        assert!(!first.project_completed);

        e.state.transaction(|s| {
            s.stats.energy = 100;
            s.stats.spirit = 100;
        });
        let last = e.complete_milestone(id, 3600).unwrap();
        assert_eq!(last.sawdust_reward, 200);
        assert!(last.project_completed);
        assert!(matches!(
            e.complete_milestone(id, 3600),
            Err(EngineError::AlreadyCompleted { .. })
        ));
    }

    #[test]
    fn test_single_milestone_project_pays_project_reward_only() {
        let mut e = engine();
        let id = e.registry().add_project(
            "move house",
            "2024-06-01".parse().unwrap(),
            2.0,
            Tier::Medium,
            Tier::Medium,
            vec![crate::model::Milestone::new("pack", None)],
        );

        let summary = e.complete_milestone(id, 3600).unwrap();
        assert!(summary.project_completed);
        assert_eq!(summary.sawdust_reward, 200);
        assert_eq!(summary.flame_reward, 100);
    }

    #[test]
    fn test_end_day_baseline_scenario() {
        let mut e = engine();
        e.state.transaction(|s| {
            s.stats.flame = 100;
            s.stats.ash = 0;
        });

        let summary = e.end_day().unwrap();
        assert_eq!(e.stats().flame, 50);
        assert_eq!(e.stats().ash, 50);
        assert_eq!(e.stats().total_days, 2);
        assert_eq!(e.stats().burning_days, 1);
        assert_eq!(e.stats().energy, 100);
        assert_eq!(e.stats().spirit, e.depression().daily_spirit);
        assert_eq!(summary.flame.change(), -50);
        assert!(!summary.extinguished);
    }

    #[test]
    fn test_end_day_extinguishes_at_zero_flame() {
        let mut e = engine();
        e.state.transaction(|s| s.stats.flame = 1);

        let summary = e.end_day().unwrap();
        assert!(summary.extinguished);
        assert_eq!(e.life(), LifeState::Extinguished);
        assert!(matches!(e.end_day(), Err(EngineError::Extinguished)));

        e.reset_to_initial();
        assert_eq!(e.life(), LifeState::Alive);
        assert_eq!(e.stats().flame, 100);
    }

    #[test]
    fn test_vacation_freezes_flame() {
        let mut e = engine();
        e.start_vacation(VacationKind::Short).unwrap();
        assert_eq!(e.stats().ash, 5_000);

        let summary = e.end_day().unwrap();
        assert_eq!(e.stats().flame, 100);
        assert_eq!(summary.ash.change(), 0);

        assert!(matches!(
            e.start_vacation(VacationKind::Short),
            Err(EngineError::AlreadyActive(_))
        ));
        e.end_vacation().unwrap();
        assert!(matches!(e.end_vacation(), Err(EngineError::NotOnVacation)));
    }

    #[test]
    fn test_fire_starter_blocks_halving_once() {
        let mut e = engine();
        e.purchase_item(ShopItemId::FireStarter).unwrap();

        e.end_day().unwrap();
        // Flame kept, but ash conversion still happened
        assert_eq!(e.stats().flame, 100);
        assert!(!e.shop().active_effects.fire_starter);

        e.end_day().unwrap();
        assert_eq!(e.stats().flame, 50);
    }
}
