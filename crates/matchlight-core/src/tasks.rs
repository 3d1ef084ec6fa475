//! Task CRUD, queries, and completion flag bookkeeping.
//!
//! The registry is a thin view over the state container: every mutation
//! goes through a transaction so subscribers see it. Reward settlement
//! lives in the engine; this module only flips the completion flags and
//! keeps the collections ordered.

use chrono::{DateTime, NaiveDate, Utc};

use matchlight_logic::{streak, Tier};

use crate::error::EngineError;
use crate::model::{DailyTask, GameState, Milestone, Project, TaskId, Todo};
use crate::state::StateManager;

/// Next task id for this state graph.
///
/// Ids are the add-time millisecond timestamp, bumped past the current
/// maximum so that adds within the same millisecond stay distinct and
/// ordering by id is creation order.
pub fn next_task_id(state: &GameState) -> TaskId {
    let max_existing = state
        .daily_tasks
        .iter()
        .map(|t| t.id)
        .chain(state.projects.iter().map(|p| p.id))
        .chain(state.todos.iter().map(|t| t.id))
        .max()
        .unwrap_or(0);
    Utc::now().timestamp_millis().max(max_existing + 1)
}

/// Mutable task API over the state container.
pub struct TaskRegistry<'a> {
    state: &'a mut StateManager,
}

impl<'a> TaskRegistry<'a> {
    pub fn new(state: &'a mut StateManager) -> Self {
        Self { state }
    }

    // ── adds ──

    pub fn add_daily(
        &mut self,
        name: impl Into<String>,
        duration_minutes: u32,
        importance: Tier,
        interest: Tier,
    ) -> TaskId {
        let name = name.into();
        self.state.transaction(|s| {
            let id = next_task_id(s);
            s.daily_tasks.push(DailyTask {
                id,
                name,
                duration_minutes,
                importance,
                interest,
                completed_times: 0,
                streak_days: 0,
                last_completed: None,
                created_at: Some(Utc::now()),
            });
            id
        })
    }

    pub fn add_project(
        &mut self,
        name: impl Into<String>,
        deadline: NaiveDate,
        daily_time_hours: f64,
        importance: Tier,
        interest: Tier,
        milestones: Vec<Milestone>,
    ) -> TaskId {
        let name = name.into();
        self.state.transaction(|s| {
            let id = next_task_id(s);
            s.projects.push(Project {
                id,
                name,
                deadline,
                daily_time_hours,
                importance,
                interest,
                milestones,
                current_milestone: 0,
                completed_at: None,
                created_at: Some(Utc::now()),
            });
            id
        })
    }

    pub fn add_todo(
        &mut self,
        name: impl Into<String>,
        deadline: NaiveDate,
        duration_hours: f64,
        importance: Tier,
        urgency: Tier,
    ) -> TaskId {
        let name = name.into();
        self.state.transaction(|s| {
            let id = next_task_id(s);
            s.todos.push(Todo {
                id,
                name,
                deadline,
                duration_hours,
                importance,
                urgency,
                completed: false,
                completed_at: None,
                satisfaction: None,
                actual_seconds: None,
                created_at: Some(Utc::now()),
            });
            id
        })
    }

    // ── updates ──

    pub fn update_daily(
        &mut self,
        id: TaskId,
        f: impl FnOnce(&mut DailyTask),
    ) -> Result<(), EngineError> {
        self.state.transaction(|s| {
            let task = s
                .daily_tasks
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or(EngineError::NotFound { kind: "daily task", id })?;
            f(task);
            Ok(())
        })
    }

    pub fn update_project(
        &mut self,
        id: TaskId,
        f: impl FnOnce(&mut Project),
    ) -> Result<(), EngineError> {
        self.state.transaction(|s| {
            let project = s
                .projects
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or(EngineError::NotFound { kind: "project", id })?;
            f(project);
            Ok(())
        })
    }

    pub fn update_todo(
        &mut self,
        id: TaskId,
        f: impl FnOnce(&mut Todo),
    ) -> Result<(), EngineError> {
        self.state.transaction(|s| {
            let todo = s
                .todos
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or(EngineError::NotFound { kind: "todo", id })?;
            f(todo);
            Ok(())
        })
    }

    // ── removals ──

    pub fn remove_daily(&mut self, id: TaskId) -> Result<(), EngineError> {
        self.state.transaction(|s| {
            let before = s.daily_tasks.len();
            s.daily_tasks.retain(|t| t.id != id);
            if s.daily_tasks.len() == before {
                return Err(EngineError::NotFound { kind: "daily task", id });
            }
            Ok(())
        })
    }

    pub fn remove_project(&mut self, id: TaskId) -> Result<(), EngineError> {
        self.state.transaction(|s| {
            let before = s.projects.len();
            s.projects.retain(|p| p.id != id);
            if s.projects.len() == before {
                return Err(EngineError::NotFound { kind: "project", id });
            }
            Ok(())
        })
    }

    pub fn remove_todo(&mut self, id: TaskId) -> Result<(), EngineError> {
        self.state.transaction(|s| {
            let before = s.todos.len();
            s.todos.retain(|t| t.id != id);
            if s.todos.len() == before {
                return Err(EngineError::NotFound { kind: "todo", id });
            }
            Ok(())
        })
    }
}

// ── queries ──

pub fn find_daily(state: &GameState, id: TaskId) -> Option<&DailyTask> {
    state.daily_tasks.iter().find(|t| t.id == id)
}

pub fn find_project(state: &GameState, id: TaskId) -> Option<&Project> {
    state.projects.iter().find(|p| p.id == id)
}

pub fn find_todo(state: &GameState, id: TaskId) -> Option<&Todo> {
    state.todos.iter().find(|t| t.id == id)
}

/// Daily tasks ordered by importance, then interest, then duration.
pub fn sorted_daily_tasks(state: &GameState) -> Vec<&DailyTask> {
    let mut tasks: Vec<&DailyTask> = state.daily_tasks.iter().collect();
    tasks.sort_by(|a, b| {
        b.importance
            .cmp(&a.importance)
            .then(b.interest.cmp(&a.interest))
            .then(b.duration_minutes.cmp(&a.duration_minutes))
    });
    tasks
}

/// Incomplete todos ordered by importance, urgency, deadline, duration.
pub fn active_todos(state: &GameState) -> Vec<&Todo> {
    let mut todos: Vec<&Todo> = state.todos.iter().filter(|t| !t.completed).collect();
    todos.sort_by(|a, b| {
        b.importance
            .cmp(&a.importance)
            .then(b.urgency.cmp(&a.urgency))
            .then(a.deadline.cmp(&b.deadline))
            .then(
                b.duration_hours
                    .partial_cmp(&a.duration_hours)
                    .unwrap_or(std::cmp::Ordering::Equal),
            )
    });
    todos
}

/// Incomplete projects ordered by deadline, then importance, then interest.
pub fn active_projects(state: &GameState) -> Vec<&Project> {
    let mut projects: Vec<&Project> = state
        .projects
        .iter()
        .filter(|p| !p.is_completed())
        .collect();
    projects.sort_by(|a, b| {
        a.deadline
            .cmp(&b.deadline)
            .then(b.importance.cmp(&a.importance))
            .then(b.interest.cmp(&a.interest))
    });
    projects
}

/// Daily tasks not yet completed on the current simulated day.
pub fn pending_daily_count(state: &GameState) -> usize {
    state
        .daily_tasks
        .iter()
        .filter(|t| t.last_completed != Some(state.current_day))
        .count()
}

// ── completion flag flips, called from engine transactions ──

pub(crate) fn mark_daily_completed(
    state: &mut GameState,
    id: TaskId,
) -> Result<DailyTask, EngineError> {
    let today = state.current_day;
    let task = state
        .daily_tasks
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or(EngineError::NotFound { kind: "daily task", id })?;
    if task.last_completed == Some(today) {
        return Err(EngineError::AlreadyCompleted { kind: "daily task", id });
    }
    task.completed_times += 1;
    task.streak_days = streak::next_streak(task.last_completed, today, task.streak_days);
    task.last_completed = Some(today);
    Ok(task.clone())
}

pub(crate) fn mark_todo_completed(
    state: &mut GameState,
    id: TaskId,
    now: DateTime<Utc>,
    actual_seconds: Option<u32>,
    satisfaction: u8,
) -> Result<Todo, EngineError> {
    let todo = state
        .todos
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or(EngineError::NotFound { kind: "todo", id })?;
    if todo.completed {
        return Err(EngineError::AlreadyCompleted { kind: "todo", id });
    }
    todo.completed = true;
    todo.completed_at = Some(now);
    todo.actual_seconds = actual_seconds;
    todo.satisfaction = Some(satisfaction.min(5));
    Ok(todo.clone())
}

/// Outcome of a milestone flag flip.
pub(crate) struct MilestoneCompletion {
    pub project_name: String,
    pub milestone_name: String,
    pub project_completed: bool,
}

pub(crate) fn mark_milestone_completed(
    state: &mut GameState,
    project_id: TaskId,
    now: DateTime<Utc>,
    work_hours: f64,
) -> Result<MilestoneCompletion, EngineError> {
    let project = state
        .projects
        .iter_mut()
        .find(|p| p.id == project_id)
        .ok_or(EngineError::NotFound { kind: "project", id: project_id })?;
    if project.is_completed() {
        return Err(EngineError::AlreadyCompleted { kind: "project", id: project_id });
    }
    let index = project.current_milestone;
    let milestone = project
        .milestones
        .get_mut(index)
        .ok_or(EngineError::NotFound { kind: "milestone", id: project_id })?;
    milestone.completed = true;
    milestone.completed_at = Some(now);
    milestone.progress = 100;
    milestone.time_spent_hours += work_hours;
    let milestone_name = milestone.name.clone();

    project.current_milestone += 1;
    let project_completed = project.current_milestone >= project.milestones.len();
    if project_completed && project.completed_at.is_none() {
        project.completed_at = Some(now);
    }
    Ok(MilestoneCompletion {
        project_name: project.name.clone(),
        milestone_name,
        project_completed,
    })
}
