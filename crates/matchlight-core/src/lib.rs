//! Matchlight Core - Resource-Economy & Persistence Engine
//!
//! The engine behind a life-gamification game: a matchstick character
//! burns down over simulated days while the player completes real tasks
//! to earn in-game resources.
//!
//! # Architecture
//!
//! - **State container** ([`state`]): owns the canonical [`model::GameState`],
//!   offers dotted-path access and change subscriptions.
//! - **Task registry** ([`tasks`]): CRUD and completion flags for daily
//!   tasks, projects, and todos.
//! - **Modifier pipeline** ([`modifiers`]): ordered transforms turning base
//!   rewards and costs into final figures (shop effects, combo, vacation).
//! - **Settlement engine** ([`engine`]): atomic commands — complete a task,
//!   end the day, buy an item — persisting after each transaction.
//! - **Persistence** ([`persistence`], [`store`]): versioned JSON envelope
//!   over a pluggable key-value store with an additive migration chain.
//!
//! # Example
//!
//! ```rust,no_run
//! use matchlight_core::engine::Engine;
//! use matchlight_core::store::MemoryStore;
//! use matchlight_logic::Tier;
//!
//! let mut engine = Engine::new(MemoryStore::new()).unwrap();
//! let id = engine.registry().add_daily("journal", 30, Tier::Medium, Tier::High);
//! let summary = engine.complete_daily_task(id, 25 * 60, 5).unwrap();
//! println!("+{} flame", summary.flame_reward);
//! engine.end_day().unwrap();
//! ```

pub mod engine;
pub mod error;
pub mod model;
pub mod modifiers;
pub mod persistence;
pub mod shop;
pub mod state;
pub mod store;
pub mod tasks;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::engine::{CompletionSummary, DaySummary, Engine};
    pub use crate::error::{EngineError, PersistenceError};
    pub use crate::model::{GameState, LifeState, TaskKind, VacationKind};
    pub use crate::shop::ShopItemId;
    pub use crate::store::{FileStore, KeyValueStore, MemoryStore};
    pub use matchlight_logic::Tier;
}
