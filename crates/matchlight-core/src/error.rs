//! Error taxonomy for the engine and the persistence layer.
//!
//! Nothing here is fatal to a running session: command errors are
//! recoverable preconditions, and persistence errors only put durability
//! at risk — the in-memory state stays authoritative.

use thiserror::Error;

use crate::model::TaskId;

/// Recoverable command failures. Every variant leaves the game state
/// exactly as it was before the command.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A completion precondition was not met (energy or spirit too low,
    /// or not enough ash for a purchase or vacation).
    #[error("insufficient resources: {reason}")]
    InsufficientResources { reason: String },

    /// The command referenced an unknown task, project, or milestone.
    #[error("unknown {kind} id {id}")]
    NotFound { kind: &'static str, id: TaskId },

    /// The todo or milestone is terminal and cannot be completed again.
    #[error("{kind} {id} is already completed")]
    AlreadyCompleted { kind: &'static str, id: TaskId },

    /// A still-active effect or vacation was purchased/started again.
    #[error("{0} is already active")]
    AlreadyActive(&'static str),

    /// `end_vacation` was called with no vacation running.
    #[error("no vacation is active")]
    NotOnVacation,

    /// The character burned out; only `reset_to_initial` is accepted.
    #[error("the character is extinguished; reset to start over")]
    Extinguished,
}

/// Durability-layer failures. The caller logs these and carries on.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("store i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization failed: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("invalid import payload: {0}")]
    InvalidImport(String),

    #[error("no saved state to export")]
    NoData,
}

/// Failures of the dotted-path state accessors.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("invalid state path: {0}")]
    InvalidPath(String),

    #[error("value rejected by the state shape: {0}")]
    Shape(#[from] serde_json::Error),
}
