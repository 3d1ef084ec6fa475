//! Versioned save/load over a key-value store.
//!
//! Saves are wrapped in an envelope carrying the schema version and a
//! save timestamp. Loads run every persisted document through the
//! migration chain before deserializing, so old flat saves (version 0,
//! no envelope) still come back as a current `GameState`. A document
//! that cannot be parsed at all is moved aside under a timestamped
//! backup key rather than deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::PersistenceError;
use crate::model::{GameState, CURRENT_VERSION};
use crate::store::KeyValueStore;

/// Key the live save lives under.
pub const STORAGE_KEY: &str = "matchlight";

/// On-store wrapper around the serialized state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedEnvelope {
    pub schema_version: u32,
    pub saved_at: DateTime<Utc>,
    pub payload: GameState,
}

/// Export wrapper handed to the user (and accepted back by `import`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportEnvelope {
    pub version: u32,
    pub exported_at: DateTime<Utc>,
    pub data: Value,
}

/// Persistence front-end over any [`KeyValueStore`].
pub struct Storage<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> Storage<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Persist the state under [`STORAGE_KEY`].
    ///
    /// If the full snapshot cannot be written, a minimal envelope holding
    /// only the stats and task lists is tried instead, so a later load
    /// recovers the progress that matters most.
    pub fn save(&mut self, state: &GameState) -> Result<(), PersistenceError> {
        let envelope = PersistedEnvelope {
            schema_version: CURRENT_VERSION,
            saved_at: Utc::now(),
            payload: state.clone(),
        };
        let full = serde_json::to_string(&envelope)
            .map_err(PersistenceError::from)
            .and_then(|doc| self.store.set(STORAGE_KEY, &doc));
        match full {
            Ok(()) => Ok(()),
            Err(err) => {
                log::warn!("full save failed ({err}), writing minimal snapshot");
                let minimal = PersistedEnvelope {
                    schema_version: CURRENT_VERSION,
                    saved_at: Utc::now(),
                    payload: GameState {
                        stats: state.stats.clone(),
                        daily_tasks: state.daily_tasks.clone(),
                        projects: state.projects.clone(),
                        todos: state.todos.clone(),
                        ..GameState::default()
                    },
                };
                let doc = serde_json::to_string(&minimal)?;
                self.store.set(STORAGE_KEY, &doc)
            }
        }
    }

    /// Load and migrate the persisted state, if any.
    ///
    /// A corrupt document is backed up under `matchlight_corrupted_<ms>`
    /// and `None` is returned, as if no save existed.
    pub fn load(&mut self) -> Result<Option<GameState>, PersistenceError> {
        let Some(raw) = self.store.get(STORAGE_KEY) else {
            return Ok(None);
        };
        match parse_and_migrate(&raw) {
            Ok(state) => Ok(Some(state)),
            Err(err) => {
                log::error!("saved state is corrupt ({err}), backing it up");
                let backup_key =
                    format!("{STORAGE_KEY}_corrupted_{}", Utc::now().timestamp_millis());
                self.store.set(&backup_key, &raw)?;
                self.store.remove(STORAGE_KEY)?;
                Ok(None)
            }
        }
    }

    /// Serialize the persisted state into an export envelope.
    pub fn export(&mut self) -> Result<String, PersistenceError> {
        let state = self.load()?.ok_or(PersistenceError::NoData)?;
        let envelope = ExportEnvelope {
            version: CURRENT_VERSION,
            exported_at: Utc::now(),
            data: serde_json::to_value(&state)?,
        };
        Ok(serde_json::to_string_pretty(&envelope)?)
    }

    /// Validate, migrate, and persist an exported document. Returns the
    /// imported state on success; the previous save is untouched on error.
    pub fn import(&mut self, raw: &str) -> Result<GameState, PersistenceError> {
        let doc: Value = serde_json::from_str(raw)?;
        let data = doc
            .get("data")
            .cloned()
            .ok_or_else(|| PersistenceError::InvalidImport("missing `data` field".into()))?;
        let from = data
            .get("version")
            .and_then(Value::as_u64)
            .unwrap_or(0) as u32;
        let migrated = migrate(data, from);
        let state: GameState = serde_json::from_value(migrated)
            .map_err(|e| PersistenceError::InvalidImport(e.to_string()))?;
        self.save(&state)?;
        Ok(state)
    }

    /// Move the live save to a timestamped backup key and remove it.
    pub fn clear(&mut self) -> Result<(), PersistenceError> {
        if let Some(raw) = self.store.get(STORAGE_KEY) {
            let backup_key =
                format!("{STORAGE_KEY}_backup_{}", Utc::now().timestamp_millis());
            self.store.set(&backup_key, &raw)?;
            self.store.remove(STORAGE_KEY)?;
        }
        Ok(())
    }
}

fn parse_and_migrate(raw: &str) -> Result<GameState, PersistenceError> {
    let doc: Value = serde_json::from_str(raw)?;
    // Enveloped saves carry schemaVersion at the top; legacy flat saves
    // are the payload itself at version 0.
    let (from, payload) = match doc.get("schemaVersion").and_then(Value::as_u64) {
        Some(v) => {
            let payload = doc
                .get("payload")
                .cloned()
                .ok_or_else(|| {
                    PersistenceError::InvalidImport("envelope without payload".into())
                })?;
            (v as u32, payload)
        }
        None => (0, doc),
    };
    let migrated = migrate(payload, from);
    Ok(serde_json::from_value(migrated)?)
}

/// Run the migration chain from `from` up to [`CURRENT_VERSION`].
///
/// Each step is additive and idempotent: re-running the chain on an
/// already-current document changes nothing.
pub fn migrate(mut payload: Value, from: u32) -> Value {
    let mut version = from;
    while version < CURRENT_VERSION {
        payload = match version {
            0 => migrate_v0_to_v1(payload),
            _ => break,
        };
        version += 1;
    }
    payload
}

/// v0 -> v1: fill in the sub-objects added since the flat-save era and
/// stamp the version field.
fn migrate_v0_to_v1(mut payload: Value) -> Value {
    let Some(obj) = payload.as_object_mut() else {
        return payload;
    };
    for (field, default) in [
        ("stats", json!({})),
        ("dailyTasks", json!([])),
        ("projects", json!([])),
        ("todos", json!([])),
        ("depression", json!({})),
        ("combo", json!({})),
        ("shop", json!({})),
        ("vacation", json!({})),
        ("logs", json!([])),
    ] {
        obj.entry(field.to_string()).or_insert(default);
    }
    obj.insert("version".to_string(), json!(1));
    payload
}
