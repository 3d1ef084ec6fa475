//! Central state container with path access and change notification.
//!
//! All mutation funnels through here so that subscribers observe every
//! change. Paths are dotted (`stats.flame`, `shop.activeEffects.mirror`)
//! and address the camelCase JSON shape of the state, matching what the
//! persistence layer writes.

use std::panic::{self, AssertUnwindSafe};

use serde_json::{Map, Value};

use crate::error::StateError;
use crate::model::GameState;

/// Handle returned by [`StateManager::subscribe`], used to unsubscribe.
pub type SubscriberId = u64;

type Subscriber = Box<dyn FnMut(&str, &Value, &GameState)>;

/// Owns the live [`GameState`] and fans out change notifications.
pub struct StateManager {
    state: GameState,
    subscribers: Vec<(SubscriberId, Subscriber)>,
    next_id: SubscriberId,
}

impl StateManager {
    pub fn new(state: GameState) -> Self {
        Self {
            state,
            subscribers: Vec::new(),
            next_id: 1,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Replace the whole state, notifying with the wildcard path.
    pub fn replace(&mut self, state: GameState) {
        self.state = state;
        Self::notify(&mut self.subscribers, &self.state, "*", &Value::Null);
    }

    /// Read the value at a dotted path, or `None` if any segment is
    /// missing.
    pub fn get(&self, path: &str) -> Option<Value> {
        let root = serde_json::to_value(&self.state).ok()?;
        let mut cursor = &root;
        for segment in path.split('.') {
            cursor = cursor.get(segment)?;
        }
        Some(cursor.clone())
    }

    /// Write `value` at a dotted path, creating intermediate objects as
    /// needed, then notify subscribers of that path.
    ///
    /// The write is rejected (and the state untouched) when the result
    /// no longer deserializes into a valid state graph.
    pub fn set(&mut self, path: &str, value: Value) -> Result<(), StateError> {
        if path.is_empty() {
            return Err(StateError::InvalidPath(path.to_string()));
        }
        let mut root = serde_json::to_value(&self.state)?;
        {
            let mut cursor = &mut root;
            let segments: Vec<&str> = path.split('.').collect();
            for segment in &segments[..segments.len() - 1] {
                let obj = cursor
                    .as_object_mut()
                    .ok_or_else(|| StateError::InvalidPath(path.to_string()))?;
                cursor = obj
                    .entry(segment.to_string())
                    .or_insert_with(|| Value::Object(Map::new()));
            }
            let last = segments[segments.len() - 1];
            let obj = cursor
                .as_object_mut()
                .ok_or_else(|| StateError::InvalidPath(path.to_string()))?;
            obj.insert(last.to_string(), value.clone());
        }
        self.state = serde_json::from_value(root)?;
        Self::notify(&mut self.subscribers, &self.state, path, &value);
        Ok(())
    }

    /// Shallow-merge a partial document into the top level of the state.
    pub fn patch(&mut self, partial: Value) -> Result<(), StateError> {
        let Value::Object(fields) = partial else {
            return Err(StateError::InvalidPath("patch must be an object".into()));
        };
        let mut root = serde_json::to_value(&self.state)?;
        let obj = root
            .as_object_mut()
            .ok_or_else(|| StateError::InvalidPath("state root".into()))?;
        for (key, value) in fields {
            obj.insert(key, value);
        }
        self.state = serde_json::from_value(root)?;
        Self::notify(&mut self.subscribers, &self.state, "*", &Value::Null);
        Ok(())
    }

    /// Run `f` against the typed state and notify subscribers once with
    /// the wildcard path. Used by commands that touch many fields.
    pub fn transaction<R>(&mut self, f: impl FnOnce(&mut GameState) -> R) -> R {
        let out = f(&mut self.state);
        Self::notify(&mut self.subscribers, &self.state, "*", &Value::Null);
        out
    }

    /// Register a change callback. It receives the changed path (or `*`
    /// for whole-state changes), the new value at that path, and the
    /// full state.
    pub fn subscribe(&mut self, f: impl FnMut(&str, &Value, &GameState) + 'static) -> SubscriberId {
        let id = self.next_id;
        self.next_id += 1;
        self.subscribers.push((id, Box::new(f)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) {
        self.subscribers.retain(|(sid, _)| *sid != id);
    }

    // A panicking subscriber is logged and skipped; it never poisons the
    // state or starves the others.
    fn notify(
        subscribers: &mut Vec<(SubscriberId, Subscriber)>,
        state: &GameState,
        path: &str,
        value: &Value,
    ) {
        for (id, f) in subscribers.iter_mut() {
            let result = panic::catch_unwind(AssertUnwindSafe(|| f(path, value, state)));
            if result.is_err() {
                log::error!("state subscriber {id} panicked on path {path}");
            }
        }
    }
}
