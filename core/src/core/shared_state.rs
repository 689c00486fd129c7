// hookline/src/core/shared_state.rs

//! The per-run scratch pad through which steps hand identifiers to later
//! steps (and to compensations) without knowing each other's types.

use crate::error::{HookError, HookResult};
use parking_lot::RwLock;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Reserved key under which a run stores a handle to its own `ContextData<T>`.
pub const INITIAL_CONTEXT_KEY: &str = "initialContext";

type SharedValue = Box<dyn Any + Send + Sync>;

/// String-keyed store of arbitrary values, scoped to exactly one `HookRun`.
///
/// Cloning yields another handle to the same map. Absence of a key means the
/// step that was supposed to produce it did not run (or failed before doing
/// so); compensations treat that as "nothing to undo".
#[derive(Clone, Default)]
pub struct SharedState(Arc<RwLock<HashMap<String, SharedValue>>>);

impl SharedState {
  pub fn new() -> Self {
    Self::default()
  }

  /// Stores `value` under `key`, silently replacing whatever was there.
  pub fn set<V>(&self, key: impl Into<String>, value: V)
  where
    V: Send + Sync + 'static,
  {
    self.0.write().insert(key.into(), Box::new(value));
  }

  /// Stores `value` only if `key` is free. Returns whether it was stored.
  pub fn set_if_absent<V>(&self, key: impl Into<String>, value: V) -> bool
  where
    V: Send + Sync + 'static,
  {
    let mut map = self.0.write();
    let key = key.into();
    if map.contains_key(&key) {
      return false;
    }
    map.insert(key, Box::new(value));
    true
  }

  /// Returns a clone of the value under `key`, or `None` if it is absent or
  /// was stored with a different type.
  pub fn get<V>(&self, key: &str) -> Option<V>
  where
    V: Clone + 'static,
  {
    self.0.read().get(key).and_then(|value| value.downcast_ref::<V>()).cloned()
  }

  /// Like [`get`](Self::get) but for values a step cannot work without.
  pub fn require<V>(&self, key: &str) -> HookResult<V>
  where
    V: Clone + 'static,
  {
    let map = self.0.read();
    let value = map.get(key).ok_or_else(|| HookError::MissingSharedValue { key: key.to_string() })?;
    value
      .downcast_ref::<V>()
      .cloned()
      .ok_or_else(|| HookError::SharedTypeMismatch {
        key: key.to_string(),
        expected_type: std::any::type_name::<V>().to_string(),
      })
  }

  /// Mutates the value under `key` in place, starting from `V::default()` when
  /// the key is absent or holds another type.
  ///
  /// Steps use this to record side effects one at a time (e.g. each uploaded
  /// path) so a compensation sees everything done before a mid-step failure.
  pub fn update<V, F>(&self, key: impl Into<String>, f: F)
  where
    V: Default + Send + Sync + 'static,
    F: FnOnce(&mut V),
  {
    let mut map = self.0.write();
    let entry = map.entry(key.into()).or_insert_with(|| Box::new(V::default()));
    if !entry.is::<V>() {
      *entry = Box::new(V::default());
    }
    if let Some(value) = entry.downcast_mut::<V>() {
      f(value);
    }
  }

  /// Removes `key`, returning whether it was present.
  pub fn remove(&self, key: &str) -> bool {
    self.0.write().remove(key).is_some()
  }

  pub fn contains(&self, key: &str) -> bool {
    self.0.read().contains_key(key)
  }

  pub fn clear(&self) {
    self.0.write().clear();
  }

  pub fn len(&self) -> usize {
    self.0.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.read().is_empty()
  }

  /// Sorted list of the keys currently present.
  pub fn keys(&self) -> Vec<String> {
    let mut keys: Vec<String> = self.0.read().keys().cloned().collect();
    keys.sort();
    keys
  }
}

impl fmt::Debug for SharedState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("SharedState").field("keys", &self.keys()).finish()
  }
}
