//! Mutable per-computation data context.

use std::collections::HashMap;

use parking_lot::RwLock;
use serde_json::Value;

/// Key/value data a computation carries through the graph.
///
/// Nodes read and write through a shared reference. The lock covers single
/// operations only; in a parallel computation, coordination between writers
/// of the same key is the caller's responsibility. Node bodies must not
/// retain references to a context across computations.
#[derive(Debug, Default)]
pub struct Context {
    data: RwLock<HashMap<String, Value>>,
}

impl Context {
    pub fn new() -> Self {
        Context::default()
    }

    /// Store a value under `key`, replacing any previous value.
    pub fn store(&self, key: impl Into<String>, value: impl Into<Value>) {
        self.data.write().insert(key.into(), value.into());
    }

    /// Current value under `key`, if any.
    pub fn read(&self, key: &str) -> Option<Value> {
        self.data.read().get(key).cloned()
    }

    /// Remove `key`. Returns whether a value was present.
    pub fn delete(&self, key: &str) -> bool {
        self.data.write().remove(key).is_some()
    }

    pub fn have_key(&self, key: &str) -> bool {
        self.data.read().contains_key(key)
    }

    /// Copy of the current content.
    pub fn snapshot(&self) -> HashMap<String, Value> {
        self.data.read().clone()
    }
}

impl Clone for Context {
    fn clone(&self) -> Self {
        Context {
            data: RwLock::new(self.data.read().clone()),
        }
    }
}

impl PartialEq for Context {
    fn eq(&self, other: &Self) -> bool {
        *self.data.read() == *other.data.read()
    }
}

impl FromIterator<(String, Value)> for Context {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Context {
            data: RwLock::new(iter.into_iter().collect()),
        }
    }
}
