use std::collections::HashMap;
use std::hash::Hash;

/// Views keyed by an id chosen by the owner (trace id, panel id, ...).
///
/// The registry is an ordinary value held by whoever renders the views; there is
/// no process-wide instance.
#[derive(Debug, Clone)]
pub struct ViewRegistry<K, V> {
    entries: HashMap<K, V>,
}

impl<K, V> Default for ViewRegistry<K, V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash, V> ViewRegistry<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `view` under `key`, returning the view it replaced.
    pub fn insert(&mut self, key: K, view: V) -> Option<V> {
        self.entries.insert(key, view)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.entries.get_mut(key)
    }

    pub fn get_or_insert_with(&mut self, key: K, make: impl FnOnce() -> V) -> &mut V {
        self.entries.entry(key).or_insert_with(make)
    }

    /// Removes and returns the view stored under `key`.
    pub fn evict(&mut self, key: &K) -> Option<V> {
        self.entries.remove(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> {
        self.entries.values_mut()
    }
}
