//! Insertion-ordered frequency table
//!
//! Counts are the only observable property callers should rely on, but the
//! diagnostic text view samples "the first few" rare items, so iteration
//! follows first insertion to keep that sample reproducible.

use rustc_hash::FxHashMap;
use std::hash::Hash;

/// Occurrence counts keyed by item, iterated in first-insertion order
#[derive(Debug, Clone)]
pub struct FrequencyTable<K> {
    /// Maps item -> slot in `entries`
    index: FxHashMap<K, usize>,
    /// `(item, count)` in first-insertion order
    entries: Vec<(K, usize)>,
}

impl<K> Default for FrequencyTable<K> {
    fn default() -> Self {
        Self {
            index: FxHashMap::default(),
            entries: Vec::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> FrequencyTable<K> {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `item`
    pub fn add(&mut self, item: K) {
        match self.index.get(&item) {
            Some(&slot) => self.entries[slot].1 += 1,
            None => {
                self.index.insert(item.clone(), self.entries.len());
                self.entries.push((item, 1));
            }
        }
    }

    /// Count every item yielded by `items`
    pub fn add_all(&mut self, items: impl IntoIterator<Item = K>) {
        for item in items {
            self.add(item);
        }
    }

    /// Occurrence count of `item` (0 if never seen)
    pub fn count(&self, item: &K) -> usize {
        self.index
            .get(item)
            .map(|&slot| self.entries[slot].1)
            .unwrap_or(0)
    }

    /// The `n` most frequent items, highest count first
    ///
    /// Equal counts keep first-insertion order.
    pub fn most_common(&self, n: usize) -> Vec<(K, usize)> {
        let mut ranked = self.entries.clone();
        // stable: ties stay in insertion order
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }

    /// Iterate `(item, count)` in first-insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&K, usize)> + '_ {
        self.entries.iter().map(|(k, c)| (k, *c))
    }

    /// Number of distinct items
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing has been counted
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Eq + Hash + Clone> FromIterator<K> for FrequencyTable<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut table = Self::new();
        table.add_all(iter);
        table
    }
}
