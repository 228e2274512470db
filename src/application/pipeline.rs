//! Aggregation pipeline primitives.
//!
//! The engine composes reports from a fixed set of stages: the filter
//! stage is pushed down to the record store ([`OrderFilter`]); the group
//! stage is [`Grouped`], an insertion-ordered map of per-key accumulators;
//! joins are batched product lookups; sort+limit is [`rank_desc`].
//!
//! Determinism: [`Grouped`] preserves first-seen key order and
//! [`rank_desc`] uses a stable sort, so ties keep the grouping stage's
//! insertion order and identical inputs always produce identical output.
//!
//! [`OrderFilter`]: crate::domain::OrderFilter

use std::collections::HashMap;
use std::hash::Hash;

/// Per-group accumulator fed one row at a time by the group stage.
pub trait Accumulate<Row: ?Sized>: Default {
    fn absorb(&mut self, row: &Row);
}

/// Insertion-ordered grouping: keys appear in first-seen order, each with
/// an accumulator of type `A`.
pub struct Grouped<K, A> {
    index: HashMap<K, usize>,
    entries: Vec<(K, A)>,
}

impl<K: Eq + Hash + Clone, A: Default> Grouped<K, A> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    /// Route one row to its group's accumulator, creating the group on
    /// first sight.
    pub fn feed<R: ?Sized>(&mut self, key: K, row: &R)
    where
        A: Accumulate<R>,
    {
        let slot = match self.index.get(&key) {
            Some(&i) => i,
            None => {
                let i = self.entries.len();
                self.index.insert(key.clone(), i);
                self.entries.push((key, A::default()));
                i
            }
        };
        self.entries[slot].1.absorb(row);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Consume the grouping, yielding `(key, accumulator)` pairs in
    /// first-seen order.
    #[must_use]
    pub fn into_entries(self) -> Vec<(K, A)> {
        self.entries
    }
}

impl<K: Eq + Hash + Clone, A: Default> Default for Grouped<K, A> {
    fn default() -> Self {
        Self::new()
    }
}

/// Sort+limit stage: stable descending sort on a measure, then truncate.
/// Ties keep their incoming (insertion) order.
#[must_use]
pub fn rank_desc<K, A, M, F>(mut entries: Vec<(K, A)>, measure: F, limit: usize) -> Vec<(K, A)>
where
    M: Ord,
    F: Fn(&A) -> M,
{
    entries.sort_by(|a, b| measure(&b.1).cmp(&measure(&a.1)));
    entries.truncate(limit);
    entries
}
