//! Ordered index keyed by timeline offset.
//!
//! Entries live in a vector sorted by key; lookups are binary searches, so
//! `floor`/`ceil` are O(log n). Insertion is O(n) and only happens while a
//! channel is being assembled.
//!
//! Keys are ordered with `f64::total_cmp`. Negative zero is folded into
//! positive zero so `-0.0` and `0.0` address the same slot.

use std::cmp::Ordering;

#[inline]
fn canonical(key: f64) -> f64 {
    key + 0.0
}

#[derive(Clone, Debug, PartialEq)]
pub struct KeyframeIndex<T> {
    entries: Vec<(f64, T)>,
}

impl<T> Default for KeyframeIndex<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> KeyframeIndex<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `entry` at `key`. An existing entry with an equal key is replaced
    /// (last write wins).
    pub fn insert(&mut self, key: f64, entry: T) {
        let key = canonical(key);
        let pos = self
            .entries
            .partition_point(|(k, _)| k.total_cmp(&key) == Ordering::Less);
        match self.entries.get_mut(pos) {
            Some((k, slot)) if k.total_cmp(&key) == Ordering::Equal => *slot = entry,
            _ => self.entries.insert(pos, (key, entry)),
        }
    }

    /// Builder-style insert, convenient when folding a list into an index.
    pub fn with(mut self, key: f64, entry: T) -> Self {
        self.insert(key, entry);
        self
    }

    /// Number of entries with key <= `key`.
    #[inline]
    fn upper_bound(&self, key: f64) -> usize {
        let key = canonical(key);
        self.entries
            .partition_point(|(k, _)| k.total_cmp(&key) != Ordering::Greater)
    }

    /// Greatest entry whose key is <= `key`.
    pub fn floor(&self, key: f64) -> Option<&T> {
        match self.upper_bound(key) {
            0 => None,
            n => Some(&self.entries[n - 1].1),
        }
    }

    /// Least entry whose key is strictly > `key`.
    pub fn ceil(&self, key: f64) -> Option<&T> {
        self.entries.get(self.upper_bound(key)).map(|(_, v)| v)
    }

    pub fn first(&self) -> Option<&T> {
        self.entries.first().map(|(_, v)| v)
    }

    pub fn last(&self) -> Option<&T> {
        self.entries.last().map(|(_, v)| v)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, &T)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }
}

impl<T> FromIterator<(f64, T)> for KeyframeIndex<T> {
    fn from_iter<I: IntoIterator<Item = (f64, T)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |index, (key, entry)| index.with(key, entry))
    }
}
