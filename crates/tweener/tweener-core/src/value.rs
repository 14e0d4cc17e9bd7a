//! Keyframe value sets.
//!
//! A channel interpolates one value set per keyframe. Value sets are either
//! fixed-field records (see [`GhostValues`](crate::ghosts::GhostValues)), where
//! every keyframe has the same fields by construction, or a [`ValueMap`] for
//! authored data whose shape is only known at load time. Channels validate the
//! latter when they are built.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::interp::functions::lerp_f64;

/// A named set of scalars that can be linearly interpolated.
pub trait Values: Clone + fmt::Debug {
    /// Component-wise `a + (b - a) * t`. `t` is not clamped.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;

    /// Value names in declaration order.
    fn names(&self) -> Vec<&str>;

    /// Whether `self` and `other` carry the same value names.
    ///
    /// Records always do; dynamic maps override this.
    fn same_shape(&self, _other: &Self) -> bool {
        true
    }
}

/// Shallow merge of extra named values into a value set.
///
/// `Output` may be a wider record than `Self`, which is how a pose gains a
/// colour while a channel is being assembled.
pub trait Merge<E> {
    type Output;

    fn merge(self, extra: E) -> Self::Output;
}

/// Insertion-ordered name -> scalar map.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueMap(IndexMap<String, f64>);

impl ValueMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    /// Insert or overwrite `name`. Overwriting keeps the original position.
    pub fn insert(&mut self, name: impl Into<String>, value: f64) -> Option<f64> {
        self.0.insert(name.into(), value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for ValueMap {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl<const N: usize> From<[(&str, f64); N]> for ValueMap {
    fn from(pairs: [(&str, f64); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl Values for ValueMap {
    /// Names come from `a`. A name missing from `b` interpolates to NaN;
    /// channels reject such keyframes before sampling can reach this.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a.0.iter()
            .map(|(name, va)| {
                let vb = b.get(name).unwrap_or(f64::NAN);
                (name.clone(), lerp_f64(*va, vb, t))
            })
            .collect()
    }

    fn names(&self) -> Vec<&str> {
        self.0.keys().map(String::as_str).collect()
    }

    fn same_shape(&self, other: &Self) -> bool {
        self.len() == other.len() && self.0.keys().all(|k| other.contains(k))
    }
}

impl Merge<ValueMap> for ValueMap {
    type Output = ValueMap;

    fn merge(mut self, extra: ValueMap) -> ValueMap {
        self.0.extend(extra.0);
        self
    }
}
