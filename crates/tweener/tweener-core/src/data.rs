//! Keyframes and channels.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TweenerError};
use crate::ids::ChannelId;
use crate::index::KeyframeIndex;
use crate::value::{Merge, Values};

/// A value set anchored at a timeline offset.
///
/// Offsets are nominally in [0,1] but shifted keyframes may fall outside.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keyframe<V> {
    pub offset: f64,
    pub values: V,
}

impl<V> Keyframe<V> {
    pub fn new(offset: f64, values: V) -> Self {
        Self { offset, values }
    }

    /// Copy with `offset + delta`.
    pub fn shift_offset(self, delta: f64) -> Self {
        Self {
            offset: self.offset + delta,
            ..self
        }
    }

    /// Copy with `extra` shallow-merged into the values.
    pub fn merge_values<E>(self, extra: E) -> Keyframe<V::Output>
    where
        V: Merge<E>,
    {
        Keyframe {
            offset: self.offset,
            values: self.values.merge(extra),
        }
    }
}

/// An independently animated track: keyframes ordered by offset.
///
/// Built once and never mutated. Always holds at least one keyframe, and every
/// keyframe carries the same value names.
#[derive(Clone, Debug, PartialEq)]
pub struct Channel<V> {
    id: ChannelId,
    index: KeyframeIndex<Keyframe<V>>,
}

impl<V: Values> Channel<V> {
    /// Assemble keyframes into a channel. Equal offsets keep the later keyframe.
    ///
    /// Fails on an empty list, a non-finite offset, or value names that differ
    /// from the first keyframe's.
    pub fn new(
        id: impl Into<ChannelId>,
        keyframes: impl IntoIterator<Item = Keyframe<V>>,
    ) -> Result<Self> {
        let id = id.into();
        let mut index = KeyframeIndex::new();
        for kf in keyframes {
            if !kf.offset.is_finite() {
                return Err(TweenerError::NonFiniteOffset {
                    channel: id,
                    offset: kf.offset,
                });
            }
            index.insert(kf.offset, kf);
        }

        let Some(reference) = index.first() else {
            return Err(TweenerError::EmptyChannel { channel: id });
        };
        if let Some(bad) = index
            .iter()
            .map(|(_, kf)| kf)
            .find(|kf| !reference.values.same_shape(&kf.values))
        {
            return Err(TweenerError::ValueNamesMismatch {
                channel: id.clone(),
                offset: bad.offset,
                expected: reference.values.names().join(", "),
                found: bad.values.names().join(", "),
            });
        }

        Ok(Self { id, index })
    }
}

impl<V> Channel<V> {
    pub fn id(&self) -> &ChannelId {
        &self.id
    }

    pub fn first(&self) -> &Keyframe<V> {
        self.index
            .first()
            .expect("channel holds at least one keyframe")
    }

    pub fn last(&self) -> &Keyframe<V> {
        self.index
            .last()
            .expect("channel holds at least one keyframe")
    }

    /// Greatest keyframe with offset <= `offset`.
    pub fn floor(&self, offset: f64) -> Option<&Keyframe<V>> {
        self.index.floor(offset)
    }

    /// Least keyframe with offset > `offset`.
    pub fn ceil(&self, offset: f64) -> Option<&Keyframe<V>> {
        self.index.ceil(offset)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Always false for a constructed channel.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Keyframes in ascending offset order.
    pub fn keyframes(&self) -> impl Iterator<Item = &Keyframe<V>> + '_ {
        self.index.iter().map(|(_, kf)| kf)
    }
}
