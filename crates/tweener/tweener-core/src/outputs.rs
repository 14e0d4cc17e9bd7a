//! Output contracts from the core scheduler.
//!
//! A SceneState is the interpolated snapshot of every channel at one offset.
//! It is rebuilt from scratch on each tick where the offset changed and handed
//! to subscribers by reference; adapters turn it into transforms/styles.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::ids::ChannelId;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneState<V> {
    /// Offset the state was computed for.
    pub offset: f64,
    /// Interpolated values per channel, in scene order.
    pub channels: IndexMap<ChannelId, V>,
}

impl<V> SceneState<V> {
    pub fn new(offset: f64, channels: IndexMap<ChannelId, V>) -> Self {
        Self { offset, channels }
    }

    #[inline]
    pub fn get(&self, channel: &str) -> Option<&V> {
        self.channels.get(channel)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ChannelId, &V)> + '_ {
        self.channels.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}
