//! Scene registry: a fixed set of named channels.

use indexmap::IndexMap;
use log::debug;

use crate::data::Channel;
use crate::error::{Result, TweenerError};
use crate::ids::ChannelId;
use crate::outputs::SceneState;
use crate::sampling::sample_channel;
use crate::value::Values;

/// Channels keyed by id, in the order they were supplied.
///
/// Constructed once from authored data and never mutated afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene<V> {
    channels: IndexMap<ChannelId, Channel<V>>,
}

impl<V: Values> Scene<V> {
    /// Fails on an empty channel list or a repeated channel id.
    pub fn new(channels: impl IntoIterator<Item = Channel<V>>) -> Result<Self> {
        let mut map = IndexMap::new();
        for ch in channels {
            if map.contains_key(ch.id()) {
                return Err(TweenerError::DuplicateChannel {
                    channel: ch.id().clone(),
                });
            }
            map.insert(ch.id().clone(), ch);
        }
        if map.is_empty() {
            return Err(TweenerError::EmptyScene);
        }
        debug!(
            "scene built: {} channels, {} keyframes",
            map.len(),
            map.values().map(Channel::len).sum::<usize>()
        );
        Ok(Self { channels: map })
    }

    /// Interpolate every channel at `offset`.
    pub fn render(&self, offset: f64) -> SceneState<V> {
        let channels = self
            .channels
            .iter()
            .map(|(id, ch)| (id.clone(), sample_channel(ch, offset).values))
            .collect();
        SceneState::new(offset, channels)
    }
}

impl<V> Scene<V> {
    #[inline]
    pub fn get(&self, channel: &str) -> Option<&Channel<V>> {
        self.channels.get(channel)
    }

    pub fn channel_ids(&self) -> impl Iterator<Item = &ChannelId> + '_ {
        self.channels.keys()
    }

    pub fn channels(&self) -> impl Iterator<Item = &Channel<V>> + '_ {
        self.channels.values()
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
