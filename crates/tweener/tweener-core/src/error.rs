//! Error types for scene construction.
//!
//! Sampling never fails at runtime; everything here is raised while a scene
//! is being assembled, before the scheduler's first tick.

use crate::ids::ChannelId;

pub type Result<T> = std::result::Result<T, TweenerError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum TweenerError {
    /// A channel must hold at least one keyframe.
    #[error("channel '{channel}' has no keyframes")]
    EmptyChannel { channel: ChannelId },

    /// A scene must hold at least one channel.
    #[error("scene has no channels")]
    EmptyScene,

    /// The same channel id was supplied twice.
    #[error("channel '{channel}' is defined more than once")]
    DuplicateChannel { channel: ChannelId },

    #[error("channel '{channel}' has a non-finite keyframe offset ({offset})")]
    NonFiniteOffset { channel: ChannelId, offset: f64 },

    /// Keyframe value names differ from the channel's first keyframe.
    #[error(
        "channel '{channel}' keyframe at offset {offset} has values [{found}], expected [{expected}]"
    )]
    ValueNamesMismatch {
        channel: ChannelId,
        offset: f64,
        expected: String,
        found: String,
    },

    /// Authored scene input could not be parsed.
    #[error("scene parse error: {reason}")]
    Parse { reason: String },
}

impl From<serde_json::Error> for TweenerError {
    fn from(e: serde_json::Error) -> Self {
        TweenerError::Parse {
            reason: e.to_string(),
        }
    }
}
