//! Channel sampling.
//!
//! Model:
//! - The bracketing pair for an offset is (floor, ceil): the last keyframe at
//!   or before it and the first keyframe strictly after it.
//! - Below the first keyframe there is no floor, so the first keyframe stands
//!   in; at or past the last keyframe there is no ceil, so the last stands in.
//!   Both cases collapse to a zero-length pair and hold the boundary values.
//! - Between keyframes the pair is interpolated linearly.

use crate::data::{Channel, Keyframe};
use crate::interp::interpolate;
use crate::value::Values;

/// The (early, late) keyframes that bracket `offset`, with boundary fallback.
pub fn bracket<V>(channel: &Channel<V>, offset: f64) -> (&Keyframe<V>, &Keyframe<V>) {
    let early = channel.floor(offset).unwrap_or_else(|| channel.first());
    let late = channel.ceil(offset).unwrap_or_else(|| channel.last());
    (early, late)
}

/// Sample a channel at `offset`.
pub fn sample_channel<V: Values>(channel: &Channel<V>, offset: f64) -> Keyframe<V> {
    let (early, late) = bracket(channel, offset);
    interpolate(offset, early, late)
}
