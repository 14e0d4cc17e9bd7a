//! Keyframe builders used while authoring a scene.
//!
//! These are curried so they slot straight into iterator chains:
//!
//! ```
//! use tweener_core::{channel, extend, offset_delta, Keyframe, ValueMap};
//!
//! let trail = vec![
//!     Keyframe::new(0.3, ValueMap::from([("x", 0.25)])),
//!     Keyframe::new(0.4, ValueMap::from([("x", 0.75)])),
//! ];
//! let ch = channel(
//!     "pinky",
//!     trail
//!         .into_iter()
//!         .map(offset_delta(0.1))
//!         .map(extend(ValueMap::from([("r", 255.0)]))),
//! )
//! .unwrap();
//! assert_eq!(ch.first().values.get("r"), Some(255.0));
//! ```

use crate::data::{Channel, Keyframe};
use crate::error::Result;
use crate::ids::ChannelId;
use crate::value::{Merge, Values};

/// Shift every keyframe by `delta`.
pub fn offset_delta<V>(delta: f64) -> impl Fn(Keyframe<V>) -> Keyframe<V> {
    move |kf| kf.shift_offset(delta)
}

/// Merge `extra` into every keyframe's values.
pub fn extend<V, E>(extra: E) -> impl Fn(Keyframe<V>) -> Keyframe<V::Output>
where
    V: Merge<E>,
    E: Clone,
{
    move |kf| kf.merge_values(extra.clone())
}

/// Assemble keyframes into a validated channel (see [`Channel::new`]).
pub fn channel<V: Values>(
    id: impl Into<ChannelId>,
    keyframes: impl IntoIterator<Item = Keyframe<V>>,
) -> Result<Channel<V>> {
    Channel::new(id, keyframes)
}
