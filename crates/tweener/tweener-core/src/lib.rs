//! Tweener Core (engine-agnostic)
//!
//! Scroll-linked keyframe tweening: ordered keyframe channels, linear
//! interpolation between bracketing keyframes, and a frame scheduler that
//! recomputes a [`SceneState`] whenever the sampled scroll offset changes and
//! broadcasts it to subscribers.
//!
//! Rendering (turning values into transforms/styles) and scroll sampling are
//! left to adapters; see `tweener-wasm` for the browser binding.

pub mod builders;
pub mod config;
pub mod data;
pub mod error;
pub mod ghosts;
pub mod ids;
pub mod index;
pub mod interp;
pub mod outputs;
pub mod sampling;
pub mod scene;
pub mod scene_json;
pub mod scheduler;
pub mod scroll;
pub mod subscriptions;
pub mod value;

// Re-exports for consumers (adapters)
pub use builders::{channel, extend, offset_delta};
pub use config::Config;
pub use data::{Channel, Keyframe};
pub use error::{Result, TweenerError};
pub use ghosts::{Ghost, GhostValues};
pub use ids::{ChannelId, SubscriptionId};
pub use index::KeyframeIndex;
pub use interp::interpolate;
pub use outputs::SceneState;
pub use sampling::sample_channel;
pub use scene::Scene;
pub use scene_json::parse_scene_json;
pub use scheduler::{FixedRateClock, FrameClock, ManualClock, Scheduler, StopHandle, TickOutcome};
pub use scroll::{scroll_unit_state, ScrollSampler, SharedViewport, ViewportGeometry};
pub use subscriptions::{Listener, Subscription, Subscriptions};
pub use value::{Merge, ValueMap, Values};
