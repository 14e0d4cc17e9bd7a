//! Core configuration for tweener-core.

use serde::{Deserialize, Serialize};

/// Configuration for scheduler priming and frame pacing.
/// Keep this minimal; expand as needed without breaking API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Seed the previous offset from the sampler on `start()`.
    ///
    /// When true, a page that has not been scrolled yet broadcasts nothing
    /// until the offset moves. When false, the first tick always broadcasts.
    pub prime_from_sampler: bool,

    /// Target rate for [`FixedRateClock`](crate::scheduler::FixedRateClock).
    pub frames_per_second: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prime_from_sampler: true,
            frames_per_second: 60,
        }
    }
}
