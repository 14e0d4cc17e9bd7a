//! Scheduler: per-frame scroll sampling → scene interpolation → notification.
//!
//! Each tick samples the scroll offset. If it bit-equals the offset of the
//! last recompute nothing else happens; otherwise every channel is
//! interpolated into a fresh [`SceneState`] and all listeners are notified
//! synchronously before the offset is recorded.
//!
//! Frame pacing is external: hosts with their own frame callback (a browser's
//! `requestAnimationFrame`) call [`Scheduler::tick`] from it; everything else
//! hands a [`FrameClock`] to [`Scheduler::run`].

use std::cell::Cell;
use std::rc::Rc;
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, trace, warn};

use crate::config::Config;
use crate::outputs::SceneState;
use crate::scene::Scene;
use crate::scroll::ScrollSampler;
use crate::subscriptions::{Listener, Subscription, Subscriptions};
use crate::value::Values;

/// What a single tick did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickOutcome {
    /// The scheduler is not running; nothing was sampled.
    Stopped,
    /// The offset matched the previous one; no state was built.
    Unchanged,
    /// A new state was built for `offset` and sent to `notified` listeners.
    Recomputed { offset: f64, notified: usize },
}

/// Source of frame boundaries for [`Scheduler::run`].
pub trait FrameClock {
    /// Wait for the next frame. Returns false when no more frames will come.
    fn next_frame(&mut self) -> bool;
}

/// Yields a fixed number of frames without waiting.
#[derive(Clone, Copy, Debug)]
pub struct ManualClock {
    remaining: usize,
}

impl ManualClock {
    pub fn new(frames: usize) -> Self {
        Self { remaining: frames }
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }
}

impl FrameClock for ManualClock {
    fn next_frame(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }
}

/// Sleeps the current thread to hold a target frame rate. Never runs out.
#[derive(Clone, Copy, Debug)]
pub struct FixedRateClock {
    interval: Duration,
    last: Option<Instant>,
}

impl FixedRateClock {
    pub fn new(frames_per_second: u32) -> Self {
        let fps = frames_per_second.max(1);
        Self {
            interval: Duration::from_secs(1) / fps,
            last: None,
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.frames_per_second)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl FrameClock for FixedRateClock {
    fn next_frame(&mut self) -> bool {
        if let Some(last) = self.last {
            let elapsed = last.elapsed();
            if elapsed < self.interval {
                thread::sleep(self.interval - elapsed);
            }
        }
        self.last = Some(Instant::now());
        true
    }
}

/// Stops a scheduler from outside (a listener, a clock, the host).
#[derive(Clone, Debug)]
pub struct StopHandle(Rc<Cell<bool>>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.set(false);
    }

    pub fn is_running(&self) -> bool {
        self.0.get()
    }
}

/// Owns a scene, a scroll sampler and the listener set.
pub struct Scheduler<V, S> {
    cfg: Config,
    scene: Scene<V>,
    sampler: S,
    subscriptions: Subscriptions<V>,
    running: Rc<Cell<bool>>,
    prev_offset: Option<f64>,
}

impl<V: Values, S: ScrollSampler> Scheduler<V, S> {
    /// Create a stopped scheduler.
    pub fn new(scene: Scene<V>, sampler: S, cfg: Config) -> Self {
        Self {
            cfg,
            scene,
            sampler,
            subscriptions: Subscriptions::new(),
            running: Rc::new(Cell::new(false)),
            prev_offset: None,
        }
    }

    /// Begin accepting ticks. Primes the previous offset from the sampler when
    /// `Config::prime_from_sampler` is set. No-op while already running.
    pub fn start(&mut self) {
        if self.running.get() {
            return;
        }
        self.prev_offset = if self.cfg.prime_from_sampler {
            Some(self.sample_offset())
        } else {
            None
        };
        self.running.set(true);
        debug!(
            "scheduler started: {} channels, primed offset {:?}",
            self.scene.len(),
            self.prev_offset
        );
    }

    pub fn stop(&self) {
        if self.running.replace(false) {
            debug!("scheduler stopped");
        }
    }

    pub fn stop_handle(&self) -> StopHandle {
        StopHandle(Rc::clone(&self.running))
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    /// Run one frame.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.running.get() {
            return TickOutcome::Stopped;
        }

        let offset = self.sample_offset();
        if self
            .prev_offset
            .is_some_and(|prev| prev.to_bits() == offset.to_bits())
        {
            return TickOutcome::Unchanged;
        }

        let state = self.scene.render(offset);
        let notified = self.subscriptions.notify(&state);
        trace!("recomputed scene at offset {offset}; notified {notified} listeners");
        self.prev_offset = Some(offset);

        TickOutcome::Recomputed { offset, notified }
    }

    /// Start (if needed) and tick once per frame until stopped or the clock
    /// runs out. Returns the number of frames ticked.
    pub fn run<C: FrameClock>(&mut self, clock: &mut C) -> usize {
        self.start();
        let mut frames = 0;
        while self.running.get() && clock.next_frame() {
            self.tick();
            frames += 1;
        }
        frames
    }

    /// Interpolate the scene at an arbitrary offset without touching
    /// scheduler state or notifying anyone.
    pub fn render(&self, offset: f64) -> SceneState<V> {
        self.scene.render(offset)
    }

    fn sample_offset(&mut self) -> f64 {
        let offset = self.sampler.sample();
        if offset.is_finite() {
            offset
        } else {
            warn!("scroll sampler returned {offset}; using 0");
            0.0
        }
    }
}

impl<V, S> Scheduler<V, S> {
    pub fn subscribe(&self, listener: Listener<V>) -> Subscription<V> {
        self.subscriptions.subscribe(listener)
    }

    pub fn subscribe_fn(&self, f: impl Fn(&SceneState<V>) + 'static) -> Subscription<V>
    where
        V: 'static,
    {
        self.subscriptions.subscribe_fn(f)
    }

    /// Shared handle to the listener set.
    pub fn subscriptions(&self) -> &Subscriptions<V> {
        &self.subscriptions
    }

    pub fn scene(&self) -> &Scene<V> {
        &self.scene
    }

    /// Offset of the last recompute (or of priming).
    pub fn previous_offset(&self) -> Option<f64> {
        self.prev_offset
    }
}
