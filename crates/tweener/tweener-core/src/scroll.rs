//! Scroll sampling contract.
//!
//! The scheduler only needs a normalized scroll position in [0,1]. Hosts
//! implement [`ScrollSampler`] directly, pass a closure, or push viewport
//! measurements into a [`SharedViewport`].

use std::cell::Cell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Produces the current normalized scroll offset.
///
/// Must return a value in [0,1], and exactly `0.0` when the document is at or
/// above its top.
pub trait ScrollSampler {
    fn sample(&mut self) -> f64;
}

impl<F> ScrollSampler for F
where
    F: FnMut() -> f64,
{
    fn sample(&mut self) -> f64 {
        self()
    }
}

/// Raw viewport measurements, in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewportGeometry {
    /// Vertical scroll position of the document.
    pub scroll_y: f64,
    /// Full content height. Rounded before use to absorb sub-pixel noise.
    pub document_height: f64,
    /// Visible height.
    pub viewport_height: f64,
}

impl ViewportGeometry {
    pub fn new(scroll_y: f64, document_height: f64, viewport_height: f64) -> Self {
        Self {
            scroll_y,
            document_height,
            viewport_height,
        }
    }
}

#[inline]
fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

/// Document scroll offset from 0.0 to 1.0.
///
/// `scroll_y / (document_height - viewport_height)`, clamped to [0,1]. Returns
/// exactly 0 when `scroll_y <= 0`, and saturates to 0 when the document does
/// not overflow the viewport.
pub fn scroll_unit_state(g: ViewportGeometry) -> f64 {
    let scroll_y = finite_or_zero(g.scroll_y);
    if scroll_y <= 0.0 {
        return 0.0;
    }

    let document_height = finite_or_zero(g.document_height).round();
    let scrollable = document_height - finite_or_zero(g.viewport_height);
    if scrollable <= 0.0 {
        return 0.0;
    }

    (scroll_y / scrollable).clamp(0.0, 1.0)
}

/// Viewport geometry shared between the host (writer) and the scheduler.
#[derive(Clone, Debug, Default)]
pub struct SharedViewport(Rc<Cell<ViewportGeometry>>);

impl SharedViewport {
    pub fn new(initial: ViewportGeometry) -> Self {
        Self(Rc::new(Cell::new(initial)))
    }

    pub fn set(&self, geometry: ViewportGeometry) {
        self.0.set(geometry);
    }

    pub fn get(&self) -> ViewportGeometry {
        self.0.get()
    }
}

impl ScrollSampler for SharedViewport {
    fn sample(&mut self) -> f64 {
        scroll_unit_state(self.get())
    }
}
