use std::cell::RefCell;

use js_sys::Function;
use serde::Serialize;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use tweener_core::{
    ghosts, scroll_unit_state as unit_state, Config, GhostValues, Scene, SceneState, Scheduler,
    SharedViewport, StopHandle, Subscription, Subscriptions, TickOutcome, ViewportGeometry,
};

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

/// Plain JS objects rather than `Map`s for the insertion-ordered channel map.
fn state_to_js(state: &SceneState<GhostValues>) -> Result<JsValue, swb::Error> {
    state.serialize(&swb::Serializer::json_compatible())
}

struct JsListener {
    f: Function,
    sub: Subscription<GhostValues>,
}

/// The built-in ghosts scene driven by viewport geometry pushed from JS.
///
/// The host calls `set_viewport` from its scroll/resize handlers and `tick`
/// once per animation frame; subscribers receive
/// `{ offset, channels: { blinky: { x, y, eyes, r, g, b }, ... } }`.
///
/// Listeners run while `tick` holds the scheduler. Everything a listener may
/// call back into (`subscribe`, `unsubscribe`, `stop`, `is_running`,
/// `state_at`, `set_viewport`) goes through shared handles and takes `&self`,
/// so none of it touches the scheduler borrow.
#[wasm_bindgen]
pub struct GhostsTweener {
    core: RefCell<Scheduler<GhostValues, SharedViewport>>,
    scene: Scene<GhostValues>,
    subscriptions: Subscriptions<GhostValues>,
    stop_handle: StopHandle,
    viewport: SharedViewport,
    listeners: RefCell<Vec<JsListener>>,
}

#[wasm_bindgen]
impl GhostsTweener {
    /// Pass a JSON config object or undefined/null for defaults.
    /// Example:
    ///   new GhostsTweener({ prime_from_sampler: false })
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<GhostsTweener, JsError> {
        console_error_panic_hook::set_once();

        let cfg: Config = if jsvalue_is_undefined_or_null(&config) {
            Config::default()
        } else {
            swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
        };
        let scene = ghosts::scene().map_err(|e| JsError::new(&format!("scene error: {e}")))?;
        let viewport = SharedViewport::default();
        let core = Scheduler::new(scene.clone(), viewport.clone(), cfg);

        Ok(GhostsTweener {
            subscriptions: core.subscriptions().clone(),
            stop_handle: core.stop_handle(),
            core: RefCell::new(core),
            scene,
            viewport,
            listeners: RefCell::new(Vec::new()),
        })
    }

    /// Record the latest scroll position and document/viewport heights (pixels).
    #[wasm_bindgen(js_name = set_viewport)]
    pub fn set_viewport(&self, scroll_y: f64, document_height: f64, viewport_height: f64) {
        self.viewport.set(ViewportGeometry::new(
            scroll_y,
            document_height,
            viewport_height,
        ));
    }

    /// Run one frame. Returns true when subscribers were handed a new state.
    /// A tick requested from inside a listener is ignored.
    #[wasm_bindgen]
    pub fn tick(&self) -> bool {
        match self.core.try_borrow_mut() {
            Ok(mut core) => matches!(core.tick(), TickOutcome::Recomputed { .. }),
            Err(_) => false,
        }
    }

    /// Start accepting ticks. Fails when called from inside a listener.
    #[wasm_bindgen]
    pub fn start(&self) -> Result<(), JsError> {
        let mut core = self
            .core
            .try_borrow_mut()
            .map_err(|_| JsError::new("start: cannot start from inside a listener"))?;
        core.start();
        Ok(())
    }

    #[wasm_bindgen]
    pub fn stop(&self) {
        self.stop_handle.stop();
    }

    #[wasm_bindgen(js_name = is_running)]
    pub fn is_running(&self) -> bool {
        self.stop_handle.is_running()
    }

    /// Register `listener(state)`. Subscribing the same function twice
    /// returns the existing id. Exceptions thrown by the listener are dropped.
    #[wasm_bindgen]
    pub fn subscribe(&self, listener: Function) -> u32 {
        let mut listeners = self.listeners.borrow_mut();
        listeners.retain(|l| l.sub.is_active());
        let target: &JsValue = listener.as_ref();
        if let Some(existing) = listeners.iter().find(|l| {
            let f: &JsValue = l.f.as_ref();
            f == target
        }) {
            return existing.sub.id().0;
        }

        let f = listener.clone();
        let sub = self.subscriptions.subscribe_fn(move |state| {
            if let Ok(js) = state_to_js(state) {
                let _ = f.call1(&JsValue::UNDEFINED, &js);
            }
        });
        let id = sub.id().0;
        listeners.push(JsListener { f: listener, sub });
        id
    }

    /// Remove a listener by id. Unknown or already removed ids are ignored.
    #[wasm_bindgen]
    pub fn unsubscribe(&self, id: u32) {
        self.listeners.borrow_mut().retain(|l| {
            if l.sub.id().0 == id {
                l.sub.unsubscribe();
                false
            } else {
                true
            }
        });
    }

    /// Interpolated state at `offset` without ticking or notifying.
    #[wasm_bindgen(js_name = state_at)]
    pub fn state_at(&self, offset: f64) -> Result<JsValue, JsError> {
        state_to_js(&self.scene.render(offset))
            .map_err(|e| JsError::new(&format!("state error: {e}")))
    }
}

/// Normalised scroll position in [0,1] for the given geometry.
#[wasm_bindgen(js_name = scroll_unit_state)]
pub fn scroll_unit_state(scroll_y: f64, document_height: f64, viewport_height: f64) -> f64 {
    unit_state(ViewportGeometry::new(
        scroll_y,
        document_height,
        viewport_height,
    ))
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
