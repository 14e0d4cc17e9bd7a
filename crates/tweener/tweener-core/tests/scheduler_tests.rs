use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tweener_core::{
    builders::channel,
    data::Keyframe,
    scene::Scene,
    scheduler::{ManualClock, Scheduler, TickOutcome},
    scroll::{SharedViewport, ViewportGeometry},
    Config, Listener, SceneState, ValueMap,
};

fn ramp_scene() -> Scene<ValueMap> {
    let ch = channel(
        "ramp",
        vec![
            Keyframe::new(0.0, ValueMap::from([("x", 0.0)])),
            Keyframe::new(1.0, ValueMap::from([("x", 10.0)])),
        ],
    )
    .unwrap();
    Scene::new(vec![ch]).unwrap()
}

/// Scroll offset the test controls directly.
fn offset_source(initial: f64) -> (Rc<Cell<f64>>, impl FnMut() -> f64) {
    let cell = Rc::new(Cell::new(initial));
    let reader = Rc::clone(&cell);
    (cell, move || reader.get())
}

fn recorder() -> (Rc<RefCell<Vec<f64>>>, Listener<ValueMap>) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let listener: Listener<ValueMap> = Rc::new(move |state: &SceneState<ValueMap>| {
        let x = state
            .get("ramp")
            .and_then(|v| v.get("x"))
            .unwrap_or(f64::NAN);
        sink.borrow_mut().push(x);
    });
    (seen, listener)
}

/// it should not tick before start()
#[test]
fn stopped_scheduler_does_nothing() {
    let (_offset, sampler) = offset_source(0.5);
    let mut sched = Scheduler::new(ramp_scene(), sampler, Config::default());
    let (seen, listener) = recorder();
    sched.subscribe(listener);

    assert_eq!(sched.tick(), TickOutcome::Stopped);
    assert!(seen.borrow().is_empty());
}

/// it should notify once per offset change and skip unchanged offsets
#[test]
fn unchanged_offset_is_a_noop() {
    let (offset, sampler) = offset_source(0.0);
    let mut sched = Scheduler::new(ramp_scene(), sampler, Config::default());
    let (seen, listener) = recorder();
    sched.subscribe(listener);
    sched.start();

    // primed at 0.0: nothing to do until the page moves
    assert_eq!(sched.tick(), TickOutcome::Unchanged);

    offset.set(0.25);
    assert_eq!(
        sched.tick(),
        TickOutcome::Recomputed {
            offset: 0.25,
            notified: 1
        }
    );
    assert_eq!(sched.tick(), TickOutcome::Unchanged);
    assert_eq!(sched.tick(), TickOutcome::Unchanged);

    offset.set(1.0);
    sched.tick();
    assert_eq!(*seen.borrow(), vec![2.5, 10.0]);
    assert_eq!(sched.previous_offset(), Some(1.0));
}

/// it should broadcast on the first tick when priming is disabled
#[test]
fn unprimed_scheduler_broadcasts_first_tick() {
    let (_offset, sampler) = offset_source(0.0);
    let cfg = Config {
        prime_from_sampler: false,
        ..Config::default()
    };
    let mut sched = Scheduler::new(ramp_scene(), sampler, cfg);
    let (seen, listener) = recorder();
    sched.subscribe(listener);
    sched.start();

    assert!(matches!(sched.tick(), TickOutcome::Recomputed { .. }));
    assert_eq!(sched.tick(), TickOutcome::Unchanged);
    assert_eq!(*seen.borrow(), vec![0.0]);
}

/// it should never notify a listener again after unsubscribe, however often it is called
#[test]
fn unsubscribe_twice_is_harmless() {
    let (offset, sampler) = offset_source(0.0);
    let mut sched = Scheduler::new(ramp_scene(), sampler, Config::default());
    let (seen, listener) = recorder();
    let (other_seen, other) = recorder();
    let sub = sched.subscribe(listener);
    sched.subscribe(other);
    sched.start();

    offset.set(0.5);
    sched.tick();
    sub.unsubscribe();
    sub.unsubscribe();

    offset.set(0.75);
    assert_eq!(
        sched.tick(),
        TickOutcome::Recomputed {
            offset: 0.75,
            notified: 1
        }
    );
    sub.unsubscribe();

    assert_eq!(*seen.borrow(), vec![5.0]);
    assert_eq!(*other_seen.borrow(), vec![5.0, 7.5]);
}

/// it should register the same listener instance only once
#[test]
fn same_listener_is_deduplicated() {
    let (offset, sampler) = offset_source(0.0);
    let mut sched = Scheduler::new(ramp_scene(), sampler, Config::default());
    let (seen, listener) = recorder();
    sched.subscribe(Rc::clone(&listener));
    sched.subscribe(listener);
    sched.start();

    offset.set(0.1);
    sched.tick();
    assert_eq!(seen.borrow().len(), 1);
    assert_eq!(sched.subscriptions().len(), 1);
}

/// it should run until the clock is exhausted
#[test]
fn run_consumes_the_clock() {
    // the sampler is read once for priming, then once per frame
    let mut steps = vec![0.0, 0.1, 0.1, 0.2, 0.2, 0.2, 0.3].into_iter();
    let mut sched = Scheduler::new(
        ramp_scene(),
        move || steps.next().unwrap_or(0.3),
        Config::default(),
    );
    let (seen, listener) = recorder();
    sched.subscribe(listener);

    let mut clock = ManualClock::new(6);
    assert_eq!(sched.run(&mut clock), 6);
    assert_eq!(clock.remaining(), 0);
    assert!(sched.is_running());
    assert_eq!(*seen.borrow(), vec![1.0, 2.0, 3.0]);
}

/// it should stop from inside a listener via the stop handle
#[test]
fn listener_can_stop_the_loop() {
    let mut frame = 0.0;
    let sampler = move || {
        frame += 0.125;
        frame
    };
    let mut sched = Scheduler::new(ramp_scene(), sampler, Config::default());
    let handle = sched.stop_handle();
    let count = Rc::new(Cell::new(0));
    let c = Rc::clone(&count);
    sched.subscribe_fn(move |_| {
        c.set(c.get() + 1);
        if c.get() == 3 {
            handle.stop();
        }
    });

    let mut clock = ManualClock::new(100);
    assert_eq!(sched.run(&mut clock), 3);
    assert!(!sched.is_running());
    assert_eq!(count.get(), 3);
    assert_eq!(sched.tick(), TickOutcome::Stopped);
}

/// it should re-prime from the sampler when restarted
#[test]
fn restart_reprimes() {
    let (offset, sampler) = offset_source(0.4);
    let mut sched = Scheduler::new(ramp_scene(), sampler, Config::default());
    sched.start();
    assert_eq!(sched.previous_offset(), Some(0.4));
    sched.stop();
    offset.set(0.6);
    sched.start();
    assert_eq!(sched.previous_offset(), Some(0.6));
    assert_eq!(sched.tick(), TickOutcome::Unchanged);
}

/// it should treat a non-finite sample as offset 0
#[test]
fn non_finite_sample_reads_as_zero() {
    let (offset, sampler) = offset_source(0.5);
    let mut sched = Scheduler::new(ramp_scene(), sampler, Config::default());
    let (seen, listener) = recorder();
    sched.subscribe(listener);
    sched.start();

    offset.set(f64::NAN);
    assert_eq!(
        sched.tick(),
        TickOutcome::Recomputed {
            offset: 0.0,
            notified: 1
        }
    );
    assert_eq!(*seen.borrow(), vec![0.0]);
}

/// it should follow viewport geometry pushed by the host
#[test]
fn shared_viewport_drives_ticks() {
    let viewport = SharedViewport::new(ViewportGeometry::new(0.0, 3000.0, 1000.0));
    let mut sched = Scheduler::new(ramp_scene(), viewport.clone(), Config::default());
    let (seen, listener) = recorder();
    sched.subscribe(listener);
    sched.start();

    assert_eq!(sched.tick(), TickOutcome::Unchanged);
    viewport.set(ViewportGeometry::new(500.0, 3000.0, 1000.0));
    sched.tick();
    viewport.set(ViewportGeometry::new(4000.0, 3000.0, 1000.0));
    sched.tick();
    assert_eq!(*seen.borrow(), vec![2.5, 10.0]);
}

/// it should render arbitrary offsets without side effects
#[test]
fn render_does_not_touch_state() {
    let (_offset, sampler) = offset_source(0.0);
    let mut sched = Scheduler::new(ramp_scene(), sampler, Config::default());
    sched.start();
    assert_eq!(sched.scene().len(), 1);
    let state = sched.render(0.75);
    assert_eq!(state.get("ramp").and_then(|v| v.get("x")), Some(7.5));
    assert_eq!(sched.previous_offset(), Some(0.0));
}
