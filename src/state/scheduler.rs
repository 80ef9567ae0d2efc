//! Poll Scheduler
//!
//! Recurring fetch-render tasks. Each task owns one timer, skips ticks
//! while the document is hidden (running a catch-up cycle the moment it
//! becomes visible again), drops ticks that would overlap an in-flight
//! cycle, and discards responses that resolve after a newer one was
//! already applied.
//!
//! The decision core (`PollState`) is kept free of browser types so the
//! transitions are testable without a DOM.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::callback::Interval;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Pure decision core for one polling task.
#[derive(Debug, Default)]
pub struct PollState {
    next_seq: Cell<u64>,
    applied_seq: Cell<u64>,
    in_flight: Cell<u32>,
}

impl PollState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A timer tick fired. Returns the sequence number for a new cycle, or
    /// `None` when the tick must be skipped: the document is hidden, or a
    /// cycle is already in flight (overlapping ticks are dropped, not
    /// queued).
    pub fn begin_tick(&self, visible: bool) -> Option<u64> {
        if !visible || self.in_flight.get() > 0 {
            return None;
        }
        Some(self.begin())
    }

    /// A user-initiated cycle. Bypasses the visibility gate and the
    /// in-flight guard; stale-response sequencing still applies.
    pub fn begin_manual(&self) -> u64 {
        self.begin()
    }

    fn begin(&self) -> u64 {
        self.in_flight.set(self.in_flight.get() + 1);
        let seq = self.next_seq.get() + 1;
        self.next_seq.set(seq);
        seq
    }

    /// A cycle's fetch resolved. Returns whether the response is fresh
    /// enough to apply; anything at or below the last applied sequence is
    /// discarded.
    pub fn finish(&self, seq: u64) -> bool {
        self.in_flight.set(self.in_flight.get().saturating_sub(1));
        if seq <= self.applied_seq.get() {
            return false;
        }
        self.applied_seq.set(seq);
        true
    }
}

/// Ticket for one fetch-render cycle. Call [`CycleHandle::finish`] exactly
/// once when the cycle's fetch resolves, whether it succeeded or not.
pub struct CycleHandle {
    state: Rc<PollState>,
    seq: u64,
    manual: bool,
}

impl CycleHandle {
    /// Whether this cycle was user-initiated (failures should be surfaced
    /// instead of just logged).
    pub fn is_manual(&self) -> bool {
        self.manual
    }

    /// Release the in-flight slot and report whether the response should
    /// be applied.
    pub fn finish(self) -> bool {
        self.state.finish(self.seq)
    }
}

/// A named recurring fetch-render job.
pub struct PollTask {
    name: &'static str,
    interval_ms: u32,
    state: Rc<PollState>,
    run: Box<dyn Fn(CycleHandle)>,
    interval: RefCell<Option<Interval>>,
    hooked: Cell<bool>,
}

impl PollTask {
    pub fn new(
        name: &'static str,
        interval_ms: u32,
        run: impl Fn(CycleHandle) + 'static,
    ) -> Rc<Self> {
        Rc::new(Self {
            name,
            interval_ms,
            state: Rc::new(PollState::new()),
            run: Box::new(run),
            interval: RefCell::new(None),
            hooked: Cell::new(false),
        })
    }

    /// Run one immediate cycle and arm the timer. Restarting a running
    /// task rearms the timer.
    pub fn start(self: &Rc<Self>) {
        self.stop();
        self.install_visibility_hook();

        web_sys::console::log_1(&format!("{}: polling started", self.name).into());
        self.fire();

        let task = Rc::clone(self);
        *self.interval.borrow_mut() = Some(Interval::new(self.interval_ms, move || task.fire()));
    }

    /// Disarm the timer. An in-flight fetch is not aborted; its response
    /// still goes through sequencing when it resolves.
    pub fn stop(&self) {
        if self.interval.borrow_mut().take().is_some() {
            web_sys::console::log_1(&format!("{}: polling stopped", self.name).into());
        }
    }

    pub fn is_running(&self) -> bool {
        self.interval.borrow().is_some()
    }

    /// User-initiated cycle, independent of the timer.
    pub fn refresh(self: &Rc<Self>) {
        let seq = self.state.begin_manual();
        (self.run)(CycleHandle {
            state: Rc::clone(&self.state),
            seq,
            manual: true,
        });
    }

    fn fire(self: &Rc<Self>) {
        if let Some(seq) = self.state.begin_tick(document_visible()) {
            (self.run)(CycleHandle {
                state: Rc::clone(&self.state),
                seq,
                manual: false,
            });
        }
    }

    /// Catch-up on visibility restore: a hidden tab skips cycles, so fire
    /// one immediately when the document becomes visible again.
    fn install_visibility_hook(self: &Rc<Self>) {
        if self.hooked.replace(true) {
            return;
        }
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        let task = Rc::clone(self);
        let hook = Closure::wrap(Box::new(move || {
            if document_visible() && task.is_running() {
                task.fire();
            }
        }) as Box<dyn FnMut()>);

        let _ = document
            .add_event_listener_with_callback("visibilitychange", hook.as_ref().unchecked_ref());
        hook.forget();
    }
}

fn document_visible() -> bool {
    web_sys::window()
        .and_then(|w| w.document())
        .map(|d| !d.hidden())
        .unwrap_or(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_ticks_are_skipped() {
        let state = PollState::new();
        assert_eq!(state.begin_tick(false), None);
        // becoming visible again starts a cycle immediately
        assert_eq!(state.begin_tick(true), Some(1));
    }

    #[test]
    fn overlapping_ticks_are_dropped() {
        let state = PollState::new();
        let seq = state.begin_tick(true).unwrap();
        assert_eq!(state.begin_tick(true), None);

        assert!(state.finish(seq));
        assert_eq!(state.begin_tick(true), Some(2));
    }

    #[test]
    fn sequential_cycles_apply_in_order() {
        let state = PollState::new();
        for expected in 1..=3u64 {
            let seq = state.begin_tick(true).unwrap();
            assert_eq!(seq, expected);
            assert!(state.finish(seq));
        }
    }

    #[test]
    fn stale_responses_are_discarded() {
        let state = PollState::new();
        // slow timer cycle, then a manual refresh that overtakes it
        let slow = state.begin_tick(true).unwrap();
        let fast = state.begin_manual();
        assert!(fast > slow);

        assert!(state.finish(fast));
        assert!(!state.finish(slow));
    }

    #[test]
    fn manual_cycles_bypass_the_in_flight_guard() {
        let state = PollState::new();
        let _tick = state.begin_tick(true).unwrap();
        // a timer tick would be dropped here, but a user refresh runs
        assert_eq!(state.begin_tick(true), None);
        let manual = state.begin_manual();
        assert_eq!(manual, 2);
    }

    #[test]
    fn finish_releases_the_guard_even_when_stale() {
        let state = PollState::new();
        let slow = state.begin_tick(true).unwrap();
        let fast = state.begin_manual();
        assert!(state.finish(fast));
        assert!(!state.finish(slow));
        // both slots released; polling continues
        assert_eq!(state.begin_tick(true), Some(3));
    }
}
