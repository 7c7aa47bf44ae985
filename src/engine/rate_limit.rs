//! Timing wrappers bounding how often a handler runs.

use std::cell::Cell;
use std::rc::Rc;

use super::timer::{Scheduler, TimerId};

struct DebounceInner<A> {
    scheduler: Rc<dyn Scheduler>,
    wait_ms: u32,
    pending: Cell<Option<TimerId>>,
    func: Box<dyn Fn(A)>,
}

/// Trailing-edge debounce: only the last call inside a `wait_ms` window runs,
/// with that call's arguments.
pub struct Debounce<A> {
    inner: Rc<DebounceInner<A>>,
}

impl<A> Clone for Debounce<A> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl<A: 'static> Debounce<A> {
    pub fn new(scheduler: Rc<dyn Scheduler>, wait_ms: u32, func: impl Fn(A) + 'static) -> Self {
        Self {
            inner: Rc::new(DebounceInner {
                scheduler,
                wait_ms,
                pending: Cell::new(None),
                func: Box::new(func),
            }),
        }
    }

    pub fn call(&self, args: A) {
        let inner = &self.inner;
        if let Some(id) = inner.pending.take() {
            inner.scheduler.cancel(id);
        }

        let weak = Rc::downgrade(inner);
        let id = inner.scheduler.schedule(
            inner.wait_ms,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.pending.set(None);
                    (inner.func)(args);
                }
            }),
        );
        inner.pending.set(Some(id));
    }
}

struct ThrottleInner<A> {
    scheduler: Rc<dyn Scheduler>,
    limit_ms: u32,
    cooling: Cell<bool>,
    func: Box<dyn Fn(A)>,
}

/// Leading-edge throttle: the first call runs immediately, calls arriving
/// during the following `limit_ms` are dropped.
pub struct Throttle<A> {
    inner: Rc<ThrottleInner<A>>,
}

impl<A> Clone for Throttle<A> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl<A: 'static> Throttle<A> {
    pub fn new(scheduler: Rc<dyn Scheduler>, limit_ms: u32, func: impl Fn(A) + 'static) -> Self {
        Self {
            inner: Rc::new(ThrottleInner {
                scheduler,
                limit_ms,
                cooling: Cell::new(false),
                func: Box::new(func),
            }),
        }
    }

    pub fn call(&self, args: A) {
        let inner = &self.inner;
        if inner.cooling.replace(true) {
            return;
        }

        let weak = Rc::downgrade(inner);
        inner.scheduler.schedule(
            inner.limit_ms,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.cooling.set(false);
                }
            }),
        );
        (inner.func)(args);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::engine::timer::testing::VirtualClock;

    fn recorder() -> (Rc<RefCell<Vec<u32>>>, impl Fn(u32) + 'static) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = calls.clone();
        (calls, move |n| sink.borrow_mut().push(n))
    }

    #[test]
    fn debounce_runs_once_with_last_arguments() {
        let clock = VirtualClock::new();
        let (calls, func) = recorder();
        let debounced = Debounce::new(clock.clone(), 10, func);

        for n in 1..=5 {
            debounced.call(n);
            clock.advance(1);
        }
        assert!(calls.borrow().is_empty());

        clock.advance(10);
        assert_eq!(*calls.borrow(), vec![5]);
    }

    #[test]
    fn debounce_window_restarts_on_every_call() {
        let clock = VirtualClock::new();
        let (calls, func) = recorder();
        let debounced = Debounce::new(clock.clone(), 250, func);

        debounced.call(1);
        clock.advance(200);
        debounced.call(2);
        clock.advance(200);
        assert!(calls.borrow().is_empty());

        clock.advance(50);
        assert_eq!(*calls.borrow(), vec![2]);

        debounced.call(3);
        clock.advance(250);
        assert_eq!(*calls.borrow(), vec![2, 3]);
    }

    #[test]
    fn throttle_runs_first_call_and_drops_the_rest() {
        let clock = VirtualClock::new();
        let (calls, func) = recorder();
        let throttled = Throttle::new(clock.clone(), 16, func);

        for n in 1..=5 {
            throttled.call(n);
            clock.advance(3);
        }
        assert_eq!(*calls.borrow(), vec![1]);
    }

    #[test]
    fn throttle_reopens_after_cooldown() {
        let clock = VirtualClock::new();
        let (calls, func) = recorder();
        let throttled = Throttle::new(clock.clone(), 16, func);

        throttled.call(1);
        clock.advance(15);
        throttled.call(2);
        clock.advance(1);
        throttled.call(3);

        assert_eq!(*calls.borrow(), vec![1, 3]);
    }

    #[test]
    fn dropped_debounce_does_not_fire() {
        let clock = VirtualClock::new();
        let (calls, func) = recorder();
        let debounced = Debounce::new(clock.clone(), 10, func);
        debounced.call(7);
        drop(debounced);

        clock.advance(10);
        assert!(calls.borrow().is_empty());
    }
}
