use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use gloo_timers::callback::Timeout;

pub type TimerId = u64;

/// One-shot timer source. Everything time-based in the engine goes through
/// this so the browser's `setTimeout` can be swapped for a virtual clock.
pub trait Scheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TimerId;
    /// Cancelling an id that already fired is a no-op.
    fn cancel(&self, id: TimerId);
}

/// Handles owned by a scheduler, keyed by id.
///
/// A handle whose callback is running cannot be dropped from inside that
/// callback, so it is parked in `fired` and released by the next `insert` or
/// `cancel` made outside a callback. At most one fired handle outlives its
/// callback at any time.
struct TimerTable<H> {
    pending: HashMap<TimerId, H>,
    fired: Vec<H>,
    firing: bool,
}

impl<H> Default for TimerTable<H> {
    fn default() -> Self {
        Self {
            pending: HashMap::new(),
            fired: Vec::new(),
            firing: false,
        }
    }
}

impl<H> TimerTable<H> {
    fn sweep(&mut self) {
        if !self.firing {
            self.fired.clear();
        }
    }

    fn insert(&mut self, id: TimerId, handle: H) {
        self.sweep();
        self.pending.insert(id, handle);
    }

    fn cancel(&mut self, id: TimerId) -> Option<H> {
        self.sweep();
        self.pending.remove(&id)
    }

    fn begin_fire(&mut self, id: TimerId) {
        self.firing = true;
        if let Some(handle) = self.pending.remove(&id) {
            self.fired.push(handle);
        }
    }

    fn end_fire(&mut self) {
        self.firing = false;
    }
}

/// `setTimeout` backed scheduler.
#[derive(Default)]
pub struct BrowserScheduler {
    timers: Rc<RefCell<TimerTable<Timeout>>>,
    next_id: Cell<TimerId>,
}

impl BrowserScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for BrowserScheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TimerId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);

        let timers = Rc::downgrade(&self.timers);
        let timeout = Timeout::new(delay_ms, move || {
            let timers = timers.upgrade();
            if let Some(timers) = &timers {
                timers.borrow_mut().begin_fire(id);
            }
            task();
            if let Some(timers) = &timers {
                timers.borrow_mut().end_fire();
            }
        });
        self.timers.borrow_mut().insert(id, timeout);
        id
    }

    fn cancel(&self, id: TimerId) {
        // Dropping a gloo Timeout clears it.
        let removed = self.timers.borrow_mut().cancel(id);
        drop(removed);
    }
}


#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    struct Entry {
        due: u64,
        id: TimerId,
        task: Box<dyn FnOnce()>,
    }

    /// Deterministic scheduler: time only moves when `advance` is called.
    #[derive(Default)]
    pub struct VirtualClock {
        now: Cell<u64>,
        next_id: Cell<TimerId>,
        queue: RefCell<Vec<Entry>>,
    }

    impl VirtualClock {
        pub fn new() -> Rc<Self> {
            Rc::new(Self::default())
        }

        pub fn now(&self) -> u64 {
            self.now.get()
        }

        pub fn pending(&self) -> usize {
            self.queue.borrow().len()
        }

        /// Runs every task due within the next `ms`, in due order, then
        /// leaves the clock at `now + ms`.
        pub fn advance(&self, ms: u64) {
            let target = self.now.get() + ms;
            loop {
                let next = {
                    let mut queue = self.queue.borrow_mut();
                    let idx = queue
                        .iter()
                        .enumerate()
                        .filter(|(_, e)| e.due <= target)
                        .min_by_key(|(_, e)| (e.due, e.id))
                        .map(|(i, _)| i);
                    idx.map(|i| queue.remove(i))
                };
                match next {
                    Some(entry) => {
                        self.now.set(entry.due);
                        (entry.task)();
                    }
                    None => break,
                }
            }
            self.now.set(target);
        }
    }

    impl Scheduler for VirtualClock {
        fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TimerId {
            let id = self.next_id.get();
            self.next_id.set(id + 1);
            self.queue.borrow_mut().push(Entry {
                due: self.now.get() + u64::from(delay_ms),
                id,
                task,
            });
            id
        }

        fn cancel(&self, id: TimerId) {
            self.queue.borrow_mut().retain(|e| e.id != id);
        }
    }

    #[test]
    fn runs_tasks_in_due_order() {
        let clock = VirtualClock::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        for (delay, tag) in [(30, "c"), (10, "a"), (20, "b")] {
            let log = log.clone();
            clock.schedule(delay, Box::new(move || log.borrow_mut().push(tag)));
        }

        clock.advance(25);
        assert_eq!(*log.borrow(), vec!["a", "b"]);
        assert_eq!(clock.now(), 25);

        clock.advance(5);
        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn cancelled_task_never_runs() {
        let clock = VirtualClock::new();
        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();
        let id = clock.schedule(10, Box::new(move || flag.set(true)));
        clock.cancel(id);
        clock.advance(100);
        assert!(!fired.get());
    }
}
