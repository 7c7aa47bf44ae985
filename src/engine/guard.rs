use std::cell::Cell;
use std::rc::Rc;

use super::timer::Scheduler;

/// Suppresses scroll tracking while a scroll started by the page itself is
/// in flight.
///
/// The reset is a plain timeout, not a scroll-end signal. A second
/// `begin_programmatic_scroll` does not cancel the first reset, so
/// overlapping scrolls may see the flag drop early; every reset writes
/// `false`, so the final state is always idle.
#[derive(Clone)]
pub struct ScrollGuard {
    active: Rc<Cell<bool>>,
    scheduler: Rc<dyn Scheduler>,
}

impl ScrollGuard {
    pub fn new(scheduler: Rc<dyn Scheduler>) -> Self {
        Self {
            active: Rc::new(Cell::new(false)),
            scheduler,
        }
    }

    pub fn begin_programmatic_scroll(&self, duration_ms: u32) {
        self.active.set(true);
        log::debug!("programmatic scroll, tracking suppressed for {}ms", duration_ms);

        let active = Rc::downgrade(&self.active);
        self.scheduler.schedule(
            duration_ms,
            Box::new(move || {
                if let Some(active) = active.upgrade() {
                    active.set(false);
                }
            }),
        );
    }

    pub fn is_programmatic_scroll_active(&self) -> bool {
        self.active.get()
    }
}
