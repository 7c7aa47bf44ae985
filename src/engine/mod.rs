//! Scroll-driven synchronization of the nav highlight, sticky header and
//! scroll-to-top button.
//!
//! The engine holds no DOM objects. The page feeds it [`PageEvent`]s and
//! gets the resulting [`ScrollState`] back through a listener, so the whole
//! thing runs under a virtual clock in tests.

pub mod guard;
pub mod navigator;
pub mod rate_limit;
pub mod timer;
pub mod tracker;
pub mod viewport;

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::ScrollConfig;

pub use guard::ScrollGuard;
pub use navigator::{AnchorOutcome, Navigator};
pub use rate_limit::{Debounce, Throttle};
pub use timer::{BrowserScheduler, Scheduler};
pub use tracker::{HeaderState, ScrollState, ScrollTopState, ScrollTracker};
pub use viewport::{Layout, ScrollSnapshot, Section, Viewport};

#[derive(Clone, Debug, PartialEq)]
pub enum PageEvent {
    /// DOM is ready: publish the initial state.
    Ready,
    /// Window `load`: images are in, offsets may have moved.
    Load,
    Scroll,
    Resize,
    Key(String),
    AnchorClick { href: String },
    ScrollTopClick,
}

/// What the caller must do with the originating browser event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Dispatch {
    pub prevent_default: bool,
}

struct EngineCore {
    config: ScrollConfig,
    viewport: Rc<dyn Viewport>,
    guard: ScrollGuard,
    tracker: RefCell<ScrollTracker>,
    listener: Box<dyn Fn(&ScrollState)>,
}

impl EngineCore {
    /// One tracker pass. Section geometry is read live on every pass that
    /// gets past the guard.
    fn track(&self) {
        if self.guard.is_programmatic_scroll_active() {
            return;
        }
        let layout = self.viewport.measure_layout();
        let changed = {
            let mut tracker = self.tracker.borrow_mut();
            let before = tracker.state().clone();
            let ran = tracker.pass(self.viewport.as_ref(), &layout, &self.guard);
            ran && *tracker.state() != before
        };
        if changed {
            let state = self.tracker.borrow().state().clone();
            (self.listener)(&state);
        }
    }

    fn navigator(&self) -> Navigator<'_> {
        Navigator {
            config: &self.config,
            guard: &self.guard,
            viewport: self.viewport.as_ref(),
        }
    }
}

/// Coordinator owning the guard, tracker and rate limiters.
#[derive(Clone)]
pub struct ScrollEngine {
    core: Rc<EngineCore>,
    on_scroll: Throttle<()>,
    on_resize: Debounce<()>,
}

impl PartialEq for ScrollEngine {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.core, &other.core)
    }
}

impl ScrollEngine {
    pub fn new(
        config: ScrollConfig,
        scheduler: Rc<dyn Scheduler>,
        viewport: Rc<dyn Viewport>,
        listener: impl Fn(&ScrollState) + 'static,
    ) -> Self {
        let core = Rc::new(EngineCore {
            tracker: RefCell::new(ScrollTracker::new(config.clone())),
            guard: ScrollGuard::new(scheduler.clone()),
            listener: Box::new(listener),
            viewport,
            config,
        });

        let weak = Rc::downgrade(&core);
        let on_scroll = Throttle::new(scheduler.clone(), core.config.scroll_throttle_ms, move |()| {
            if let Some(core) = weak.upgrade() {
                core.track();
            }
        });

        let weak = Rc::downgrade(&core);
        let on_resize = Debounce::new(scheduler, core.config.resize_debounce_ms, move |()| {
            if let Some(core) = weak.upgrade() {
                core.track();
            }
        });

        Self { core, on_scroll, on_resize }
    }

    pub fn dispatch(&self, event: PageEvent) -> Dispatch {
        match event {
            PageEvent::Ready | PageEvent::Load => self.core.track(),
            PageEvent::Scroll => self.on_scroll.call(()),
            PageEvent::Resize => self.on_resize.call(()),
            PageEvent::Key(key) => {
                self.core.navigator().page_key(&key);
            }
            PageEvent::AnchorClick { href } => {
                let outcome = self.core.navigator().follow_anchor(&href);
                return Dispatch {
                    prevent_default: outcome.prevents_default(),
                };
            }
            PageEvent::ScrollTopClick => {
                self.core.navigator().scroll_to_top();
                return Dispatch { prevent_default: true };
            }
        }
        Dispatch::default()
    }

    pub fn state(&self) -> ScrollState {
        self.core.tracker.borrow().state().clone()
    }

    pub fn is_programmatic_scroll_active(&self) -> bool {
        self.core.guard.is_programmatic_scroll_active()
    }
}

#[cfg(test)]
mod tests {
    use super::timer::testing::VirtualClock;
    use super::viewport::testing::FakePage;
    use super::*;

    struct Harness {
        clock: Rc<VirtualClock>,
        page: Rc<FakePage>,
        published: Rc<RefCell<Vec<ScrollState>>>,
        engine: ScrollEngine,
    }

    fn harness() -> Harness {
        let clock = VirtualClock::new();
        let page = Rc::new(FakePage::new(
            vec![
                Section::new("home", 0.0, 700.0),
                Section::new("products", 700.0, 800.0),
                Section::new("contact", 1500.0, 600.0),
            ],
            800.0,
            2100.0,
        ));
        let published = Rc::new(RefCell::new(Vec::new()));
        let sink = published.clone();
        let engine = ScrollEngine::new(
            ScrollConfig::default(),
            clock.clone(),
            page.clone(),
            move |state: &ScrollState| sink.borrow_mut().push(state.clone()),
        );
        Harness { clock, page, published, engine }
    }

    #[test]
    fn ready_publishes_initial_state() {
        let h = harness();
        h.engine.dispatch(PageEvent::Ready);

        let published = h.published.borrow();
        assert_eq!(published.len(), 1);
        assert!(published[0].is_active("home"));
        assert_eq!(published[0].header, HeaderState::Normal);
    }

    #[test]
    fn scroll_burst_is_throttled_to_one_pass() {
        let h = harness();
        h.engine.dispatch(PageEvent::Ready);

        h.page.scroll(600.0);
        h.engine.dispatch(PageEvent::Scroll);
        h.page.scroll(1400.0);
        h.engine.dispatch(PageEvent::Scroll);
        h.clock.advance(5);
        h.engine.dispatch(PageEvent::Scroll);

        assert!(h.engine.state().is_active("products"));
        assert_eq!(h.engine.state().scroll_top, ScrollTopState::Visible);
        assert_eq!(h.published.borrow().len(), 2);

        h.clock.advance(16);
        h.engine.dispatch(PageEvent::Scroll);
        assert!(h.engine.state().is_active("contact"));
    }

    #[test]
    fn unchanged_state_is_not_republished() {
        let h = harness();
        h.engine.dispatch(PageEvent::Ready);
        h.page.scroll(10.0);
        h.engine.dispatch(PageEvent::Scroll);
        assert_eq!(h.published.borrow().len(), 1);
    }

    #[test]
    fn anchor_click_suppresses_tracking_until_guard_resets() {
        let h = harness();
        h.engine.dispatch(PageEvent::Ready);

        let dispatch = h.engine.dispatch(PageEvent::AnchorClick { href: "#contact".into() });
        assert!(dispatch.prevent_default);
        assert_eq!(*h.page.scrolls.borrow(), vec![1420.0]);
        assert!(h.engine.is_programmatic_scroll_active());

        // Mid-animation ticks are ignored.
        h.page.scroll(700.0);
        h.engine.dispatch(PageEvent::Scroll);
        assert!(h.engine.state().is_active("home"));

        h.clock.advance(1000);
        h.page.scroll(1420.0);
        h.engine.dispatch(PageEvent::Scroll);
        assert!(h.engine.state().is_active("contact"));
        assert_eq!(h.engine.state().header, HeaderState::Scrolled);
    }

    #[test]
    fn paging_key_suppresses_native_scroll_reaction() {
        let h = harness();
        h.engine.dispatch(PageEvent::Ready);

        let dispatch = h.engine.dispatch(PageEvent::Key("End".into()));
        assert!(!dispatch.prevent_default);
        h.page.scroll(1300.0);
        h.engine.dispatch(PageEvent::Scroll);
        assert!(h.engine.state().is_active("home"));

        h.clock.advance(500);
        h.engine.dispatch(PageEvent::Scroll);
        assert!(h.engine.state().is_active("contact"));
    }

    #[test]
    fn scroll_top_click_animates_to_origin() {
        let h = harness();
        let dispatch = h.engine.dispatch(PageEvent::ScrollTopClick);
        assert!(dispatch.prevent_default);
        assert_eq!(*h.page.scrolls.borrow(), vec![0.0]);
        assert!(h.engine.is_programmatic_scroll_active());
    }

    #[test]
    fn reflow_is_seen_by_the_next_pass_without_resize() {
        let h = harness();
        h.engine.dispatch(PageEvent::Ready);

        // The products block grows (a carousel card appears) and pushes
        // contact down; no resize event is fired.
        {
            let mut sections = h.page.sections.borrow_mut();
            sections[1].height = 1300.0;
            sections[2].offset_top = 2000.0;
        }
        h.page.snapshot.borrow_mut().document_height = 2600.0;
        h.page.scroll(1500.0);
        h.engine.dispatch(PageEvent::Scroll);

        // Live windows: products [550, 1850), contact [1850, 2450).
        assert!(h.engine.state().is_active("products"));
    }

    #[test]
    fn resize_runs_a_pass_after_debounce() {
        let h = harness();
        h.engine.dispatch(PageEvent::Ready);

        h.page.scroll(600.0);
        h.engine.dispatch(PageEvent::Resize);
        h.clock.advance(100);
        h.engine.dispatch(PageEvent::Resize);
        h.clock.advance(249);
        assert!(h.engine.state().is_active("home"));

        h.clock.advance(1);
        assert!(h.engine.state().is_active("products"));
    }
}
