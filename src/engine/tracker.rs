use crate::config::ScrollConfig;

use super::guard::ScrollGuard;
use super::viewport::{Layout, ScrollSnapshot, Section, Viewport};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HeaderState {
    #[default]
    Normal,
    Scrolled,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScrollTopState {
    #[default]
    Hidden,
    Visible,
}

/// Everything a tracker pass publishes to the page.
///
/// `active_link` holds the id of the one highlighted nav link, so two links
/// can never be active at once.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScrollState {
    pub active_link: Option<String>,
    pub header: HeaderState,
    pub scroll_top: ScrollTopState,
}

impl ScrollState {
    pub fn is_active(&self, section_id: &str) -> bool {
        self.active_link.as_deref() == Some(section_id)
    }
}

/// Picks the section whose activation window contains the scroll position.
///
/// Sections are scanned in document order and the last match wins, so when
/// windows overlap the lower section takes the highlight. At the bottom of
/// the page the last section wins regardless of its window.
pub fn active_section<'a>(
    snapshot: &ScrollSnapshot,
    layout: &'a Layout,
    config: &ScrollConfig,
) -> Option<&'a Section> {
    let at_bottom = snapshot.is_at_bottom(config.bottom_slack);
    let last = layout.sections.len().checked_sub(1);
    let y = snapshot.scroll_y;

    layout
        .sections
        .iter()
        .enumerate()
        .filter(|(_, section)| layout.is_linked(&section.id))
        .filter(|(index, section)| {
            let start = section.offset_top - config.activation_offset;
            (at_bottom && Some(*index) == last) || (y >= start && y < start + section.height)
        })
        .map(|(_, section)| section)
        .last()
}

pub struct ScrollTracker {
    config: ScrollConfig,
    state: ScrollState,
}

impl ScrollTracker {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            config,
            state: ScrollState::default(),
        }
    }

    pub fn state(&self) -> &ScrollState {
        &self.state
    }

    /// Recomputes the scroll state from one snapshot of the page.
    ///
    /// Returns `false` without reading the viewport while the guard is
    /// active. When no section matches, the current highlight is kept.
    pub fn pass(&mut self, viewport: &dyn Viewport, layout: &Layout, guard: &ScrollGuard) -> bool {
        if guard.is_programmatic_scroll_active() {
            return false;
        }

        let snapshot = viewport.snapshot();
        if let Some(section) = active_section(&snapshot, layout, &self.config) {
            if !self.state.is_active(&section.id) {
                self.state.active_link = Some(section.id.clone());
            }
        }

        self.state.header = if snapshot.scroll_y > self.config.header_threshold {
            HeaderState::Scrolled
        } else {
            HeaderState::Normal
        };
        self.state.scroll_top = if snapshot.scroll_y > self.config.scroll_top_threshold {
            ScrollTopState::Visible
        } else {
            ScrollTopState::Hidden
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::timer::testing::VirtualClock;
    use crate::engine::viewport::testing::FakePage;

    /// Activation windows: a [0,300), b [300,700), c [850,950).
    fn page() -> FakePage {
        FakePage::new(
            vec![
                Section::new("a", 150.0, 300.0),
                Section::new("b", 450.0, 400.0),
                Section::new("c", 1000.0, 100.0),
            ],
            20.0,
            760.0,
        )
    }

    fn run(tracker: &mut ScrollTracker, page: &FakePage, guard: &ScrollGuard, y: f64) -> ScrollState {
        page.scroll(y);
        tracker.pass(page, &page.measure_layout(), guard);
        tracker.state().clone()
    }

    #[test]
    fn position_inside_window_activates_that_section() {
        let page = page();
        let guard = ScrollGuard::new(VirtualClock::new());
        let mut tracker = ScrollTracker::new(ScrollConfig::default());

        assert!(run(&mut tracker, &page, &guard, 650.0).is_active("b"));
        assert!(run(&mut tracker, &page, &guard, 299.0).is_active("a"));
        assert!(run(&mut tracker, &page, &guard, 300.0).is_active("b"));
    }

    #[test]
    fn bottom_of_page_activates_last_section() {
        let page = page();
        let guard = ScrollGuard::new(VirtualClock::new());
        let mut tracker = ScrollTracker::new(ScrollConfig::default());

        // 750 + 20 >= 760 - 10, and 750 is in no window.
        let state = run(&mut tracker, &page, &guard, 750.0);
        assert!(state.is_active("c"));
    }

    #[test]
    fn overlapping_windows_resolve_to_last_match() {
        let page = FakePage::new(
            vec![Section::new("a", 150.0, 500.0), Section::new("b", 300.0, 500.0)],
            100.0,
            5000.0,
        );
        let layout = page.measure_layout();
        page.scroll(200.0);

        let found = active_section(&page.snapshot(), &layout, &ScrollConfig::default());
        assert_eq!(found.map(|s| s.id.as_str()), Some("b"));
    }

    #[test]
    fn gap_between_windows_keeps_previous_highlight() {
        let page = page();
        let guard = ScrollGuard::new(VirtualClock::new());
        let mut tracker = ScrollTracker::new(ScrollConfig::default());
        *page.snapshot.borrow_mut() = ScrollSnapshot {
            scroll_y: 0.0,
            viewport_height: 20.0,
            document_height: 5000.0,
        };

        assert!(run(&mut tracker, &page, &guard, 650.0).is_active("b"));
        // 800 falls between b and c.
        assert!(run(&mut tracker, &page, &guard, 800.0).is_active("b"));
    }

    #[test]
    fn unlinked_section_is_never_active() {
        let page = page();
        page.unlinked.borrow_mut().push("b".into());
        let layout = page.measure_layout();
        page.scroll(650.0);

        assert!(active_section(&page.snapshot(), &layout, &ScrollConfig::default()).is_none());
    }

    #[test]
    fn header_threshold_is_symmetric() {
        let page = page();
        let guard = ScrollGuard::new(VirtualClock::new());
        let mut tracker = ScrollTracker::new(ScrollConfig::default());

        assert_eq!(run(&mut tracker, &page, &guard, 100.0).header, HeaderState::Normal);
        assert_eq!(run(&mut tracker, &page, &guard, 101.0).header, HeaderState::Scrolled);
        assert_eq!(run(&mut tracker, &page, &guard, 100.0).header, HeaderState::Normal);
    }

    #[test]
    fn scroll_top_visible_past_threshold() {
        let page = page();
        let guard = ScrollGuard::new(VirtualClock::new());
        let mut tracker = ScrollTracker::new(ScrollConfig::default());

        assert_eq!(run(&mut tracker, &page, &guard, 300.0).scroll_top, ScrollTopState::Hidden);
        assert_eq!(run(&mut tracker, &page, &guard, 301.0).scroll_top, ScrollTopState::Visible);
    }

    #[test]
    fn guarded_pass_reads_and_writes_nothing() {
        let clock = VirtualClock::new();
        let page = page();
        let guard = ScrollGuard::new(clock.clone());
        let mut tracker = ScrollTracker::new(ScrollConfig::default());
        let before = run(&mut tracker, &page, &guard, 650.0);
        let reads = page.reads.get();

        guard.begin_programmatic_scroll(1000);
        page.scroll(20.0);
        assert!(!tracker.pass(&page, &page.measure_layout(), &guard));
        assert_eq!(page.reads.get(), reads);
        assert_eq!(*tracker.state(), before);

        clock.advance(1000);
        assert!(tracker.pass(&page, &page.measure_layout(), &guard));
        assert!(tracker.state().is_active("a"));
    }

    #[test]
    fn at_most_one_link_active_across_positions() {
        let page = page();
        let guard = ScrollGuard::new(VirtualClock::new());
        let mut tracker = ScrollTracker::new(ScrollConfig::default());

        for y in (0..1200).step_by(7) {
            let state = run(&mut tracker, &page, &guard, y as f64);
            let active = ["a", "b", "c"].iter().filter(|id| state.is_active(id)).count();
            assert!(active <= 1, "{} links active at {}", active, y);
        }
    }
}
