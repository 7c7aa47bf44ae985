use std::collections::HashSet;

/// Vertical scroll metrics read together at the start of a tracker pass.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollSnapshot {
    pub scroll_y: f64,
    pub viewport_height: f64,
    pub document_height: f64,
}

impl ScrollSnapshot {
    /// `slack` absorbs sub-pixel rounding of the document height.
    pub fn is_at_bottom(&self, slack: f64) -> bool {
        self.scroll_y + self.viewport_height >= self.document_height - slack
    }
}

/// A page segment that doubles as an anchor target and a nav highlight source.
#[derive(Clone, Debug, PartialEq)]
pub struct Section {
    pub id: String,
    pub offset_top: f64,
    pub height: f64,
}

impl Section {
    pub fn new(id: impl Into<String>, offset_top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            offset_top,
            height,
        }
    }
}

/// Sections in document order plus the ids that have a nav link.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layout {
    pub sections: Vec<Section>,
    linked: HashSet<String>,
}

impl Layout {
    pub fn new(sections: Vec<Section>, linked: impl IntoIterator<Item = String>) -> Self {
        Self {
            sections,
            linked: linked.into_iter().collect(),
        }
    }

    pub fn is_linked(&self, section_id: &str) -> bool {
        self.linked.contains(section_id)
    }
}

/// What the engine needs from the page. Implemented over `web_sys` in the
/// browser and by an in-memory page in tests.
pub trait Viewport {
    fn snapshot(&self) -> ScrollSnapshot;
    /// Every `section[id]`, in document order.
    fn sections(&self) -> Vec<Section>;
    fn has_nav_link(&self, section_id: &str) -> bool;
    fn find_target(&self, id: &str) -> Option<Section>;
    /// Animated scroll; returns before the animation ends.
    fn smooth_scroll_to(&self, top: f64);

    fn measure_layout(&self) -> Layout {
        let sections = self.sections();
        let linked: Vec<String> = sections
            .iter()
            .filter(|s| self.has_nav_link(&s.id))
            .map(|s| s.id.clone())
            .collect();
        Layout::new(sections, linked)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;

    use super::*;

    /// In-memory page with settable metrics that records scroll requests.
    #[derive(Default)]
    pub struct FakePage {
        pub snapshot: RefCell<ScrollSnapshot>,
        pub sections: RefCell<Vec<Section>>,
        pub unlinked: RefCell<Vec<String>>,
        pub scrolls: RefCell<Vec<f64>>,
        pub reads: std::cell::Cell<usize>,
    }

    impl FakePage {
        pub fn new(sections: Vec<Section>, viewport_height: f64, document_height: f64) -> Self {
            let page = Self::default();
            *page.sections.borrow_mut() = sections;
            *page.snapshot.borrow_mut() = ScrollSnapshot {
                scroll_y: 0.0,
                viewport_height,
                document_height,
            };
            page
        }

        pub fn scroll(&self, y: f64) {
            self.snapshot.borrow_mut().scroll_y = y;
        }
    }

    impl Viewport for FakePage {
        fn snapshot(&self) -> ScrollSnapshot {
            self.reads.set(self.reads.get() + 1);
            *self.snapshot.borrow()
        }

        fn sections(&self) -> Vec<Section> {
            self.sections.borrow().clone()
        }

        fn has_nav_link(&self, section_id: &str) -> bool {
            !self.unlinked.borrow().iter().any(|id| id == section_id)
        }

        fn find_target(&self, id: &str) -> Option<Section> {
            self.sections.borrow().iter().find(|s| s.id == id).cloned()
        }

        fn smooth_scroll_to(&self, top: f64) {
            self.scrolls.borrow_mut().push(top);
        }
    }

    #[test]
    fn layout_skips_sections_without_links() {
        let page = FakePage::new(
            vec![Section::new("hero", 0.0, 500.0), Section::new("about", 500.0, 400.0)],
            800.0,
            900.0,
        );
        page.unlinked.borrow_mut().push("hero".into());

        let layout = page.measure_layout();
        assert_eq!(layout.sections.len(), 2);
        assert!(!layout.is_linked("hero"));
        assert!(layout.is_linked("about"));
    }
}
