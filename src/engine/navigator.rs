use std::borrow::Cow;

use crate::config::ScrollConfig;

use super::guard::ScrollGuard;
use super::viewport::Viewport;

#[derive(Clone, Debug, PartialEq)]
pub enum AnchorOutcome {
    /// `#`, `#!` or not an in-page link; the browser handles it.
    Ignored,
    /// In-page link whose target is not on the page.
    Unresolved,
    Scrolled { top: f64 },
}

impl AnchorOutcome {
    pub fn prevents_default(&self) -> bool {
        !matches!(self, AnchorOutcome::Ignored)
    }
}

/// Extracts the element id an in-page `href` points at.
pub fn fragment_id(href: &str) -> Option<Cow<'_, str>> {
    let fragment = href.strip_prefix('#')?;
    if fragment.is_empty() || fragment == "!" {
        return None;
    }
    Some(urlencoding::decode(fragment).unwrap_or(Cow::Borrowed(fragment)))
}

pub fn is_paging_key(key: &str) -> bool {
    matches!(key, "Home" | "End" | "PageUp" | "PageDown")
}

/// Turns in-page navigation into animated scrolls that the tracker ignores
/// while they run.
pub struct Navigator<'a> {
    pub config: &'a ScrollConfig,
    pub guard: &'a ScrollGuard,
    pub viewport: &'a dyn Viewport,
}

impl Navigator<'_> {
    pub fn follow_anchor(&self, href: &str) -> AnchorOutcome {
        let Some(id) = fragment_id(href) else {
            return AnchorOutcome::Ignored;
        };
        let Some(target) = self.viewport.find_target(&id) else {
            log::debug!("anchor #{} has no target", id);
            return AnchorOutcome::Unresolved;
        };

        let top = target.offset_top - self.config.header_compensation;
        self.guard.begin_programmatic_scroll(self.config.anchor_guard_ms);
        self.viewport.smooth_scroll_to(top);
        AnchorOutcome::Scrolled { top }
    }

    /// Paging keys scroll natively; only the guard is armed.
    pub fn page_key(&self, key: &str) -> bool {
        if !is_paging_key(key) {
            return false;
        }
        self.guard.begin_programmatic_scroll(self.config.paging_guard_ms);
        true
    }

    pub fn scroll_to_top(&self) {
        self.guard.begin_programmatic_scroll(self.config.anchor_guard_ms);
        self.viewport.smooth_scroll_to(0.0);
    }
}
