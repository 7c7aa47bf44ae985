//! `web_sys` side of the page: the engine's viewport, session storage and
//! listener registration.

use std::cell::RefCell;
use std::collections::HashSet;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, Document, Event, EventTarget, HtmlElement, ScrollBehavior,
    ScrollToOptions, Storage, Window,
};

use crate::components::popup::SessionStore;
use crate::engine::{ScrollSnapshot, Section, Viewport};
use crate::error::DomError;

pub fn window() -> Result<Window, DomError> {
    web_sys::window().ok_or(DomError::NoWindow)
}

pub fn document() -> Result<Document, DomError> {
    window()?.document().ok_or(DomError::NoDocument)
}

pub fn body() -> Result<HtmlElement, DomError> {
    document()?.body().ok_or(DomError::MissingElement("body"))
}

/// Overlays currently holding the body scroll lock. The body stays locked
/// while any holder remains, so closing one overlay does not unlock the page
/// under another.
#[derive(Debug, Default)]
pub struct ScrollLocks {
    holders: HashSet<&'static str>,
}

impl ScrollLocks {
    /// Records `owner`'s request and returns whether the body should be
    /// locked afterwards. Repeated requests from one owner are idempotent.
    pub fn set(&mut self, owner: &'static str, locked: bool) -> bool {
        if locked {
            self.holders.insert(owner);
        } else {
            self.holders.remove(owner);
        }
        !self.holders.is_empty()
    }
}

thread_local! {
    static SCROLL_LOCKS: RefCell<ScrollLocks> = RefCell::new(ScrollLocks::default());
}

/// Stops the page behind an overlay or open menu from scrolling.
pub fn lock_body_scroll(owner: &'static str, locked: bool) {
    let locked = SCROLL_LOCKS.with(|locks| locks.borrow_mut().set(owner, locked));
    let result = body().and_then(|body| {
        body.style()
            .set_property("overflow", if locked { "hidden" } else { "" })
            .map_err(DomError::from)
    });
    if let Err(e) = result {
        log::warn!("could not toggle body scroll: {}", e);
    }
}

pub fn viewport_width() -> f64 {
    web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

/// Registered DOM listener, removed again on drop.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new(
        target: &EventTarget,
        event: &'static str,
        callback: impl FnMut(Event) + 'static,
    ) -> Result<Self, DomError> {
        let callback = Closure::wrap(Box::new(callback) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }

    /// Same as `new` but tells the browser the handler never cancels the event.
    pub fn passive(
        target: &EventTarget,
        event: &'static str,
        callback: impl FnMut(Event) + 'static,
    ) -> Result<Self, DomError> {
        let callback = Closure::wrap(Box::new(callback) as Box<dyn FnMut(Event)>);
        let options = AddEventListenerOptions::new();
        options.set_passive(true);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            callback.as_ref().unchecked_ref(),
            &options,
        )?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

/// Reads page geometry straight from the live document on every call.
pub struct DomViewport {
    window: Window,
    document: Document,
}

impl DomViewport {
    pub fn new() -> Result<Self, DomError> {
        let window = window()?;
        let document = window.document().ok_or(DomError::NoDocument)?;
        Ok(Self { window, document })
    }

    fn html_element(&self, selector: &str) -> Option<HtmlElement> {
        self.document
            .query_selector(selector)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }
}

fn as_section(id: String, el: &HtmlElement) -> Section {
    Section::new(id, f64::from(el.offset_top()), f64::from(el.offset_height()))
}

impl Viewport for DomViewport {
    fn snapshot(&self) -> ScrollSnapshot {
        let scroll_y = self.window.scroll_y().unwrap_or(0.0);
        let viewport_height = self
            .window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        let document_height = self
            .document
            .document_element()
            .map(|el| f64::from(el.scroll_height()))
            .unwrap_or(0.0);

        ScrollSnapshot {
            scroll_y,
            viewport_height,
            document_height,
        }
    }

    fn sections(&self) -> Vec<Section> {
        let Ok(nodes) = self.document.query_selector_all("section[id]") else {
            return Vec::new();
        };

        (0..nodes.length())
            .filter_map(|i| nodes.get(i))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .map(|el| as_section(el.id(), &el))
            .collect()
    }

    fn has_nav_link(&self, section_id: &str) -> bool {
        self.html_element(&format!(".nav-link[href=\"#{}\"]", section_id))
            .is_some()
    }

    fn find_target(&self, id: &str) -> Option<Section> {
        self.document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            .map(|el| as_section(id.to_string(), &el))
    }

    fn smooth_scroll_to(&self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }
}

/// `window.sessionStorage`.
pub struct BrowserSession {
    storage: Storage,
}

impl BrowserSession {
    pub fn new() -> Result<Self, DomError> {
        let storage = window()?
            .session_storage()
            .ok()
            .flatten()
            .ok_or(DomError::StorageUnavailable)?;
        Ok(Self { storage })
    }
}

impl SessionStore for BrowserSession {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(e) = self.storage.set_item(key, value) {
            log::warn!("session storage write failed: {}", DomError::from(e));
        }
    }
}
