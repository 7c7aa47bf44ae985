//! One-shot cosmetic behaviours of the page that do not depend on the
//! scroll engine.

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::js_sys::{Array, Reflect};
use web_sys::{
    Document, Element, ErrorEvent, Event, HtmlElement, HtmlImageElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, ScrollRestoration,
};

use crate::dom::{self, Listener};
use crate::error::DomError;

const COUNTER_TICK_MS: u32 = 16;

/// Count-up from zero to a target, advanced once per tick.
#[derive(Clone, Debug, PartialEq)]
pub struct CounterAnimation {
    target: u32,
    increment: f64,
    current: f64,
}

impl CounterAnimation {
    pub fn new(target: u32, duration_ms: u32, tick_ms: u32) -> Self {
        let ticks = (f64::from(duration_ms) / f64::from(tick_ms.max(1))).max(1.0);
        Self {
            target,
            increment: f64::from(target) / ticks,
            current: 0.0,
        }
    }

    /// Value to display after this tick and whether the count is finished.
    pub fn tick(&mut self) -> (u32, bool) {
        self.current += self.increment;
        if self.current >= f64::from(self.target) {
            (self.target, true)
        } else {
            (self.current.floor() as u32, false)
        }
    }
}

/// Splits a badge text like `"15+"` into its leading number and the rest.
pub fn parse_counter(text: &str) -> Option<(u32, String)> {
    let digits: String = text
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    let target: u32 = digits.parse().ok()?;
    let suffix = text.replacen(&target.to_string(), "", 1);
    Some((target, suffix))
}

struct Observer {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl Observer {
    /// Calls `on_visible` once per element, the first time it intersects.
    fn new(
        threshold: f64,
        root_margin: Option<&str>,
        on_visible: impl Fn(&Element) + 'static,
    ) -> Result<Self, DomError> {
        let callback = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                if entry.is_intersecting() {
                    let target = entry.target();
                    on_visible(&target);
                    observer.unobserve(&target);
                }
            }
        }) as Box<dyn FnMut(Array, IntersectionObserver)>);

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(threshold));
        if let Some(margin) = root_margin {
            options.set_root_margin(margin);
        }
        let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
        Ok(Self {
            observer,
            _callback: callback,
        })
    }

    fn observe_all(&self, document: &Document, selector: &str) {
        for el in query_all(document, selector) {
            self.observer.observe(&el);
        }
    }
}

impl Drop for Observer {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(nodes) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|n| n.dyn_into::<Element>().ok())
        .collect()
}

fn supports_intersection_observer() -> bool {
    web_sys::window()
        .map(|w| Reflect::has(&w, &JsValue::from_str("IntersectionObserver")).unwrap_or(false))
        .unwrap_or(false)
}

fn load_lazy_image(el: &Element) {
    if let Some(src) = el.get_attribute("data-src") {
        if let Some(img) = el.dyn_ref::<HtmlImageElement>() {
            img.set_src(&src);
        }
        let _ = el.remove_attribute("data-src");
    }
}

fn start_counter(el: &Element, duration_ms: u32) {
    let Some(text) = el.text_content() else { return };
    let Some((target, suffix)) = parse_counter(&text) else {
        return;
    };

    let el = el.clone();
    let mut animation = CounterAnimation::new(target, duration_ms, COUNTER_TICK_MS);
    spawn_local(async move {
        loop {
            TimeoutFuture::new(COUNTER_TICK_MS).await;
            let (value, done) = animation.tick();
            el.set_text_content(Some(&format!("{}{}", value, suffix)));
            if done {
                break;
            }
        }
    });
}

/// Reveals `[data-aos]` elements already inside the viewport.
fn reveal_visible_now(document: &Document) {
    let viewport_height = web_sys::window()
        .and_then(|w| w.inner_height().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    for el in query_all(document, "[data-aos]") {
        if el.get_bounding_client_rect().top() < viewport_height {
            let _ = el.class_list().add_1("aos-animate");
        }
    }
}

/// Observers and listeners that live as long as the page component.
pub struct PageEffects {
    _observers: Vec<Observer>,
    _error_listener: Option<Listener>,
}

impl PageEffects {
    pub fn install(counter_duration_ms: u32) -> Result<Self, DomError> {
        let document = dom::document()?;
        let mut observers = Vec::new();

        if supports_intersection_observer() {
            let reveal = Observer::new(0.05, Some("0px 0px -50px 0px"), |el| {
                let _ = el.class_list().add_1("aos-animate");
            })?;
            reveal.observe_all(&document, "[data-aos]");
            observers.push(reveal);

            let lazy = Observer::new(0.0, None, load_lazy_image)?;
            lazy.observe_all(&document, "img[data-src]");
            observers.push(lazy);

            let counter = Observer::new(0.5, None, move |el| start_counter(el, counter_duration_ms))?;
            counter.observe_all(&document, ".experience-number");
            observers.push(counter);
        } else {
            for img in query_all(&document, "img[data-src]") {
                load_lazy_image(&img);
            }
        }
        reveal_visible_now(&document);
        mark_touch_device();

        let window = dom::window()?;
        let error_listener = match Listener::new(&window, "error", log_uncaught_error) {
            Ok(listener) => Some(listener),
            Err(e) => {
                log::warn!("error logger not installed: {}", e);
                None
            }
        };

        Ok(Self {
            _observers: observers,
            _error_listener: error_listener,
        })
    }
}

fn log_uncaught_error(event: Event) {
    if let Some(event) = event.dyn_ref::<ErrorEvent>() {
        log::error!("An error occurred: {}", event.message());
    }
}

fn mark_touch_device() {
    let Some(window) = web_sys::window() else { return };
    let has_touch = Reflect::has(&window, &JsValue::from_str("ontouchstart")).unwrap_or(false)
        || window.navigator().max_touch_points() > 0;
    if has_touch {
        if let Ok(body) = dom::body() {
            let _ = body.class_list().add_1("touch-device");
        }
    }
}

/// Window `load`: manual scroll restoration, body fade-in, load time and
/// dropping the URL hash without scrolling.
pub fn on_window_load() {
    let Some(window) = web_sys::window() else { return };

    if let Ok(history) = window.history() {
        let _ = history.set_scroll_restoration(ScrollRestoration::Manual);

        let location = window.location();
        if location.hash().map_or(false, |h| !h.is_empty()) {
            let url = format!(
                "{}{}",
                location.pathname().unwrap_or_default(),
                location.search().unwrap_or_default()
            );
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(&url));
        }
    }

    if let Ok(body) = dom::body() {
        fade_in(body);
    }

    if let Some(performance) = window.performance() {
        log::info!("⚡ Page loaded in {:.0}ms", performance.now());
    }
}

fn fade_in(body: HtmlElement) {
    let style = body.style();
    let _ = style.set_property("opacity", "0");
    let _ = style.set_property("transition", "opacity 0.5s ease");
    spawn_local(async move {
        TimeoutFuture::new(100).await;
        let _ = body.style().set_property("opacity", "1");
    });
}
