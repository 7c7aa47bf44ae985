use serde::Serialize;
use wasm_bindgen::JsValue;
use web_sys::{HtmlInputElement, HtmlSelectElement, KeyboardEvent};
use yew::prelude::*;
use yew_hooks::prelude::*;

use super::notification::{use_notifier, NoticeKind, Notifier};
use crate::dom::{self, BrowserSession};

/// Session key marking that the visitor has seen the popup.
pub const POPUP_SHOWN_KEY: &str = "popupShown";

pub const PRODUCT_OPTIONS: &[(&str, &str)] = &[
    ("hdpe", "HDPE Tarpaulins"),
    ("pvc", "PVC Coated Tarpaulins"),
    ("canvas", "Canvas Tarpaulins"),
    ("shade", "Shade Nets"),
    ("custom", "Custom Covers"),
];

/// Key/value storage scoped to the browser tab's session.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

pub struct PopupSession<S> {
    store: S,
}

impl<S: SessionStore> PopupSession<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn should_open(&self) -> bool {
        self.store.get(POPUP_SHOWN_KEY).is_none()
    }

    pub fn mark_shown(&self) {
        self.store.set(POPUP_SHOWN_KEY, "true");
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct LeadForm {
    pub name: String,
    pub phone: String,
    pub product: String,
}

impl LeadForm {
    pub fn product_label(&self) -> Option<&'static str> {
        PRODUCT_OPTIONS
            .iter()
            .find(|(value, _)| *value == self.product)
            .map(|(_, label)| *label)
    }

    pub fn confirmation(&self) -> String {
        format!(
            "Thank you {}! We'll contact you soon about {}.",
            self.name,
            self.product_label().unwrap_or("your interest")
        )
    }
}

/// Confirms the lead, clears `form` and keeps the popup closed for the
/// rest of the session. Returns what was submitted.
pub fn submit_lead<S: SessionStore>(
    form: &mut LeadForm,
    session: &PopupSession<S>,
    notifier: &Notifier,
) -> LeadForm {
    let submitted = std::mem::take(form);
    notifier.notify(submitted.confirmation(), NoticeKind::Success);
    session.mark_shown();
    submitted
}

#[derive(Properties, PartialEq)]
pub struct PopupProps {
    pub delay_ms: u32,
}

#[function_component(Popup)]
pub fn popup(props: &PopupProps) -> Html {
    let notifier = use_notifier();
    let open = use_state(|| false);
    let fields = use_state(LeadForm::default);
    let session = use_memo(
        |_| match BrowserSession::new() {
            Ok(store) => Some(PopupSession::new(store)),
            Err(e) => {
                log::warn!("popup session flag disabled: {}", e);
                None
            }
        },
        (),
    );

    {
        let open = open.clone();
        let session = session.clone();
        use_timeout(
            move || {
                let already_shown = matches!(&*session, Some(s) if !s.should_open());
                if !already_shown {
                    open.set(true);
                    dom::lock_body_scroll("popup", true);
                }
            },
            props.delay_ms,
        );
    }

    let close = {
        let open = open.clone();
        let session = session.clone();
        Callback::from(move |_: ()| {
            open.set(false);
            dom::lock_body_scroll("popup", false);
            if let Some(session) = session.as_ref() {
                session.mark_shown();
            }
        })
    };

    {
        let open = open.clone();
        let close = close.clone();
        use_event_with_window("keydown", move |e: KeyboardEvent| {
            if e.key() == "Escape" && *open {
                close.emit(());
            }
        });
    }

    let on_overlay_click = {
        let close = close.clone();
        Callback::from(move |e: MouseEvent| {
            // Only the backdrop itself, not clicks bubbling from the card.
            if e.target() == e.current_target() {
                close.emit(());
            }
        })
    };

    let on_submit = {
        let fields = fields.clone();
        let session = session.clone();
        let close = close.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let mut form = (*fields).clone();
            let submitted = match session.as_ref() {
                Some(session) => submit_lead(&mut form, session, &notifier),
                None => {
                    notifier.notify(form.confirmation(), NoticeKind::Success);
                    std::mem::take(&mut form)
                }
            };
            fields.set(form);
            close.emit(());

            let logged = serde_wasm_bindgen::to_value(&submitted).unwrap_or(JsValue::NULL);
            gloo_console::log!("Form submitted:", logged);
        })
    };

    let on_name = {
        let fields = fields.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            fields.set(LeadForm { name: input.value(), ..(*fields).clone() });
        })
    };
    let on_phone = {
        let fields = fields.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            fields.set(LeadForm { phone: input.value(), ..(*fields).clone() });
        })
    };
    let on_product = {
        let fields = fields.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            fields.set(LeadForm { product: select.value(), ..(*fields).clone() });
        })
    };

    html! {
        <div id="popupOverlay" class={classes!("popup-overlay", (*open).then(|| "active"))} onclick={on_overlay_click}>
            <div class="popup-card">
                <button id="popupClose" class="popup-close" aria-label="Close" onclick={close.reform(|_: MouseEvent| ())}>
                    {"×"}
                </button>
                <h3>{"Get a Free Quote"}</h3>
                <p>{"Tell us what you need and our team will call you back."}</p>
                <form id="popupForm" onsubmit={on_submit}>
                    <div class="form-group">
                        <input type="text" name="name" placeholder="Your Name" required=true
                            value={fields.name.clone()} oninput={on_name} />
                    </div>
                    <div class="form-group">
                        <input type="tel" name="phone" placeholder="Phone Number" required=true
                            value={fields.phone.clone()} oninput={on_phone} />
                    </div>
                    <div class="form-group">
                        <select name="product" required=true onchange={on_product}>
                            <option value="" selected={fields.product.is_empty()} disabled=true>{"Select a product"}</option>
                            { for PRODUCT_OPTIONS.iter().map(|(value, label)| html! {
                                <option value={*value} selected={fields.product == *value}>{ *label }</option>
                            }) }
                        </select>
                    </div>
                    <button type="submit" class="btn btn-primary">{"Request Callback"}</button>
                </form>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    use super::*;

    #[derive(Default)]
    struct MemoryStore(RefCell<HashMap<String, String>>);

    impl SessionStore for MemoryStore {
        fn get(&self, key: &str) -> Option<String> {
            self.0.borrow().get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) {
            self.0.borrow_mut().insert(key.to_string(), value.to_string());
        }
    }

    fn capture() -> (Rc<RefCell<Vec<(String, NoticeKind)>>>, Notifier) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let notifier = Notifier::new(Callback::from(move |notice| sink.borrow_mut().push(notice)));
        (seen, notifier)
    }

    #[test]
    fn opens_once_per_session() {
        let session = PopupSession::new(MemoryStore::default());
        assert!(session.should_open());
        session.mark_shown();
        assert!(!session.should_open());
    }

    #[test]
    fn submit_confirms_clears_and_marks_session() {
        let session = PopupSession::new(MemoryStore::default());
        let (seen, notifier) = capture();
        let mut form = LeadForm {
            name: "Alice".into(),
            phone: "+91 98765 43210".into(),
            product: "pvc".into(),
        };

        let submitted = submit_lead(&mut form, &session, &notifier);

        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].0.contains("Alice"));
        assert!(seen[0].0.contains("PVC Coated Tarpaulins"));
        assert_eq!(seen[0].1, NoticeKind::Success);
        assert_eq!(form, LeadForm::default());
        assert_eq!(submitted.name, "Alice");
        assert!(!session.should_open());
    }

    #[test]
    fn unknown_product_falls_back_to_generic_interest() {
        let form = LeadForm {
            name: "Bo".into(),
            product: "rope".into(),
            ..LeadForm::default()
        };
        assert_eq!(form.confirmation(), "Thank you Bo! We'll contact you soon about your interest.");
    }
}
