use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Event, KeyboardEvent, Node};
use yew::prelude::*;
use yew_hooks::prelude::*;

use super::anchor::AnchorLink;
use crate::dom;
use crate::engine::{BrowserScheduler, Debounce, HeaderState, ScrollState};

/// Section id and label, in page order.
pub const NAV_ITEMS: &[(&str, &str)] = &[
    ("home", "Home"),
    ("about", "About"),
    ("products", "Products"),
    ("testimonials", "Testimonials"),
    ("contact", "Contact"),
];

#[derive(Properties, PartialEq)]
pub struct NavProps {
    pub scroll: ScrollState,
    pub mobile_breakpoint: f64,
    pub resize_debounce_ms: u32,
}

#[function_component(Nav)]
pub fn nav(props: &NavProps) -> Html {
    let menu_open = use_state(|| false);
    let open_now = use_mut_ref(|| false);
    *open_now.borrow_mut() = *menu_open;

    let menu_ref = use_node_ref();
    let toggle_ref = use_node_ref();

    let set_menu = {
        let menu_open = menu_open.setter();
        Callback::from(move |open: bool| {
            menu_open.set(open);
            dom::lock_body_scroll("menu", open);
        })
    };

    let close_if_open = {
        let open_now = open_now.clone();
        let set_menu = set_menu.clone();
        Callback::from(move |_: ()| {
            if *open_now.borrow() {
                set_menu.emit(false);
            }
        })
    };

    // A menu left open on a phone-sized window is closed once the window
    // settles wider than the breakpoint.
    let on_resize = {
        let close_if_open = close_if_open.clone();
        let breakpoint = props.mobile_breakpoint;
        let wait_ms = props.resize_debounce_ms;
        use_memo(
            move |_| {
                Debounce::new(Rc::new(BrowserScheduler::new()), wait_ms, move |()| {
                    if dom::viewport_width() > breakpoint {
                        close_if_open.emit(());
                    }
                })
            },
            (),
        )
    };
    use_event_with_window("resize", move |_: Event| on_resize.call(()));

    {
        let close_if_open = close_if_open.clone();
        use_event_with_window("keydown", move |e: KeyboardEvent| {
            if e.key() == "Escape" {
                close_if_open.emit(());
            }
        });
    }

    {
        let close_if_open = close_if_open.clone();
        let (menu_ref, toggle_ref) = (menu_ref.clone(), toggle_ref.clone());
        use_event_with_window("click", move |e: MouseEvent| {
            let target = e.target().and_then(|t| t.dyn_into::<Node>().ok());
            let inside = |node: &NodeRef| {
                node.get()
                    .map_or(false, |n| n.contains(target.as_ref()))
            };
            if !inside(&menu_ref) && !inside(&toggle_ref) {
                close_if_open.emit(());
            }
        });
    }

    let on_toggle = {
        let menu_open = menu_open.clone();
        let set_menu = set_menu.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            set_menu.emit(!*menu_open);
        })
    };

    let scrolled = props.scroll.header == HeaderState::Scrolled;

    html! {
        <nav id="navbar" class={classes!("navbar", scrolled.then(|| "scrolled"))}>
            <div class="nav-container">
                <AnchorLink href="#home" class={classes!("nav-logo")}>
                    <span class="logo-mark">{"HB"}</span>{" Traders"}
                </AnchorLink>
                <ul id="navMenu" ref={menu_ref} class={classes!("nav-menu", (*menu_open).then(|| "active"))}>
                    { for NAV_ITEMS.iter().map(|(id, label)| {
                        let class = classes!("nav-link", props.scroll.is_active(id).then(|| "active"));
                        html! {
                            <li>
                                <AnchorLink href={format!("#{}", id)} {class} onclick={close_if_open.clone()}>
                                    { *label }
                                </AnchorLink>
                            </li>
                        }
                    }) }
                </ul>
                <button
                    id="mobileMenuToggle"
                    ref={toggle_ref}
                    class={classes!("mobile-menu-toggle", (*menu_open).then(|| "active"))}
                    aria-label="Toggle menu"
                    onclick={on_toggle}
                >
                    <span></span>
                    <span></span>
                    <span></span>
                </button>
            </div>
        </nav>
    }
}
