use yew::prelude::*;

use super::anchor::use_scroll_engine;
use crate::engine::{PageEvent, ScrollTopState};

#[derive(Properties, PartialEq)]
pub struct ScrollTopProps {
    pub state: ScrollTopState,
}

#[function_component(ScrollTopButton)]
pub fn scroll_top_button(props: &ScrollTopProps) -> Html {
    let engine = use_scroll_engine();

    let onclick = Callback::from(move |e: MouseEvent| {
        if let Some(engine) = engine.as_ref() {
            if engine.dispatch(PageEvent::ScrollTopClick).prevent_default {
                e.prevent_default();
            }
        }
    });

    let visible = props.state == ScrollTopState::Visible;
    html! {
        <a href="#home" id="scrollTop" class={classes!("scroll-top", visible.then(|| "visible"))}
            aria-label="Back to top" {onclick}>
            <i class="fas fa-arrow-up"></i>
        </a>
    }
}
