use yew::prelude::*;

use crate::engine::{PageEvent, ScrollEngine};

#[hook]
pub fn use_scroll_engine() -> Option<ScrollEngine> {
    use_context::<Option<ScrollEngine>>().flatten()
}

#[derive(Properties, PartialEq)]
pub struct AnchorLinkProps {
    pub href: AttrValue,
    #[prop_or_default]
    pub class: Classes,
    /// Runs after the engine has handled the click.
    #[prop_or_default]
    pub onclick: Option<Callback<()>>,
    #[prop_or_default]
    pub children: Children,
}

/// In-page link that scrolls smoothly under the engine's guard instead of
/// jumping.
#[function_component(AnchorLink)]
pub fn anchor_link(props: &AnchorLinkProps) -> Html {
    let engine = use_scroll_engine();

    let onclick = {
        let href = props.href.clone();
        let after = props.onclick.clone();
        Callback::from(move |e: MouseEvent| {
            if let Some(engine) = engine.as_ref() {
                let dispatch = engine.dispatch(PageEvent::AnchorClick { href: href.to_string() });
                if dispatch.prevent_default {
                    e.prevent_default();
                }
            }
            if let Some(after) = after.as_ref() {
                after.emit(());
            }
        })
    };

    html! {
        <a href={props.href.clone()} class={props.class.clone()} {onclick}>
            { props.children.clone() }
        </a>
    }
}
