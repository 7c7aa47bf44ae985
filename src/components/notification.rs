use std::rc::Rc;

use gloo_timers::callback::Timeout;
use stylist::yew::styled_component;
use yew::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    fn icon(self) -> &'static str {
        match self {
            NoticeKind::Success => "fas fa-check-circle",
            NoticeKind::Error => "fas fa-exclamation-circle",
        }
    }

    fn background(self) -> &'static str {
        match self {
            NoticeKind::Success => "linear-gradient(135deg, #2c9c93, #1a6760)",
            NoticeKind::Error => "linear-gradient(135deg, #ff4757, #c23616)",
        }
    }

    fn class(self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub message: String,
    pub kind: NoticeKind,
    /// Playing the exit animation, removed once it finishes.
    pub leaving: bool,
}

pub enum ToastAction {
    Show { message: String, kind: NoticeKind },
    Dismiss(u32),
    Remove(u32),
}

/// At most one toast is on screen; showing a new one replaces it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ToastState {
    pub current: Option<Toast>,
    next_id: u32,
}

impl Reducible for ToastState {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            ToastAction::Show { message, kind } => {
                next.current = Some(Toast {
                    id: next.next_id,
                    message,
                    kind,
                    leaving: false,
                });
                next.next_id += 1;
            }
            ToastAction::Dismiss(id) => match next.current.as_mut() {
                Some(toast) if toast.id == id => toast.leaving = true,
                _ => return self,
            },
            ToastAction::Remove(id) => {
                if next.current.as_ref().map(|t| t.id) != Some(id) {
                    return self;
                }
                next.current = None;
            }
        }
        Rc::new(next)
    }
}

/// Handle the rest of the page uses to raise toasts.
#[derive(Clone, PartialEq)]
pub struct Notifier(Callback<(String, NoticeKind)>);

impl Notifier {
    pub fn new(callback: Callback<(String, NoticeKind)>) -> Self {
        Self(callback)
    }

    pub fn notify(&self, message: impl Into<String>, kind: NoticeKind) {
        self.0.emit((message.into(), kind));
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self(Callback::from(|(message, _): (String, NoticeKind)| {
            log::warn!("notification outside ToastHost: {}", message);
        }))
    }
}

#[hook]
pub fn use_notifier() -> Notifier {
    use_context::<Notifier>().unwrap_or_default()
}

#[derive(Properties, PartialEq)]
pub struct ToastHostProps {
    pub lifetime_ms: u32,
    pub exit_ms: u32,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(ToastHost)]
pub fn toast_host(props: &ToastHostProps) -> Html {
    let toasts = use_reducer(ToastState::default);

    let notifier = {
        let dispatcher = toasts.dispatcher();
        use_memo(
            move |_| {
                Notifier::new(Callback::from(move |(message, kind)| {
                    dispatcher.dispatch(ToastAction::Show { message, kind });
                }))
            },
            (),
        )
    };

    {
        let dispatcher = toasts.dispatcher();
        let (lifetime_ms, exit_ms) = (props.lifetime_ms, props.exit_ms);
        let phase = toasts.current.as_ref().map(|t| (t.id, t.leaving));
        use_effect_with_deps(
            move |phase| {
                let timeout = phase.map(|(id, leaving)| {
                    if leaving {
                        Timeout::new(exit_ms, move || dispatcher.dispatch(ToastAction::Remove(id)))
                    } else {
                        Timeout::new(lifetime_ms, move || dispatcher.dispatch(ToastAction::Dismiss(id)))
                    }
                });
                // Dropping the pending timeout cancels it.
                move || drop(timeout)
            },
            phase,
        );
    }

    let on_close = {
        let dispatcher = toasts.dispatcher();
        Callback::from(move |id: u32| dispatcher.dispatch(ToastAction::Dismiss(id)))
    };

    html! {
        <ContextProvider<Notifier> context={(*notifier).clone()}>
            { props.children.clone() }
            {
                if let Some(toast) = toasts.current.clone() {
                    let key = toast.id;
                    html! { <ToastView key={key} {toast} {on_close} /> }
                } else {
                    html! {}
                }
            }
        </ContextProvider<Notifier>>
    }
}

#[derive(Properties, PartialEq)]
struct ToastViewProps {
    toast: Toast,
    on_close: Callback<u32>,
}

#[styled_component(ToastView)]
fn toast_view(props: &ToastViewProps) -> Html {
    let toast = &props.toast;
    let animation = if toast.leaving { "slideOutRight" } else { "slideInRight" };
    let style = css!(
        r#"
        position: fixed;
        top: 100px;
        right: 30px;
        background: ${background};
        color: white;
        padding: 20px 30px;
        border-radius: 12px;
        box-shadow: 0 10px 30px rgba(0, 0, 0, 0.3);
        display: flex;
        align-items: center;
        gap: 15px;
        z-index: 10000;
        max-width: 400px;
        animation: ${animation} 0.4s ease forwards;

        @media (max-width: 768px) {
            left: 15px;
            right: 15px;
            top: 80px;
            max-width: calc(100% - 30px);
        }
        "#,
        background = toast.kind.background(),
        animation = animation,
    );

    let close = {
        let on_close = props.on_close.clone();
        let id = toast.id;
        Callback::from(move |_: MouseEvent| on_close.emit(id))
    };

    html! {
        <div class={classes!("notification", toast.kind.class(), style)} role="status">
            <i class={toast.kind.icon()}></i>
            <span>{ &toast.message }</span>
            <button class="notification-close" aria-label="Close" onclick={close}>{"×"}</button>
        </div>
    }
}
