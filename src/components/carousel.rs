use gloo_timers::callback::Timeout;
use web_sys::KeyboardEvent;
use yew::prelude::*;
use yew_hooks::prelude::*;

/// Delay before the active class is re-applied so the CSS transition replays.
const ACTIVATE_DELAY_MS: u32 = 50;

pub struct Testimonial {
    pub quote: &'static str,
    pub author: &'static str,
    pub role: &'static str,
}

pub const TESTIMONIALS: &[Testimonial] = &[
    Testimonial {
        quote: "The HDPE covers survived two monsoons on our open storage yard without a single tear.",
        author: "Rajesh Patel",
        role: "Warehouse Manager, Surat",
    },
    Testimonial {
        quote: "Custom sizes delivered in a week. Our trucks have not had a wet load since.",
        author: "Meena Iyer",
        role: "Fleet Owner, Chennai",
    },
    Testimonial {
        quote: "Fair prices, honest advice and they picked up the phone every time we called.",
        author: "Harpreet Singh",
        role: "Farmer, Ludhiana",
    },
];

/// Position in a fixed ordered list, wrapping at both ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Carousel {
    index: usize,
    len: usize,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn next(self) -> Self {
        if self.len == 0 {
            return self;
        }
        Self { index: (self.index + 1) % self.len, ..self }
    }

    pub fn prev(self) -> Self {
        if self.len == 0 {
            return self;
        }
        Self { index: (self.index + self.len - 1) % self.len, ..self }
    }
}

#[function_component(TestimonialCarousel)]
pub fn testimonial_carousel() -> Html {
    let carousel = use_state(|| Carousel::new(TESTIMONIALS.len()));
    let shown = use_state(|| None::<usize>);

    {
        let shown = shown.clone();
        use_effect_with_deps(
            move |index: &usize| {
                shown.set(None);
                let index = *index;
                let timeout = Timeout::new(ACTIVATE_DELAY_MS, move || shown.set(Some(index)));
                move || drop(timeout)
            },
            carousel.index(),
        );
    }

    let go_next = {
        let carousel = carousel.clone();
        Callback::from(move |_: ()| carousel.set(carousel.next()))
    };
    let go_prev = {
        let carousel = carousel.clone();
        Callback::from(move |_: ()| carousel.set(carousel.prev()))
    };

    {
        let (go_next, go_prev) = (go_next.clone(), go_prev.clone());
        use_event_with_window("keydown", move |e: KeyboardEvent| match e.key().as_str() {
            "ArrowLeft" => go_prev.emit(()),
            "ArrowRight" => go_next.emit(()),
            _ => {}
        });
    }

    if TESTIMONIALS.is_empty() {
        return html! {};
    }

    html! {
        <div class="testimonial-slider">
            <div class="testimonial-track">
                { for TESTIMONIALS.iter().enumerate().map(|(i, t)| html! {
                    <div class={classes!("testimonial-card", (*shown == Some(i)).then(|| "active"))}>
                        <p class="testimonial-quote">{ t.quote }</p>
                        <div class="testimonial-author">
                            <strong>{ t.author }</strong>
                            <span>{ t.role }</span>
                        </div>
                    </div>
                }) }
            </div>
            <div class="testimonial-controls">
                <button id="prevTestimonial" aria-label="Previous testimonial" onclick={go_prev.reform(|_: MouseEvent| ())}>
                    <i class="fas fa-chevron-left"></i>
                </button>
                <button id="nextTestimonial" aria-label="Next testimonial" onclick={go_next.reform(|_: MouseEvent| ())}>
                    <i class="fas fa-chevron-right"></i>
                </button>
            </div>
        </div>
    }
}
