use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Event, KeyboardEvent};
use yew::prelude::*;

use crate::components::anchor::AnchorLink;
use crate::components::carousel::TestimonialCarousel;
use crate::components::contact::ContactForm;
use crate::components::footer::Footer;
use crate::components::nav::Nav;
use crate::components::popup::Popup;
use crate::components::products::ProductGrid;
use crate::components::scroll_top::ScrollTopButton;
use crate::config::{ScrollConfig, SiteConfig};
use crate::dom::{self, DomViewport, Listener};
use crate::effects::{self, PageEffects};
use crate::engine::{BrowserScheduler, PageEvent, ScrollEngine, ScrollState};
use crate::error::DomError;

/// Builds the engine over the live document and forwards window events to it.
fn mount_engine(
    config: ScrollConfig,
    on_state: impl Fn(&ScrollState) + 'static,
) -> Result<(ScrollEngine, Vec<Listener>), DomError> {
    let window = dom::window()?;
    let engine = ScrollEngine::new(
        config,
        Rc::new(BrowserScheduler::new()),
        Rc::new(DomViewport::new()?),
        on_state,
    );

    let mut listeners = Vec::new();
    {
        let engine = engine.clone();
        listeners.push(Listener::passive(&window, "scroll", move |_| {
            engine.dispatch(PageEvent::Scroll);
        })?);
    }
    {
        let engine = engine.clone();
        listeners.push(Listener::new(&window, "resize", move |_| {
            engine.dispatch(PageEvent::Resize);
        })?);
    }
    {
        let engine = engine.clone();
        listeners.push(Listener::new(&window, "keydown", move |e: Event| {
            if let Some(key) = e.dyn_ref::<KeyboardEvent>().map(|k| k.key()) {
                engine.dispatch(PageEvent::Key(key));
            }
        })?);
    }

    let on_load = {
        let engine = engine.clone();
        move || {
            engine.dispatch(PageEvent::Load);
            effects::on_window_load();
        }
    };
    // The wasm bundle often finishes loading after the window `load` event.
    if dom::document()?.ready_state() == "complete" {
        on_load();
    } else {
        listeners.push(Listener::new(&window, "load", move |_| on_load())?);
    }

    engine.dispatch(PageEvent::Ready);
    Ok((engine, listeners))
}

#[function_component(Landing)]
pub fn landing() -> Html {
    let config = use_context::<SiteConfig>().unwrap_or_default();
    let scroll = use_state(ScrollState::default);
    let engine = use_state(|| None::<ScrollEngine>);

    {
        let scroll = scroll.setter();
        let engine = engine.clone();
        let scroll_config = config.scroll.clone();
        let counter_duration_ms = config.counter_duration_ms;
        use_effect_with_deps(
            move |_| {
                let mounted = match mount_engine(scroll_config, move |state| scroll.set(state.clone())) {
                    Ok((scroll_engine, listeners)) => {
                        engine.set(Some(scroll_engine));
                        Some(listeners)
                    }
                    Err(e) => {
                        log::error!("scroll engine disabled: {}", e);
                        None
                    }
                };
                let page_effects = PageEffects::install(counter_duration_ms)
                    .map_err(|e| log::warn!("page effects disabled: {}", e))
                    .ok();
                log::info!("✅ Website initialized successfully!");

                move || {
                    drop(mounted);
                    drop(page_effects);
                }
            },
            (),
        );
    }

    html! {
        <ContextProvider<Option<ScrollEngine>> context={(*engine).clone()}>
            <style>{ PAGE_STYLE }</style>
            <Nav
                scroll={(*scroll).clone()}
                mobile_breakpoint={config.mobile_breakpoint}
                resize_debounce_ms={config.scroll.resize_debounce_ms}
            />

            <section id="home" class="hero">
                <div class="hero-content" data-aos="fade-up">
                    <h1>{"Premium Tarpaulin Solutions"}</h1>
                    <p class="hero-subtitle">{"Waterproof, weatherproof and built to last. Trusted by farms, fleets and warehouses across India."}</p>
                    <div class="hero-buttons">
                        <AnchorLink href="#products" class={classes!("btn", "btn-primary")}>{"Explore Products"}</AnchorLink>
                        <AnchorLink href="#contact" class={classes!("btn", "btn-secondary")}>{"Get a Quote"}</AnchorLink>
                    </div>
                </div>
            </section>

            <section id="about" class="about">
                <div class="section-header" data-aos="fade-up">
                    <h2>{"About Us"}</h2>
                    <p>{"A family business supplying covers since 1998."}</p>
                </div>
                <div class="about-content">
                    <div class="about-text" data-aos="fade-right">
                        <p>{"HB Traders manufactures and supplies tarpaulins, shade nets and custom covers. Every sheet is checked for stitching, eyelets and coating before it leaves our warehouse."}</p>
                        <p>{"We cut to size, deliver on schedule and stand behind what we sell."}</p>
                    </div>
                    <div class="experience-badge" data-aos="zoom-in">
                        <span class="experience-number">{"25+"}</span>
                        <span class="experience-label">{"Years of Experience"}</span>
                    </div>
                </div>
            </section>

            <section id="products" class="products">
                <div class="section-header" data-aos="fade-up">
                    <h2>{"Our Products"}</h2>
                    <p>{"Covers for every season and every load."}</p>
                </div>
                <ProductGrid />
            </section>

            <section id="testimonials" class="testimonials">
                <div class="section-header" data-aos="fade-up">
                    <h2>{"What Our Customers Say"}</h2>
                </div>
                <TestimonialCarousel />
            </section>

            <section id="contact" class="contact">
                <div class="section-header" data-aos="fade-up">
                    <h2>{"Contact Us"}</h2>
                    <p>{"Tell us the size and use, we will suggest the right cover."}</p>
                </div>
                <div class="contact-content">
                    <div class="contact-info" data-aos="fade-right">
                        <p><i class="fas fa-phone"></i>{" +91 98250 00000"}</p>
                        <p><i class="fas fa-envelope"></i>{" sales@hbtraders.in"}</p>
                        <p><i class="fas fa-map-marker-alt"></i>{" GIDC Estate, Ahmedabad, Gujarat"}</p>
                    </div>
                    <div data-aos="fade-left">
                        <ContactForm />
                    </div>
                </div>
            </section>

            <Footer />
            <ScrollTopButton state={scroll.scroll_top} />
            <Popup delay_ms={config.popup_delay_ms} />
        </ContextProvider<Option<ScrollEngine>>>
    }
}

const PAGE_STYLE: &str = r#"
    html { scroll-behavior: auto; }
    body { margin: 0; font-family: "Poppins", sans-serif; background: #0f1716; color: #e8f1f0; }

    .navbar {
        position: fixed; top: 0; left: 0; right: 0; z-index: 1000;
        padding: 20px 0; transition: all 0.3s ease;
    }
    .navbar.scrolled {
        padding: 12px 0;
        background: rgba(15, 23, 22, 0.95);
        box-shadow: 0 4px 20px rgba(0, 0, 0, 0.3);
    }
    .nav-container { max-width: 1200px; margin: 0 auto; padding: 0 20px; display: flex; align-items: center; justify-content: space-between; }
    .nav-logo { color: white; font-weight: 700; font-size: 1.4rem; text-decoration: none; }
    .logo-mark { color: #2c9c93; }
    .nav-menu { display: flex; gap: 30px; list-style: none; margin: 0; padding: 0; }
    .nav-link { color: #b0b0b0; text-decoration: none; transition: color 0.2s; }
    .nav-link:hover, .nav-link.active { color: #2c9c93; }
    .mobile-menu-toggle { display: none; background: none; border: none; cursor: pointer; }
    .mobile-menu-toggle span { display: block; width: 25px; height: 3px; margin: 5px 0; background: white; transition: 0.3s; }

    section { padding: 100px 20px; }
    .hero { min-height: 100vh; display: flex; align-items: center; justify-content: center; text-align: center; }
    .section-header { text-align: center; margin-bottom: 50px; }

    .btn { display: inline-block; padding: 14px 32px; border-radius: 30px; text-decoration: none; border: none; cursor: pointer; }
    .btn-primary { background: #2c9c93; color: white; }
    .btn-secondary { border: 2px solid #f5a623; color: #f5a623; }

    .experience-number { font-size: 3rem; font-weight: 700; color: #f5a623; }

    .products-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(250px, 1fr)); gap: 30px; max-width: 1200px; margin: 0 auto; }
    .product-card { background: #16211f; border-radius: 16px; overflow: hidden; }
    .product-image { position: relative; height: 200px; background: #1f2c2a; }
    .product-image img { width: 100%; height: 100%; object-fit: cover; }
    .quick-view-btn { position: absolute; bottom: 15px; left: 50%; transform: translateX(-50%); }
    .product-info { padding: 20px; }

    .testimonial-card { display: none; max-width: 700px; margin: 0 auto; text-align: center; opacity: 0; transition: opacity 0.5s ease; }
    .testimonial-card.active { display: block; opacity: 1; }
    .testimonial-controls { display: flex; justify-content: center; gap: 20px; margin-top: 30px; }

    .form-group { margin-bottom: 20px; transition: transform 0.2s ease; }
    .form-group:focus-within { transform: scale(1.02); }
    .form-group input, .form-group textarea, .form-group select { width: 100%; padding: 14px; border-radius: 8px; border: 1px solid #2a3a38; background: #16211f; color: white; }

    .scroll-top {
        position: fixed; bottom: 30px; right: 30px; width: 50px; height: 50px; border-radius: 50%;
        display: flex; align-items: center; justify-content: center;
        background: #2c9c93; color: white; opacity: 0; visibility: hidden; transition: all 0.3s ease;
    }
    .scroll-top.visible { opacity: 1; visibility: visible; }

    .popup-overlay {
        position: fixed; inset: 0; z-index: 2000; background: rgba(0, 0, 0, 0.7);
        display: flex; align-items: center; justify-content: center;
        opacity: 0; visibility: hidden; transition: all 0.3s ease;
    }
    .popup-overlay.active { opacity: 1; visibility: visible; }
    .popup-card { position: relative; width: min(420px, 90vw); padding: 40px; border-radius: 16px; background: #16211f; }
    .popup-close { position: absolute; top: 15px; right: 15px; background: none; border: none; color: white; font-size: 1.5rem; cursor: pointer; }

    .notification-close { background: none; border: none; color: white; font-size: 1.5rem; cursor: pointer; padding: 0; margin-left: auto; opacity: 0.8; }
    .notification-close:hover { opacity: 1; }
    @keyframes slideInRight { from { transform: translateX(500px); opacity: 0; } to { transform: translateX(0); opacity: 1; } }
    @keyframes slideOutRight { from { transform: translateX(0); opacity: 1; } to { transform: translateX(500px); opacity: 0; } }

    [data-aos] { opacity: 0; transform: translateY(30px); transition: opacity 0.6s ease, transform 0.6s ease; }
    [data-aos].aos-animate { opacity: 1; transform: none; }

    .footer { padding: 60px 20px 20px; background: #0a100f; }
    .footer-bottom { text-align: center; color: #b0b0b0; }

    @media (max-width: 768px) {
        .mobile-menu-toggle { display: block; }
        .nav-menu {
            position: fixed; top: 70px; left: -100%; width: 100%; flex-direction: column;
            padding: 30px 0; text-align: center; background: rgba(15, 23, 22, 0.98); transition: left 0.3s ease;
        }
        .nav-menu.active { left: 0; }
    }
"#;
