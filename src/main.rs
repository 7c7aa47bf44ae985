use log::info;
use yew::prelude::*;
use yew_router::prelude::*;

mod config;
mod dom;
mod effects;
mod engine;
mod error;
mod components {
    pub mod anchor;
    pub mod carousel;
    pub mod contact;
    pub mod footer;
    pub mod nav;
    pub mod notification;
    pub mod popup;
    pub mod products;
    pub mod scroll_top;
}
mod pages {
    pub mod landing;
    pub mod not_found;
}

use components::notification::ToastHost;
use config::SiteConfig;
use pages::{landing::Landing, not_found::NotFound};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering Home page");
            html! { <Landing /> }
        }
        Route::NotFound => {
            info!("Rendering NotFound page");
            html! { <NotFound /> }
        }
    }
}

#[function_component]
fn App() -> Html {
    let config = use_memo(|_| SiteConfig::load(), ());

    html! {
        <ContextProvider<SiteConfig> context={(*config).clone()}>
            <ToastHost lifetime_ms={config.toast_lifetime_ms} exit_ms={config.toast_exit_ms}>
                <BrowserRouter>
                    <Switch<Route> render={switch} />
                </BrowserRouter>
            </ToastHost>
        </ContextProvider<SiteConfig>>
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("🎨 HB Traders Website");
    info!("✨ Premium Tarpaulin Solutions");
    yew::Renderer::<App>::new().render();
}
