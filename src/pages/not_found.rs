use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;

#[function_component(NotFound)]
pub fn not_found() -> Html {
    html! {
        <div class="not-found" style="min-height: 100vh; display: flex; flex-direction: column; align-items: center; justify-content: center; gap: 20px;">
            <h1>{"404"}</h1>
            <p>{"This page does not exist."}</p>
            <Link<Route> to={Route::Home} classes="btn btn-primary">
                {"Back to HB Traders"}
            </Link<Route>>
        </div>
    }
}
