use chrono::{Datelike, Local};
use yew::prelude::*;

use super::anchor::AnchorLink;
use super::nav::NAV_ITEMS;

pub fn copyright_line(year: i32) -> String {
    format!("© {} HB Traders. All rights reserved.", year)
}

#[function_component(Footer)]
pub fn footer() -> Html {
    let year = Local::now().year();

    html! {
        <footer class="footer">
            <div class="footer-content">
                <div class="footer-brand">
                    <h3>{"HB Traders"}</h3>
                    <p>{"Premium tarpaulin solutions for farms, fleets and warehouses."}</p>
                </div>
                <ul class="footer-links">
                    { for NAV_ITEMS.iter().map(|(id, label)| html! {
                        <li><AnchorLink href={format!("#{}", id)}>{ *label }</AnchorLink></li>
                    }) }
                </ul>
            </div>
            <div class="footer-bottom">
                <p>{ copyright_line(year) }</p>
            </div>
        </footer>
    }
}
