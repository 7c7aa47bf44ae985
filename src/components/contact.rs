use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use super::notification::{use_notifier, NoticeKind};

pub fn contact_confirmation(name: &str) -> String {
    let name = name.trim();
    let greeting = if name.is_empty() {
        String::new()
    } else {
        format!(" {}", name)
    };
    format!(
        "Thank you{}! Your message has been sent successfully. We will get back to you soon.",
        greeting
    )
}

#[derive(Clone, Default, PartialEq)]
struct ContactFields {
    name: String,
    email: String,
    phone: String,
    message: String,
}

#[function_component(ContactForm)]
pub fn contact_form() -> Html {
    let notifier = use_notifier();
    let fields = use_state(ContactFields::default);

    let on_submit = {
        let fields = fields.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            notifier.notify(contact_confirmation(&fields.name), NoticeKind::Success);
            fields.set(ContactFields::default());
        })
    };

    let input = |update: fn(&mut ContactFields, String)| {
        let fields = fields.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*fields).clone();
            update(&mut next, input.value());
            fields.set(next);
        })
    };

    let on_message = {
        let fields = fields.clone();
        Callback::from(move |e: InputEvent| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            fields.set(ContactFields { message: area.value(), ..(*fields).clone() });
        })
    };

    html! {
        <form id="contactForm" class="contact-form" onsubmit={on_submit}>
            <div class="form-row">
                <div class="form-group">
                    <input type="text" name="name" placeholder="Your Name" required=true
                        value={fields.name.clone()} oninput={input(|f, v| f.name = v)} />
                </div>
                <div class="form-group">
                    <input type="email" name="email" placeholder="Email Address" required=true
                        value={fields.email.clone()} oninput={input(|f, v| f.email = v)} />
                </div>
            </div>
            <div class="form-group">
                <input type="tel" name="phone" placeholder="Phone Number"
                    value={fields.phone.clone()} oninput={input(|f, v| f.phone = v)} />
            </div>
            <div class="form-group">
                <textarea name="message" rows="5" placeholder="Tell us about your requirement" required=true
                    value={fields.message.clone()} oninput={on_message}></textarea>
            </div>
            <button type="submit" class="btn btn-primary">{"Send Message"}</button>
        </form>
    }
}
