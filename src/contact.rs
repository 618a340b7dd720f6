use dioxus::prelude::*;
use serde::Serialize;

use crate::csrf::CsrfGuard;

const CONTACT_ENDPOINT: &str = "/contact";

#[derive(Clone, Debug, Default, PartialEq)]
struct ContactForm {
    name: String,
    email: String,
    message: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
struct ContactPayload {
    name: String,
    email: String,
    message: String,
}

#[component]
pub fn ContactPage() -> Element {
    let guard = use_context::<CsrfGuard>();
    let mut form = use_signal(ContactForm::default);
    let loading = use_signal(|| false);
    let success = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);

    if success() {
        return rsx! {
            section { class: "contact-form",
                p { class: "form-success", "Vielen Dank! Ihre Nachricht wurde versendet." }
            }
        };
    }

    rsx! {
        section {
            form {
                class: "contact-form",
                onsubmit: move |event| {
                    event.prevent_default();
                    if loading() {
                        return;
                    }
                    if let Some(message) = validate(&form()) {
                        error.set(Some(message.to_string()));
                        return;
                    }
                    let payload = build_payload(form());
                    let guard = guard.clone();
                    let mut loading = loading;
                    let mut success = success;
                    let mut error = error;
                    let mut form = form;
                    spawn(async move {
                        loading.set(true);
                        error.set(None);
                        match guard.post_json(CONTACT_ENDPOINT, &payload).await {
                            Ok(()) => {
                                success.set(true);
                                form.set(ContactForm::default());
                            }
                            Err(message) => {
                                error.set(Some(message));
                            }
                        }
                        loading.set(false);
                    });
                },
                div {
                    label { r#for: "contact-name", "Ihr Name" }
                    input {
                        id: "contact-name",
                        r#type: "text",
                        value: "{form().name}",
                        disabled: loading(),
                        oninput: move |event| {
                            let mut next = form();
                            next.name = event.value();
                            form.set(next);
                        },
                    }
                }
                div {
                    label { r#for: "contact-email", "E-Mail-Adresse" }
                    input {
                        id: "contact-email",
                        r#type: "email",
                        value: "{form().email}",
                        disabled: loading(),
                        oninput: move |event| {
                            let mut next = form();
                            next.email = event.value();
                            form.set(next);
                        },
                    }
                }
                div {
                    label { r#for: "contact-message", "Nachricht" }
                    textarea {
                        id: "contact-message",
                        rows: "6",
                        value: "{form().message}",
                        disabled: loading(),
                        oninput: move |event| {
                            let mut next = form();
                            next.message = event.value();
                            form.set(next);
                        },
                    }
                }
                if let Some(message) = error() {
                    p { class: "form-error", "{message}" }
                }
                button {
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Wird gesendet..." } else { "Absenden" }
                }
            }
        }
    }
}

fn validate(form: &ContactForm) -> Option<&'static str> {
    if form.name.trim().is_empty() {
        return Some("Bitte geben Sie Ihren Namen ein.");
    }
    let email = form.email.trim();
    if email.is_empty() {
        return Some("Bitte geben Sie Ihre E-Mail-Adresse ein.");
    }
    if !plausible_email(email) {
        return Some("Bitte geben Sie eine korrekte E-Mail-Adresse ein.");
    }
    if form.message.trim().is_empty() {
        return Some("Bitte geben Sie Ihre Nachricht ein.");
    }
    None
}

fn plausible_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    }
}

fn build_payload(form: ContactForm) -> ContactPayload {
    ContactPayload {
        name: form.name.trim().to_string(),
        email: form.email.trim().to_string(),
        message: form.message.trim().to_string(),
    }
}
