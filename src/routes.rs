use dioxus::prelude::*;
use dioxus_router::{Link, Routable, Router};

use crate::archive::ArchivePage;
use crate::config::use_runtime_config;
use crate::contact::ContactPage;
use crate::csrf::CsrfGuard;
use crate::video::BackgroundVideo;

const MAIN_CSS: Asset = asset!("/assets/main.css");

#[component]
pub fn App() -> Element {
    let config_resource = use_runtime_config();
    let config = match config_resource() {
        None => {
            return rsx! {
                document::Title { "Tagespoet" }
                div { class: "page loading",
                    h1 { "Lade Konfiguration..." }
                }
            }
        }
        Some(Ok(config)) => config,
        Some(Err(message)) => {
            return rsx! {
                document::Title { "Tagespoet" }
                div { class: "page loading",
                    h1 { "Konfiguration konnte nicht geladen werden" }
                    p { "{message}" }
                }
            }
        }
    };

    use_context_provider(|| config);
    // token and origin are read once; every request on this page goes
    // through the same guard
    use_context_provider(CsrfGuard::from_page);

    rsx! {
        document::Title { "Tagespoet" }
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        document::Meta { name: "description", content: "Tagespoet — jeden Tag ein Gedicht aus den Nachrichten." }
        Router::<Route> {}
    }
}

#[derive(Clone, PartialEq, Routable)]
pub enum Route {
    #[route("/")]
    Home {},
    #[route("/kontakt")]
    Contact {},
    #[route("/:..route")]
    NotFound { route: Vec<String> },
}

#[component]
fn Home() -> Element {
    rsx! {
        BackgroundVideo {}
        div { class: "page",
            header { class: "site-header",
                h1 { "Tagespoet" }
                p { "Jeden Tag ein Gedicht aus den Nachrichten." }
            }
            ArchivePage {}
            nav {
                Link { to: Route::Contact {}, "Kontakt" }
            }
        }
    }
}

#[component]
fn Contact() -> Element {
    rsx! {
        div { class: "page",
            header { class: "site-header",
                h1 { "Kontakt" }
            }
            ContactPage {}
            nav {
                Link { to: Route::Home {}, "Zurück zum Archiv" }
            }
        }
    }
}

#[component]
fn NotFound(route: Vec<String>) -> Element {
    let path = route.join("/");
    rsx! {
        document::Title { "Nicht gefunden | Tagespoet" }
        div { class: "page",
            h1 { "Seite nicht gefunden" }
            p { "Fehlt: /{path}" }
            Link { to: Route::Home {}, "Zurück zum Archiv" }
        }
    }
}
