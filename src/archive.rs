use dioxus::prelude::*;
#[cfg(target_arch = "wasm32")]
use gloo_timers::future::TimeoutFuture;
use serde::Deserialize;

use crate::analytics;
use crate::config::RuntimeConfig;
use crate::csrf::CsrfGuard;
use crate::date::{format_heading, http_date_from_iso};

const ARCHIVE_ENDPOINT: &str = "/_get_archived_poem";
#[cfg(target_arch = "wasm32")]
const FADE_OUT_MS: u32 = 200;

/// Server payload for one archived day. `keywords` and `poem` are markup
/// fragments inserted verbatim; `timestamp` is re-formatted for the heading.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ArchiveRecord {
    pub keywords: String,
    pub poem: String,
    pub timestamp: String,
}

/// Contents of the three archive regions. Handlers mutate this through the
/// setters below so the update semantics stay testable without a DOM.
#[derive(Clone, Debug, PartialEq)]
pub struct ArchiveDisplay {
    pub heading: String,
    pub keywords: String,
    pub poem: String,
}

impl ArchiveDisplay {
    pub fn new(last_poem_timestamp: &str) -> Self {
        Self {
            heading: format_heading(last_poem_timestamp),
            keywords: String::new(),
            poem: String::new(),
        }
    }

    fn set_heading(&mut self, record: &ArchiveRecord) {
        self.heading = format_heading(&record.timestamp);
    }

    fn set_keywords(&mut self, record: &ArchiveRecord) {
        self.keywords = record.keywords.clone();
    }

    fn set_poem(&mut self, record: &ArchiveRecord) {
        self.poem = record.poem.clone();
    }

    fn apply(&mut self, record: &ArchiveRecord) {
        self.set_heading(record);
        self.set_keywords(record);
        self.set_poem(record);
    }
}

#[component]
pub fn ArchivePage() -> Element {
    let config = use_context::<RuntimeConfig>();
    let guard = use_context::<CsrfGuard>();
    let display = use_signal({
        let timestamp = config.last_poem_timestamp.clone();
        move || ArchiveDisplay::new(&timestamp)
    });
    let heading_hidden = use_signal(|| false);
    let keywords_hidden = use_signal(|| false);
    let poem_hidden = use_signal(|| false);
    let seeded = use_signal(|| false);

    // The original rendered the latest poem at template time; here it is
    // fetched once on mount.
    use_effect({
        let guard = guard.clone();
        let last_poem_date = config.last_poem_date.clone();
        move || {
            if seeded() {
                return;
            }
            let mut seeded = seeded;
            seeded.set(true);
            let Some(query_date) = http_date_from_iso(&last_poem_date) else {
                return;
            };
            let guard = guard.clone();
            let mut display = display;
            spawn(async move {
                match fetch_archived_poem(&guard, &query_date).await {
                    Ok(record) => display.with_mut(|current| current.apply(&record)),
                    Err(message) => tracing::debug!("archive: initial load failed: {message}"),
                }
            });
        }
    });

    let min_date = config.first_poem_date.clone();
    let max_date = config.last_poem_date.clone();
    let picker_guard = guard.clone();

    rsx! {
        section { class: "archive",
            div { class: "archive-picker",
                label { r#for: "archive-date-input", "Archiv: " }
                input {
                    id: "archive-date-input",
                    r#type: "date",
                    min: "{min_date}",
                    max: "{max_date}",
                    onchange: move |event| {
                        let Some(query_date) = http_date_from_iso(&event.value()) else {
                            return;
                        };
                        analytics::report_archive_get(&query_date);
                        tracing::debug!("archive: fetching {query_date}");
                        let guard = picker_guard.clone();
                        spawn(async move {
                            match fetch_archived_poem(&guard, &query_date).await {
                                Ok(record) => swap_regions(
                                    record,
                                    display,
                                    heading_hidden,
                                    keywords_hidden,
                                    poem_hidden,
                                ),
                                // a failed lookup leaves the previous poem on screen
                                Err(message) => tracing::debug!("archive: fetch failed: {message}"),
                            }
                        });
                    },
                }
            }
            h2 {
                id: "archive_date",
                class: if heading_hidden() { "fade-region is-hidden" } else { "fade-region" },
                "{display().heading}"
            }
            p {
                id: "archive_keywords",
                class: if keywords_hidden() { "fade-region is-hidden" } else { "fade-region" },
                dangerous_inner_html: "{display().keywords}",
            }
            div {
                id: "archive_poem",
                class: if poem_hidden() { "fade-region is-hidden" } else { "fade-region" },
                dangerous_inner_html: "{display().poem}",
            }
        }
    }
}

async fn fetch_archived_poem(guard: &CsrfGuard, query_date: &str) -> Result<ArchiveRecord, String> {
    guard
        .get_json::<ArchiveRecord>(&build_archive_url(query_date))
        .await
}

fn build_archive_url(query_date: &str) -> String {
    format!("{ARCHIVE_ENDPOINT}?date={}", urlencoding::encode(query_date))
}

/// Fades each region out, swaps its content, and fades it back in. The three
/// regions run independently, and overlapping selections are not sequenced:
/// whichever response lands last wins the display.
fn swap_regions(
    record: ArchiveRecord,
    display: Signal<ArchiveDisplay>,
    heading_hidden: Signal<bool>,
    keywords_hidden: Signal<bool>,
    poem_hidden: Signal<bool>,
) {
    let heading_record = record.clone();
    let mut heading_display = display;
    spawn(async move {
        fade_swap(heading_hidden, move || {
            heading_display.with_mut(|current| current.set_heading(&heading_record));
        })
        .await;
    });

    let keywords_record = record.clone();
    let mut keywords_display = display;
    spawn(async move {
        fade_swap(keywords_hidden, move || {
            keywords_display.with_mut(|current| current.set_keywords(&keywords_record));
        })
        .await;
    });

    let mut poem_display = display;
    spawn(async move {
        fade_swap(poem_hidden, move || {
            poem_display.with_mut(|current| current.set_poem(&record));
        })
        .await;
    });
}

async fn fade_swap(hidden: Signal<bool>, apply: impl FnOnce()) {
    let mut hidden = hidden;
    hidden.set(true);
    #[cfg(target_arch = "wasm32")]
    TimeoutFuture::new(FADE_OUT_MS).await;
    apply();
    hidden.set(false);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(keywords: &str, poem: &str, timestamp: &str) -> ArchiveRecord {
        ArchiveRecord {
            keywords: keywords.to_string(),
            poem: poem.to_string(),
            timestamp: timestamp.to_string(),
        }
    }

    #[test]
    fn builds_query_url_with_encoded_date() {
        assert_eq!(
            build_archive_url("Mon, 05 Apr 2021 00:00:00 GMT"),
            "/_get_archived_poem?date=Mon%2C%2005%20Apr%202021%2000%3A00%3A00%20GMT"
        );
    }

    #[test]
    fn decodes_server_payload() {
        let payload = r#"{
            "keywords": "<strong>Ausgangsw&ouml;rter:</strong> Natur, Pflanzen",
            "poem": "<p id=\"poemarchiveline\">Tag, Morgen, Sonne.</p>",
            "timestamp": "2021-04-05T00:00:01",
            "poem_render": 1
        }"#;
        let decoded: ArchiveRecord = serde_json::from_str(payload).unwrap();
        assert_eq!(decoded.timestamp, "2021-04-05T00:00:01");
        assert_eq!(
            decoded.keywords,
            "<strong>Ausgangsw&ouml;rter:</strong> Natur, Pflanzen"
        );
    }

    #[test]
    fn initial_display_formats_configured_timestamp() {
        let display = ArchiveDisplay::new("2021-04-05T00:00:01");
        assert_eq!(display.heading, "5th April 2021");
        assert_eq!(display.keywords, "");
        assert_eq!(display.poem, "");
    }

    #[test]
    fn applying_a_record_updates_all_three_regions() {
        let mut display = ArchiveDisplay::new("2021-04-05T00:00:01");
        display.apply(&record("K", "P", "2021-04-05"));
        assert_eq!(display.keywords, "K");
        assert_eq!(display.poem, "P");
        assert_eq!(display.heading, "5th April 2021");
    }

    #[test]
    fn later_arrival_wins_the_display() {
        // Two selections D1 then D2 can resolve out of order; nothing
        // discards the stale response, so arrival order decides what stays
        // on screen. This documents the behavior, it does not endorse it.
        let d1 = record("K1", "P1", "2021-04-01");
        let d2 = record("K2", "P2", "2021-04-02");
        let mut display = ArchiveDisplay::new("2021-04-05T00:00:01");
        display.apply(&d2); // D2's response arrives first
        display.apply(&d1); // D1's response arrives second
        assert_eq!(display.keywords, "K1");
        assert_eq!(display.poem, "P1");
        assert_eq!(display.heading, "1st April 2021");
    }
}
