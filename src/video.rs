use dioxus::prelude::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

const VIDEO_ID: &str = "bgvid";
const STOPFADE_CLASS: &str = "stopfade";

/// Glyph + German caption for the toggle button.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToggleCaption {
    pub glyph: &'static str,
    pub label: &'static str,
}

impl ToggleCaption {
    /// Caption after a click, given the element's paused state *after* the
    /// class toggle: a paused video is about to play, so the button offers
    /// to stop it, and vice versa.
    fn after_toggle(paused: bool) -> Self {
        if paused {
            Self {
                glyph: "glyphicon glyphicon-pause",
                label: "Anhalten",
            }
        } else {
            Self {
                glyph: "glyphicon glyphicon-play",
                label: "Abspielen",
            }
        }
    }

    fn initial() -> Self {
        // the video autoplays, so the button starts as a stop control
        Self::after_toggle(true)
    }
}

#[component]
pub fn BackgroundVideo() -> Element {
    let mut stopped = use_signal(|| false);
    let mut caption = use_signal(ToggleCaption::initial);

    rsx! {
        video {
            id: VIDEO_ID,
            class: if stopped() { STOPFADE_CLASS } else { "" },
            autoplay: true,
            muted: true,
            playsinline: true,
            // loop stays off so the fade can settle once playback runs out
            onended: move |_| {
                suspend_playback();
                stopped.set(true);
            },
            source { src: "/assets/video/tagespoet.webm", r#type: "video/webm" }
            source { src: "/assets/video/tagespoet.mp4", r#type: "video/mp4" }
        }
        button {
            id: "vidpause",
            r#type: "button",
            class: "video-toggle",
            onclick: move |_| {
                // the class flips on every click, independent of play state
                stopped.set(!stopped());
                if playback_paused() {
                    resume_playback();
                    caption.set(ToggleCaption::after_toggle(true));
                } else {
                    suspend_playback();
                    caption.set(ToggleCaption::after_toggle(false));
                }
            },
            span { class: "{caption().glyph}" }
            " {caption().label}"
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn video_element() -> Option<web_sys::HtmlVideoElement> {
    let document = web_sys::window()?.document()?;
    let element = document.get_element_by_id(VIDEO_ID)?;
    element.dyn_into::<web_sys::HtmlVideoElement>().ok()
}

#[cfg(target_arch = "wasm32")]
fn playback_paused() -> bool {
    video_element()
        .map(|video| video.paused())
        .unwrap_or(true)
}

#[cfg(target_arch = "wasm32")]
fn resume_playback() {
    if let Some(video) = video_element() {
        let _ = video.play();
    }
}

#[cfg(target_arch = "wasm32")]
fn suspend_playback() {
    if let Some(video) = video_element() {
        let _ = video.pause();
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn playback_paused() -> bool {
    true
}

#[cfg(not(target_arch = "wasm32"))]
fn resume_playback() {}

#[cfg(not(target_arch = "wasm32"))]
fn suspend_playback() {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn paused_video_gets_a_stop_caption() {
        let caption = ToggleCaption::after_toggle(true);
        assert_eq!(caption.label, "Anhalten");
        assert_eq!(caption.glyph, "glyphicon glyphicon-pause");
    }

    #[test]
    fn playing_video_gets_a_play_caption() {
        let caption = ToggleCaption::after_toggle(false);
        assert_eq!(caption.label, "Abspielen");
        assert_eq!(caption.glyph, "glyphicon glyphicon-play");
    }

    #[test]
    fn autoplaying_page_starts_with_stop_caption() {
        assert_eq!(ToggleCaption::initial().label, "Anhalten");
    }
}
