#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{JsCast, JsValue};

/// Reports an archive lookup to the page's analytics sink:
/// `ga('send', 'event', 'Archive', 'get', <label>)`. The sink is an external
/// collaborator; when the global function is missing the event is dropped.
pub fn report_archive_get(label: &str) {
    send_event("Archive", "get", label);
}

#[cfg(target_arch = "wasm32")]
fn send_event(category: &str, action: &str, label: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Ok(ga) = js_sys::Reflect::get(&window, &JsValue::from_str("ga")) else {
        return;
    };
    let Some(ga) = ga.dyn_ref::<js_sys::Function>() else {
        return;
    };
    let args = js_sys::Array::of5(
        &JsValue::from_str("send"),
        &JsValue::from_str("event"),
        &JsValue::from_str(category),
        &JsValue::from_str(action),
        &JsValue::from_str(label),
    );
    if ga.apply(&JsValue::NULL, &args).is_err() {
        tracing::debug!("analytics: event dispatch failed");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn send_event(category: &str, action: &str, label: &str) {
    tracing::debug!("analytics: {category}/{action} {label}");
}
