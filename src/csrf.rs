use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use serde::Serialize;

const CSRF_HEADER: &str = "X-CSRFToken";
#[cfg(target_arch = "wasm32")]
const CSRF_META_SELECTOR: &str = "meta[name=csrf-token]";
const SAFE_METHODS: [&str; 4] = ["GET", "HEAD", "OPTIONS", "TRACE"];

/// Request dispatcher for the page. The CSRF token is read from the host
/// page's meta tag once at construction and attached to every mutating
/// same-origin request sent through the guard; safe methods and cross-origin
/// targets go out untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct CsrfGuard {
    token: Option<String>,
    origin: String,
}

impl CsrfGuard {
    pub fn new(token: Option<String>, origin: String) -> Self {
        Self { token, origin }
    }

    /// Builds the guard from the live page: token from
    /// `<meta name="csrf-token" content="...">`, origin from the location.
    pub fn from_page() -> Self {
        Self::new(read_meta_token(), page_origin())
    }

    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, String> {
        let mut request = Request::get(url);
        if let Some(token) = self.header_value("GET", url) {
            request = request.header(CSRF_HEADER, token);
        }
        let response = request
            .send()
            .await
            .map_err(|err| format!("request failed: {err}"))?;
        if !response.ok() {
            return Err(format!("http {}", response.status()));
        }
        response
            .json::<T>()
            .await
            .map_err(|err| format!("decode failed: {err}"))
    }

    pub async fn post_json<B: Serialize>(&self, url: &str, body: &B) -> Result<(), String> {
        let payload =
            serde_json::to_string(body).map_err(|err| format!("encode failed: {err}"))?;
        let mut request = Request::post(url).header("Content-Type", "application/json");
        if let Some(token) = self.header_value("POST", url) {
            request = request.header(CSRF_HEADER, token);
        }
        let response = request
            .body(payload)
            .map_err(|err| format!("request failed: {err}"))?
            .send()
            .await
            .map_err(|err| format!("request failed: {err}"))?;
        if !response.ok() {
            return Err(format!("http {}", response.status()));
        }
        Ok(())
    }

    fn header_value(&self, method: &str, url: &str) -> Option<&str> {
        if needs_token(method, url, &self.origin) {
            self.token.as_deref()
        } else {
            None
        }
    }
}

/// The token travels only on state-changing requests aimed at this page's
/// own origin.
fn needs_token(method: &str, url: &str, page_origin: &str) -> bool {
    if SAFE_METHODS
        .iter()
        .any(|safe| method.eq_ignore_ascii_case(safe))
    {
        return false;
    }
    same_origin(url, page_origin)
}

fn same_origin(url: &str, page_origin: &str) -> bool {
    if url.starts_with("//") {
        return false;
    }
    if !url.contains("://") {
        return true;
    }
    match url.strip_prefix(page_origin) {
        Some(rest) => rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'),
        None => false,
    }
}

#[cfg(target_arch = "wasm32")]
fn read_meta_token() -> Option<String> {
    let document = web_sys::window()?.document()?;
    let meta = document.query_selector(CSRF_META_SELECTOR).ok()??;
    meta.get_attribute("content")
}

#[cfg(not(target_arch = "wasm32"))]
fn read_meta_token() -> Option<String> {
    None
}

#[cfg(target_arch = "wasm32")]
fn page_origin() -> String {
    web_sys::window()
        .and_then(|window| window.location().origin().ok())
        .unwrap_or_default()
}

#[cfg(not(target_arch = "wasm32"))]
fn page_origin() -> String {
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ORIGIN: &str = "https://tagespoet.de";

    fn guard() -> CsrfGuard {
        CsrfGuard::new(Some("sekrit".to_string()), ORIGIN.to_string())
    }

    #[test]
    fn safe_methods_never_carry_the_token() {
        for method in ["GET", "get", "HEAD", "OPTIONS", "trace"] {
            assert_eq!(needs_token(method, "/_get_archived_poem", ORIGIN), false);
        }
    }

    #[test]
    fn mutating_same_origin_requests_carry_the_token() {
        assert_eq!(needs_token("POST", "/contact", ORIGIN), true);
        assert_eq!(needs_token("PUT", "/contact", ORIGIN), true);
        assert_eq!(needs_token("DELETE", "/contact", ORIGIN), true);
        assert_eq!(
            needs_token("POST", "https://tagespoet.de/contact", ORIGIN),
            true
        );
    }

    #[test]
    fn cross_origin_requests_never_carry_the_token() {
        assert_eq!(needs_token("POST", "https://evil.example/steal", ORIGIN), false);
        assert_eq!(needs_token("GET", "https://evil.example/steal", ORIGIN), false);
        // prefix of the origin's host is not the same origin
        assert_eq!(
            needs_token("POST", "https://tagespoet.de.evil.example/x", ORIGIN),
            false
        );
        // scheme-relative URLs leave the page origin behind
        assert_eq!(needs_token("POST", "//evil.example/steal", ORIGIN), false);
    }

    #[test]
    fn header_value_requires_both_token_and_eligible_request() {
        assert_eq!(guard().header_value("POST", "/contact"), Some("sekrit"));
        assert_eq!(guard().header_value("GET", "/contact"), None);
        let tokenless = CsrfGuard::new(None, ORIGIN.to_string());
        assert_eq!(tokenless.header_value("POST", "/contact"), None);
    }
}
