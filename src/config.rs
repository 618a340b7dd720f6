use dioxus::prelude::*;
use serde::Deserialize;

/// Archive bounds injected at deploy time. Dates are ISO `yyyy-mm-dd`;
/// `last_poem_timestamp` carries the latest entry's full timestamp for the
/// initial heading.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RuntimeConfig {
    pub first_poem_date: String,
    pub last_poem_date: String,
    pub last_poem_timestamp: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            first_poem_date: "2014-03-01".to_string(),
            last_poem_date: "2021-04-05".to_string(),
            last_poem_timestamp: "2021-04-05T00:00:01".to_string(),
        }
    }
}

pub fn use_runtime_config() -> Resource<Result<RuntimeConfig, String>> {
    use_resource(|| async move { fetch_runtime_config().await })
}

#[cfg(target_arch = "wasm32")]
async fn fetch_runtime_config() -> Result<RuntimeConfig, String> {
    match fetch_config_from("/config.json").await {
        Ok(config) => Ok(config),
        Err(_) => fetch_config_from("/assets/config.json").await,
    }
}

#[cfg(target_arch = "wasm32")]
async fn fetch_config_from(path: &str) -> Result<RuntimeConfig, String> {
    let response = gloo_net::http::Request::get(path)
        .send()
        .await
        .map_err(|err| format!("config fetch failed: {err}"))?;
    if !response.ok() {
        return Err(format!("config fetch failed: status {}", response.status()));
    }
    response
        .json::<RuntimeConfig>()
        .await
        .map_err(|err| format!("config decode failed: {err}"))
}

#[cfg(not(target_arch = "wasm32"))]
async fn fetch_runtime_config() -> Result<RuntimeConfig, String> {
    let defaults = RuntimeConfig::default();
    let first_poem_date =
        std::env::var("FIRST_POEM_DATE").unwrap_or(defaults.first_poem_date);
    let last_poem_date = std::env::var("LAST_POEM_DATE").unwrap_or(defaults.last_poem_date);
    let last_poem_timestamp =
        std::env::var("LAST_POEM_TIMESTAMP").unwrap_or(defaults.last_poem_timestamp);
    Ok(RuntimeConfig {
        first_poem_date,
        last_poem_date,
        last_poem_timestamp,
    })
}
