//! HTTP API Client
//!
//! `fetch`-based [`Transport`] for the appointment backend.

use async_trait::async_trait;
use gloo_net::http::Request;
use medibook::api::{
    endpoint_url, ApiRequest, ApiResponse, ClientError, ClientResult, Method, Transport,
    FORM_CONTENT_TYPE,
};

/// Local-storage key that overrides the configured backend
pub const API_URL_KEY: &str = "medibook_api_url";

/// Backend base URL: local storage first, then the page config
pub fn api_base(configured: &str) -> String {
    let stored = web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten());

    // Normalize: remove trailing slash
    stored
        .unwrap_or_else(|| configured.to_string())
        .trim_end_matches('/')
        .to_string()
}

/// Sends requests with the browser's `fetch`
pub struct GlooTransport {
    base_url: String,
}

impl GlooTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
        let url = endpoint_url(&self.base_url, request.path);
        let network = |e: gloo_net::Error| ClientError::Network(e.to_string());

        let response = match request.method {
            Method::Get => Request::get(&url).send().await.map_err(network)?,
            Method::Post => Request::post(&url)
                .header("Content-Type", FORM_CONTENT_TYPE)
                .body(request.body.unwrap_or_default())
                .map_err(network)?
                .send()
                .await
                .map_err(network)?,
        };

        let status = response.status();
        let body = response.text().await.map_err(network)?;
        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_api_base_prefers_local_storage() {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .expect("local storage");

        storage.remove_item(API_URL_KEY).unwrap();
        assert_eq!(api_base("https://clinic.example.org/"), "https://clinic.example.org");

        storage.set_item(API_URL_KEY, "http://localhost:5000/").unwrap();
        assert_eq!(api_base(""), "http://localhost:5000");
        storage.remove_item(API_URL_KEY).unwrap();
    }
}
