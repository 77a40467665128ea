//! Page Configuration
//!
//! Read from an optional inline block:
//!
//! ```html
//! <script id="medibook-config" type="application/toml">
//! [api]
//! base_url = "https://clinic.example.org"
//! </script>
//! ```

use medibook::config::Config;

pub const CONFIG_ELEMENT_ID: &str = "medibook-config";

pub fn load() -> Config {
    let Some(text) = crate::dom::find_id::<web_sys::Element>(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    else {
        return Config::default();
    };

    match Config::from_toml_str(&text) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "ignoring page config");
            Config::default()
        }
    }
}
