//! Capability Detection
//!
//! Checks the page once at startup for the optional libraries and browser
//! features the subsystems can use.

use medibook::reveal::Capabilities;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlCanvasElement, Window};

pub fn detect() -> Capabilities {
    let Some(window) = web_sys::window() else {
        return Capabilities::default();
    };

    let caps = Capabilities {
        render_surface: can_render(&window),
        timeline: has_global(&window, "gsap"),
        scroll_trigger: has_global(&window, "ScrollTrigger"),
        scroll_reveal: has_global(&window, "AOS"),
        intersection_observer: has_global(&window, "IntersectionObserver"),
    };
    tracing::debug!(?caps, "capabilities detected");
    caps
}

/// Look up a global by name, treating `null`/`undefined` as absent
pub fn global(window: &Window, name: &str) -> Option<JsValue> {
    js_sys::Reflect::get(window, &JsValue::from_str(name))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

fn has_global(window: &Window, name: &str) -> bool {
    global(window, name).is_some()
}

fn can_render(window: &Window) -> bool {
    window
        .document()
        .and_then(|doc| doc.create_element("canvas").ok())
        .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        .and_then(|canvas| canvas.get_context("2d").ok().flatten())
        .is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use medibook::reveal::RevealStrategy;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_plain_browser_uses_observer() {
        // No animation libraries are loaded in the test page
        let caps = detect();
        assert!(caps.render_surface);
        assert!(!caps.timeline);
        assert_eq!(RevealStrategy::select(&caps), RevealStrategy::Observer);
    }
}
