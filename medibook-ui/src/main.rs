//! MediBook Landing Page
//!
//! Browser bindings for the server-rendered MediBook landing page, built
//! with Leptos (WASM).
//!
//! # Features
//!
//! - Animated particle background
//! - Scroll reveals (GSAP timeline or IntersectionObserver fallback)
//! - Navigation state, smooth scrolling, parallax and counters
//! - Chat assistant with canned replies
//! - Form validation with toast notifications
//! - Appointment booking and medicine reminders
//!
//! # Architecture
//!
//! Each behavior is a subsystem from the `medibook` core started by one
//! orchestrator. A subsystem whose elements or capabilities are missing is
//! disabled on its own; the rest of the page keeps working.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

mod api;
mod app;
mod capability;
mod components;
mod config;
mod dom;
mod gsap;
mod scheduler;
mod state;
mod subsystems;

fn log_level(level: &str) -> log::Level {
    level.parse().unwrap_or(log::Level::Info)
}

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    let config = config::load();
    let _ = console_log::init_with_level(log_level(&config.logging.level));

    let page = Rc::new(RefCell::new(app::Page::new(&config)));
    let report = page.borrow_mut().start();
    for (name, reason) in &report.disabled {
        tracing::debug!(subsystem = *name, %reason, "running without subsystem");
    }

    // Tear everything down on unload
    let Some(window) = web_sys::window() else {
        return;
    };
    let on_unload = Closure::wrap(Box::new(move || {
        page.borrow_mut().shutdown();
    }) as Box<dyn FnMut()>);
    let _ = window
        .add_event_listener_with_callback("beforeunload", on_unload.as_ref().unchecked_ref());
    on_unload.forget();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(log_level("debug"), log::Level::Debug);
        assert_eq!(log_level("WARN"), log::Level::Warn);
        assert_eq!(log_level("verbose"), log::Level::Info);
    }
}
