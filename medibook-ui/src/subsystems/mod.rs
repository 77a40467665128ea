//! Page Subsystems
//!
//! One [`Subsystem`](medibook::lifecycle::Subsystem) per independent piece
//! of page behavior. Each attaches to the server-rendered DOM in `init` and
//! detaches in `dispose`.

pub mod appointments;
pub mod background;
pub mod chat;
pub mod counters;
pub mod forms;
pub mod navigation;
pub mod reveal;

pub use appointments::Appointments;
pub use background::Background;
pub use chat::Chat;
pub use counters::Counters;
pub use forms::FormValidation;
pub use navigation::{Navigation, Parallax, SmoothScroll};
pub use reveal::{FadeIn, ScrollReveal};

#[cfg(test)]
mod tests {
    use std::rc::Rc;
    use std::time::Duration;

    use medibook::lifecycle::{Orchestrator, SubsystemError};
    use medibook::nav::NavConfig;
    use medibook::notify::{NotificationTimings, Notifier};
    use medibook::reveal::{Capabilities, RevealConfig};
    use medibook::scheduler::Scheduler;
    use wasm_bindgen_test::*;
    use web_sys::{Element, HtmlElement};

    use super::*;
    use crate::dom;
    use crate::scheduler::TimeoutScheduler;
    use crate::state::PageState;

    wasm_bindgen_test_configure!(run_in_browser);

    const FIXTURE: &str = r##"
        <canvas id="three-canvas"></canvas>
        <nav id="main-nav"><a class="nav-link" href="#home">Home</a></nav>
        <section id="home"><div class="feature-card">Care</div></section>
        <button id="chatbot-toggle"></button>
        <div id="chatbot-panel">
            <div class="chatbot-messages"></div>
            <input id="chat-input" />
            <button id="send-message"></button>
        </div>
        <form class="premium-form"><input name="email" required /></form>
    "##;

    fn mount_fixture() -> Element {
        let document = dom::document().unwrap();
        let root = document.create_element("div").unwrap();
        root.set_inner_html(FIXTURE);
        document.body().unwrap().append_child(&root).unwrap();
        root
    }

    fn page(caps: Capabilities) -> Orchestrator {
        let state = PageState::new();
        let scheduler: Rc<dyn Scheduler> = Rc::new(TimeoutScheduler);
        let notifier = Notifier::new(Rc::clone(&scheduler), NotificationTimings::default());

        let mut orchestrator = Orchestrator::new();
        orchestrator
            .register(Background::new(caps, 10, 1))
            .register(ScrollReveal::new(caps, RevealConfig::default()))
            .register(Navigation::new(NavConfig::default()))
            .register(Chat::new(state, scheduler, Duration::from_millis(1000), 1))
            .register(FormValidation::new(notifier));
        orchestrator
    }

    fn inline_style(el: Option<HtmlElement>, property: &str) -> String {
        el
            .and_then(|el| el.style().get_property_value(property).ok())
            .unwrap_or_default()
    }

    #[wasm_bindgen_test]
    fn test_no_render_surface_hides_canvas_and_keeps_the_rest() {
        let root = mount_fixture();
        let mut orchestrator = page(Capabilities {
            render_surface: false,
            timeline: false,
            intersection_observer: true,
            ..Default::default()
        });

        let report = orchestrator.start();

        assert!(report
            .disabled
            .iter()
            .any(|(name, e)| *name == "background" && matches!(e, SubsystemError::Unsupported(_))));
        assert_eq!(inline_style(dom::find_id("three-canvas"), "display"), "none");
        for name in ["scroll-reveal", "navigation", "chat", "forms"] {
            assert!(report.is_started(name), "{name} should start");
        }
        assert_eq!(inline_style(dom::query(".feature-card"), "opacity"), "0");

        orchestrator.shutdown();
        root.remove();
    }

    #[wasm_bindgen_test]
    fn test_missing_timeline_library_falls_back_to_observer() {
        // Capabilities claim GSAP, but the test page never loads it
        let root = mount_fixture();
        let mut orchestrator = page(Capabilities {
            timeline: true,
            scroll_trigger: true,
            intersection_observer: true,
            ..Default::default()
        });

        let report = orchestrator.start();

        assert!(report.is_started("scroll-reveal"));
        assert_eq!(inline_style(dom::query(".feature-card"), "opacity"), "0");

        orchestrator.shutdown();
        root.remove();
    }
}
