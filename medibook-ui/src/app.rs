//! Page Assembly
//!
//! Builds every subsystem from the page config and detected capabilities
//! and registers them with the orchestrator. The background goes first so
//! its render context exists before anything animates.

use std::rc::Rc;

use leptos::*;
use medibook::config::Config;
use medibook::lifecycle::{Orchestrator, StartupReport};
use medibook::nav::NavConfig;
use medibook::notify::{NotificationTimings, Notifier};
use medibook::reveal::RevealConfig;
use medibook::scheduler::Scheduler;

use crate::api::{api_base, GlooTransport};
use crate::capability;
use crate::components::ToastStack;
use crate::scheduler::TimeoutScheduler;
use crate::state::PageState;
use crate::subsystems::*;

/// Random seed from the browser's `Math.random`
fn random_seed() -> u64 {
    (js_sys::Math::random() * u64::MAX as f64) as u64
}

pub struct Page {
    orchestrator: Orchestrator,
}

impl Page {
    pub fn new(config: &Config) -> Self {
        let caps = capability::detect();
        let state = PageState::new();
        let scheduler: Rc<dyn Scheduler> = Rc::new(TimeoutScheduler);
        let ui = &config.ui;

        let notifier = Notifier::new(
            Rc::clone(&scheduler),
            NotificationTimings {
                visible_for: ui.toast_visible(),
                ..NotificationTimings::default()
            },
        )
        .on_change(move |items| state.toasts.set(items.to_vec()));
        mount_to_body(move || view! { <ToastStack state=state /> });

        let reveal = RevealConfig {
            threshold: ui.reveal_threshold,
            bottom_margin_px: ui.reveal_bottom_margin_px,
        };
        let nav = NavConfig {
            scrolled_threshold_px: ui.nav_scrolled_threshold_px,
            active_offset_px: ui.nav_active_offset_px,
        };

        let mut orchestrator = Orchestrator::new();
        orchestrator
            .register(Background::new(caps, ui.particle_count, random_seed()))
            .register(ScrollReveal::new(caps, reveal))
            .register(FadeIn::new(caps, reveal))
            .register(Navigation::new(nav))
            .register(SmoothScroll::default())
            .register(Parallax::default())
            .register(Counters::new(Rc::clone(&scheduler)))
            .register(Chat::new(
                state,
                Rc::clone(&scheduler),
                ui.chat_reply_delay(),
                random_seed(),
            ))
            .register(FormValidation::new(notifier))
            .register(Appointments::new(
                state,
                GlooTransport::new(api_base(&config.api.base_url)),
            ));

        Self { orchestrator }
    }

    pub fn start(&mut self) -> StartupReport {
        self.orchestrator.start()
    }

    pub fn shutdown(&mut self) {
        self.orchestrator.shutdown();
    }
}
