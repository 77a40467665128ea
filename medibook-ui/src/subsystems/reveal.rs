//! Scroll Reveal and Fade-In
//!
//! [`ScrollReveal`] runs the GSAP plan when the timeline engine is present
//! and otherwise falls back to an IntersectionObserver toggling a CSS
//! animation. [`FadeIn`] handles `.fade-in` elements and AOS.

use medibook::lifecycle::{Subsystem, SubsystemError};
use medibook::reveal::{
    Capabilities, RevealConfig, RevealStrategy, ScrollRevealOptions, TimelinePlan,
    FADE_IN_OFFSET_PX, FADE_IN_TARGETS, FADE_IN_TRANSITION, FALLBACK_KEYFRAMES, HIDDEN_OFFSET_PX,
    REVEAL_ANIMATION, REVEAL_TARGETS,
};

use crate::dom::{self, RevealObserver};
use crate::gsap::{self, Gsap};

const KEYFRAMES_STYLE_ID: &str = "medibook-reveal-keyframes";

pub struct ScrollReveal {
    caps: Capabilities,
    config: RevealConfig,
    gsap: Option<Gsap>,
    observer: Option<RevealObserver>,
}

impl ScrollReveal {
    pub fn new(caps: Capabilities, config: RevealConfig) -> Self {
        Self {
            caps,
            config,
            gsap: None,
            observer: None,
        }
    }

    fn start_timeline(&mut self) -> Result<(), SubsystemError> {
        let gsap = Gsap::detect()
            .ok_or_else(|| SubsystemError::Unsupported("gsap ScrollTrigger".into()))?;
        if let Err(e) = gsap.play(&TimelinePlan::landing()) {
            gsap.kill_scroll_triggers();
            return Err(dom::js_error(e));
        }
        self.gsap = Some(gsap);
        Ok(())
    }

    fn start_fallback(&mut self) -> Result<(), SubsystemError> {
        match RevealStrategy::fallback(&self.caps) {
            RevealStrategy::Observer => {
                tracing::debug!("revealing with observer");
                self.start_observer()
            }
            _ => {
                tracing::debug!("no reveal capability, content left visible");
                Ok(())
            }
        }
    }

    fn start_observer(&mut self) -> Result<(), SubsystemError> {
        inject_keyframes()?;

        let targets = dom::query_all(REVEAL_TARGETS);
        let observer = RevealObserver::new(
            self.config.threshold,
            &self.config.root_margin(),
            |el| dom::set_style(el, "animation", REVEAL_ANIMATION),
        )?;
        for el in &targets {
            dom::set_style(el, "opacity", "0");
            dom::set_style(el, "transform", &format!("translateY({}px)", HIDDEN_OFFSET_PX));
            observer.observe(el);
        }

        tracing::debug!(targets = targets.len(), "reveal observer attached");
        self.observer = Some(observer);
        Ok(())
    }
}

impl Subsystem for ScrollReveal {
    fn name(&self) -> &'static str {
        "scroll-reveal"
    }

    fn init(&mut self) -> Result<(), SubsystemError> {
        match RevealStrategy::select(&self.caps) {
            RevealStrategy::Timeline => match self.start_timeline() {
                Ok(()) => Ok(()),
                Err(e) => {
                    tracing::debug!(error = %e, "timeline failed to start, falling back");
                    self.start_fallback()
                }
            },
            RevealStrategy::Observer | RevealStrategy::Static => self.start_fallback(),
        }
    }

    fn dispose(&mut self) {
        if let Some(gsap) = self.gsap.take() {
            gsap.kill_scroll_triggers();
        }
        if let Some(observer) = self.observer.take() {
            observer.disconnect();
        }
    }
}

fn inject_keyframes() -> Result<(), SubsystemError> {
    let document = dom::document()?;
    if document.get_element_by_id(KEYFRAMES_STYLE_ID).is_some() {
        return Ok(());
    }
    let style = document.create_element("style").map_err(dom::js_error)?;
    style.set_id(KEYFRAMES_STYLE_ID);
    style.set_text_content(Some(FALLBACK_KEYFRAMES));
    let head = document
        .head()
        .ok_or_else(|| SubsystemError::MissingElement("head".into()))?;
    head.append_child(&style).map_err(dom::js_error)?;
    Ok(())
}

/// `.fade-in` elements plus AOS initialization
pub struct FadeIn {
    caps: Capabilities,
    config: RevealConfig,
    observer: Option<RevealObserver>,
}

impl FadeIn {
    pub fn new(caps: Capabilities, config: RevealConfig) -> Self {
        Self {
            caps,
            config,
            observer: None,
        }
    }
}

impl Subsystem for FadeIn {
    fn name(&self) -> &'static str {
        "fade-in"
    }

    fn init(&mut self) -> Result<(), SubsystemError> {
        if self.caps.scroll_reveal {
            gsap::init_scroll_reveal(&ScrollRevealOptions::default()).map_err(dom::js_error)?;
        }

        if !self.caps.intersection_observer {
            return Err(SubsystemError::Unsupported("IntersectionObserver".into()));
        }

        let observer = RevealObserver::new(
            self.config.threshold,
            &self.config.root_margin(),
            |el| {
                dom::set_style(el, "opacity", "1");
                dom::set_style(el, "transform", "translateY(0)");
            },
        )?;
        for el in dom::query_all(FADE_IN_TARGETS) {
            dom::set_style(&el, "opacity", "0");
            dom::set_style(&el, "transform", &format!("translateY({}px)", FADE_IN_OFFSET_PX));
            dom::set_style(&el, "transition", FADE_IN_TRANSITION);
            observer.observe(&el);
        }
        self.observer = Some(observer);
        Ok(())
    }

    fn dispose(&mut self) {
        if let Some(observer) = self.observer.take() {
            observer.disconnect();
        }
    }
}
