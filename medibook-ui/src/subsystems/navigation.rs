//! Navigation & Scroll Tracking
//!
//! Scrolled look of `#main-nav`, the active `.nav-link`, the mobile menu,
//! in-page smooth scrolling and `.parallax` offsets.

use std::cell::RefCell;
use std::rc::Rc;

use medibook::lifecycle::{Subscriptions, Subsystem, SubsystemError};
use medibook::nav::{
    anchor_target, parallax_offset, parallax_speed, FrameThrottle, MenuToggle, NavConfig,
    NavTracker, SectionBox,
};
use wasm_bindgen::JsCast;
use web_sys::{
    Element, Event, HtmlElement, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};

use crate::dom;

pub const NAV_ID: &str = "main-nav";

fn scroll_to_anchor(href: &str) -> bool {
    let Some(target) = anchor_target(href).and_then(dom::find_id::<Element>) else {
        return false;
    };
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Start);
    target.scroll_into_view_with_scroll_into_view_options(&options);
    true
}

fn section_boxes() -> Vec<SectionBox> {
    dom::query_all("section[id]")
        .into_iter()
        .filter_map(|el| {
            let top = el.dyn_ref::<HtmlElement>()?.offset_top();
            Some(SectionBox::new(el.id(), f64::from(top)))
        })
        .collect()
}

fn mark_active(links: &[Element], active: Option<&str>) {
    for link in links {
        let href = link.get_attribute("href");
        let is_active = matches!((href.as_deref().and_then(anchor_target), active), (Some(a), Some(b)) if a == b);
        dom::set_class(link, "active", is_active);
    }
}

pub struct Navigation {
    config: NavConfig,
    tracker: Rc<RefCell<NavTracker>>,
    subs: Subscriptions,
}

impl Navigation {
    pub fn new(config: NavConfig) -> Self {
        Self {
            config,
            tracker: Rc::new(RefCell::new(NavTracker::new(config))),
            subs: Subscriptions::new(),
        }
    }
}

impl Subsystem for Navigation {
    fn name(&self) -> &'static str {
        "navigation"
    }

    fn init(&mut self) -> Result<(), SubsystemError> {
        let nav: Element = dom::require_id(NAV_ID)?;
        let window = dom::window()?;
        let links = Rc::new(dom::query_all(".nav-link"));
        let throttle = Rc::new(RefCell::new(FrameThrottle::new()));

        {
            let tracker = Rc::clone(&self.tracker);
            let links = Rc::clone(&links);
            dom::listen(&window, "scroll", &mut self.subs, move |_: Event| {
                if let Some(scrolled) = tracker.borrow_mut().on_scroll(dom::scroll_y()) {
                    dom::set_class(&nav, "scrolled", scrolled);
                }

                if !throttle.borrow_mut().request() {
                    return;
                }
                let tracker = Rc::clone(&tracker);
                let links = Rc::clone(&links);
                let throttle_done = Rc::clone(&throttle);
                let requested = dom::request_frame(move |_| {
                    throttle_done.borrow_mut().complete();
                    let changed = tracker
                        .borrow_mut()
                        .update_active(dom::scroll_y(), &section_boxes());
                    if let Some(active) = changed {
                        mark_active(&links, active.as_deref());
                    }
                });
                if requested.is_err() {
                    throttle.borrow_mut().complete();
                }
            })?;
        }

        for link in links.iter() {
            let tracker = Rc::clone(&self.tracker);
            let all = Rc::clone(&links);
            let this = link.clone();
            dom::listen(link, "click", &mut self.subs, move |e: Event| {
                e.prevent_default();
                let Some(href) = this.get_attribute("href") else {
                    return;
                };
                if scroll_to_anchor(&href) {
                    if let Some(id) = anchor_target(&href) {
                        tracker.borrow_mut().set_active(id);
                    }
                    mark_active(&all, anchor_target(&href));
                }
            })?;
        }

        if let (Some(toggle), Some(menu)) = (
            dom::query::<Element>(".mobile-menu-toggle"),
            dom::query::<Element>(".nav-menu"),
        ) {
            let state = Rc::new(RefCell::new(MenuToggle::default()));
            let button = toggle.clone();
            dom::listen(&toggle, "click", &mut self.subs, move |_: Event| {
                let open = state.borrow_mut().toggle();
                dom::set_class(&menu, "active", open);
                dom::set_class(&button, "active", open);
            })?;
        }

        tracing::debug!(
            links = links.len(),
            threshold = self.config.scrolled_threshold_px,
            "navigation attached"
        );
        Ok(())
    }

    fn dispose(&mut self) {
        self.subs.clear();
    }
}

/// Smooth scrolling for every in-page anchor
#[derive(Default)]
pub struct SmoothScroll {
    subs: Subscriptions,
}

impl Subsystem for SmoothScroll {
    fn name(&self) -> &'static str {
        "smooth-scroll"
    }

    fn init(&mut self) -> Result<(), SubsystemError> {
        for anchor in dom::query_all("a[href^=\"#\"]") {
            let this = anchor.clone();
            dom::listen(&anchor, "click", &mut self.subs, move |e: Event| {
                e.prevent_default();
                if let Some(href) = this.get_attribute("href") {
                    scroll_to_anchor(&href);
                }
            })?;
        }
        Ok(())
    }

    fn dispose(&mut self) {
        self.subs.clear();
    }
}

/// Scroll-linked translation of `.parallax` elements
#[derive(Default)]
pub struct Parallax {
    subs: Subscriptions,
}

impl Subsystem for Parallax {
    fn name(&self) -> &'static str {
        "parallax"
    }

    fn init(&mut self) -> Result<(), SubsystemError> {
        let elements: Vec<(Element, f64)> = dom::query_all(".parallax")
            .into_iter()
            .map(|el| {
                let speed = parallax_speed(el.get_attribute("data-speed").as_deref());
                (el, speed)
            })
            .collect();
        if elements.is_empty() {
            return Ok(());
        }

        let window = dom::window()?;
        dom::listen(&window, "scroll", &mut self.subs, move |_: Event| {
            let y = dom::scroll_y();
            for (el, speed) in &elements {
                let offset = parallax_offset(y, *speed);
                dom::set_style(el, "transform", &format!("translateY({}px)", offset));
            }
        })?;
        Ok(())
    }

    fn dispose(&mut self) {
        self.subs.clear();
    }
}
