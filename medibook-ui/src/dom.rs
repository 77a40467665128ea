//! DOM Helpers
//!
//! Lookups, listeners, observers and animation frames shared by the
//! subsystems. Anything that must be undone at teardown is registered in
//! the caller's [`Subscriptions`].

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use medibook::lifecycle::{Subscriptions, SubsystemError};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, NodeList, Window,
};

/// Convert a thrown JS value into a subsystem error
pub fn js_error(value: JsValue) -> SubsystemError {
    SubsystemError::Failed(
        value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value)),
    )
}

pub fn window() -> Result<Window, SubsystemError> {
    web_sys::window().ok_or_else(|| SubsystemError::Unsupported("window".into()))
}

pub fn document() -> Result<Document, SubsystemError> {
    window()?
        .document()
        .ok_or_else(|| SubsystemError::Unsupported("document".into()))
}

/// Element by id, failing with `MissingElement`
pub fn require_id<T: JsCast>(id: &str) -> Result<T, SubsystemError> {
    find_id(id).ok_or_else(|| SubsystemError::MissingElement(format!("#{}", id)))
}

pub fn find_id<T: JsCast>(id: &str) -> Option<T> {
    web_sys::window()?
        .document()?
        .get_element_by_id(id)?
        .dyn_into::<T>()
        .ok()
}

pub fn query<T: JsCast>(selector: &str) -> Option<T> {
    document()
        .ok()?
        .query_selector(selector)
        .ok()??
        .dyn_into::<T>()
        .ok()
}

pub fn query_all(selector: &str) -> Vec<Element> {
    document()
        .ok()
        .and_then(|doc| doc.query_selector_all(selector).ok())
        .map(elements)
        .unwrap_or_default()
}

pub fn query_all_in(root: &Element, selector: &str) -> Vec<Element> {
    root.query_selector_all(selector)
        .map(elements)
        .unwrap_or_default()
}

fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn set_style(el: &Element, property: &str, value: &str) {
    if let Some(el) = el.dyn_ref::<HtmlElement>() {
        let _ = el.style().set_property(property, value);
    }
}

pub fn set_class(el: &Element, class: &str, on: bool) {
    let _ = el.class_list().toggle_with_force(class, on);
}

pub fn scroll_y() -> f64 {
    web_sys::window()
        .and_then(|w| w.scroll_y().ok())
        .unwrap_or(0.0)
}

/// Add an event listener that is removed when `subs` is drained
pub fn listen<E, F>(
    target: &EventTarget,
    event: &'static str,
    subs: &mut Subscriptions,
    handler: F,
) -> Result<(), SubsystemError>
where
    E: JsCast + 'static,
    F: FnMut(E) + 'static,
{
    let mut handler = handler;
    let closure = Closure::wrap(Box::new(move |ev: Event| {
        handler(ev.unchecked_into::<E>());
    }) as Box<dyn FnMut(Event)>);

    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(js_error)?;

    let target = target.clone();
    subs.add(move || {
        let _ = target.remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    });
    Ok(())
}

/// Run `f` on the next animation frame
pub fn request_frame(f: impl FnOnce(f64) + 'static) -> Result<i32, SubsystemError> {
    let callback = Closure::once_into_js(f);
    window()?
        .request_animation_frame(callback.unchecked_ref())
        .map_err(js_error)
}

type FrameCallback = Closure<dyn FnMut(f64)>;

/// A self-rescheduling animation frame callback
pub struct FrameLoop {
    running: Rc<Cell<bool>>,
    handle: Rc<Cell<i32>>,
    callback: Rc<RefCell<Option<FrameCallback>>>,
}

impl FrameLoop {
    pub fn start(on_frame: impl FnMut(f64) + 'static) -> Result<Self, SubsystemError> {
        let window = window()?;
        let running = Rc::new(Cell::new(true));
        let handle = Rc::new(Cell::new(0));
        let callback: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));

        let mut on_frame = on_frame;
        let running_cb = Rc::clone(&running);
        let handle_cb = Rc::clone(&handle);
        let callback_cb = Rc::clone(&callback);
        let window_cb = window.clone();
        let frame = Closure::wrap(Box::new(move |ts: f64| {
            if !running_cb.get() {
                return;
            }
            on_frame(ts);
            if let Some(next) = callback_cb.borrow().as_ref() {
                if let Ok(id) = window_cb.request_animation_frame(next.as_ref().unchecked_ref()) {
                    handle_cb.set(id);
                }
            }
        }) as Box<dyn FnMut(f64)>);

        let id = window
            .request_animation_frame(frame.as_ref().unchecked_ref())
            .map_err(js_error)?;
        handle.set(id);
        *callback.borrow_mut() = Some(frame);

        Ok(Self {
            running,
            handle,
            callback,
        })
    }

    pub fn stop(&self) {
        if !self.running.replace(false) {
            return;
        }
        if let Some(window) = web_sys::window() {
            let _ = window.cancel_animation_frame(self.handle.get());
        }
        // Breaks the closure's reference cycle through `callback`
        self.callback.borrow_mut().take();
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

/// IntersectionObserver that reports each element once, the first time it
/// becomes visible
pub struct RevealObserver {
    observer: IntersectionObserver,
    _callback: ObserverCallback,
}

impl RevealObserver {
    pub fn new(
        threshold: f64,
        root_margin: &str,
        on_visible: impl FnMut(&Element) + 'static,
    ) -> Result<Self, SubsystemError> {
        let mut on_visible = on_visible;
        let callback = Closure::wrap(Box::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    if entry.is_intersecting() {
                        let target = entry.target();
                        on_visible(&target);
                        observer.unobserve(&target);
                    }
                }
            },
        ) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(threshold));
        init.set_root_margin(root_margin);

        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
                .map_err(js_error)?;

        Ok(Self {
            observer,
            _callback: callback,
        })
    }

    pub fn observe(&self, el: &Element) {
        self.observer.observe(el);
    }

    pub fn disconnect(&self) {
        self.observer.disconnect();
    }
}

impl Drop for RevealObserver {
    fn drop(&mut self) {
        self.disconnect();
    }
}

/// Show a blocking browser alert
pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}
