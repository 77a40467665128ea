//! GSAP / AOS Interop
//!
//! The animation libraries are plain globals loaded by the page. Tween
//! options are built as typed structs in the core crate and handed over as
//! parsed JSON.

use js_sys::{Array, Function, Reflect};
use medibook::reveal::{ScrollRevealOptions, TimelinePlan, Tween, TweenMode};
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};

use crate::capability::global;
use crate::dom;

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let text = serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
    js_sys::JSON::parse(&text)
}

fn call(target: &JsValue, method: &str, args: &Array) -> Result<JsValue, JsValue> {
    let func: Function = Reflect::get(target, &JsValue::from_str(method))?.dyn_into()?;
    Reflect::apply(&func, target, args)
}

fn method_name(mode: TweenMode) -> &'static str {
    match mode {
        TweenMode::From => "from",
        TweenMode::To => "to",
    }
}

pub struct Gsap {
    gsap: JsValue,
}

impl Gsap {
    /// GSAP with its ScrollTrigger plugin registered
    pub fn detect() -> Option<Self> {
        let window = web_sys::window()?;
        let gsap = global(&window, "gsap")?;
        let scroll_trigger = global(&window, "ScrollTrigger")?;
        call(&gsap, "registerPlugin", &Array::of1(&scroll_trigger)).ok()?;
        Some(Self { gsap })
    }

    /// Start the intro timeline and bind the scroll tweens
    pub fn play(&self, plan: &TimelinePlan) -> Result<(), JsValue> {
        let timeline = call(&self.gsap, "timeline", &Array::new())?;
        for tween in &plan.intro {
            let args = Array::of2(&JsValue::from_str(tween.targets), &to_js(&tween.vars)?);
            if let Some(position) = tween.position {
                args.push(&JsValue::from_str(position));
            }
            call(&timeline, method_name(tween.mode), &args)?;
        }

        for tween in &plan.scroll {
            if tween.per_element {
                for el in dom::query_all(tween.targets) {
                    self.tween_element(tween, &el)?;
                }
            } else {
                let args = Array::of2(&JsValue::from_str(tween.targets), &to_js(&tween.vars)?);
                call(&self.gsap, method_name(tween.mode), &args)?;
            }
        }
        Ok(())
    }

    /// Kill every ScrollTrigger instance
    pub fn kill_scroll_triggers(&self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(scroll_trigger) = global(&window, "ScrollTrigger") else {
            return;
        };
        if let Ok(all) = call(&scroll_trigger, "getAll", &Array::new()) {
            for trigger in Array::from(&all).iter() {
                let _ = call(&trigger, "kill", &Array::new());
            }
        }
    }

    fn tween_element(&self, tween: &Tween, el: &web_sys::Element) -> Result<(), JsValue> {
        let vars = to_js(&tween.vars)?;
        let trigger = Reflect::get(&vars, &JsValue::from_str("scrollTrigger"))?;
        if trigger.is_object() {
            Reflect::set(&trigger, &JsValue::from_str("trigger"), el)?;
        }
        call(&self.gsap, method_name(tween.mode), &Array::of2(el, &vars))?;
        Ok(())
    }
}

/// Initialize AOS when the page loaded it
pub fn init_scroll_reveal(options: &ScrollRevealOptions) -> Result<bool, JsValue> {
    let Some(aos) = web_sys::window().and_then(|w| global(&w, "AOS")) else {
        return Ok(false);
    };
    call(&aos, "init", &Array::of1(&to_js(options)?))?;
    Ok(true)
}
