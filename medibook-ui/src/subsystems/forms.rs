//! Form Validation
//!
//! Required-field checks for every `.premium-form`, reported through
//! toasts.

use std::cell::RefCell;
use std::rc::Rc;

use medibook::form::{FieldId, FormValidator, Validation};
use medibook::lifecycle::{Subscriptions, Subsystem, SubsystemError};
use medibook::notify::Notifier;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, Event, HtmlFormElement};

use crate::dom;

const REQUIRED_FIELDS: &str = "input[required], select[required], textarea[required]";
const ERROR_BORDER: &str = "var(--error-color)";

fn field_value(el: &Element) -> String {
    js_sys::Reflect::get(el, &JsValue::from_str("value"))
        .ok()
        .and_then(|v| v.as_string())
        .unwrap_or_default()
}

fn field_name(el: &Element) -> String {
    el.get_attribute("name").unwrap_or_else(|| el.id())
}

pub struct FormValidation {
    notifier: Notifier,
    subs: Subscriptions,
}

impl FormValidation {
    pub fn new(notifier: Notifier) -> Self {
        Self {
            notifier,
            subs: Subscriptions::new(),
        }
    }

    fn attach(&mut self, form: HtmlFormElement) -> Result<(), SubsystemError> {
        let mut validator = FormValidator::new();
        let fields: Vec<(FieldId, Element)> = dom::query_all_in(&form, REQUIRED_FIELDS)
            .into_iter()
            .map(|el| (validator.add_field(field_name(&el), true), el))
            .collect();
        let validator = Rc::new(RefCell::new(validator));
        let fields = Rc::new(fields);

        for (id, el) in fields.iter() {
            let id = *id;
            let validator = Rc::clone(&validator);
            let field = el.clone();
            dom::listen(el, "input", &mut self.subs, move |_: Event| {
                if validator.borrow_mut().edit(id, field_value(&field)) {
                    dom::set_style(&field, "border-color", "");
                }
            })?;
        }

        let notifier = self.notifier.clone();
        let target = form.clone();
        dom::listen(&form, "submit", &mut self.subs, move |e: Event| {
            e.prevent_default();

            let result = {
                let mut validator = validator.borrow_mut();
                for (id, el) in fields.iter() {
                    validator.set_value(*id, field_value(el));
                }
                validator.submit()
            };

            match &result {
                Validation::Valid => target.reset(),
                Validation::Invalid { failed } => {
                    for (id, el) in fields.iter() {
                        if failed.contains(id) {
                            dom::set_style(el, "border-color", ERROR_BORDER);
                        }
                    }
                }
            }

            let (kind, message) = result.notification();
            notifier.show(kind, message);
        })?;
        Ok(())
    }
}

impl Subsystem for FormValidation {
    fn name(&self) -> &'static str {
        "forms"
    }

    fn init(&mut self) -> Result<(), SubsystemError> {
        let forms: Vec<HtmlFormElement> = dom::query_all(".premium-form")
            .into_iter()
            .filter_map(|el| el.dyn_into::<HtmlFormElement>().ok())
            .collect();
        for form in forms {
            self.attach(form)?;
        }
        Ok(())
    }

    fn dispose(&mut self) {
        self.subs.clear();
    }
}
