//! Appointments and Reminders
//!
//! Loads `#appointmentsList` on start and wires `#booking-form` and
//! `#reminder-form` to the backend. Outcomes are reported with `alert`.

use std::rc::Rc;

use leptos::*;
use medibook::api::{messages, AppointmentsClient, BookingRequest, Feedback, ReminderRequest};
use medibook::lifecycle::{Subscriptions, Subsystem, SubsystemError};
use wasm_bindgen::JsValue;
use web_sys::{Event, HtmlElement, HtmlFormElement};

use crate::api::GlooTransport;
use crate::components::AppointmentList;
use crate::dom;
use crate::state::PageState;

pub const LIST_ID: &str = "appointmentsList";
pub const BOOKING_FORM_ID: &str = "booking-form";
pub const REMINDER_FORM_ID: &str = "reminder-form";

type Client = Rc<AppointmentsClient<GlooTransport>>;

fn named_value(form: &HtmlFormElement, name: &str) -> String {
    dom::query_all_in(form, &format!("[name=\"{}\"]", name))
        .first()
        .and_then(|el| js_sys::Reflect::get(el, &JsValue::from_str("value")).ok())
        .and_then(|v| v.as_string())
        .unwrap_or_default()
}

fn apply(state: PageState, feedback: Vec<Feedback>) {
    for item in feedback {
        match item {
            Feedback::Alert(message) => dom::alert(message),
            Feedback::Appointments(list) => state.appointments.set(list),
        }
    }
}

pub struct Appointments {
    state: PageState,
    client: Client,
    subs: Subscriptions,
}

impl Appointments {
    pub fn new(state: PageState, transport: GlooTransport) -> Self {
        Self {
            state,
            client: Rc::new(AppointmentsClient::new(transport)),
            subs: Subscriptions::new(),
        }
    }

    fn wire_booking(&mut self, form: HtmlFormElement) -> Result<(), SubsystemError> {
        let client = Rc::clone(&self.client);
        let state = self.state;
        let source = form.clone();
        dom::listen(&form, "submit", &mut self.subs, move |e: Event| {
            e.prevent_default();
            let request = BookingRequest::new(
                &named_value(&source, "doctor_id"),
                &named_value(&source, "patient_id"),
                &named_value(&source, "date"),
                &named_value(&source, "time"),
            );
            match request {
                Ok(request) => {
                    let client = Rc::clone(&client);
                    spawn_local(async move {
                        apply(state, client.book_and_refresh(&request).await);
                    });
                }
                Err(e) => {
                    tracing::warn!(error = %e, "booking form rejected");
                    dom::alert(messages::BOOKING_FAILED);
                }
            }
        })
    }

    fn wire_reminder(&mut self, form: HtmlFormElement) -> Result<(), SubsystemError> {
        let client = Rc::clone(&self.client);
        let state = self.state;
        let source = form.clone();
        dom::listen(&form, "submit", &mut self.subs, move |e: Event| {
            e.prevent_default();
            let request = ReminderRequest::new(
                &named_value(&source, "medicine_name"),
                &named_value(&source, "dosage"),
                &named_value(&source, "time"),
            );
            match request {
                Ok(request) => {
                    let client = Rc::clone(&client);
                    spawn_local(async move {
                        apply(state, vec![client.remind(&request).await]);
                    });
                }
                Err(e) => {
                    tracing::warn!(error = %e, "reminder form rejected");
                    dom::alert(messages::REMINDER_FAILED);
                }
            }
        })
    }
}

impl Subsystem for Appointments {
    fn name(&self) -> &'static str {
        "appointments"
    }

    fn init(&mut self) -> Result<(), SubsystemError> {
        let list = dom::find_id::<HtmlElement>(LIST_ID);
        let booking = dom::find_id::<HtmlFormElement>(BOOKING_FORM_ID);
        let reminder = dom::find_id::<HtmlFormElement>(REMINDER_FORM_ID);
        if list.is_none() && booking.is_none() && reminder.is_none() {
            return Err(SubsystemError::MissingElement(format!(
                "#{}, #{} or #{}",
                LIST_ID, BOOKING_FORM_ID, REMINDER_FORM_ID
            )));
        }

        if let Some(list) = list {
            list.set_inner_html("");
            let state = self.state;
            mount_to(list, move || view! { <AppointmentList state=state /> });

            let client = Rc::clone(&self.client);
            spawn_local(async move {
                apply(state, vec![client.load().await]);
            });
        }
        if let Some(form) = booking {
            self.wire_booking(form)?;
        }
        if let Some(form) = reminder {
            self.wire_reminder(form)?;
        }
        Ok(())
    }

    fn dispose(&mut self) {
        self.subs.clear();
    }
}
