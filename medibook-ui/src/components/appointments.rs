//! Appointment List Component

use leptos::*;

use crate::state::PageState;

/// `<li>date - time</li>` per booked appointment
#[component]
pub fn AppointmentList(state: PageState) -> impl IntoView {
    view! {
        {move || {
            state
                .appointments
                .get()
                .into_iter()
                .map(|appt| view! { <li>{appt.display_line()}</li> })
                .collect_view()
        }}
    }
}
