//! Page State
//!
//! Leptos signals the subsystems write and the mounted views read.

use leptos::*;
use medibook::api::Appointment;
use medibook::chat::ChatEntry;
use medibook::notify::Notification;

#[derive(Clone, Copy)]
pub struct PageState {
    /// Chat transcript, oldest first
    pub transcript: RwSignal<Vec<ChatEntry>>,
    /// Toast stack
    pub toasts: RwSignal<Vec<Notification>>,
    /// Appointments last loaded from the backend
    pub appointments: RwSignal<Vec<Appointment>>,
}

impl PageState {
    pub fn new() -> Self {
        Self {
            transcript: create_rw_signal(Vec::new()),
            toasts: create_rw_signal(Vec::new()),
            appointments: create_rw_signal(Vec::new()),
        }
    }

    pub fn push_entry(&self, entry: &ChatEntry) {
        let entry = entry.clone();
        self.transcript.update(|t| t.push(entry));
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new()
    }
}
