//! UI Components
//!
//! Leptos views mounted into containers of the server-rendered page.

pub mod appointments;
pub mod toast;
pub mod transcript;

pub use appointments::AppointmentList;
pub use toast::ToastStack;
pub use transcript::ChatTranscript;
