//! State Management
//!
//! Reactive state shared between the subsystems and the mounted views.

pub mod global;

pub use global::PageState;
