//! Backend access from the browser

pub mod client;

pub use client::{api_base, GlooTransport};
