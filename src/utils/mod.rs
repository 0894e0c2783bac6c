//! Shared utilities.
//!
//! - [`app_data`] - config file and app data directory (XDG-compliant)
//! - [`logging`] - tracing subscriber setup
//! - [`progress`] - CLI spinner

pub mod app_data;
pub mod logging;
pub mod progress;

pub use app_data::*;
