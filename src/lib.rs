//! # Persona - Synthetic Profile Browser
//!
//! Persona is a terminal-first client for a synthetic-identity generator
//! service. It requests batches of fake profiles, lets you search, sort and
//! lay them out in three views, copies details to the clipboard and exports
//! the displayed set as a spreadsheet.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`model`] - Profile records and field visibility flags
//! - [`pipeline`] - Filter, sort and the memoized projection
//! - [`render`] - Table, card and compact views plus clipboard text
//! - [`feedback`] - Clipboard writes and the timed acknowledgment toast
//! - [`client`] - Generator/export collaborator and its HTTP implementation
//! - [`session`] - The UI controller that owns all state
//! - [`tui`] - Interactive terminal UI
//! - [`output`] - Plain and JSON printing for non-interactive use
//! - [`utils`] - Config, logging and progress helpers
//!
//! ## Quick Start
//!
//! ```ignore
//! use persona::client::HttpCollaborator;
//! use persona::session::Session;
//! use std::time::Duration;
//!
//! let backend = HttpCollaborator::new("http://localhost:5010", Duration::from_secs(30))?;
//! let mut session = Session::default();
//! session.generate(&backend)?;
//! session.set_query("כהן");
//!
//! for record in session.displayed() {
//!     println!("{:?}", record.full_name);
//! }
//! ```
//!
//! ## Projection
//!
//! The displayed sequence is always `sort(filter(raw, query), sort_spec)`.
//! It is recomputed only when the raw set, the query, the sort or the field
//! visibility changes; every view reads the same cached sequence.

pub mod client;
pub mod error;
pub mod feedback;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod render;
pub mod session;
#[cfg(feature = "interactive")]
pub mod tui;
pub mod utils;

pub use error::{Error, Result};
