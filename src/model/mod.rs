//! Profile records and the field/visibility matrix.

pub mod fields;
pub mod record;

pub use fields::{Field, FieldVisibility};
pub use record::{Gender, ProfileRecord};
