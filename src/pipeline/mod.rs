//! The client-side data pipeline: filter, sort and the memoized projection
//! from the raw result set to the displayed sequence.

pub mod filter;
pub mod projector;
pub mod sort;

pub use filter::{matches, Filter};
pub use projector::{project, project_indices, ResultProjector};
pub use sort::{compare, toggle, SortDirection, SortSpec};
