//! Flattened inventory of configuration contents.
//!
//! Each parsed document is flattened into a [`FlatRecord`] and folded into its entity's record
//! by the [`Inventory`]. Values that land on the same key are concatenated, never overwritten.

mod flatten;
mod merge;
mod record;

pub use flatten::{COMPOSITE_TAGS, flatten, is_composite};
pub use merge::Inventory;
pub use record::{COLLISION_SEPARATOR, FlatRecord};
