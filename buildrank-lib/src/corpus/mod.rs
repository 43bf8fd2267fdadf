//! Reading the configuration tree from disk.
//!
//! The [`walker`](discover) enumerates entity folders and their files, [`ConfigDocument`] turns one
//! file into an [`Element`] tree, and the dialect helpers let downstream code treat both schema
//! dialects uniformly.

mod dialect;
mod document;
mod element;
mod walker;

pub use dialect::*;
pub use document::ConfigDocument;
pub use element::{Descendants, Element};
pub use walker::{EntityFolder, Layout, count_subdirectories, discover};
