#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for buildrank
//!
//! This library consolidates all functionality for the buildrank tool, which inventories
//! TeamCity-style build configurations and ranks them by structural complexity.
//!
//! # Module Organization
//!
//! - [`commands`]: Command-line interface and orchestration
//! - [`corpus`]: Discovery and parsing of configuration files
//! - [`inventory`]: Flattening documents into records and merging them per entity
//! - [`metrics`]: Structural counts per configuration and per project
//! - [`scoring`]: Weighted sum model scoring and ranking
//! - [`coverage`]: Per-step coverage rows
//! - [`reports`]: Tables and report writers

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

#[cfg(any(debug_assertions, test))]
pub mod commands;
#[cfg(not(any(debug_assertions, test)))]
mod commands;

#[cfg(any(debug_assertions, test))]
pub mod corpus;
#[cfg(not(any(debug_assertions, test)))]
mod corpus;

#[cfg(any(debug_assertions, test))]
pub mod coverage;
#[cfg(not(any(debug_assertions, test)))]
mod coverage;

#[cfg(any(debug_assertions, test))]
pub mod inventory;
#[cfg(not(any(debug_assertions, test)))]
mod inventory;

#[cfg(any(debug_assertions, test))]
pub mod metrics;
#[cfg(not(any(debug_assertions, test)))]
mod metrics;

#[cfg(any(debug_assertions, test))]
pub mod reports;
#[cfg(not(any(debug_assertions, test)))]
mod reports;

#[cfg(any(debug_assertions, test))]
pub mod scoring;
#[cfg(not(any(debug_assertions, test)))]
mod scoring;

pub use crate::commands::{Host, run};
