//! Structural metrics of build configurations
//!
//! This module turns parsed documents into counts over a fixed vocabulary ([`Metric`]).
//! Each configuration file and each project descriptor yields a [`MetricSet`]; the sets of one
//! entity folder are kept together in [`EntityMetrics`], whose total feeds the scorer.
//!
//! # Implementation Model
//!
//! Extractors never assume a dialect. Every count asks for the element names of both dialects
//! and adds the results, so a document mixing both forms is counted completely. The markers that
//! classify parameters (secret prefixes, integration keywords) come from [`Detection`], which is
//! part of the loaded configuration.

mod detection;
mod entity_metrics;
mod extract;
mod metric;
mod metric_set;

pub use detection::Detection;
pub use entity_metrics::{ConfigurationMetrics, EntityMetrics};
pub use extract::{extract_configuration, extract_project};
pub use metric::Metric;
pub use metric_set::MetricSet;
