//! Per-step coverage of build configurations.

mod completion_weights;
mod step_coverage;

pub use completion_weights::CompletionWeights;
pub use step_coverage::{CoverageRow, step_coverage};
