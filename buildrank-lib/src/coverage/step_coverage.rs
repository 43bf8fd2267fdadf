use super::CompletionWeights;
use crate::corpus::{ConfigDocument, Dialect, step_elements};
use crate::metrics::Detection;

/// One run step of one configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageRow {
    pub entity: String,
    pub pipeline: String,
    pub step_type: Option<String>,
    pub step_id: Option<String>,
    pub dialect: Dialect,
    pub docker_image: Option<String>,
    pub completion_weight: f64,
}

/// List every step of a configuration with its container image and completion weight.
#[must_use]
pub fn step_coverage(
    entity: &str,
    pipeline: &str,
    doc: &ConfigDocument,
    detection: &Detection,
    weights: &CompletionWeights,
) -> Vec<CoverageRow> {
    step_elements(doc.root())
        .map(|step| {
            let step_type = step.kind();
            CoverageRow {
                entity: entity.to_string(),
                pipeline: pipeline.to_string(),
                step_type: step_type.map(str::to_string),
                step_id: step.label().map(str::to_string),
                dialect: step.dialect(),
                docker_image: step
                    .parameter(&detection.docker_image_param)
                    .filter(|v| !v.is_empty())
                    .map(str::to_string),
                completion_weight: step_type.map_or(0.0, |t| weights.weight(t)),
            }
        })
        .collect()
}
