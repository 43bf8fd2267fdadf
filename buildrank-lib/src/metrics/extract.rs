//! Metric extraction from parsed documents.
//!
//! Every count checks the element names of both dialects and sums the results.

use super::{Detection, Metric, MetricSet};
use crate::corpus::{ConfigDocument, Element, Parameter, extension_elements, is_parameter, parameters_in, step_elements};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static PLUGIN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^plugin\.([^.]+)").expect("invalid regex"));

/// Metrics for one build configuration file.
#[must_use]
pub fn extract_configuration(doc: &ConfigDocument, detection: &Detection) -> MetricSet {
    let root = doc.root();
    let parameters = all_parameters(root);
    let mut set = MetricSet::new();

    set.set(Metric::LinesOfCode, doc.line_count());

    for step in step_elements(root) {
        set.add(Metric::BuildSteps, 1);
        set.add(Metric::BuildStepParams, step.parameters().len() as u64);
    }

    for extension in extension_elements(root) {
        set.add(Metric::BuildExtensions, 1);
        set.add(Metric::BuildExtensionParams, parameters_in(extension).len() as u64);
    }

    set.set(Metric::Dependencies, count_named(root, &["snapshot-dependency", "depend-on"]));
    set.set(Metric::ArtifactDependencies, count_named(root, &["artifact-dependency", "dependency"]));
    set.set(Metric::BuildTriggers, count_named(root, &["build-trigger", "trigger"]));
    set.set(Metric::PipelineSecrets, count_secrets(&parameters, detection));
    set.set(Metric::Integrations, count_integrations(&parameters, detection));
    set.set(Metric::UniquePlugins, count_unique_plugins(&parameters));

    set
}

/// Metrics for one project descriptor file.
#[must_use]
pub fn extract_project(doc: &ConfigDocument, detection: &Detection) -> MetricSet {
    let root = doc.root();
    let parameters = all_parameters(root);
    let mut set = MetricSet::new();

    set.set(Metric::LinesOfCode, doc.line_count());

    let extensions = root
        .find_children("project-extensions", "extension")
        .chain(root.find_children("projectFeatures", "projectFeature"));
    for extension in extensions {
        set.add(Metric::ProjectExtensions, 1);
        set.add(Metric::ProjectExtensionParams, parameters_in(extension).len() as u64);
    }

    // every parameter block of the descriptor, including those nested in extensions
    let project_parameters = root
        .descendants_named("parameters")
        .flat_map(Element::children)
        .filter(|e| is_parameter(e))
        .count();

    set.set(Metric::ProjectParameters, project_parameters as u64);
    set.set(Metric::ProjectSecrets, count_secrets(&parameters, detection));
    set.set(Metric::Integrations, count_integrations(&parameters, detection));
    set.set(Metric::UniquePlugins, count_unique_plugins(&parameters));

    set
}

fn all_parameters(root: &Element) -> Vec<Parameter<'_>> {
    core::iter::once(root)
        .chain(root.descendants())
        .filter(|e| is_parameter(e))
        .map(Parameter::from_element)
        .collect()
}

fn count_named(root: &Element, names: &[&str]) -> u64 {
    root.descendants().filter(|e| names.contains(&e.name())).count() as u64
}

fn count_secrets(parameters: &[Parameter<'_>], detection: &Detection) -> u64 {
    parameters.iter().filter(|p| detection.is_secret(p.name, p.value)).count() as u64
}

fn count_integrations(parameters: &[Parameter<'_>], detection: &Detection) -> u64 {
    parameters
        .iter()
        .map(|p| p.value.to_lowercase())
        .filter(|v| detection.is_integration(v))
        .collect::<HashSet<_>>()
        .len() as u64
}

fn count_unique_plugins(parameters: &[Parameter<'_>]) -> u64 {
    parameters
        .iter()
        .filter_map(|p| {
            let name = p.name.to_lowercase();
            PLUGIN_REGEX.captures(&name).map(|c| c[1].to_string())
        })
        .collect::<HashSet<_>>()
        .len() as u64
}
