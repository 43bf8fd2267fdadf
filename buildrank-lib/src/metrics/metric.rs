use strum::{Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

/// The fixed vocabulary of structural counts.
///
/// Variant order is the column order used by every report. The snake-case form of each variant is
/// its configuration key (see [`Metric::key`]); [`Metric::label`] is its column label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, EnumCount, EnumString, IntoStaticStr, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Metric {
    LinesOfCode,
    BuildSteps,
    BuildStepParams,
    BuildExtensions,
    BuildExtensionParams,
    Dependencies,
    ArtifactDependencies,
    BuildTriggers,
    ProjectExtensions,
    ProjectExtensionParams,
    ProjectParameters,
    PipelineSecrets,
    ProjectSecrets,
    Integrations,
    UniquePlugins,
    PluginDataSubfolders,
}

impl Metric {
    /// Configuration key, such as `build_steps`.
    #[must_use]
    pub fn key(self) -> &'static str {
        self.into()
    }

    /// Column label, such as `Total Build Steps`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::LinesOfCode => "Total Lines Of Code",
            Self::BuildSteps => "Total Build Steps",
            Self::BuildStepParams => "Total Build Step Params",
            Self::BuildExtensions => "Total Build Extensions",
            Self::BuildExtensionParams => "Total Build Extension Params",
            Self::Dependencies => "Total Dependencies",
            Self::ArtifactDependencies => "Total Artifact Dependencies",
            Self::BuildTriggers => "Total Build Triggers",
            Self::ProjectExtensions => "Total Project Extensions",
            Self::ProjectExtensionParams => "Total Project Extension Params",
            Self::ProjectParameters => "Total Project Parameters",
            Self::PipelineSecrets => "Pipeline Secrets",
            Self::ProjectSecrets => "Project Secrets",
            Self::Integrations => "Number of Integrations",
            Self::UniquePlugins => "Unique Plugins",
            Self::PluginDataSubfolders => "Plugin Data Subfolders",
        }
    }

    /// What the metric counts.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::LinesOfCode => "Raw line count of every configuration file and the project descriptor",
            Self::BuildSteps => "Run steps in either dialect",
            Self::BuildStepParams => "Parameters declared by run steps",
            Self::BuildExtensions => "Build extensions and build features",
            Self::BuildExtensionParams => "Parameters declared by build extensions and features",
            Self::Dependencies => "Snapshot dependencies on other configurations",
            Self::ArtifactDependencies => "Artifact dependencies on other configurations",
            Self::BuildTriggers => "Build triggers",
            Self::ProjectExtensions => "Project-level extensions and features",
            Self::ProjectExtensionParams => "Parameters declared by project-level extensions",
            Self::ProjectParameters => "Parameters declared by the project",
            Self::PipelineSecrets => "Secure or obfuscated parameters in configurations",
            Self::ProjectSecrets => "Secure or obfuscated parameters in the project descriptor",
            Self::Integrations => "Distinct parameter values referring to an external platform",
            Self::UniquePlugins => "Distinct plugins referenced by parameter names",
            Self::PluginDataSubfolders => "Subdirectories of the plugin data directory",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_keys_round_trip() {
        for metric in Metric::iter() {
            assert_eq!(Metric::from_str(metric.key()).unwrap(), metric);
        }
    }

    #[test]
    fn test_key_format() {
        assert_eq!(Metric::LinesOfCode.key(), "lines_of_code");
        assert_eq!(Metric::PluginDataSubfolders.to_string(), "plugin_data_subfolders");
    }

    #[test]
    fn test_labels_are_unique() {
        let mut labels: Vec<_> = Metric::iter().map(Metric::label).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), Metric::COUNT);
    }
}
