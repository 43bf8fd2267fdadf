use super::{Metric, MetricSet};
use crate::corpus::Dialect;
use camino::Utf8PathBuf;

/// Metrics of one configuration file.
#[derive(Debug, Clone)]
pub struct ConfigurationMetrics {
    /// File stem of the configuration
    pub pipeline: String,
    pub path: Utf8PathBuf,
    pub dialect: Dialect,
    pub metrics: MetricSet,
}

/// All metric contributions of one entity folder.
#[derive(Debug, Clone)]
pub struct EntityMetrics {
    pub entity: String,
    pub configurations: Vec<ConfigurationMetrics>,
    pub project: Option<MetricSet>,
    pub plugin_data_subfolders: u64,
}

impl EntityMetrics {
    #[must_use]
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            configurations: Vec::new(),
            project: None,
            plugin_data_subfolders: 0,
        }
    }

    /// Sum of every configuration, the project descriptor, and the plugin data count.
    #[must_use]
    pub fn total(&self) -> MetricSet {
        let mut total = MetricSet::new();

        for configuration in &self.configurations {
            total.accumulate(&configuration.metrics);
        }

        if let Some(project) = &self.project {
            total.accumulate(project);
        }

        total.add(Metric::PluginDataSubfolders, self.plugin_data_subfolders);
        total
    }

    /// Configuration names joined for display, or `None` when the entity has none.
    #[must_use]
    pub fn pipelines(&self) -> Option<String> {
        if self.configurations.is_empty() {
            return None;
        }

        Some(self.configurations.iter().map(|c| c.pipeline.as_str()).collect::<Vec<_>>().join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configuration(pipeline: &str, steps: u64) -> ConfigurationMetrics {
        ConfigurationMetrics {
            pipeline: pipeline.into(),
            path: Utf8PathBuf::from(format!("{pipeline}.xml")),
            dialect: Dialect::A,
            metrics: [(Metric::BuildSteps, steps), (Metric::LinesOfCode, 10)].into_iter().collect(),
        }
    }

    #[test]
    fn test_entity_without_files_is_zero() {
        let entity = EntityMetrics::new("Empty");
        assert_eq!(entity.total(), MetricSet::new());
        assert_eq!(entity.pipelines(), None);
    }

    #[test]
    fn test_total_sums_all_sources() {
        let mut entity = EntityMetrics::new("Payments");
        entity.configurations.push(configuration("Build", 2));
        entity.configurations.push(configuration("Deploy", 1));
        entity.project = Some([(Metric::ProjectParameters, 4), (Metric::LinesOfCode, 5)].into_iter().collect());
        entity.plugin_data_subfolders = 3;

        let total = entity.total();
        assert_eq!(total.get(Metric::BuildSteps), 3);
        assert_eq!(total.get(Metric::LinesOfCode), 25);
        assert_eq!(total.get(Metric::ProjectParameters), 4);
        assert_eq!(total.get(Metric::PluginDataSubfolders), 3);
        assert_eq!(entity.pipelines().as_deref(), Some("Build, Deploy"));
    }
}
