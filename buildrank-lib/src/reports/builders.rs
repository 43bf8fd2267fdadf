//! Rendering analysis results into tables.

use super::{Cell, Table};
use crate::Result;
use crate::coverage::CoverageRow;
use crate::inventory::Inventory;
use crate::metrics::{EntityMetrics, Metric};
use crate::scoring::ScoredEntity;
use clap::ValueEnum;
use strum::{Display, EnumIter, IntoEnumIterator};

/// The tables produced by an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, EnumIter, Display)]
pub enum ReportKind {
    /// Flattened contents of every entity
    Inventory,

    /// Metrics, weighted score, and rank of every entity
    Complexity,

    /// Every run step with its container image and completion weight
    Coverage,
}

/// Entity column, then the sorted union of every flattened key.
///
/// # Errors
///
/// Returns an error only if the table invariants are broken, which indicates a bug.
pub fn inventory_table(inventory: &Inventory) -> Result<Table> {
    let records: Vec<_> = inventory.iter().map(|(_, record)| record).collect();
    let mut table = Table::derived(&records);
    let entities = inventory.iter().map(|(name, _)| Cell::from(name)).collect();
    table.insert_column(0, "Entity", entities)?;
    Ok(table)
}

/// One row per entity in rank order.
///
/// # Errors
///
/// Returns an error only if the table invariants are broken, which indicates a bug.
pub fn complexity_table(scored: &[ScoredEntity], entities: &[EntityMetrics]) -> Result<Table> {
    let header = ["Entity", "Pipelines"]
        .into_iter()
        .chain(Metric::iter().map(Metric::label))
        .chain(["WSM Score", "Rank"]);

    let mut table = Table::new(header);

    for entry in scored {
        let pipelines = entities
            .iter()
            .find(|e| e.entity == entry.entity())
            .and_then(EntityMetrics::pipelines);

        let mut row = Vec::with_capacity(table.header().len());
        row.push(Cell::from(entry.entity()));
        row.push(pipelines.map_or(Cell::Missing, Cell::Text));
        row.extend(entry.metrics().iter().map(|(_, v)| Cell::Integer(v)));
        row.push(Cell::Number(entry.score()));
        row.push(Cell::Integer(entry.rank() as u64));

        table.push_row(row)?;
    }

    Ok(table)
}

/// One row per run step.
///
/// # Errors
///
/// Returns an error only if the table invariants are broken, which indicates a bug.
pub fn coverage_table(rows: &[CoverageRow]) -> Result<Table> {
    let mut table = Table::new(["Entity", "Pipeline", "Step", "Step ID", "Dialect", "Docker Image", "Completion Weight"]);

    for row in rows {
        table.push_row(vec![
            Cell::from(row.entity.as_str()),
            Cell::from(row.pipeline.as_str()),
            Cell::from(row.step_type.as_deref()),
            Cell::from(row.step_id.as_deref()),
            Cell::Text(row.dialect.to_string()),
            Cell::from(row.docker_image.as_deref()),
            Cell::Number(row.completion_weight),
        ])?;
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Dialect;
    use crate::inventory::FlatRecord;
    use crate::metrics::ConfigurationMetrics;
    use crate::scoring::{WeightVector, score};
    use camino::Utf8PathBuf;

    #[test]
    fn test_inventory_table_has_entity_column() {
        let mut inventory = Inventory::new();
        inventory.merge("Alpha", [("id", "Build"), ("uuid", "u1")].into_iter().collect::<FlatRecord>());
        inventory.merge("Beta", [("id", "Deploy"), ("name1", "Ship")].into_iter().collect::<FlatRecord>());

        let table = inventory_table(&inventory).unwrap();

        assert_eq!(table.header(), ["Entity", "id", "name1", "uuid"]);
        let rendered: Vec<Vec<String>> = table.rows().iter().map(|r| r.iter().map(ToString::to_string).collect()).collect();
        assert_eq!(rendered, [["Alpha", "Build", "N/A", "u1"], ["Beta", "Deploy", "Ship", "N/A"]]);
    }

    #[test]
    fn test_complexity_table_layout() {
        let mut busy = EntityMetrics::new("Busy");
        busy.configurations.push(ConfigurationMetrics {
            pipeline: "Build".into(),
            path: Utf8PathBuf::from("Busy/buildTypes/Build.xml"),
            dialect: Dialect::A,
            metrics: [(Metric::BuildSteps, 3)].into_iter().collect(),
        });
        let idle = EntityMetrics::new("Idle");

        let weights = WeightVector::new(Metric::iter().map(|m| (m, 1.0))).unwrap();
        let scored = score([("Idle".to_string(), idle.total()), ("Busy".to_string(), busy.total())], &weights, 1e-6);
        let table = complexity_table(&scored, &[busy, idle]).unwrap();

        assert_eq!(table.header().len(), 2 + 16 + 2);
        assert_eq!(table.header()[2], "Total Lines Of Code");
        assert_eq!(table.header().last().map(String::as_str), Some("Rank"));

        let first = &table.rows()[0];
        assert_eq!(first[0], Cell::from("Busy"));
        assert_eq!(first[1], Cell::from("Build"));
        assert_eq!(first[19], Cell::Integer(1));

        let second = &table.rows()[1];
        assert_eq!(second[1], Cell::Missing);
        assert_eq!(second[2 + Metric::BuildSteps as usize], Cell::Integer(0));
    }

    #[test]
    fn test_coverage_table_marks_missing_values() {
        let rows = [CoverageRow {
            entity: "P".into(),
            pipeline: "Build".into(),
            step_type: Some("simpleRunner".into()),
            step_id: None,
            dialect: Dialect::B,
            docker_image: None,
            completion_weight: 0.0,
        }];

        let table = coverage_table(&rows).unwrap();
        let rendered: Vec<String> = table.rows()[0].iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["P", "Build", "simpleRunner", "N/A", "B", "N/A", "0"]);
    }
}
