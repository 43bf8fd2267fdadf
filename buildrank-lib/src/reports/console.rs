use crate::Result;
use crate::metrics::Metric;
use crate::scoring::ScoredEntity;
use core::fmt::Write;
use owo_colors::OwoColorize;

/// How many of an entity's largest counts are listed under it.
const TOP_METRICS: usize = 3;

/// Print the ranking, one block per entity, with the entity's largest counts.
pub fn generate<W: Write>(scored: &[ScoredEntity], use_colors: bool, writer: &mut W) -> Result<()> {
    if scored.is_empty() {
        writeln!(writer, "No entities found")?;
        return Ok(());
    }

    let name_width = scored.iter().map(|s| s.entity().len()).max().unwrap_or(0);

    for entity in scored {
        let rank = format!("#{}", entity.rank());
        let score = format!("{:.4}", entity.score());

        if use_colors {
            writeln!(
                writer,
                "{:<4}  {:<name_width$}  {}",
                rank.bold(),
                entity.entity().cyan().bold(),
                score.green()
            )?;
        } else {
            writeln!(writer, "{rank:<4}  {:<name_width$}  {score}", entity.entity())?;
        }

        let top = top_metrics(entity);
        let label_width = top.iter().map(|(m, _)| m.label().len()).max().unwrap_or(0);
        for (metric, value) in top {
            writeln!(writer, "        {:<label_width$} : {value}", metric.label())?;
        }
    }

    Ok(())
}

/// Largest non-zero counts, ties in column order.
fn top_metrics(entity: &ScoredEntity) -> Vec<(Metric, u64)> {
    let mut metrics: Vec<_> = entity.metrics().iter().filter(|(_, v)| *v > 0).collect();
    metrics.sort_by(|a, b| b.1.cmp(&a.1));
    metrics.truncate(TOP_METRICS);
    metrics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::MetricSet;
    use crate::scoring::{WeightVector, score};
    use strum::IntoEnumIterator;

    fn scored() -> Vec<ScoredEntity> {
        let weights = WeightVector::new(Metric::iter().map(|m| (m, 1.0))).unwrap();
        let busy: MetricSet = [
            (Metric::LinesOfCode, 120),
            (Metric::BuildSteps, 4),
            (Metric::BuildStepParams, 9),
            (Metric::PipelineSecrets, 1),
        ]
        .into_iter()
        .collect();

        score([("Payments".to_string(), busy), ("Idle".to_string(), MetricSet::new())], &weights, 1e-6)
    }

    #[test]
    fn test_console_ranking_no_colors() {
        let mut output = String::new();
        generate(&scored(), false, &mut output).unwrap();

        insta::assert_snapshot!(output, @r"
        #1    Payments  1.0000
                Total Lines Of Code     : 120
                Total Build Step Params : 9
                Total Build Steps       : 4
        #2    Idle      0.7500
        ");
    }

    #[test]
    fn test_console_ranking_with_colors_contains_escapes() {
        let mut output = String::new();
        generate(&scored(), true, &mut output).unwrap();
        assert!(output.contains("\u{1b}["));
        assert!(output.contains("Payments"));
    }

    #[test]
    fn test_console_empty() {
        let mut output = String::new();
        generate(&[], false, &mut output).unwrap();
        assert_eq!(output, "No entities found\n");
    }
}
