use super::WeightVector;
use crate::metrics::{Metric, MetricSet};
use strum::{EnumCount, IntoEnumIterator};

const LOG_TARGET: &str = "   scoring";

/// An entity's metrics with its weighted score and rank.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredEntity {
    entity: String,
    metrics: MetricSet,
    score: f64,
    rank: usize,
}

impl ScoredEntity {
    #[must_use]
    pub fn entity(&self) -> &str {
        &self.entity
    }

    #[must_use]
    pub const fn metrics(&self) -> &MetricSet {
        &self.metrics
    }

    #[must_use]
    pub const fn score(&self) -> f64 {
        self.score
    }

    /// 1-based rank, 1 being the highest score.
    #[must_use]
    pub const fn rank(&self) -> usize {
        self.rank
    }
}

/// Score and rank every entity with the Weighted Sum Model.
///
/// Each metric column is normalized as `(value + epsilon) / (column_max + epsilon)` across all
/// entities, then weighted and summed. The result is in rank order; entities with equal scores keep
/// their input order.
#[must_use]
pub fn score<I>(entities: I, weights: &WeightVector, epsilon: f64) -> Vec<ScoredEntity>
where
    I: IntoIterator<Item = (String, MetricSet)>,
{
    let entities: Vec<_> = entities.into_iter().collect();

    let mut column_max = [0_u64; Metric::COUNT];
    for (_, metrics) in &entities {
        for (metric, value) in metrics.iter() {
            let max = &mut column_max[metric as usize];
            *max = (*max).max(value);
        }
    }

    #[expect(clippy::cast_precision_loss, reason = "counts are far below 2^52")]
    let mut scored: Vec<_> = entities
        .into_iter()
        .map(|(entity, metrics)| {
            let score = Metric::iter()
                .map(|m| {
                    let normalized = (metrics.get(m) as f64 + epsilon) / (column_max[m as usize] as f64 + epsilon);
                    normalized * weights.get(m)
                })
                .sum();

            ScoredEntity {
                entity,
                metrics,
                score,
                rank: 0,
            }
        })
        .collect();

    scored.sort_by(|a, b| b.score.total_cmp(&a.score));

    for (index, entity) in scored.iter_mut().enumerate() {
        entity.rank = index + 1;
    }

    if let Some(top) = scored.first() {
        log::info!(target: LOG_TARGET, "Scored {} entities, highest is '{}' at {:.4}", scored.len(), top.entity, top.score);
    }

    scored
}
