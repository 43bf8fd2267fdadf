use crate::Result;
use crate::metrics::Metric;
use core::str::FromStr;
use indexmap::IndexMap;
use ohno::{app_err, bail};
use strum::{EnumCount, IntoEnumIterator};

/// Per-metric weights, normalized to sum to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightVector {
    weights: [f64; Metric::COUNT],
}

impl WeightVector {
    /// Build a normalized vector from raw weights.
    ///
    /// # Errors
    ///
    /// Returns an error if a weight is negative or not finite, if a metric has no weight, or if the weights sum to zero.
    pub fn new(raw: impl IntoIterator<Item = (Metric, f64)>) -> Result<Self> {
        let mut weights: [Option<f64>; Metric::COUNT] = [None; Metric::COUNT];

        for (metric, weight) in raw {
            if !weight.is_finite() || weight < 0.0 {
                bail!("weight for '{metric}' must be a finite, non-negative number, got {weight}");
            }
            weights[metric as usize] = Some(weight);
        }

        let mut resolved = [0.0; Metric::COUNT];
        for metric in Metric::iter() {
            resolved[metric as usize] = weights[metric as usize].ok_or_else(|| app_err!("no weight configured for metric '{metric}'"))?;
        }

        let sum: f64 = resolved.iter().sum();
        if sum <= 0.0 {
            bail!("metric weights must sum to a positive number");
        }

        for w in &mut resolved {
            *w /= sum;
        }

        Ok(Self { weights: resolved })
    }

    /// Build a normalized vector from a table keyed by metric name.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown metric names and for every condition rejected by [`WeightVector::new`].
    pub fn from_table(table: &IndexMap<String, f64>) -> Result<Self> {
        let raw = table
            .iter()
            .map(|(key, weight)| {
                Metric::from_str(key)
                    .ok()
                    .map(|metric| (metric, *weight))
                    .ok_or_else(|| app_err!("unknown metric '{key}' in weights"))
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(raw)
    }

    #[must_use]
    pub const fn get(&self, metric: Metric) -> f64 {
        self.weights[metric as usize]
    }
}
