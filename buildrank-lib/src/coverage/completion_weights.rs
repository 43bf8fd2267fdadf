use crate::Result;
use indexmap::IndexMap;
use ohno::bail;
use serde::{Deserialize, Serialize};

/// Migration completion weight per step type, looked up case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct CompletionWeights {
    weights: IndexMap<String, f64>,
}

impl CompletionWeights {
    /// Weight for a step type; unconfigured types weigh nothing.
    #[must_use]
    pub fn weight(&self, step_type: &str) -> f64 {
        self.weights
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(step_type))
            .map_or(0.0, |(_, w)| *w)
    }

    /// # Errors
    ///
    /// Returns an error if any weight lies outside `0..=1`.
    pub fn validate(&self) -> Result<()> {
        for (step_type, weight) in &self.weights {
            if !(0.0..=1.0).contains(weight) {
                bail!("completion weight for '{step_type}' must be between 0 and 1, got {weight}");
            }
        }

        Ok(())
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for CompletionWeights {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self {
            weights: iter.into_iter().map(|(k, w)| (k.into(), w)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_ignores_case() {
        let weights: CompletionWeights = [("simpleRunner", 0.5)].into_iter().collect();
        assert!((weights.weight("SIMPLERUNNER") - 0.5).abs() < f64::EPSILON);
        assert!(weights.weight("Maven2").abs() < f64::EPSILON);
    }

    #[test]
    fn test_out_of_range_rejected() {
        let weights: CompletionWeights = [("gradle-runner", 1.5)].into_iter().collect();
        let _ = weights.validate().unwrap_err();
        let weights: CompletionWeights = [("gradle-runner", f64::NAN)].into_iter().collect();
        let _ = weights.validate().unwrap_err();
    }
}
