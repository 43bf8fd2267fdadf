use super::Metric;
use strum::{EnumCount, IntoEnumIterator};

/// One non-negative count per [`Metric`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricSet {
    values: [u64; Metric::COUNT],
}

impl MetricSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn get(&self, metric: Metric) -> u64 {
        self.values[metric as usize]
    }

    pub const fn set(&mut self, metric: Metric, value: u64) {
        self.values[metric as usize] = value;
    }

    pub const fn add(&mut self, metric: Metric, value: u64) {
        self.values[metric as usize] = self.values[metric as usize].saturating_add(value);
    }

    /// Add every count of `other` into this set.
    pub fn accumulate(&mut self, other: &Self) {
        for metric in Metric::iter() {
            self.add(metric, other.get(metric));
        }
    }

    /// Counts in column order.
    pub fn iter(&self) -> impl Iterator<Item = (Metric, u64)> + '_ {
        Metric::iter().map(|m| (m, self.get(m)))
    }
}

impl FromIterator<(Metric, u64)> for MetricSet {
    fn from_iter<I: IntoIterator<Item = (Metric, u64)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (metric, value) in iter {
            set.add(metric, value);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_set_is_all_zero() {
        assert!(MetricSet::new().iter().all(|(_, v)| v == 0));
    }

    #[test]
    fn test_accumulate_sums_counts() {
        let mut total: MetricSet = [(Metric::BuildSteps, 2), (Metric::LinesOfCode, 10)].into_iter().collect();
        let other: MetricSet = [(Metric::BuildSteps, 3), (Metric::Integrations, 1)].into_iter().collect();

        total.accumulate(&other);

        assert_eq!(total.get(Metric::BuildSteps), 5);
        assert_eq!(total.get(Metric::LinesOfCode), 10);
        assert_eq!(total.get(Metric::Integrations), 1);
        assert_eq!(total.get(Metric::Dependencies), 0);
    }

    #[test]
    fn test_add_saturates() {
        let mut set = MetricSet::new();
        set.set(Metric::BuildSteps, u64::MAX);
        set.add(Metric::BuildSteps, 1);
        assert_eq!(set.get(Metric::BuildSteps), u64::MAX);
    }
}
