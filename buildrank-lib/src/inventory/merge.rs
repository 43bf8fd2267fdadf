use super::FlatRecord;
use indexmap::IndexMap;

/// Merged flat records, one per entity, in the order entities were first seen.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    entities: IndexMap<String, FlatRecord>,
}

impl Inventory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a record into the entity's accumulated record, creating it on first sight.
    pub fn merge(&mut self, entity: &str, record: FlatRecord) {
        if let Some(existing) = self.entities.get_mut(entity) {
            existing.absorb(record);
        } else {
            let _ = self.entities.insert(entity.to_string(), record);
        }
    }

    #[must_use]
    pub fn get(&self, entity: &str) -> Option<&FlatRecord> {
        self.entities.get(entity)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FlatRecord)> {
        self.entities.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn record(pairs: &[(&str, &str)]) -> FlatRecord {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_first_merge_creates_entity() {
        let mut inventory = Inventory::new();
        inventory.merge("Payments", record(&[("id", "Build")]));

        assert_eq!(inventory.len(), 1);
        assert_eq!(inventory.get("Payments").unwrap().get("id"), Some("Build"));
    }

    #[test]
    fn test_collisions_append_in_merge_order() {
        let mut inventory = Inventory::new();
        inventory.merge("P", record(&[("id", "Build"), ("name", "Compile")]));
        inventory.merge("P", record(&[("id", "Deploy")]));
        inventory.merge("P", record(&[("id", "Test"), ("uuid", "u3")]));

        let merged = inventory.get("P").unwrap();
        assert_eq!(merged.get("id"), Some("Build | Deploy | Test"));
        assert_eq!(merged.keys().collect::<Vec<_>>(), ["id", "name", "uuid"]);
    }

    #[test]
    fn test_entities_are_isolated() {
        let mut inventory = Inventory::new();
        inventory.merge("A", record(&[("id", "1")]));
        inventory.merge("B", record(&[("id", "2")]));

        assert_eq!(inventory.get("A").unwrap().get("id"), Some("1"));
        assert_eq!(inventory.get("B").unwrap().get("id"), Some("2"));
        assert_eq!(inventory.iter().map(|(name, _)| name).collect::<Vec<_>>(), ["A", "B"]);
    }

    #[test]
    fn test_merge_content_is_order_independent() {
        let first = record(&[("id", "Build"), ("steps", "2")]);
        let second = record(&[("id", "Deploy"), ("vcs", "git")]);

        let mut forward = Inventory::new();
        forward.merge("P", first.clone());
        forward.merge("P", second.clone());

        let mut backward = Inventory::new();
        backward.merge("P", second);
        backward.merge("P", first);

        let parts = |inv: &Inventory| -> BTreeSet<(String, BTreeSet<String>)> {
            inv.get("P")
                .unwrap()
                .iter()
                .map(|(k, v)| (k.to_string(), v.split(" | ").map(str::to_string).collect()))
                .collect()
        };

        assert_eq!(parts(&forward), parts(&backward));
    }
}
