use super::Table;
use indexmap::IndexMap;

/// An ordered collection of named tables.
///
/// Inserting a table under an existing name replaces it in place; tables are never duplicated.
#[derive(Debug, Clone, Default)]
pub struct ReportBook {
    tables: IndexMap<String, Table>,
}

impl ReportBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a table, returning the table it replaced.
    pub fn insert(&mut self, name: impl Into<String>, table: Table) -> Option<Table> {
        self.tables.insert(name.into(), table)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Table)> {
        self.tables.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_keeps_position() {
        let mut book = ReportBook::new();
        assert!(book.insert("Inventory", Table::new(["a"])).is_none());
        assert!(book.insert("Complexity", Table::new(["b"])).is_none());
        assert!(book.insert("Inventory", Table::new(["c"])).is_some());

        let names: Vec<_> = book.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["Inventory", "Complexity"]);
        assert_eq!(book.get("Inventory").unwrap().header(), ["c"]);
        assert_eq!(book.len(), 2);
    }
}
