use crate::Result;
use crate::inventory::FlatRecord;
use core::fmt;
use ohno::bail;
use std::collections::BTreeSet;

/// Marker written wherever a row has no value for a column.
pub const MISSING: &str = "N/A";

/// One table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Integer(u64),
    Number(f64),
    Missing,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Missing => f.write_str(MISSING),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Option<&str>> for Cell {
    fn from(s: Option<&str>) -> Self {
        s.map_or(Self::Missing, Self::from)
    }
}

/// A rectangular table: every row has exactly as many cells as the header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    header: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// An empty table with a fixed header.
    #[must_use]
    pub fn new<S: Into<String>>(header: impl IntoIterator<Item = S>) -> Self {
        Self {
            header: header.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// A table whose header is the sorted union of every record's keys, with [`Cell::Missing`]
    /// wherever a record lacks a key.
    #[must_use]
    pub fn derived(records: &[&FlatRecord]) -> Self {
        let keys: BTreeSet<&str> = records.iter().copied().flat_map(FlatRecord::keys).collect();

        let rows = records
            .iter()
            .map(|record| keys.iter().map(|k| Cell::from(record.get(k))).collect())
            .collect();

        Self {
            header: keys.into_iter().map(str::to_string).collect(),
            rows,
        }
    }

    /// Append a row.
    ///
    /// # Errors
    ///
    /// Returns an error if the row's width differs from the header's.
    pub fn push_row(&mut self, row: Vec<Cell>) -> Result<()> {
        if row.len() != self.header.len() {
            bail!("row has {} cells but the header has {}", row.len(), self.header.len());
        }

        self.rows.push(row);
        Ok(())
    }

    /// Insert a column at `index`, one cell per existing row.
    ///
    /// # Errors
    ///
    /// Returns an error if the number of cells differs from the number of rows or `index` is past the last column.
    pub fn insert_column(&mut self, index: usize, name: impl Into<String>, cells: Vec<Cell>) -> Result<()> {
        if cells.len() != self.rows.len() {
            bail!("column has {} cells but the table has {} rows", cells.len(), self.rows.len());
        }

        if index > self.header.len() {
            bail!("column index {index} is out of range");
        }

        self.header.insert(index, name.into());
        for (row, cell) in self.rows.iter_mut().zip(cells) {
            row.insert(index, cell);
        }

        Ok(())
    }

    #[must_use]
    pub fn header(&self) -> &[String] {
        &self.header
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }
}
