//! Tabular rendering and report writers.
//!
//! # Implementation Model
//!
//! Analysis results are first rendered into [`Table`]s, a header plus rows of typed
//! [`Cell`]s, and collected by name into a [`ReportBook`]. The builders produce the
//! inventory, complexity, and coverage tables. Writers then serialize the book:
//!
//! - **Excel**: one worksheet per table, bold frozen header row, merged into an existing workbook when present
//! - **CSV**: one file per table
//! - **JSON**: every table keyed by name, merged into an existing report when present
//! - **Console**: a colored ranking summary written straight from the scored entities
//!
//! Absent values are rendered as [`MISSING`] by every writer.

mod book;
mod builders;
mod console;
mod csv;
mod excel;
mod json;
mod table;

pub use book::ReportBook;
pub use builders::{ReportKind, complexity_table, coverage_table, inventory_table};
pub use console::generate as generate_console;
pub use csv::generate as generate_csv;
pub use excel::{generate as generate_xlsx, merge_into_existing as merge_into_existing_xlsx};
pub use json::{generate as generate_json, merge_into_existing as merge_into_existing_json};
pub use table::{Cell, MISSING, Table};
