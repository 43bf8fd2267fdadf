use super::{Cell, MISSING, ReportBook, Table};
use crate::Result;
use calamine::{Data, Reader, Xlsx, open_workbook};
use camino::Utf8Path;
use ohno::IntoAppError;
use rust_xlsxwriter::{DocProperties, Format, FormatAlign, Workbook, Worksheet};
use std::borrow::Cow;
use std::io::Write;

const LOG_TARGET: &str = "     excel";

/// Longest string a single worksheet cell can hold.
const MAX_CELL_CHARS: usize = 32_767;

/// Write every table of the book as one worksheet of a new workbook.
pub fn generate<W: Write>(book: &ReportBook, writer: &mut W) -> Result<()> {
    let mut workbook = Workbook::new();

    let properties = DocProperties::new().set_author("buildrank");
    let _ = workbook.set_properties(&properties);

    let header_format = Format::new().set_bold();
    let text_format = Format::new().set_align(FormatAlign::Left);

    for (name, table) in book.iter() {
        let worksheet = workbook.add_worksheet().set_name(name)?;
        write_table(worksheet, table, &header_format, &text_format)?;
    }

    let data = workbook.save_to_buffer()?;
    writer.write_all(&data)?;

    Ok(())
}

/// Fold `book` into a previously written workbook, replacing same-named sheets and keeping the others.
///
/// # Errors
///
/// Returns an error if the workbook at `path` cannot be opened or one of its sheets is not a table.
pub fn merge_into_existing(path: &Utf8Path, book: &ReportBook) -> Result<ReportBook> {
    let mut workbook: Xlsx<_> = open_workbook::<Xlsx<_>, _>(path).into_app_err_with(|| format!("opening existing Excel report '{path}'"))?;

    let mut merged = ReportBook::new();
    for name in workbook.sheet_names() {
        let range = workbook
            .worksheet_range(&name)
            .into_app_err_with(|| format!("reading sheet '{name}' of '{path}'"))?;

        let mut rows = range.rows();
        let header: Vec<String> = rows.next().map(|row| row.iter().map(ToString::to_string).collect()).unwrap_or_default();

        let mut table = Table::new(header);
        for row in rows {
            table.push_row(row.iter().map(cell_from_xlsx).collect())?;
        }

        let _ = merged.insert(name, table);
    }

    for (name, table) in book.iter() {
        let _ = merged.insert(name, table.clone());
    }

    Ok(merged)
}

fn cell_from_xlsx(data: &Data) -> Cell {
    match data {
        Data::String(s) if s == MISSING => Cell::Missing,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(n) => Cell::Number(*n),
        Data::Int(i) => u64::try_from(*i).map_or_else(|_| Cell::Text(i.to_string()), Cell::Integer),
        Data::Empty => Cell::Text(String::new()),
        other => Cell::Text(other.to_string()),
    }
}

/// Cut text that would not fit in a single cell.
fn fit_cell(text: &str) -> Cow<'_, str> {
    if text.len() <= MAX_CELL_CHARS || text.chars().count() <= MAX_CELL_CHARS {
        return Cow::Borrowed(text);
    }

    log::warn!(target: LOG_TARGET, "Truncating a {}-character value to fit a worksheet cell", text.chars().count());
    Cow::Owned(text.chars().take(MAX_CELL_CHARS).collect())
}

#[expect(unused_results, reason = "rust_xlsxwriter methods return &mut Worksheet for chaining")]
#[expect(clippy::cast_possible_truncation, reason = "Column index limited by Excel's u16 column limit")]
#[expect(clippy::cast_precision_loss, reason = "Intentional conversion to f64 for Excel output")]
fn write_table(worksheet: &mut Worksheet, table: &Table, header_format: &Format, text_format: &Format) -> Result<()> {
    for (col, name) in table.header().iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, fit_cell(name), header_format)?;
    }

    // Freeze the header row
    worksheet.set_freeze_panes(1, 0)?;

    for (row_idx, row) in table.rows().iter().enumerate() {
        let row_num = (row_idx + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Text(s) => {
                    worksheet.write_string_with_format(row_num, col, fit_cell(s), text_format)?;
                }
                Cell::Integer(i) => {
                    worksheet.write_number(row_num, col, *i as f64)?;
                }
                Cell::Number(n) => {
                    worksheet.write_number(row_num, col, *n)?;
                }
                Cell::Missing => {
                    worksheet.write_string_with_format(row_num, col, cell.to_string(), text_format)?;
                }
            }
        }
    }

    worksheet.autofit();
    Ok(())
}
