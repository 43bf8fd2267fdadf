use super::Table;
use crate::Result;
use std::io::Write;

/// Write one table as RFC 4180 CSV.
pub fn generate<W: Write>(table: &Table, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(table.header())?;
    for row in table.rows() {
        csv_writer.write_record(row.iter().map(ToString::to_string))?;
    }

    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::Cell;

    #[test]
    fn test_csv_escaping_and_missing_cells() {
        let mut table = Table::new(["Entity", "runner1", "Score"]);
        table
            .push_row(vec!["Payments".into(), "script=make; mode=\"fast\", quiet".into(), Cell::Number(0.5)])
            .unwrap();
        table.push_row(vec!["Search".into(), Cell::Missing, Cell::Integer(2)]).unwrap();

        let mut output = Vec::new();
        generate(&table, &mut output).unwrap();

        insta::assert_snapshot!(String::from_utf8(output).unwrap(), @r#"
        Entity,runner1,Score
        Payments,"script=make; mode=""fast"", quiet",0.5
        Search,N/A,2
        "#);
    }
}
