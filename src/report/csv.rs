//! CSV writer

use super::{ReportTable, TableWriter, COLUMNS, CSV_FILE};

/// Writes the table as CSV with a leading index column
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvWriter;

impl TableWriter for CsvWriter {
    fn file_name(&self) -> &str {
        CSV_FILE
    }

    fn render(&self, table: &ReportTable) -> String {
        let mut out = String::new();

        // Index column has no header
        out.push_str(&csv_line(std::iter::once("").chain(COLUMNS)));

        for (index, row) in table.indexed_rows() {
            let index = index.to_string();
            let cells = row.cells();
            out.push_str(&csv_line(
                std::iter::once(index.as_str()).chain(cells.iter().map(String::as_str)),
            ));
        }

        out
    }
}

fn csv_line<'a>(fields: impl Iterator<Item = &'a str>) -> String {
    let mut line = fields.map(csv_escape).collect::<Vec<_>>().join(",");
    line.push('\n');
    line
}

/// Quote a field when it contains a delimiter, quote, or line break
pub fn csv_escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
