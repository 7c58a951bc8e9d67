//! Report module
//!
//! Provides:
//! - Fixed-schema rows for squad and undetermined files
//! - The concatenated, 1-indexed report table
//! - CSV and HTML writers

mod csv;
mod html;

pub use self::csv::*;
pub use self::html::*;

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::coverage::{Coverage, FileRecord, NOT_APPLICABLE};
use crate::squads::Classification;

pub const CSV_FILE: &str = "report.csv";
pub const HTML_FILE: &str = "report.html";

/// Columns shared by both writers, after the index column
pub const COLUMNS: [&str; 7] = [
    "Squad",
    "Squad Coverage",
    "File name",
    "Line Coverage",
    "Lines Covered",
    "Executable Lines",
    "File path",
];

/// A file owned by a squad
#[derive(Debug, Clone, PartialEq)]
pub struct SquadRow {
    pub squad: String,
    pub squad_coverage: Coverage,
    pub file_name: String,
    pub line_coverage: Coverage,
    pub lines_covered: u64,
    pub executable_lines: u64,
    pub file_path: String,
}

/// A file no squad claimed
#[derive(Debug, Clone, PartialEq)]
pub struct UndeterminedRow {
    pub file_name: String,
    pub line_coverage: Coverage,
    pub lines_covered: u64,
    pub executable_lines: u64,
    pub file_path: String,
}

impl UndeterminedRow {
    fn from_file(file: &FileRecord) -> Self {
        Self {
            file_name: file.name.clone(),
            line_coverage: file.coverage(),
            lines_covered: file.covered_lines,
            executable_lines: file.executable_lines,
            file_path: file.path.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReportRow {
    Squad(SquadRow),
    Undetermined(UndeterminedRow),
}

impl ReportRow {
    /// Cell values in `COLUMNS` order, `N/A` where the row has no value
    pub fn cells(&self) -> [String; 7] {
        match self {
            ReportRow::Squad(r) => [
                r.squad.clone(),
                r.squad_coverage.to_string(),
                r.file_name.clone(),
                r.line_coverage.to_string(),
                r.lines_covered.to_string(),
                r.executable_lines.to_string(),
                r.file_path.clone(),
            ],
            ReportRow::Undetermined(r) => [
                NOT_APPLICABLE.to_string(),
                NOT_APPLICABLE.to_string(),
                r.file_name.clone(),
                r.line_coverage.to_string(),
                r.lines_covered.to_string(),
                r.executable_lines.to_string(),
                r.file_path.clone(),
            ],
        }
    }

    pub fn squad(&self) -> Option<&str> {
        match self {
            ReportRow::Squad(r) => Some(&r.squad),
            ReportRow::Undetermined(_) => None,
        }
    }
}

/// Per-squad totals shown above the table
#[derive(Debug, Clone, PartialEq)]
pub struct SquadSummary {
    pub name: String,
    pub coverage: Coverage,
    pub files: usize,
    /// Distinct filename substrings configured for the squad
    pub configured: usize,
    pub missing: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ReportTable {
    pub rows: Vec<ReportRow>,
    pub squads: Vec<SquadSummary>,
}

impl ReportTable {
    /// Squad rows in squad order, then undetermined rows
    pub fn build(classification: &Classification) -> Self {
        let mut rows = Vec::with_capacity(classification.total_files());

        for squad in &classification.squads {
            for file in &squad.files {
                rows.push(ReportRow::Squad(SquadRow {
                    squad: squad.name.clone(),
                    squad_coverage: squad.coverage,
                    file_name: file.name.clone(),
                    line_coverage: file.coverage(),
                    lines_covered: file.covered_lines,
                    executable_lines: file.executable_lines,
                    file_path: file.path.clone(),
                }));
            }
        }

        rows.extend(
            classification
                .undetermined
                .iter()
                .map(|f| ReportRow::Undetermined(UndeterminedRow::from_file(f))),
        );

        let squads = classification
            .squads
            .iter()
            .map(|s| SquadSummary {
                name: s.name.clone(),
                coverage: s.coverage,
                files: s.files.len(),
                configured: s.configured,
                missing: s.missing.len(),
            })
            .collect();

        Self { rows, squads }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows paired with their 1-based index
    pub fn indexed_rows(&self) -> impl Iterator<Item = (usize, &ReportRow)> {
        self.rows.iter().enumerate().map(|(i, row)| (i + 1, row))
    }

    pub fn undetermined_count(&self) -> usize {
        self.rows.iter().filter(|r| r.squad().is_none()).count()
    }
}

/// Serializes a report table into one artifact
pub trait TableWriter {
    fn file_name(&self) -> &str;
    fn render(&self, table: &ReportTable) -> String;
}

/// Write every artifact into `dir`, creating it if needed
pub fn write_reports(
    table: &ReportTable,
    dir: &Path,
    writers: &[&dyn TableWriter],
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create report directory: {}", dir.display()))?;

    let mut written = Vec::with_capacity(writers.len());
    for writer in writers {
        let path = dir.join(writer.file_name());
        write_artifact(&path, &writer.render(table))
            .with_context(|| format!("Failed to write report: {}", path.display()))?;
        written.push(path);
    }

    Ok(written)
}

fn write_artifact(path: &Path, content: &str) -> Result<()> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);
    out.write_all(content.as_bytes())?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::{Squad, SquadsConfig};
    use crate::squads::classify;
    use tempfile::tempdir;

    pub(crate) fn sample_table() -> ReportTable {
        let files = vec![FileRecord::new("A.py", 8, 10), FileRecord::new("B.py", 0, 0)];
        let config = SquadsConfig {
            squads: vec![Squad {
                name: "core".to_string(),
                filenames: vec!["A.py".to_string()],
            }],
        };
        ReportTable::build(&classify(files, &config))
    }

    #[test]
    fn test_build_concatenates_squad_then_undetermined() {
        let table = sample_table();

        assert_eq!(table.len(), 2);
        assert_eq!(table.undetermined_count(), 1);

        let indexed: Vec<(usize, Option<&str>)> =
            table.indexed_rows().map(|(i, r)| (i, r.squad())).collect();
        assert_eq!(indexed, vec![(1, Some("core")), (2, None)]);

        assert_eq!(
            table.rows[0].cells(),
            ["core", "80.00%", "A.py", "80.00%", "8", "10", "A.py"].map(String::from)
        );
        assert_eq!(
            table.rows[1].cells(),
            ["N/A", "N/A", "B.py", "N/A", "0", "0", "B.py"].map(String::from)
        );

        assert_eq!(
            table.squads,
            vec![SquadSummary {
                name: "core".to_string(),
                coverage: Coverage::Measured(0.8),
                files: 1,
                configured: 1,
                missing: 0,
            }]
        );
    }

    #[test]
    fn test_write_reports_creates_directory() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("nested").join("CoverageReport");
        let table = sample_table();
        let html = HtmlWriter::new("Coverage");

        let writers: [&dyn TableWriter; 2] = [&CsvWriter, &html];

        let written = write_reports(&table, &out, &writers).unwrap();

        assert_eq!(written, vec![out.join(CSV_FILE), out.join(HTML_FILE)]);
        let csv = fs::read_to_string(out.join(CSV_FILE)).unwrap();
        assert_eq!(csv.lines().count(), 3);
        assert!(fs::read_to_string(out.join(HTML_FILE))
            .unwrap()
            .contains("B.py"));
    }

    #[test]
    fn test_write_reports_fails_when_directory_is_a_file() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("CoverageReport");
        fs::write(&blocker, "not a directory").unwrap();

        let writers: [&dyn TableWriter; 1] = [&CsvWriter];
        let err = write_reports(&sample_table(), &blocker, &writers).unwrap_err();
        assert!(format!("{:#}", err).contains("CoverageReport"));
    }
}
