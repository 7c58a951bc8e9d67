//! Load, classify, render and write, in that order.

use anyhow::Result;
use std::path::PathBuf;

use crate::config::{ReportPaths, SquadsConfig};
use crate::coverage::load_export;
use crate::diagnostics::Diagnostic;
use crate::report::{write_reports, CsvWriter, HtmlWriter, ReportTable, TableWriter};
use crate::squads::{classify, Classification, SquadReport};

pub const REPORT_TITLE: &str = "Squad Coverage Report";

/// How a run ended when no error occurred
#[derive(Debug)]
pub enum Outcome {
    /// Both artifacts were written
    Written {
        classification: Classification,
        table_rows: usize,
        paths: Vec<PathBuf>,
    },
    /// No squad claimed any file, nothing was written
    NothingClassified { classification: Classification },
}

impl Outcome {
    pub fn classification(&self) -> &Classification {
        match self {
            Outcome::Written { classification, .. } => classification,
            Outcome::NothingClassified { classification } => classification,
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.classification().diagnostics
    }

    pub fn squads(&self) -> &[SquadReport] {
        &self.classification().squads
    }
}

pub fn run(paths: &ReportPaths) -> Result<Outcome> {
    let files = load_export(&paths.export, &paths.workdir)?;
    let config = SquadsConfig::load(&paths.config)?;

    let classification = classify(files, &config);
    if classification.is_empty() {
        return Ok(Outcome::NothingClassified { classification });
    }

    let table = ReportTable::build(&classification);
    let html = HtmlWriter::new(REPORT_TITLE);
    let writers: [&dyn TableWriter; 2] = [&CsvWriter, &html];
    let written = write_reports(&table, &paths.output_dir, &writers)?;

    Ok(Outcome::Written {
        classification,
        table_rows: table.len(),
        paths: written,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CONFIG_FILE, EXPORT_DIR, EXPORT_FILE, REPORT_DIR};
    use crate::report::{CSV_FILE, HTML_FILE};
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    /// Lays out `<root>/App`, `<root>/DerivedData/raw_report.json` and
    /// `<root>/scripts/config.json`.
    fn setup(root: &Path, files: &[(&str, u64, u64)], config: &str) -> ReportPaths {
        let workdir = root.join("App");
        let scriptdir = root.join("scripts");
        fs::create_dir_all(&workdir).unwrap();
        fs::create_dir_all(&scriptdir).unwrap();
        fs::create_dir_all(root.join(EXPORT_DIR)).unwrap();

        let entries: Vec<serde_json::Value> = files
            .iter()
            .map(|(name, covered, executable)| {
                let ratio = if *executable == 0 {
                    0.0
                } else {
                    *covered as f64 / *executable as f64
                };
                serde_json::json!({
                    "path": format!("{}/{}", workdir.display(), name),
                    "name": name,
                    "coveredLines": covered,
                    "executableLines": executable,
                    "lineCoverage": ratio,
                    "functions": [{ "name": "f", "coveredLines": 0, "executableLines": 0 }],
                })
            })
            .collect();
        let export = serde_json::json!({ "targets": [{ "name": "App", "files": entries }] });
        fs::write(root.join(EXPORT_DIR).join(EXPORT_FILE), export.to_string()).unwrap();
        fs::write(scriptdir.join(CONFIG_FILE), config).unwrap();

        ReportPaths::resolve(&workdir, &scriptdir)
    }

    #[test]
    fn test_run_writes_both_reports() {
        let dir = tempdir().unwrap();
        let paths = setup(
            dir.path(),
            &[("A.py", 8, 10), ("B.py", 0, 0)],
            r#"{"squads": [{"name": "core", "filenames": ["A.py"]}]}"#,
        );

        let outcome = run(&paths).unwrap();

        let Outcome::Written { table_rows, paths: written, .. } = &outcome else {
            panic!("expected reports to be written");
        };
        assert_eq!(*table_rows, 2);
        let report_dir = dir.path().join(REPORT_DIR);
        assert_eq!(written, &vec![report_dir.join(CSV_FILE), report_dir.join(HTML_FILE)]);

        let csv = fs::read_to_string(report_dir.join(CSV_FILE)).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "1,core,80.00%,A.py,80.00%,8,10,/A.py");
        assert_eq!(lines[2], "2,N/A,N/A,B.py,N/A,0,0,/B.py");

        assert!((outcome.squads()[0].coverage.value() - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_unmatched_squad_still_produces_report() {
        let dir = tempdir().unwrap();
        let paths = setup(
            dir.path(),
            &[("A.py", 1, 2)],
            r#"{"squads": [
                {"name": "ghost", "filenames": ["X.py"]},
                {"name": "core", "filenames": ["A.py"]}
            ]}"#,
        );

        let outcome = run(&paths).unwrap();

        assert!(matches!(outcome, Outcome::Written { table_rows: 1, .. }));
        assert!(outcome
            .diagnostics()
            .iter()
            .any(|d| d.is_warning() && d.details == vec!["X.py".to_string()]));
        assert!(outcome.squads()[0].files.is_empty());
    }

    #[test]
    fn test_nothing_classified_writes_nothing() {
        let dir = tempdir().unwrap();
        let paths = setup(
            dir.path(),
            &[("A.py", 1, 2)],
            r#"{"squads": [{"name": "ghost", "filenames": ["X.py"]}]}"#,
        );

        let outcome = run(&paths).unwrap();

        assert!(matches!(outcome, Outcome::NothingClassified { .. }));
        assert!(!dir.path().join(REPORT_DIR).exists());
    }

    #[test]
    fn test_missing_config_is_an_error() {
        let dir = tempdir().unwrap();
        let paths = setup(dir.path(), &[("A.py", 1, 2)], "{}");
        fs::remove_file(&paths.config).unwrap();

        let err = run(&paths).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("Failed to read squad config"));
        assert!(message.contains(CONFIG_FILE));
    }
}
