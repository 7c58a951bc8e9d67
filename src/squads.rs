//! Squad classification and aggregation
//!
//! Squads are evaluated in configuration order. A file is claimed by the
//! first squad with a matching filename substring; later matches are
//! reported as conflicts and do not move the file.

use crate::config::SquadsConfig;
use crate::coverage::{total_coverage, Coverage, FileRecord};
use crate::diagnostics::Diagnostic;

/// Files owned by one squad, with their aggregate coverage
#[derive(Debug, Clone)]
pub struct SquadReport {
    pub name: String,
    pub coverage: Coverage,
    pub files: Vec<FileRecord>,
    /// Number of distinct filename substrings configured
    pub configured: usize,
    /// Configured substrings found in no file path
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Classification {
    pub squads: Vec<SquadReport>,
    pub undetermined: Vec<FileRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Classification {
    pub fn classified_count(&self) -> usize {
        self.squads.iter().map(|s| s.files.len()).sum()
    }

    pub fn total_files(&self) -> usize {
        self.classified_count() + self.undetermined.len()
    }

    /// True when no squad claimed any file
    pub fn is_empty(&self) -> bool {
        self.classified_count() == 0
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_warning())
    }
}

/// Assign every file to at most one squad and compute squad totals
pub fn classify(files: Vec<FileRecord>, config: &SquadsConfig) -> Classification {
    let mut owners: Vec<Option<usize>> = vec![None; files.len()];
    let mut squads: Vec<SquadReport> = Vec::new();
    let mut diagnostics: Vec<Diagnostic> = Vec::new();

    for squad in &config.squads {
        let name = squad.name.as_str();
        let patterns = distinct_patterns(&squad.filenames);

        if patterns.len() < squad.filenames.len()
            && squad.filenames.iter().any(|f| f.is_empty())
        {
            diagnostics.push(Diagnostic::warning(
                Some(name),
                format!("Ignoring empty filename configured for squad {}", name),
            ));
        }

        if patterns.is_empty() {
            diagnostics.push(Diagnostic::warning(
                Some(name),
                format!(
                    "Filenames for squad {} must be provided for coverage report.",
                    name
                ),
            ));
            continue;
        }

        let squad_index = squads.len();
        let mut matched: Vec<usize> = Vec::new();

        for (i, file) in files.iter().enumerate() {
            if !patterns.iter().any(|p| file.path.contains(p.as_str())) {
                continue;
            }
            match owners[i] {
                Some(owner) => diagnostics.push(Diagnostic::warning(
                    Some(name),
                    format!(
                        "{} also matches squad {} but is already assigned to {}",
                        file.path, name, squads[owner].name
                    ),
                )),
                None => {
                    owners[i] = Some(squad_index);
                    matched.push(i);
                }
            }
        }

        let missing: Vec<String> = patterns
            .iter()
            .filter(|p| !files.iter().any(|f| f.path.contains(p.as_str())))
            .cloned()
            .collect();

        let coverage = total_coverage(matched.iter().map(|&i| &files[i]));

        diagnostics.push(Diagnostic::info(
            Some(name),
            format!(
                "{} file(s) matched from {} configured filename(s) for {}",
                matched.len(),
                patterns.len(),
                name
            ),
        ));
        if !missing.is_empty() {
            diagnostics.push(
                Diagnostic::warning(
                    Some(name),
                    format!("{} file(s) not found:", missing.len()),
                )
                .with_details(missing.clone()),
            );
        }
        diagnostics.push(Diagnostic::info(
            Some(name),
            format!("TOTAL COVERAGE FOR {}: {}", name, coverage),
        ));

        squads.push(SquadReport {
            name: name.to_string(),
            coverage,
            files: Vec::with_capacity(matched.len()),
            configured: patterns.len(),
            missing,
        });
    }

    let mut undetermined = Vec::new();
    for (mut file, owner) in files.into_iter().zip(owners) {
        match owner {
            Some(index) => {
                let report = &mut squads[index];
                file.squad = Some(report.name.clone());
                file.squad_coverage = Some(report.coverage);
                report.files.push(file);
            }
            None => undetermined.push(file),
        }
    }

    Classification {
        squads,
        undetermined,
        diagnostics,
    }
}

fn distinct_patterns(filenames: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for f in filenames {
        if !f.is_empty() && !out.contains(f) {
            out.push(f.clone());
        }
    }
    out
}
