//! Raw coverage export loader
//!
//! Reads the JSON produced by `xccov view --report --json`: a list of targets,
//! each carrying per-file line counts. Function-level detail is dropped.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::{file_name_of, FileRecord};

#[derive(Debug, Deserialize)]
struct RawReport {
    #[serde(default)]
    targets: Vec<RawTarget>,
}

#[derive(Debug, Deserialize)]
struct RawTarget {
    #[serde(default)]
    files: Vec<RawFile>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFile {
    path: String,
    #[serde(default)]
    name: Option<String>,
    covered_lines: u64,
    executable_lines: u64,
    #[serde(default)]
    line_coverage: f64,
}

/// Load a coverage export, stripping `workdir` from every file path
pub fn load_export(path: &Path, workdir: &str) -> Result<Vec<FileRecord>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read coverage export: {}", path.display()))?;
    parse_export_str(&content, workdir)
        .with_context(|| format!("Invalid coverage export JSON: {}", path.display()))
}

/// Parse coverage export content from a string
pub fn parse_export_str(content: &str, workdir: &str) -> Result<Vec<FileRecord>> {
    let report: RawReport = serde_json::from_str(content)?;
    let workdir = normalize_workdir(workdir);

    let files = report
        .targets
        .into_iter()
        .flat_map(|target| target.files)
        .map(|raw| {
            let path = strip_workdir(&raw.path, &workdir);
            let name = raw.name.unwrap_or_else(|| file_name_of(&path));
            FileRecord {
                path,
                name,
                covered_lines: raw.covered_lines,
                executable_lines: raw.executable_lines,
                line_coverage: raw.line_coverage,
                squad: None,
                squad_coverage: None,
            }
        })
        .collect();

    Ok(files)
}

/// Drop `.` components and trailing separators
pub fn normalize_workdir(workdir: &str) -> String {
    if workdir.is_empty() {
        return String::new();
    }
    Path::new(workdir)
        .components()
        .collect::<PathBuf>()
        .to_string_lossy()
        .to_string()
}

fn strip_workdir(path: &str, workdir: &str) -> String {
    if workdir.is_empty() || workdir == "." {
        return path.to_string();
    }
    match path.strip_prefix(workdir) {
        // Only whole components: `/ci/App` must not cut `/ci/AppTests`
        Some(rest) if rest.is_empty() || rest.starts_with('/') || workdir.ends_with('/') => {
            rest.to_string()
        }
        _ => path.to_string(),
    }
}
