use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};

pub const CONFIG_FILE: &str = "config.json";
pub const EXPORT_DIR: &str = "DerivedData";
pub const EXPORT_FILE: &str = "raw_report.json";
pub const REPORT_DIR: &str = "CoverageReport";

#[derive(Debug, Deserialize)]
pub struct SquadsConfig {
    #[serde(default)]
    pub squads: Vec<Squad>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Squad {
    pub name: String,
    /// Substrings matched against file paths
    #[serde(default)]
    pub filenames: Vec<String>,
}

impl SquadsConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read squad config: {}", path.display()))?;

        let config: SquadsConfig = serde_json::from_str(&content)
            .with_context(|| format!("Invalid squad config JSON: {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid squad config: {}", path.display()))?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for squad in &self.squads {
            if squad.name.trim().is_empty() {
                anyhow::bail!("Squad names must not be empty");
            }
            if !seen.insert(squad.name.as_str()) {
                anyhow::bail!("Squad '{}' is defined more than once", squad.name);
            }
        }

        Ok(())
    }
}

/// Where a run reads its inputs and writes its reports
#[derive(Debug, Clone, PartialEq)]
pub struct ReportPaths {
    /// Prefix stripped from every exported file path
    pub workdir: String,
    pub export: PathBuf,
    pub config: PathBuf,
    pub output_dir: PathBuf,
}

impl ReportPaths {
    /// Default layout: the export lives in `<workdir>/../DerivedData`, reports
    /// go to `<workdir>/../CoverageReport` and `config.json` sits in `scriptdir`.
    pub fn resolve(workdir: &Path, scriptdir: &Path) -> Self {
        let workdir = normalize_path(workdir);
        let parent = normalize_path(&workdir.join(".."));

        Self {
            workdir: workdir.to_string_lossy().to_string(),
            export: parent.join(EXPORT_DIR).join(EXPORT_FILE),
            config: scriptdir.join(CONFIG_FILE),
            output_dir: parent.join(REPORT_DIR),
        }
    }

    pub fn with_overrides(
        mut self,
        export: Option<PathBuf>,
        config: Option<PathBuf>,
        output_dir: Option<PathBuf>,
    ) -> Self {
        if let Some(p) = export {
            self.export = p;
        }
        if let Some(p) = config {
            self.config = p;
        }
        if let Some(p) = output_dir {
            self.output_dir = p;
        }
        self
    }
}

/// Lexically resolve `.` and `..` without touching the filesystem
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let last = out.components().next_back();
                match last {
                    Some(Component::Normal(_)) => {
                        out.pop();
                    }
                    Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                    _ => out.push(".."),
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}
