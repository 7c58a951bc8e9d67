//! Coverage module
//!
//! Provides:
//! - Raw coverage export loading
//! - Per-file records and coverage ratios
//! - Threshold validation

mod export;
mod threshold;

pub use export::*;
pub use threshold::*;

use std::fmt;

/// Coverage ratio for a file or a group of files
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coverage {
    /// Covered lines divided by executable lines, in `0.0..=1.0`
    Measured(f64),
    /// No executable lines, so the ratio is undefined
    NotApplicable,
}

impl Coverage {
    pub fn from_lines(covered: u64, executable: u64) -> Self {
        if executable == 0 {
            return Coverage::NotApplicable;
        }
        Coverage::Measured(covered as f64 / executable as f64)
    }

    /// Ratio as a number; `NotApplicable` counts as zero.
    pub fn value(&self) -> f64 {
        match self {
            Coverage::Measured(ratio) => *ratio,
            Coverage::NotApplicable => 0.0,
        }
    }

    pub fn ratio(&self) -> Option<f64> {
        match self {
            Coverage::Measured(ratio) => Some(*ratio),
            Coverage::NotApplicable => None,
        }
    }

    pub fn percentage(&self) -> Option<f64> {
        self.ratio().map(|r| r * 100.0)
    }
}

impl fmt::Display for Coverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coverage::Measured(ratio) => write!(f, "{:.2}%", ratio * 100.0),
            Coverage::NotApplicable => f.write_str(NOT_APPLICABLE),
        }
    }
}

/// Placeholder for values a row does not have
pub const NOT_APPLICABLE: &str = "N/A";

/// Coverage data for a single source file
#[derive(Debug, Clone, PartialEq)]
pub struct FileRecord {
    /// Path relative to the working directory
    pub path: String,
    pub name: String,
    pub covered_lines: u64,
    pub executable_lines: u64,
    /// Ratio precomputed by the coverage tool
    pub line_coverage: f64,
    pub squad: Option<String>,
    pub squad_coverage: Option<Coverage>,
}

impl FileRecord {
    pub fn new(path: &str, covered_lines: u64, executable_lines: u64) -> Self {
        let line_coverage = Coverage::from_lines(covered_lines, executable_lines).value();
        Self {
            path: path.to_string(),
            name: file_name_of(path),
            covered_lines,
            executable_lines,
            line_coverage,
            squad: None,
            squad_coverage: None,
        }
    }

    /// Per-file coverage as displayed in reports.
    ///
    /// Files without executable lines are `NotApplicable` whatever ratio the
    /// coverage tool reported.
    pub fn coverage(&self) -> Coverage {
        if self.executable_lines == 0 {
            Coverage::NotApplicable
        } else {
            Coverage::Measured(self.line_coverage)
        }
    }
}

/// Last component of a `/`-separated path
pub fn file_name_of(path: &str) -> String {
    path.rsplit('/')
        .find(|part| !part.is_empty())
        .unwrap_or(path)
        .to_string()
}

/// Sum of covered lines over sum of executable lines
pub fn total_coverage<'a, I>(files: I) -> Coverage
where
    I: IntoIterator<Item = &'a FileRecord>,
{
    let (covered, executable) = files.into_iter().fold((0u128, 0u128), |(c, e), f| {
        (c + u128::from(f.covered_lines), e + u128::from(f.executable_lines))
    });
    if executable == 0 {
        return Coverage::NotApplicable;
    }
    Coverage::Measured(covered as f64 / executable as f64)
}
