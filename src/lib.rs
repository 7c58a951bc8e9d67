//! squadcov - per-squad coverage reports
//!
//! Turns a raw coverage export into a report grouped by owning squad:
//! - Coverage export loading with working-directory prefix stripping
//! - Squad classification by filename substring, first match wins
//! - Per-file and per-squad coverage, `N/A` when nothing is executable
//! - CSV and HTML report writers

pub mod config;
pub mod coverage;
pub mod diagnostics;
pub mod pipeline;
pub mod report;
pub mod squads;

pub use coverage::{Coverage, FileRecord};
pub use pipeline::{run, Outcome};
pub use squads::{classify, Classification, SquadReport};
