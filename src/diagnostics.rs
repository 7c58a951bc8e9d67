//! Diagnostics collected while classifying files
//!
//! The classifier only records what happened; the binary decides how to
//! print it.

use colored::Colorize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub level: Level,
    /// Squad the message is about, if any
    pub squad: Option<String>,
    pub message: String,
    /// Extra lines rendered as a bullet list
    pub details: Vec<String>,
}

impl Diagnostic {
    pub fn info(squad: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            level: Level::Info,
            squad: squad.map(str::to_string),
            message: message.into(),
            details: Vec::new(),
        }
    }

    pub fn warning(squad: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            level: Level::Warning,
            squad: squad.map(str::to_string),
            message: message.into(),
            details: Vec::new(),
        }
    }

    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = details;
        self
    }

    pub fn is_warning(&self) -> bool {
        self.level == Level::Warning
    }

    /// Plain text, without colors
    pub fn to_plain(&self) -> String {
        let icon = match self.level {
            Level::Info => "ℹ",
            Level::Warning => "⚠",
        };
        let mut out = format!("{} {}", icon, self.message);
        for detail in &self.details {
            out.push_str(&format!("\n - {}", detail));
        }
        out
    }
}

/// Print diagnostics grouped by squad, in the order they were recorded
pub fn print_diagnostics(diagnostics: &[Diagnostic], quiet: bool) {
    let mut current_squad: Option<&str> = None;

    for diagnostic in diagnostics {
        if quiet && !diagnostic.is_warning() {
            continue;
        }

        let squad = diagnostic.squad.as_deref();
        if squad.is_some() && squad != current_squad {
            println!("\n{}", "━".repeat(70).dimmed());
            current_squad = squad;
        }

        let line = match diagnostic.level {
            Level::Info => format!("{} {}", "ℹ".blue(), diagnostic.message),
            Level::Warning => format!("{} {}", "⚠".yellow(), diagnostic.message.yellow()),
        };
        println!("{}", line);

        for detail in &diagnostic.details {
            println!("   {} {}", "-".dimmed(), detail);
        }
    }

    if current_squad.is_some() {
        println!("{}", "━".repeat(70).dimmed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_rendering() {
        let d = Diagnostic::warning(Some("core"), "1 file(s) not found:")
            .with_details(vec!["X.py".to_string()]);

        assert!(d.is_warning());
        assert_eq!(d.squad.as_deref(), Some("core"));
        assert_eq!(d.to_plain(), "⚠ 1 file(s) not found:\n - X.py");
    }

    #[test]
    fn test_info_is_not_warning() {
        let d = Diagnostic::info(None, "done");
        assert!(!d.is_warning());
        assert_eq!(d.to_plain(), "ℹ done");
    }
}
