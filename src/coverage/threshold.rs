//! Coverage threshold validation

use colored::Colorize;

use super::Coverage;

/// Coverage of one group checked against the threshold
#[derive(Debug, Clone)]
pub struct ThresholdCheck {
    pub name: String,
    pub coverage: Coverage,
    /// Percentage points above (positive) or below the threshold
    pub delta: Option<f64>,
    pub passed: bool,
}

/// Result of threshold validation
#[derive(Debug, Clone)]
pub struct ThresholdResult {
    pub passed: bool,
    pub threshold: f64,
    pub checks: Vec<ThresholdCheck>,
}

impl ThresholdResult {
    pub fn failures(&self) -> impl Iterator<Item = &ThresholdCheck> {
        self.checks.iter().filter(|c| !c.passed)
    }

    pub fn print_summary(&self) {
        println!("Coverage threshold: {:.2}%", self.threshold);

        for check in &self.checks {
            let Some(delta) = check.delta else {
                println!(
                    "  {} {}: {} (no executable lines)",
                    "-".dimmed(),
                    check.name,
                    check.coverage
                );
                continue;
            };

            let status = if check.passed { "✓".green() } else { "✗".red() };
            let delta_str = if delta >= 0.0 {
                format!("+{:.2}%", delta).green()
            } else {
                format!("{:.2}%", delta).red()
            };

            println!(
                "  {} {}: {} ({})",
                status, check.name, check.coverage, delta_str
            );
        }
    }
}

/// Validate coverage of each named group against a minimum percentage.
///
/// Groups without executable lines have no measurable coverage and always
/// pass.
pub fn validate_threshold<'a, I>(groups: I, threshold: f64) -> ThresholdResult
where
    I: IntoIterator<Item = (&'a str, Coverage)>,
{
    let checks: Vec<ThresholdCheck> = groups
        .into_iter()
        .map(|(name, coverage)| {
            let delta = coverage.percentage().map(|pct| pct - threshold);
            ThresholdCheck {
                name: name.to_string(),
                coverage,
                delta,
                passed: delta.map(|d| d >= 0.0).unwrap_or(true),
            }
        })
        .collect();

    ThresholdResult {
        passed: checks.iter().all(|c| c.passed),
        threshold,
        checks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_validation() {
        let groups = vec![
            ("core", Coverage::Measured(0.75)),
            ("growth", Coverage::Measured(0.5)),
        ];

        // Passing case
        let result = validate_threshold(groups.clone(), 40.0);
        assert!(result.passed);
        assert_eq!(result.failures().count(), 0);

        // Failing case
        let result = validate_threshold(groups, 70.0);
        assert!(!result.passed);
        let failed: Vec<&str> = result.failures().map(|c| c.name.as_str()).collect();
        assert_eq!(failed, vec!["growth"]);
        assert!((result.checks[0].delta.unwrap() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_not_applicable_never_fails() {
        let result = validate_threshold(vec![("empty", Coverage::NotApplicable)], 100.0);
        assert!(result.passed);
        assert!(result.checks[0].delta.is_none());
    }

    #[test]
    fn test_exact_threshold_passes() {
        let result = validate_threshold(vec![("core", Coverage::Measured(0.8))], 80.0);
        assert!(result.passed);
    }
}
