use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;

use squadcov::config::ReportPaths;
use squadcov::coverage::validate_threshold;
use squadcov::diagnostics::print_diagnostics;
use squadcov::pipeline::{self, Outcome};

#[derive(Parser)]
#[command(name = "squadcov")]
#[command(about = "Per-squad code coverage report from a raw coverage export")]
#[command(version)]
struct Cli {
    /// Working directory of the project; its prefix is stripped from file paths
    workdir: PathBuf,

    /// Directory containing config.json
    scriptdir: PathBuf,

    /// Coverage export (default: <WORKDIR>/../DerivedData/raw_report.json)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Squad config (default: <SCRIPTDIR>/config.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Report directory (default: <WORKDIR>/../CoverageReport)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Exit non-zero when a squad's coverage is below this percentage
    #[arg(long, value_name = "PERCENT")]
    fail_under: Option<f64>,

    /// Only print warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    match run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}

/// Returns whether the run passed the coverage gate
fn run() -> Result<bool> {
    let cli = Cli::parse();

    if let Some(threshold) = cli.fail_under {
        if !(0.0..=100.0).contains(&threshold) {
            anyhow::bail!("--fail-under must be between 0 and 100, got {}", threshold);
        }
    }

    let paths = ReportPaths::resolve(&cli.workdir, &cli.scriptdir).with_overrides(
        cli.input,
        cli.config,
        cli.output_dir,
    );

    let outcome = pipeline::run(&paths)?;
    print_diagnostics(outcome.diagnostics(), cli.quiet);

    match &outcome {
        Outcome::NothingClassified { .. } => {
            println!("\n{} {}", "⚠".yellow(), "Could not generate report.".yellow());
            return Ok(true);
        }
        Outcome::Written {
            classification,
            table_rows,
            paths: written,
        } => {
            if !cli.quiet {
                println!(
                    "\n{} {} row(s) written: {} file(s) assigned to squads, {} undetermined, {} warning(s)",
                    "→".blue(),
                    table_rows,
                    classification.classified_count(),
                    classification.undetermined.len(),
                    classification.warnings().count()
                );
            }
            println!("\n{} Enter following command to view coverage report.", "ℹ".blue());
            for path in written {
                println!(">  open {}", path.display().to_string().green());
            }
            println!();
        }
    }

    let Some(threshold) = cli.fail_under else {
        return Ok(true);
    };

    let result = validate_threshold(
        outcome.squads().iter().map(|s| (s.name.as_str(), s.coverage)),
        threshold,
    );
    result.print_summary();
    if !result.passed {
        let failed: Vec<&str> = result.failures().map(|c| c.name.as_str()).collect();
        eprintln!(
            "{} coverage below {:.2}% for: {}",
            "✗".red(),
            threshold,
            failed.join(", ")
        );
    }

    Ok(result.passed)
}
