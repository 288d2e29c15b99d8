//! Provision command implementation
//!
//! Resolves the plan (built-in or from a file), confirms with the operator,
//! then runs the steps in order:
//! 1. Refresh the OS package index and install native packages
//! 2. Upgrade pip and install pinned Python requirements
//! 3. Create the database role and database, enable PostGIS
//! 4. Materialize local settings from the checked-in template
//!
//! A failing required step stops the run (use --keep-going to attempt the
//! rest); the summary names what succeeded, failed, and was skipped.

use std::io::IsTerminal;

use console::Style;

use crate::cli::ProvisionArgs;
use crate::error::{GroundworkError, Result};
use crate::plan::Plan;
use crate::report::RunReport;
use crate::runner::{RunOptions, Runner};

/// Run provision command
pub fn run(args: ProvisionArgs, verbose: bool) -> Result<()> {
    let plan = match args.plan {
        Some(ref path) => {
            if verbose {
                println!("Using plan file: {}", path.display());
            }
            Plan::load(path)?
        }
        None => {
            if verbose {
                println!("Using built-in plan");
            }
            Plan::builtin()
        }
    };

    if !args.dry_run {
        confirm(&plan, args.yes)?;
    }

    let options = RunOptions {
        keep_going: args.keep_going,
        dry_run: args.dry_run,
    };

    let report = Runner::new(plan, options).run();

    if args.dry_run {
        return Ok(());
    }

    report.print_summary();
    verdict(&report)
}

/// Provisioning mutates the host, so ask before running.
///
/// Without --yes, a terminal gets a prompt and anything else is refused so
/// scripts cannot provision a machine by accident.
fn confirm(plan: &Plan, yes: bool) -> Result<()> {
    if yes {
        return Ok(());
    }

    if !std::io::stdin().is_terminal() {
        return Err(GroundworkError::NotConfirmed);
    }

    let prompt = format!(
        "Provision this machine ({} steps, installs packages and creates a database)?",
        plan.len()
    );
    let confirmed = inquire::Confirm::new(&prompt)
        .with_default(false)
        .prompt()
        .map_err(|_| GroundworkError::NotConfirmed)?;

    if confirmed {
        Ok(())
    } else {
        println!("{}", Style::new().dim().apply_to("Aborted."));
        Err(GroundworkError::NotConfirmed)
    }
}

fn verdict(report: &RunReport) -> Result<()> {
    if report.success() {
        return Ok(());
    }

    // Fail-fast runs name the step that stopped them; keep-going runs
    // report how many required steps failed along the way.
    match report.first_required_failure() {
        Some(outcome) if report.required_failures() == 1 => {
            Err(GroundworkError::ProvisionFailed {
                step: outcome.name.clone(),
            })
        }
        _ => Err(GroundworkError::ProvisionIncomplete {
            failed: report.required_failures(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::StepOutcome;
    use std::time::Duration;

    #[test]
    fn test_verdict_success() {
        let mut report = RunReport::default();
        report.record(StepOutcome::succeeded("a", true, Duration::ZERO));
        assert!(verdict(&report).is_ok());
    }

    #[test]
    fn test_verdict_single_failure_names_step() {
        let mut report = RunReport::default();
        report.record(StepOutcome::failed(
            "create-database",
            true,
            "exit status 1",
            Duration::ZERO,
        ));
        match verdict(&report).unwrap_err() {
            GroundworkError::ProvisionFailed { step } => {
                assert_eq!(step, "create-database");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_verdict_multiple_failures_reports_count() {
        let mut report = RunReport::default();
        report.record(StepOutcome::failed("a", true, "exit status 1", Duration::ZERO));
        report.record(StepOutcome::failed("b", true, "exit status 2", Duration::ZERO));
        match verdict(&report).unwrap_err() {
            GroundworkError::ProvisionIncomplete { failed } => assert_eq!(failed, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_confirm_yes_skips_prompt() {
        let plan = Plan::builtin();
        assert!(confirm(&plan, true).is_ok());
    }
}
