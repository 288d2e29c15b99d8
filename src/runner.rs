//! Sequential plan execution
//!
//! Runs a plan's steps strictly in order, one at a time. Child command
//! output is inherited so the console keeps the full transcript of each
//! step. A required failure stops the run unless `keep_going` is set;
//! optional failures are recorded and the run continues.

use std::fs;
use std::process::Command;
use std::time::Instant;

use console::Style;

use crate::error::{GroundworkError, Result};
use crate::plan::Plan;
use crate::progress::ProgressDisplay;
use crate::report::{RunReport, StepOutcome};
use crate::step::{Step, StepAction};

/// Execution options for a run
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Attempt every step even after a required failure
    pub keep_going: bool,

    /// Print what would run without executing anything
    pub dry_run: bool,
}

/// Sequential plan runner
pub struct Runner {
    plan: Plan,
    options: RunOptions,
}

impl Runner {
    pub fn new(plan: Plan, options: RunOptions) -> Self {
        Self { plan, options }
    }

    /// Execute the plan and report every step's outcome
    pub fn run(&self) -> RunReport {
        let mut report = RunReport::default();

        if self.plan.is_empty() {
            return report;
        }

        if self.options.dry_run {
            for (index, step) in self.plan.steps.iter().enumerate() {
                print_banner(step, index, self.plan.len(), true);
            }
            return report;
        }

        let progress = ProgressDisplay::new(self.plan.len() as u64);
        let mut halted = false;

        for (index, step) in self.plan.steps.iter().enumerate() {
            if halted {
                report.record(StepOutcome::skipped(&step.name, step.required));
                continue;
            }

            progress.update_step(&step.name);

            let started = Instant::now();
            let result =
                progress.suspend(|| {
                    print_banner(step, index, self.plan.len(), false);
                    execute_step(step)
                });
            let duration = started.elapsed();

            match result {
                Ok(()) => {
                    report.record(StepOutcome::succeeded(&step.name, step.required, duration));
                }
                Err(detail) => {
                    report.record(StepOutcome::failed(
                        &step.name,
                        step.required,
                        detail,
                        duration,
                    ));
                    if step.required && !self.options.keep_going {
                        halted = true;
                    }
                }
            }

            progress.inc_step();
        }

        if halted {
            progress.abandon();
        } else {
            progress.finish();
        }

        report
    }
}

/// Run one step, returning a failure detail string on error
fn execute_step(step: &Step) -> std::result::Result<(), String> {
    match &step.action {
        StepAction::Command(argv) => run_command(&step.name, argv),
        StepAction::Copy { from, to } => copy_file(from, to).map_err(|e| e.to_string()),
    }
}

fn run_command(step_name: &str, argv: &[String]) -> std::result::Result<(), String> {
    let (program, args) = argv.split_first().ok_or_else(|| {
        GroundworkError::PlanInvalid {
            message: format!("step '{}' has an empty command", step_name),
        }
        .to_string()
    })?;

    // Child stdio is inherited: the step's transcript goes straight to
    // the console, as the shell script's did.
    let status = Command::new(program).args(args).status().map_err(|e| {
        GroundworkError::StepSpawnFailed {
            step: step_name.to_string(),
            program: program.clone(),
            reason: e.to_string(),
        }
        .to_string()
    })?;

    if status.success() {
        Ok(())
    } else {
        Err(status
            .code()
            .map(|c| format!("exit status {}", c))
            .unwrap_or_else(|| "terminated by signal".to_string()))
    }
}

fn copy_file(from: &std::path::Path, to: &std::path::Path) -> Result<()> {
    let copy_err = |reason: String| GroundworkError::CopyFailed {
        from: from.display().to_string(),
        to: to.display().to_string(),
        reason,
    };

    if let Some(parent) = to.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| copy_err(e.to_string()))?;
        }
    }

    // Overwrites any existing destination, matching `cp` semantics.
    fs::copy(from, to).map_err(|e| copy_err(e.to_string()))?;

    Ok(())
}

fn print_banner(step: &Step, index: usize, total: usize, dry_run: bool) {
    let heading = Style::new().bold().cyan();
    let dim = Style::new().dim();

    let prefix = if dry_run { "[dry-run] " } else { "" };
    println!(
        "{}{} {}",
        prefix,
        heading.apply_to(format!("==> [{}/{}]", index + 1, total)),
        heading.apply_to(&step.name)
    );
    println!("    {}", dim.apply_to(step.action.display()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::StepStatus;
    use tempfile::TempDir;

    fn plan_of(steps: Vec<Step>) -> Plan {
        Plan { steps }
    }

    fn statuses(report: &RunReport) -> Vec<StepStatus> {
        report.outcomes.iter().map(|o| o.status.clone()).collect()
    }

    #[test]
    fn test_all_steps_succeed() {
        let plan = plan_of(vec![
            Step::command("first", ["true"]),
            Step::command("second", ["true"]),
        ]);
        let report = Runner::new(plan, RunOptions::default()).run();
        assert!(report.success());
        assert_eq!(
            statuses(&report),
            vec![StepStatus::Succeeded, StepStatus::Succeeded]
        );
    }

    #[test]
    fn test_required_failure_skips_remaining_steps() {
        let plan = plan_of(vec![
            Step::command("first", ["true"]),
            Step::command("breaks", ["false"]),
            Step::command("never-runs", ["true"]),
        ]);
        let report = Runner::new(plan, RunOptions::default()).run();
        assert!(!report.success());
        assert_eq!(
            statuses(&report),
            vec![
                StepStatus::Succeeded,
                StepStatus::Failed,
                StepStatus::Skipped
            ]
        );
        assert_eq!(report.first_required_failure().unwrap().name, "breaks");
    }

    #[test]
    fn test_optional_failure_continues() {
        let plan = plan_of(vec![
            Step::command("best-effort", ["false"]).optional(),
            Step::command("still-runs", ["true"]),
        ]);
        let report = Runner::new(plan, RunOptions::default()).run();
        assert!(report.success());
        assert_eq!(
            statuses(&report),
            vec![StepStatus::Failed, StepStatus::Succeeded]
        );
    }

    #[test]
    fn test_keep_going_attempts_every_step() {
        let plan = plan_of(vec![
            Step::command("breaks", ["false"]),
            Step::command("still-runs", ["true"]),
        ]);
        let options = RunOptions {
            keep_going: true,
            ..Default::default()
        };
        let report = Runner::new(plan, options).run();
        assert!(!report.success());
        assert_eq!(
            statuses(&report),
            vec![StepStatus::Failed, StepStatus::Succeeded]
        );
    }

    #[test]
    fn test_missing_binary_is_a_step_failure() {
        let plan = plan_of(vec![
            Step::command("no-such-tool", ["groundwork-definitely-not-a-binary"]),
            Step::command("never-runs", ["true"]),
        ]);
        let report = Runner::new(plan, RunOptions::default()).run();
        assert!(!report.success());
        assert_eq!(report.outcomes[0].status, StepStatus::Failed);
        assert!(report.outcomes[0].detail.as_ref().unwrap().contains("spawn"));
        assert_eq!(report.outcomes[1].status, StepStatus::Skipped);
    }

    #[test]
    fn test_copy_step_overwrites_destination() {
        let temp = TempDir::new().unwrap();
        let from = temp.path().join("settings.template");
        let to = temp.path().join("settings");
        fs::write(&from, "template contents").unwrap();
        fs::write(&to, "stale contents").unwrap();

        let plan = plan_of(vec![Step::copy("settings", &from, &to)]);
        let report = Runner::new(plan, RunOptions::default()).run();

        assert!(report.success());
        assert_eq!(fs::read_to_string(&to).unwrap(), "template contents");
    }

    #[test]
    fn test_copy_step_creates_parent_directories() {
        let temp = TempDir::new().unwrap();
        let from = temp.path().join("settings.template");
        let to = temp.path().join("nested/dir/settings");
        fs::write(&from, "template contents").unwrap();

        let plan = plan_of(vec![Step::copy("settings", &from, &to)]);
        let report = Runner::new(plan, RunOptions::default()).run();

        assert!(report.success());
        assert_eq!(fs::read_to_string(&to).unwrap(), "template contents");
    }

    #[test]
    fn test_copy_step_missing_template_fails() {
        let temp = TempDir::new().unwrap();
        let from = temp.path().join("missing.template");
        let to = temp.path().join("settings");

        let plan = plan_of(vec![Step::copy("settings", &from, &to)]);
        let report = Runner::new(plan, RunOptions::default()).run();

        assert!(!report.success());
        assert_eq!(report.outcomes[0].status, StepStatus::Failed);
    }

    #[test]
    fn test_dry_run_executes_nothing() {
        let temp = TempDir::new().unwrap();
        let marker = temp.path().join("marker");

        let plan = plan_of(vec![Step::command(
            "would-touch",
            ["touch", marker.to_str().unwrap()],
        )]);
        let options = RunOptions {
            dry_run: true,
            ..Default::default()
        };
        let report = Runner::new(plan, options).run();

        assert!(report.success());
        assert!(report.outcomes.is_empty());
        assert!(!marker.exists());
    }
}
