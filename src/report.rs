//! Run reports
//!
//! Records the outcome of every step in a run and renders the end-of-run
//! summary, giving provisioning an explicit overall verdict.

use std::time::Duration;

use console::Style;

/// How a single step ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    /// Exit status zero (or copy completed)
    Succeeded,

    /// Non-zero exit, spawn failure, or copy failure
    Failed,

    /// Not attempted because an earlier required step failed
    Skipped,
}

/// Outcome of one step
#[derive(Debug, Clone)]
pub struct StepOutcome {
    pub name: String,
    pub required: bool,
    pub status: StepStatus,
    /// Failure detail (exit code or error reason)
    pub detail: Option<String>,
    pub duration: Duration,
}

impl StepOutcome {
    pub fn succeeded(name: impl Into<String>, required: bool, duration: Duration) -> Self {
        Self {
            name: name.into(),
            required,
            status: StepStatus::Succeeded,
            detail: None,
            duration,
        }
    }

    pub fn failed(
        name: impl Into<String>,
        required: bool,
        detail: impl Into<String>,
        duration: Duration,
    ) -> Self {
        Self {
            name: name.into(),
            required,
            status: StepStatus::Failed,
            detail: Some(detail.into()),
            duration,
        }
    }

    pub fn skipped(name: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            required,
            status: StepStatus::Skipped,
            detail: None,
            duration: Duration::ZERO,
        }
    }
}

/// Outcome of a whole run
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub outcomes: Vec<StepOutcome>,
}

impl RunReport {
    pub fn record(&mut self, outcome: StepOutcome) {
        self.outcomes.push(outcome);
    }

    /// A run succeeds when every required step succeeded
    pub fn success(&self) -> bool {
        self.outcomes
            .iter()
            .filter(|o| o.required)
            .all(|o| o.status == StepStatus::Succeeded)
    }

    /// Number of required steps that failed
    pub fn required_failures(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.required && o.status == StepStatus::Failed)
            .count()
    }

    /// First failed required step, if any
    pub fn first_required_failure(&self) -> Option<&StepOutcome> {
        self.outcomes
            .iter()
            .find(|o| o.required && o.status == StepStatus::Failed)
    }

    /// Print the end-of-run summary
    pub fn print_summary(&self) {
        let ok = Style::new().green();
        let bad = Style::new().red().bold();
        let dim = Style::new().dim();

        println!();
        println!("{}", Style::new().bold().apply_to("Summary:"));
        for outcome in &self.outcomes {
            let (marker, label) = match outcome.status {
                StepStatus::Succeeded => (ok.apply_to("ok").to_string(), String::new()),
                StepStatus::Failed => {
                    let detail = outcome
                        .detail
                        .as_deref()
                        .map(|d| format!(" ({})", d))
                        .unwrap_or_default();
                    (bad.apply_to("FAILED").to_string(), detail)
                }
                StepStatus::Skipped => (dim.apply_to("skipped").to_string(), String::new()),
            };

            let timing = if outcome.status == StepStatus::Skipped {
                String::new()
            } else {
                format!(" [{:.1}s]", outcome.duration.as_secs_f64())
            };

            let optional = if outcome.required { "" } else { " (optional)" };
            println!(
                "  {:<24} {}{}{}{}",
                outcome.name, marker, label, optional, timing
            );
        }

        println!();
        if self.success() {
            println!("{}", ok.apply_to("Provisioning complete."));
        } else {
            println!("{}", bad.apply_to("Provisioning failed."));
        }
    }
}
