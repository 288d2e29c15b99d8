//! Provisioning step model
//!
//! A step is a named host mutation: either one external command invocation
//! or one file copy. Required steps halt the run on failure; optional steps
//! are attempted and their failures recorded without stopping the sequence.

use std::path::PathBuf;

/// The host mutation a step performs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepAction {
    /// Run an external command (argv form, no shell)
    Command(Vec<String>),

    /// Copy a file, overwriting the destination if it exists
    Copy { from: PathBuf, to: PathBuf },
}

impl StepAction {
    /// One-line rendering for banners, `plan` output, and dry runs
    pub fn display(&self) -> String {
        match self {
            StepAction::Command(argv) => argv.join(" "),
            StepAction::Copy { from, to } => {
                format!("cp {} {}", from.display(), to.display())
            }
        }
    }
}

/// A single provisioning step
#[derive(Debug, Clone)]
pub struct Step {
    /// Step name shown in banners and the run summary
    pub name: String,

    /// What the step does to the host
    pub action: StepAction,

    /// Whether a failure of this step halts the run
    pub required: bool,
}

impl Step {
    /// Create a required command step
    pub fn command<I, S>(name: impl Into<String>, argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            action: StepAction::Command(argv.into_iter().map(Into::into).collect()),
            required: true,
        }
    }

    /// Create a required file-copy step
    pub fn copy(
        name: impl Into<String>,
        from: impl Into<PathBuf>,
        to: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            action: StepAction::Copy {
                from: from.into(),
                to: to.into(),
            },
            required: true,
        }
    }

    /// Mark the step as best-effort
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}
