//! Error types and handling for groundwork
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for groundwork operations
#[derive(Error, Diagnostic, Debug)]
pub enum GroundworkError {
    // Plan errors
    #[error("Plan file not found: {path}")]
    #[diagnostic(
        code(groundwork::plan::not_found),
        help("Check the --plan path, or omit --plan to use the built-in plan")
    )]
    PlanNotFound { path: String },

    #[error("Failed to parse plan file: {path}")]
    #[diagnostic(
        code(groundwork::plan::parse_failed),
        help("Plan files are YAML with a top-level `steps` list")
    )]
    PlanParseFailed { path: String, reason: String },

    #[error("Invalid plan: {message}")]
    #[diagnostic(code(groundwork::plan::invalid))]
    PlanInvalid { message: String },

    #[error("Failed to read plan file: {path}")]
    #[diagnostic(code(groundwork::plan::read_failed))]
    PlanReadFailed { path: String, reason: String },

    // Step execution errors
    #[error("Failed to spawn '{program}' for step '{step}': {reason}")]
    #[diagnostic(
        code(groundwork::step::spawn_failed),
        help("Check that the command exists on this host and is on PATH")
    )]
    StepSpawnFailed {
        step: String,
        program: String,
        reason: String,
    },

    #[error("Failed to copy '{from}' to '{to}': {reason}")]
    #[diagnostic(
        code(groundwork::step::copy_failed),
        help("Check that the template file exists and the destination is writable")
    )]
    CopyFailed {
        from: String,
        to: String,
        reason: String,
    },

    // Run outcome errors
    #[error("Provisioning failed at step '{step}'")]
    #[diagnostic(
        code(groundwork::run::step_failed),
        help("Fix the failing step and re-run, or use --keep-going to attempt the remaining steps")
    )]
    ProvisionFailed { step: String },

    #[error("Provisioning incomplete: {failed} required step(s) failed")]
    #[diagnostic(code(groundwork::run::incomplete))]
    ProvisionIncomplete { failed: usize },

    // Invocation errors
    #[error("Provisioning not confirmed")]
    #[diagnostic(
        code(groundwork::run::not_confirmed),
        help("Pass --yes to provision without a confirmation prompt")
    )]
    NotConfirmed,

    #[error("Failed to change directory to '{path}': {reason}")]
    #[diagnostic(code(groundwork::run::chdir_failed))]
    ChdirFailed { path: String, reason: String },
}

/// Result type alias for groundwork operations
pub type Result<T> = std::result::Result<T, GroundworkError>;
