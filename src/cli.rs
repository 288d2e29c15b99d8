//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Groundwork - development machine provisioner
///
/// Provision a dev/test machine for the Shareabouts geospatial web app:
/// OS packages, pip dependencies, a PostGIS-enabled database, and local
/// settings, run as an ordered fail-fast plan.
#[derive(Parser, Debug)]
#[command(
    name = "groundwork",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Development machine provisioner for Shareabouts",
    long_about = "Groundwork provisions a development/test machine for the Shareabouts \
                  geospatial web application: OS packages, pip dependencies, a \
                  PostGIS-enabled PostgreSQL database, and local settings. Steps run \
                  in a fixed order and a failing required step stops the run.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  groundwork plan\n    \
                  groundwork provision --yes\n    \
                  groundwork provision --dry-run\n    \
                  groundwork provision --plan custom.yaml --keep-going\n\n\
                  \x1b[1m\x1b[32mDocumentation:\x1b[0m\n    \
                  https://github.com/openplans/groundwork"
)]
pub struct Cli {
    /// Run as if invoked from this directory (requirements.txt and the
    /// settings template resolve relative to it)
    #[arg(long, short = 'C', global = true, value_name = "DIR")]
    pub chdir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the provisioning plan against this host
    Provision(ProvisionArgs),

    /// Print the resolved plan without executing anything
    Plan(PlanArgs),

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the provision command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Provision with the built-in plan:\n    groundwork provision --yes\n\n\
                  Preview without touching the host:\n    groundwork provision --dry-run\n\n\
                  Use a custom plan file:\n    groundwork provision --plan custom.yaml --yes\n\n\
                  Attempt every step even after a failure:\n    groundwork provision --keep-going --yes")]
pub struct ProvisionArgs {
    /// Plan file to run instead of the built-in plan
    #[arg(long, value_name = "FILE")]
    pub plan: Option<PathBuf>,

    /// Attempt every step even after a required step fails
    #[arg(long)]
    pub keep_going: bool,

    /// Print each step without executing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

/// Arguments for the plan command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Show the built-in plan:\n    groundwork plan\n\n\
                  Show a custom plan file:\n    groundwork plan --plan custom.yaml\n\n\
                  Emit the plan as JSON:\n    groundwork plan --json")]
pub struct PlanArgs {
    /// Plan file to show instead of the built-in plan
    #[arg(long, value_name = "FILE")]
    pub plan: Option<PathBuf>,

    /// Emit the plan as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    groundwork completions --shell bash > ~/.bash_completion.d/groundwork\n\n\
                  Generate zsh completions:\n    groundwork completions --shell zsh > ~/.zfunc/_groundwork\n\n\
                  Generate fish completions:\n    groundwork completions --shell fish > ~/.config/fish/completions/groundwork.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    #[arg(long)]
    pub shell: String,
}
