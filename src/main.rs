//! Groundwork - development machine provisioner
//!
//! A command line tool that provisions a development/test machine for the
//! Shareabouts geospatial web application: OS packages, pip dependencies,
//! a PostGIS-enabled PostgreSQL database, and local settings, executed as
//! an ordered, fail-fast plan of steps.

use clap::Parser;
use std::path::Path;

mod cli;
mod commands;
mod error;
mod plan;
mod progress;
mod report;
mod runner;
mod step;

use cli::{Cli, Commands};
use error::{GroundworkError, Result};

/// Change the working directory so relative plan paths (requirements.txt,
/// the settings template) resolve against the project checkout
fn apply_chdir(dir: &Path) -> Result<()> {
    std::env::set_current_dir(dir).map_err(|e| GroundworkError::ChdirFailed {
        path: dir.display().to_string(),
        reason: e.to_string(),
    })
}

fn main() {
    let cli = Cli::parse();

    if let Some(ref dir) = cli.chdir {
        if let Err(e) = apply_chdir(dir) {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    let result = match cli.command {
        Commands::Provision(args) => commands::provision::run(args, cli.verbose),
        Commands::Plan(args) => commands::plan::run(args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_apply_chdir_to_existing_directory() {
        let temp = TempDir::new().unwrap();
        let original = std::env::current_dir().unwrap();

        let result = apply_chdir(temp.path());
        // Restore before asserting so a failure does not poison other tests.
        std::env::set_current_dir(&original).unwrap();

        assert!(result.is_ok());
    }

    #[test]
    fn test_apply_chdir_to_missing_directory() {
        let result = apply_chdir(Path::new("/nonexistent/groundwork-dir"));
        assert!(matches!(
            result.unwrap_err(),
            GroundworkError::ChdirFailed { .. }
        ));
    }
}
