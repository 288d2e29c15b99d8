//! Provisioning plans
//!
//! A plan is an ordered list of steps. The built-in plan bootstraps a
//! development machine for the Shareabouts geospatial web app; alternative
//! plans can be loaded from a YAML file with `--plan`.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GroundworkError, Result};
use crate::step::{Step, StepAction};

/// SQL batch run against the postgres superuser session.
///
/// The role name, database name, and password are fixed literals; nothing is
/// read from the environment.
const CREATE_DATABASE_SQL: &str = "CREATE USER shareabouts WITH PASSWORD 'shareabouts'; \
     CREATE DATABASE shareabouts; \
     GRANT ALL ON DATABASE shareabouts TO shareabouts; \
     ALTER USER shareabouts SUPERUSER;";

/// An ordered provisioning plan
#[derive(Debug, Clone)]
pub struct Plan {
    pub steps: Vec<Step>,
}

impl Plan {
    /// The built-in Shareabouts dev-machine plan.
    ///
    /// Order matters: the package index refresh precedes installs, the
    /// database server install precedes role creation, and role creation
    /// precedes enabling PostGIS on the new database.
    pub fn builtin() -> Self {
        let steps = vec![
            Step::command("refresh-package-index", ["sudo", "apt-get", "update"]),
            Step::command(
                "zeromq-headers",
                ["sudo", "apt-get", "install", "-y", "libzmq-dev"],
            ),
            Step::command(
                "geospatial-stack",
                [
                    "sudo",
                    "apt-get",
                    "install",
                    "-y",
                    "binutils",
                    "gdal-bin",
                    "libproj-dev",
                    "postgresql-9.1",
                    "postgresql-9.1-postgis",
                ],
            ),
            Step::command(
                "upgrade-pip",
                ["sudo", "pip", "install", "-U", "pip", "setuptools"],
            ),
            Step::command(
                "python-requirements",
                ["sudo", "pip", "install", "-r", "requirements.txt"],
            ),
            Step::command("coverage-tool", ["sudo", "pip", "install", "coverage"]).optional(),
            Step::command(
                "create-database",
                ["sudo", "-u", "postgres", "psql", "-c", CREATE_DATABASE_SQL],
            ),
            Step::command(
                "enable-postgis",
                [
                    "sudo",
                    "-u",
                    "postgres",
                    "psql",
                    "-d",
                    "shareabouts",
                    "-c",
                    "CREATE EXTENSION postgis;",
                ],
            ),
            Step::copy(
                "local-settings",
                "src/project/local_settings.py.template",
                "src/project/local_settings.py",
            ),
        ];

        Self { steps }
    }

    /// Load a plan from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(GroundworkError::PlanNotFound {
                path: path.display().to_string(),
            });
        }

        let content = fs::read_to_string(path).map_err(|e| GroundworkError::PlanReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let file: PlanFile =
            serde_yaml::from_str(&content).map_err(|e| GroundworkError::PlanParseFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        file.into_plan()
    }

    /// Number of steps in the plan
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the plan has no steps
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Top-level plan file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanFile {
    /// Steps in execution order
    pub steps: Vec<StepSpec>,
}

/// A step declaration in a plan file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepSpec {
    /// Step name (unique within the plan)
    pub name: String,

    /// External command to run, argv form
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run: Option<Vec<String>>,

    /// File copy to perform
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copy: Option<CopySpec>,

    /// Whether a failure halts the run (defaults to true)
    #[serde(default = "default_required")]
    pub required: bool,
}

/// Source and destination of a copy step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopySpec {
    pub from: PathBuf,
    pub to: PathBuf,
}

fn default_required() -> bool {
    true
}

impl PlanFile {
    /// Validate the declarations and build an executable plan
    pub fn into_plan(self) -> Result<Plan> {
        if self.steps.is_empty() {
            return Err(GroundworkError::PlanInvalid {
                message: "plan has no steps".to_string(),
            });
        }

        let mut seen = HashSet::new();
        let mut steps = Vec::with_capacity(self.steps.len());

        for spec in self.steps {
            if spec.name.trim().is_empty() {
                return Err(GroundworkError::PlanInvalid {
                    message: "step with empty name".to_string(),
                });
            }
            if !seen.insert(spec.name.clone()) {
                return Err(GroundworkError::PlanInvalid {
                    message: format!("duplicate step name: {}", spec.name),
                });
            }

            let action = match (spec.run, spec.copy) {
                (Some(argv), None) => {
                    if argv.is_empty() {
                        return Err(GroundworkError::PlanInvalid {
                            message: format!("step '{}' has an empty command", spec.name),
                        });
                    }
                    StepAction::Command(argv)
                }
                (None, Some(copy)) => StepAction::Copy {
                    from: copy.from,
                    to: copy.to,
                },
                (Some(_), Some(_)) => {
                    return Err(GroundworkError::PlanInvalid {
                        message: format!("step '{}' declares both run and copy", spec.name),
                    });
                }
                (None, None) => {
                    return Err(GroundworkError::PlanInvalid {
                        message: format!("step '{}' declares neither run nor copy", spec.name),
                    });
                }
            };

            steps.push(Step {
                name: spec.name,
                action,
                required: spec.required,
            });
        }

        Ok(Plan { steps })
    }
}

impl From<&Step> for StepSpec {
    fn from(step: &Step) -> Self {
        match &step.action {
            StepAction::Command(argv) => Self {
                name: step.name.clone(),
                run: Some(argv.clone()),
                copy: None,
                required: step.required,
            },
            StepAction::Copy { from, to } => Self {
                name: step.name.clone(),
                run: None,
                copy: Some(CopySpec {
                    from: from.clone(),
                    to: to.clone(),
                }),
                required: step.required,
            },
        }
    }
}
