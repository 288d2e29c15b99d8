//! Plan command implementation
//!
//! Prints the resolved plan (built-in or from a file) without executing
//! anything, either as a numbered listing or as JSON.

use console::Style;

use crate::cli::PlanArgs;
use crate::error::{GroundworkError, Result};
use crate::plan::{Plan, PlanFile, StepSpec};

/// Run plan command
pub fn run(args: PlanArgs) -> Result<()> {
    let plan = match args.plan {
        Some(path) => Plan::load(&path)?,
        None => Plan::builtin(),
    };

    if args.json {
        print_json(&plan)?;
    } else {
        print_listing(&plan);
    }

    Ok(())
}

fn print_json(plan: &Plan) -> Result<()> {
    let file = PlanFile {
        steps: plan.steps.iter().map(StepSpec::from).collect(),
    };
    let json =
        serde_json::to_string_pretty(&file).map_err(|e| GroundworkError::PlanInvalid {
            message: e.to_string(),
        })?;
    println!("{}", json);
    Ok(())
}

fn print_listing(plan: &Plan) {
    let heading = Style::new().bold();
    let name_style = Style::new().bold().yellow();
    let dim = Style::new().dim();

    println!(
        "{}",
        heading.apply_to(format!("Plan ({} steps):", plan.len()))
    );
    for (index, step) in plan.steps.iter().enumerate() {
        let optional = if step.required { "" } else { " (optional)" };
        println!(
            "  {:>2}. {}{}",
            index + 1,
            name_style.apply_to(&step.name),
            optional
        );
        println!("      {}", dim.apply_to(step.action.display()));
    }
}
