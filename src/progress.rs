//! Progress bar display for provisioning runs

use indicatif::{ProgressBar, ProgressStyle};

/// Progress display for a provisioning run
pub struct ProgressDisplay {
    step_pb: ProgressBar,
}

impl ProgressDisplay {
    /// Create a new progress display with total step count
    pub fn new(total_steps: u64) -> Self {
        let step_style = ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-");

        let step_pb = ProgressBar::new(total_steps);
        step_pb.set_style(step_style);

        Self { step_pb }
    }

    /// Update to show the step currently running
    pub fn update_step(&self, step_name: &str) {
        self.step_pb.set_message(step_name.to_string());
    }

    /// Increment step progress
    pub fn inc_step(&self) {
        self.step_pb.inc(1);
    }

    /// Hide the bar while a child command writes to the inherited console
    pub fn suspend<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        self.step_pb.suspend(f)
    }

    /// Finish the run display
    pub fn finish(&self) {
        self.step_pb.finish_and_clear();
    }

    /// Abandon on error
    pub fn abandon(&self) {
        self.step_pb.abandon();
    }
}
