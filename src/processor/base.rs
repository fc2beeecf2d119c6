use crate::types::PipelineStats;
use tracing::info;

/// Pipeline steps, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStep {
    Fetch,
    Parse,
    Store,
    Join,
    Project,
}

impl PipelineStep {
    pub fn label(&self) -> &'static str {
        match self {
            PipelineStep::Fetch => "fetch",
            PipelineStep::Parse => "parse",
            PipelineStep::Store => "store",
            PipelineStep::Join => "join",
            PipelineStep::Project => "project",
        }
    }
}

/// Progress reporting utilities
pub struct ProgressReporter;

impl ProgressReporter {
    /// Format elapsed seconds into human-readable time (days, hours, minutes, seconds)
    pub fn format_elapsed_time(elapsed_secs: f64) -> String {
        if elapsed_secs < 60.0 {
            return format!("{:.1}s", elapsed_secs);
        }

        let days = (elapsed_secs / 86400.0).floor();
        let hours = ((elapsed_secs % 86400.0) / 3600.0).floor();
        let minutes = ((elapsed_secs % 3600.0) / 60.0).floor();
        let seconds = elapsed_secs % 60.0;

        if days > 0.0 {
            format!(
                "{}d {}h {}m {:.0}s ({:.1}s)",
                days, hours, minutes, seconds, elapsed_secs
            )
        } else if hours > 0.0 {
            format!("{}h {}m {:.0}s ({:.1}s)", hours, minutes, seconds, elapsed_secs)
        } else {
            format!("{}m {:.0}s ({:.1}s)", minutes, seconds, elapsed_secs)
        }
    }

    /// One diagnostic line on stdout per finished step
    pub fn report_step(step: PipelineStep, detail: &str) {
        println!("{}", Self::step_line(step, detail));
    }

    pub fn step_line(step: PipelineStep, detail: &str) -> String {
        format!("[{}] {}", step.label(), detail)
    }

    pub fn report_completion(stats: &PipelineStats) {
        let elapsed = Self::format_elapsed_time(stats.timing.elapsed().as_secs_f64());
        info!("=== Load Completed ===");
        info!("  {}", stats.summary());
        info!("  Time elapsed: {}", elapsed);
    }
}
