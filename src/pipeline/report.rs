//! Step outcomes and the aggregated build report.
//!
//! Page builders never abort a build. Each one returns a [`StepOutcome`]
//! and the pipeline collects them into a [`BuildReport`] that is logged
//! once, when the build finishes.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The step ran and wrote its region.
    Ok,
    /// Something the step needs is absent; the region was left alone.
    Skipped(String),
    /// The step tried and failed; the region was left alone.
    Failed(String),
}

impl StepOutcome {
    pub fn skipped(reason: impl Into<String>) -> Self {
        StepOutcome::Skipped(reason.into())
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        StepOutcome::Failed(reason.into())
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, StepOutcome::Ok)
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, StepOutcome::Skipped(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, StepOutcome::Failed(_))
    }
}

impl fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepOutcome::Ok => f.write_str("ok"),
            StepOutcome::Skipped(reason) => write!(f, "skipped ({})", reason),
            StepOutcome::Failed(reason) => write!(f, "failed ({})", reason),
        }
    }
}

/// Named outcomes in the order the steps finished.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    steps: Vec<(String, StepOutcome)>,
}

impl BuildReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, step: impl Into<String>, outcome: StepOutcome) {
        self.steps.push((step.into(), outcome));
    }

    pub fn merge(&mut self, other: BuildReport) {
        self.steps.extend(other.steps);
    }

    pub fn steps(&self) -> &[(String, StepOutcome)] {
        &self.steps
    }

    /// The latest outcome recorded for `step`.
    pub fn outcome(&self, step: &str) -> Option<&StepOutcome> {
        self.steps
            .iter()
            .rev()
            .find(|(name, _)| name == step)
            .map(|(_, outcome)| outcome)
    }

    pub fn has_failures(&self) -> bool {
        self.steps.iter().any(|(_, outcome)| outcome.is_failed())
    }

    /// Writes every step to the log: failures as warnings, skips as info.
    pub fn log(&self) {
        for (step, outcome) in &self.steps {
            match outcome {
                StepOutcome::Ok => log::debug!("{}: ok", step),
                StepOutcome::Skipped(reason) => log::info!("{}: skipped, {}", step, reason),
                StepOutcome::Failed(reason) => {
                    log::warn!("{}: failed, {}; existing content kept", step, reason)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_keeps_latest_outcome_per_step() {
        let mut report = BuildReport::new();
        report.record("themes", StepOutcome::failed("HTTP 404"));
        report.record("themes", StepOutcome::Ok);
        assert_eq!(report.outcome("themes"), Some(&StepOutcome::Ok));
        assert_eq!(report.outcome("about"), None);
        assert_eq!(report.steps().len(), 2);
    }

    #[test]
    fn test_merge_and_failure_detection() {
        let mut report = BuildReport::new();
        report.record("cover", StepOutcome::Ok);
        let mut other = BuildReport::new();
        other.record("snapshot", StepOutcome::skipped("no radar"));
        report.merge(other);
        assert!(!report.has_failures());
        report.record("about", StepOutcome::failed("timeout"));
        assert!(report.has_failures());
        assert_eq!(report.outcome("about").unwrap().to_string(), "failed (timeout)");
    }
}
