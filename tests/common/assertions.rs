//! Assertion helpers for tests.

use pretty_assertions::assert_eq;
use swatchpick::services::{ReplayReport, StepOutcome};

/// Assert a replay finished without any failed steps
pub fn assert_no_failed_steps(report: &ReplayReport) {
    let failed: Vec<&StepOutcome> = report.failed_steps().collect();
    assert!(failed.is_empty(), "Expected no failed steps, got {failed:#?}");
}

/// Assert a step produced the given color
pub fn assert_step_color(report: &ReplayReport, step: usize, expected: &str) {
    let outcome = report
        .steps
        .get(step)
        .unwrap_or_else(|| panic!("No step {step} in report ({} steps)", report.steps.len()));
    assert_eq!(
        outcome.color.as_deref(),
        Some(expected),
        "Step {step} ({}) produced the wrong color",
        outcome.event
    );
}
