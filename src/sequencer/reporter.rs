//! Analytics reporting seam for launch runs.
//!
//! The sequencer reports terminal outcomes (one failure event per halted
//! run, one success event per completed run) to a caller-supplied reporter.
//! Calls are fire-and-forget: no return value is consumed and a reporter
//! must never block the run loop.

use serde::Serialize;

/// Summary handed to the reporter when every step completed.
#[derive(Debug, Clone, Serialize)]
pub struct LaunchSummary {
    /// Ids of the steps that ran, in order.
    pub step_ids: Vec<String>,
}

/// Receives terminal launch outcomes. Implementations typically forward to
/// an analytics backend; they must be cheap and infallible from the
/// sequencer's point of view.
pub trait LaunchReporter: Send + Sync {
    /// A step failed and halted the run.
    fn launch_failed(&self, step_id: &str, message: &str);

    /// Every step completed.
    fn launch_succeeded(&self, summary: &LaunchSummary);
}

/// Reporter that drops every event. Default when no analytics is wired up.
#[derive(Debug, Default)]
pub struct NullReporter;

impl LaunchReporter for NullReporter {
    fn launch_failed(&self, _step_id: &str, _message: &str) {}
    fn launch_succeeded(&self, _summary: &LaunchSummary) {}
}

/// Reporter that emits structured log events.
#[derive(Debug, Default)]
pub struct TracingReporter;

impl LaunchReporter for TracingReporter {
    fn launch_failed(&self, step_id: &str, message: &str) {
        tracing::warn!(step = %step_id, error = %message, "launch failed");
    }

    fn launch_succeeded(&self, summary: &LaunchSummary) {
        tracing::info!(steps = summary.step_ids.len(), "launch succeeded");
    }
}
