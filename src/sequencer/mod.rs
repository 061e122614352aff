//! Multi-step launch orchestration.
//!
//! Runs the ordered asynchronous steps behind launch flows (deploy a
//! contract, mint assets, set claim conditions, airdrop) with observable
//! per-step progress, resume-from-failed-step retry, and analytics
//! reporting. The actual blockchain calls live behind the [`StepAction`]
//! seam; this module only sequences them.

mod reporter;
mod runner;
mod step;

pub use reporter::{LaunchReporter, LaunchSummary, NullReporter, TracingReporter};
pub use runner::{
    poll_until, run_chunked, ChunkCursor, SequenceError, Sequencer, StepAction, StepContext,
};
pub use step::{Step, StepList, StepStatus};
