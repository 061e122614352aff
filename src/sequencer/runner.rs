//! The launch sequencer: runs an ordered list of named asynchronous steps.
//!
//! Execution is strictly sequential. Each step is awaited to completion
//! before the next one starts; a failure records an error status on the
//! step, reports to analytics, and halts the run. There is no automatic
//! retry: recovery is always an explicit `retry(step_id)`, which re-executes
//! the failed step and everything after it (completed steps included, by
//! design, because later steps may depend on re-verification of earlier
//! ones). Idempotence of the underlying operations is the caller's
//! responsibility.
//!
//! Steps whose operation must be split into fixed-size batches use
//! [`run_chunked`]: the step stays pending across batches, narrates batch
//! progress through its label, and advances the shared [`ChunkCursor`] after
//! each successful batch so a retry resumes from the last completed batch.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::time::Instant;

use super::reporter::{LaunchReporter, LaunchSummary, NullReporter};
use super::step::{Step, StepList, StepStatus};

/// Errors surfaced by the sequencer itself.
#[derive(Debug, Error)]
pub enum SequenceError {
    /// Sequences with duplicate step ids are rejected at initialization:
    /// `retry` resolves ids by first match, so duplicates would silently
    /// resume from the wrong occurrence.
    #[error("duplicate step id '{0}' in sequence")]
    DuplicateStepId(String),

    /// A step's external operation failed; the run halted at that step.
    #[error("step '{step_id}' failed: {message}")]
    StepFailed { step_id: String, message: String },
}

/// Persistent batch position for a chunked step.
///
/// Advanced by the single active run after each successful batch; reset to
/// zero only after the entire sequence completes. Cloning shares the
/// position.
#[derive(Debug, Clone, Default)]
pub struct ChunkCursor {
    position: Arc<AtomicUsize>,
}

impl ChunkCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the next batch to execute.
    pub fn position(&self) -> usize {
        self.position.load(Ordering::SeqCst)
    }

    /// Record one more successfully completed batch.
    pub fn advance(&self) {
        self.position.fetch_add(1, Ordering::SeqCst);
    }

    /// Reset to batch zero. Called by the sequencer after full-sequence
    /// success, never mid-run.
    pub fn reset(&self) {
        self.position.store(0, Ordering::SeqCst);
    }
}

/// Context handed to a [`StepAction`] for one step execution.
///
/// All handles are cheap clones; the action may update its own step's label
/// and read or advance the chunk cursor, but must not touch other steps.
#[derive(Debug, Clone)]
pub struct StepContext {
    /// Id of the step being executed.
    pub step_id: String,
    /// Index of the step within the sequence.
    pub step_index: usize,
    /// Shared step list, for label narration.
    pub steps: StepList,
    /// Shared batch cursor for chunked execution.
    pub cursor: ChunkCursor,
}

impl StepContext {
    /// Update this step's label without changing its status.
    pub fn update_label(&self, label: &str) {
        self.steps.update_label(self.step_index, label);
    }
}

/// The external operation seam. One implementation serves a whole sequence;
/// it dispatches on `ctx.step_id` to the deploy/mint/etc. calls it wraps.
/// The sequencer treats the operation as opaque: resolve means the step
/// completed, an error means it failed with that error's display chain as
/// the message.
#[async_trait]
pub trait StepAction: Send + Sync {
    async fn execute(&self, ctx: StepContext) -> anyhow::Result<()>;
}

/// Runs launch sequences. See the module docs for the execution contract.
pub struct Sequencer {
    steps: StepList,
    action: Arc<dyn StepAction>,
    reporter: Arc<dyn LaunchReporter>,
    cursor: ChunkCursor,
}

impl Sequencer {
    /// Create a sequencer with no analytics reporting.
    pub fn new(action: Arc<dyn StepAction>) -> Self {
        Self {
            steps: StepList::new(),
            action,
            reporter: Arc::new(NullReporter),
            cursor: ChunkCursor::new(),
        }
    }

    /// Attach an analytics reporter.
    pub fn with_reporter(mut self, reporter: Arc<dyn LaunchReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Install the sequence. Every step starts `Idle`; the chunk cursor is
    /// cleared. Fails fast on duplicate step ids.
    pub fn initialize<I, S, L>(&self, steps: I) -> Result<(), SequenceError>
    where
        I: IntoIterator<Item = (S, L)>,
        S: Into<String>,
        L: Into<String>,
    {
        let steps: Vec<Step> = steps
            .into_iter()
            .map(|(id, label)| Step::new(id, label))
            .collect();

        let mut seen = std::collections::HashSet::new();
        for step in &steps {
            if !seen.insert(step.id.clone()) {
                return Err(SequenceError::DuplicateStepId(step.id.clone()));
            }
        }

        self.steps.replace(steps);
        self.cursor.reset();
        Ok(())
    }

    /// Shared handle to the step list, for progress rendering.
    pub fn steps(&self) -> StepList {
        self.steps.clone()
    }

    /// Shared batch cursor for chunked steps.
    pub fn cursor(&self) -> ChunkCursor {
        self.cursor.clone()
    }

    /// Update a step's label without changing its status.
    pub fn update_label(&self, index: usize, label: &str) {
        self.steps.update_label(index, label);
    }

    /// Execute steps `from_index..` in order.
    ///
    /// Each step is set `Pending` immediately before its operation starts
    /// and `Completed` on success. On failure the step is set
    /// `Error(message)`, the failure is reported, and the error propagates;
    /// later steps are not attempted. When the final step completes, success
    /// is reported and the chunk cursor resets to zero.
    pub async fn run(&self, from_index: usize) -> Result<(), SequenceError> {
        let total = self.steps.len();

        for index in from_index..total {
            let step_id = self
                .steps
                .id_at(index)
                .expect("step index within initialized bounds");

            self.steps.set_status(index, StepStatus::Pending);
            tracing::debug!(step = %step_id, index, "step started");

            let ctx = StepContext {
                step_id: step_id.clone(),
                step_index: index,
                steps: self.steps.clone(),
                cursor: self.cursor.clone(),
            };

            match self.action.execute(ctx).await {
                Ok(()) => {
                    self.steps.set_status(index, StepStatus::Completed);
                    tracing::debug!(step = %step_id, index, "step completed");
                }
                Err(err) => {
                    // Alternate formatting flattens the whole context chain
                    // into one display string.
                    let message = format!("{err:#}");
                    self.steps
                        .set_status(index, StepStatus::Error(message.clone()));
                    self.reporter.launch_failed(&step_id, &message);
                    return Err(SequenceError::StepFailed { step_id, message });
                }
            }
        }

        let summary = LaunchSummary {
            step_ids: self
                .steps
                .snapshot()
                .into_iter()
                .map(|s| s.id)
                .collect(),
        };
        self.reporter.launch_succeeded(&summary);
        self.cursor.reset();
        Ok(())
    }

    /// Re-run from the step with the given id to the end of the sequence.
    /// An unknown id is a no-op.
    pub async fn retry(&self, step_id: &str) -> Result<(), SequenceError> {
        match self.steps.index_of(step_id) {
            Some(index) => self.run(index).await,
            None => Ok(()),
        }
    }
}

/// Execute `items` in fixed-size batches within a single step.
///
/// The step's label narrates progress as "label (batch i of n)". Batches run
/// strictly back-to-back; after each successful batch the shared cursor
/// advances, so a retry of the step skips batches that already completed.
/// The cursor is deliberately not reset here: that happens only after the
/// whole sequence succeeds.
pub async fn run_chunked<T, F, Fut>(
    ctx: &StepContext,
    base_label: &str,
    chunk_size: usize,
    items: &[T],
    mut op: F,
) -> anyhow::Result<()>
where
    T: Clone,
    F: FnMut(Vec<T>) -> Fut,
    Fut: Future<Output = anyhow::Result<()>>,
{
    assert!(chunk_size > 0, "chunk size must be positive");
    let total_batches = items.len().div_ceil(chunk_size);
    let start = ctx.cursor.position().min(total_batches);

    for (batch_index, batch) in items.chunks(chunk_size).enumerate().skip(start) {
        ctx.update_label(&format!(
            "{} (batch {} of {})",
            base_label,
            batch_index + 1,
            total_batches
        ));
        op(batch.to_vec()).await?;
        ctx.cursor.advance();
    }

    Ok(())
}

/// Poll `check` at a fixed interval until it returns true or the wall-clock
/// budget is spent. Returns whether the condition became true. This is
/// bounded waiting, not cancellation: the asynchronous work being observed
/// keeps running either way.
pub async fn poll_until<F, Fut>(budget: Duration, interval: Duration, mut check: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let deadline = Instant::now() + budget;
    loop {
        if check().await {
            return true;
        }
        if Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(interval).await;
    }
}
