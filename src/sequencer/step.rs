//! Step state model for launch sequences.
//!
//! A sequence is an ordered list of named steps. Each step carries a stable
//! id, a human-readable label (mutable, so a running step can narrate
//! sub-progress), and a status. The list lives behind a cloneable handle so
//! the UI can snapshot progress while the run loop mutates it; only the
//! active run loop ever writes.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

/// Status of a single step in a launch sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum StepStatus {
    /// Created but not yet started.
    Idle,
    /// Currently executing (stays pending across chunked batches).
    Pending,
    /// Finished successfully.
    Completed,
    /// Failed with a display message.
    Error(String),
}

impl StepStatus {
    /// Whether this status is terminal for a single run attempt.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Error(_))
    }
}

/// One unit of asynchronous work in a launch sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Stable identifier, unique within the sequence.
    pub id: String,
    /// Human-readable description shown in progress UIs.
    pub label: String,
    pub status: StepStatus,
}

impl Step {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            status: StepStatus::Idle,
        }
    }
}

/// Shared handle over the ordered step list.
///
/// Cloning is cheap; all clones view the same list. Writes happen in place
/// under a single-writer invariant: only the active run loop (or the step it
/// is currently awaiting) mutates, so readers only ever observe consistent
/// snapshots.
#[derive(Debug, Clone, Default)]
pub struct StepList {
    inner: Arc<Mutex<Vec<Step>>>,
}

impl StepList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entire sequence (used by `Sequencer::initialize`).
    pub(crate) fn replace(&self, steps: Vec<Step>) {
        *self.lock() = steps;
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copy of the current sequence, for rendering.
    pub fn snapshot(&self) -> Vec<Step> {
        self.lock().clone()
    }

    /// Id of the step at `index`, if in bounds.
    pub fn id_at(&self, index: usize) -> Option<String> {
        self.lock().get(index).map(|s| s.id.clone())
    }

    /// Index of the step with the given id (first match).
    pub fn index_of(&self, step_id: &str) -> Option<usize> {
        self.lock().iter().position(|s| s.id == step_id)
    }

    /// Status of the step at `index`, if in bounds.
    pub fn status_of(&self, index: usize) -> Option<StepStatus> {
        self.lock().get(index).map(|s| s.status.clone())
    }

    /// Set the status of the step at `index`. Out-of-bounds writes are
    /// ignored; the run loop only addresses indices it was initialized with.
    pub fn set_status(&self, index: usize, status: StepStatus) {
        if let Some(step) = self.lock().get_mut(index) {
            step.status = status;
        }
    }

    /// Update the label of the step at `index` without touching its status.
    /// Lets a running step narrate sub-progress ("batch 2 of 5").
    pub fn update_label(&self, index: usize, label: &str) {
        if let Some(step) = self.lock().get_mut(index) {
            step.label = label.to_string();
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Step>> {
        self.inner.lock().expect("step list lock poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_list() -> StepList {
        let list = StepList::new();
        list.replace(vec![
            Step::new("deploy", "Deploying your contract"),
            Step::new("mint", "Minting tokens"),
            Step::new("airdrop", "Airdropping tokens"),
        ]);
        list
    }

    #[test]
    fn test_new_steps_start_idle() {
        let list = sample_list();
        assert_eq!(list.len(), 3);
        for step in list.snapshot() {
            assert_eq!(step.status, StepStatus::Idle);
        }
    }

    #[test]
    fn test_index_of_finds_first_match() {
        let list = sample_list();
        assert_eq!(list.index_of("mint"), Some(1));
        assert_eq!(list.index_of("missing"), None);
    }

    #[test]
    fn test_set_status_in_place() {
        let list = sample_list();
        list.set_status(0, StepStatus::Pending);
        assert_eq!(list.status_of(0), Some(StepStatus::Pending));
        // Other steps untouched
        assert_eq!(list.status_of(1), Some(StepStatus::Idle));
    }

    #[test]
    fn test_update_label_preserves_status() {
        let list = sample_list();
        list.set_status(1, StepStatus::Pending);
        list.update_label(1, "Minting tokens (batch 2 of 5)");
        let steps = list.snapshot();
        assert_eq!(steps[1].label, "Minting tokens (batch 2 of 5)");
        assert_eq!(steps[1].status, StepStatus::Pending);
    }

    #[test]
    fn test_out_of_bounds_writes_ignored() {
        let list = sample_list();
        list.set_status(10, StepStatus::Completed);
        list.update_label(10, "nope");
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_error_status_is_terminal() {
        assert!(StepStatus::Error("boom".into()).is_terminal());
        assert!(StepStatus::Completed.is_terminal());
        assert!(!StepStatus::Pending.is_terminal());
        assert!(!StepStatus::Idle.is_terminal());
    }

    #[test]
    fn test_status_serializes_tagged() {
        let json = serde_json::to_value(StepStatus::Error("rpc timeout".into())).unwrap();
        assert_eq!(json["state"], "error");
        assert_eq!(json["message"], "rpc timeout");
        let json = serde_json::to_value(StepStatus::Idle).unwrap();
        assert_eq!(json["state"], "idle");
    }
}
