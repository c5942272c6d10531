//! Guaranteed side-effect reversal
//!
//! Scenarios mutate real host state: fixture files, registered SSH keys,
//! started service units. Each mutation registers its reversal here at the
//! point it happens, and the stack runs every action exactly once when it
//! goes out of scope, however the scenario exited. Reversal runs in LIFO
//! order. A failed action is logged and never overturns the scenario
//! verdict.

use crate::common::Result;

type Action = Box<dyn FnOnce() -> Result<()>>;

/// LIFO stack of labeled reversal actions, released on drop
#[derive(Default)]
pub struct CleanupStack {
    actions: Vec<(String, Action)>,
}

impl CleanupStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a reversal action for a side effect that just happened
    pub fn defer<F>(&mut self, label: &str, action: F)
    where
        F: FnOnce() -> Result<()> + 'static,
    {
        self.actions.push((label.to_string(), Box::new(action)));
    }
}

impl Drop for CleanupStack {
    fn drop(&mut self) {
        while let Some((label, action)) = self.actions.pop() {
            tracing::debug!(action = %label, "running cleanup");
            if let Err(e) = action() {
                tracing::warn!(action = %label, "cleanup failed: {e}");
            }
        }
    }
}
