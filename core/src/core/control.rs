// hookline/src/core/control.rs

//! Phase identifiers and the outcomes returned by each phase of a run.

use super::SharedState;
use std::fmt;

/// The three lists a `HookRegistry` owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookPhase {
  /// Runs before the caller's primary write.
  Before,
  /// Runs after the caller's primary write.
  After,
  /// Compensations, run only when the caller reports a failure.
  Cleanup,
}

impl fmt::Display for HookPhase {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      HookPhase::Before => "before",
      HookPhase::After => "after",
      HookPhase::Cleanup => "cleanup",
    };
    f.write_str(name)
  }
}

/// Result of a successful `run_before` / `run_after`: each step's return
/// value in registration order, plus the run's shared state.
#[derive(Debug)]
pub struct PhaseOutcome<R> {
  pub outputs: Vec<R>,
  pub shared: SharedState,
}

/// A compensation that itself failed.
#[derive(Debug)]
pub struct CleanupFailure<Err> {
  pub step_name: String,
  pub error: Err,
}

/// What `run_cleanup` did. Never an error: the caller still owns the error
/// that triggered the cleanup and decides what to surface.
#[derive(Debug)]
pub struct CleanupReport<Err> {
  /// Every compensation invoked, in invocation order.
  pub attempted: Vec<String>,
  pub failures: Vec<CleanupFailure<Err>>,
}

impl<Err> CleanupReport<Err> {
  pub(crate) fn new() -> Self {
    Self {
      attempted: Vec::new(),
      failures: Vec::new(),
    }
  }

  /// True when every attempted compensation succeeded.
  pub fn is_clean(&self) -> bool {
    self.failures.is_empty()
  }

  /// Names of the compensations that succeeded, in invocation order.
  pub fn compensated(&self) -> Vec<&str> {
    self
      .attempted
      .iter()
      .filter(|name| !self.failures.iter().any(|f| &f.step_name == *name))
      .map(String::as_str)
      .collect()
  }
}
