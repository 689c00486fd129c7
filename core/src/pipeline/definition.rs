// hookline/src/pipeline/definition.rs

//! Contains the `HookRegistry<TData, Err, R>` struct and the lookups the
//! runner uses to plan compensation.

use crate::core::control::HookPhase;
use crate::core::hook::{CleanupFn, HookFn};
use crate::error::HookError;
use std::collections::HashSet;

pub(crate) struct RegisteredHook<TData, Err, R>
where
  TData: Send + Sync + 'static,
{
  pub(crate) name: String,
  pub(crate) run: HookFn<TData, Err, R>,
}

pub(crate) struct RegisteredCleanup<TData, Err>
where
  TData: Send + Sync + 'static,
{
  pub(crate) name: String,
  pub(crate) run: CleanupFn<TData, Err>,
}

/// One business transaction expressed as ordered before/after step lists plus
/// their compensations.
///
/// A registry is wired once at startup and then shared immutably (usually in
/// an `Arc`) by every request; it holds no per-run state. Each invocation
/// calls [`begin`](HookRegistry::begin) to get a `HookRun` with its own
/// `SharedState`.
///
/// `Err` must be `From<HookError>` so that engine-level failures (such as a
/// missing shared value) reach the caller as the caller's own error type.
pub struct HookRegistry<TData, Err, R = ()>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<HookError> + Send + Sync + 'static,
{
  pub(crate) workflow: String,
  pub(crate) before: Vec<RegisteredHook<TData, Err, R>>,
  pub(crate) after: Vec<RegisteredHook<TData, Err, R>>,
  pub(crate) cleanups: Vec<RegisteredCleanup<TData, Err>>,
}

impl<TData, Err, R> HookRegistry<TData, Err, R>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<HookError> + Send + Sync + 'static,
  R: Send + 'static,
{
  /// Creates an empty registry. `workflow` names it in logs and spans.
  pub fn new(workflow: impl Into<String>) -> Self {
    Self {
      workflow: workflow.into(),
      before: Vec::new(),
      after: Vec::new(),
      cleanups: Vec::new(),
    }
  }

  pub fn workflow_name(&self) -> &str {
    &self.workflow
  }

  /// Names of the before-steps, in execution order.
  pub fn before_steps(&self) -> Vec<&str> {
    self.before.iter().map(|h| h.name.as_str()).collect()
  }

  /// Names of the after-steps, in execution order.
  pub fn after_steps(&self) -> Vec<&str> {
    self.after.iter().map(|h| h.name.as_str()).collect()
  }

  /// Names of all registered compensations, in registration order.
  pub fn cleanup_steps(&self) -> Vec<&str> {
    self.cleanups.iter().map(|c| c.name.as_str()).collect()
  }

  /// Compensations that have no forward step of the same name. They undo
  /// the caller's primary write and therefore always run.
  pub fn standalone_cleanups(&self) -> Vec<&str> {
    self
      .cleanups
      .iter()
      .filter(|c| self.is_standalone(&c.name))
      .map(|c| c.name.as_str())
      .collect()
  }

  pub(crate) fn steps(&self, phase: HookPhase) -> &[RegisteredHook<TData, Err, R>] {
    match phase {
      HookPhase::Before => &self.before,
      HookPhase::After => &self.after,
      HookPhase::Cleanup => &[],
    }
  }

  pub(crate) fn find_cleanup(&self, name: &str) -> Option<&RegisteredCleanup<TData, Err>> {
    self.cleanups.iter().find(|c| c.name == name)
  }

  fn is_standalone(&self, name: &str) -> bool {
    !self.before.iter().chain(self.after.iter()).any(|h| h.name == name)
  }

  /// Orders the compensations for a run whose started steps are `started`
  /// (phase, index into that phase's list), oldest first.
  ///
  /// After-steps are undone newest first, then the standalone cleanups
  /// (newest registration first), then before-steps newest first. Steps that
  /// never started contribute nothing. Each cleanup appears at most once.
  pub(crate) fn compensation_plan(&self, started: &[(HookPhase, usize)]) -> Vec<&RegisteredCleanup<TData, Err>> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut plan = Vec::new();

    self.push_started(HookPhase::After, started, &mut plan, &mut seen);
    for cleanup in self.cleanups.iter().rev().filter(|c| self.is_standalone(&c.name)) {
      if seen.insert(cleanup.name.as_str()) {
        plan.push(cleanup);
      }
    }
    self.push_started(HookPhase::Before, started, &mut plan, &mut seen);
    plan
  }

  fn push_started<'a>(
    &'a self,
    phase: HookPhase,
    started: &[(HookPhase, usize)],
    plan: &mut Vec<&'a RegisteredCleanup<TData, Err>>,
    seen: &mut HashSet<&'a str>,
  ) {
    for (_, idx) in started.iter().rev().filter(|(p, _)| *p == phase) {
      let Some(step) = self.steps(phase).get(*idx) else {
        continue;
      };
      if let Some(cleanup) = self.find_cleanup(&step.name) {
        if seen.insert(cleanup.name.as_str()) {
          plan.push(cleanup);
        }
      }
    }
  }
}

impl<TData, Err, R> std::fmt::Debug for HookRegistry<TData, Err, R>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<HookError> + Send + Sync + 'static,
  R: Send + 'static,
{
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("HookRegistry")
      .field("workflow", &self.workflow)
      .field("before", &self.before_steps())
      .field("after", &self.after_steps())
      .field("cleanups", &self.cleanup_steps())
      .finish()
  }
}
