// hookline/src/pipeline/execution.rs

//! Contains `HookRun`, one invocation of a `HookRegistry`, and its three
//! entry points: `run_before`, `run_after` and `run_cleanup`.

use crate::core::context_data::ContextData;
use crate::core::control::{CleanupFailure, CleanupReport, HookPhase, PhaseOutcome};
use crate::core::shared_state::{SharedState, INITIAL_CONTEXT_KEY};
use crate::error::HookError;
use crate::pipeline::definition::HookRegistry;
use tracing::{event, info_span, instrument, Instrument, Level};

impl<TData, Err, R> HookRegistry<TData, Err, R>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<HookError> + Send + Sync + 'static,
  R: Send + 'static,
{
  /// Opens a run over `context` with a fresh, empty `SharedState`.
  pub fn begin(&self, context: ContextData<TData>) -> HookRun<'_, TData, Err, R> {
    self.begin_with_shared(context, SharedState::new())
  }

  /// Opens a run with caller-provided shared state (e.g. pre-seeded ids).
  pub fn begin_with_shared(&self, context: ContextData<TData>, shared: SharedState) -> HookRun<'_, TData, Err, R> {
    event!(Level::TRACE, workflow = %self.workflow, "Run opened.");
    HookRun {
      registry: self,
      context,
      shared,
      started: Vec::new(),
      cleaned_up: false,
    }
  }
}

/// One invocation of a workflow.
///
/// The caller drives it: `run_before`, then its own primary write, then
/// `run_after`; if anything in between fails, `run_cleanup`. The run does not
/// enforce that order. It records every step it starts so that `run_cleanup`
/// can undo exactly those, newest first.
pub struct HookRun<'r, TData, Err, R = ()>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<HookError> + Send + Sync + 'static,
{
  registry: &'r HookRegistry<TData, Err, R>,
  context: ContextData<TData>,
  shared: SharedState,
  // (phase, index into that phase's list), in start order.
  started: Vec<(HookPhase, usize)>,
  cleaned_up: bool,
}

impl<'r, TData, Err, R> HookRun<'r, TData, Err, R>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<HookError> + Send + Sync + 'static,
  R: Send + 'static,
{
  pub fn workflow_name(&self) -> &str {
    &self.registry.workflow
  }

  pub fn context(&self) -> &ContextData<TData> {
    &self.context
  }

  pub fn shared(&self) -> &SharedState {
    &self.shared
  }

  /// Empties this run's shared state. Other runs are unaffected.
  pub fn reset_shared(&self) {
    self.shared.clear();
  }

  /// Steps started so far, oldest first. A step that failed is included.
  pub fn started_steps(&self) -> Vec<(HookPhase, &str)> {
    self
      .started
      .iter()
      .filter_map(|(phase, idx)| {
        self
          .registry
          .steps(*phase)
          .get(*idx)
          .map(|step| (*phase, step.name.as_str()))
      })
      .collect()
  }

  /// Runs every before-step in registration order, one at a time.
  ///
  /// Stores the context under `INITIAL_CONTEXT_KEY` unless already present.
  /// The first failing step's error is returned unchanged and no later
  /// before-step runs; compensation is the caller's call via `run_cleanup`.
  #[instrument(
    name = "HookRun::run_before",
    skip_all,
    fields(workflow = %self.registry.workflow, num_steps = self.registry.before.len()),
    err(Display)
  )]
  pub async fn run_before(&mut self) -> Result<PhaseOutcome<R>, Err> {
    self.shared.set_if_absent(INITIAL_CONTEXT_KEY, self.context.clone());
    self.run_phase(HookPhase::Before).await
  }

  /// Runs every after-step in registration order, one at a time. Same
  /// failure behavior as [`run_before`](Self::run_before).
  #[instrument(
    name = "HookRun::run_after",
    skip_all,
    fields(workflow = %self.registry.workflow, num_steps = self.registry.after.len()),
    err(Display)
  )]
  pub async fn run_after(&mut self) -> Result<PhaseOutcome<R>, Err> {
    self.shared.set_if_absent(INITIAL_CONTEXT_KEY, self.context.clone());
    self.run_phase(HookPhase::After).await
  }

  async fn run_phase(&mut self, phase: HookPhase) -> Result<PhaseOutcome<R>, Err> {
    let registry = self.registry;
    let steps = registry.steps(phase);
    let mut outputs = Vec::with_capacity(steps.len());

    for (step_idx, step) in steps.iter().enumerate() {
      let step_span = info_span!(
        "hook_step",
        workflow = %registry.workflow,
        %phase,
        step_name = %step.name,
        step_index = step_idx
      );
      // Recorded before running so a step that fails half-way is compensated too.
      self.started.push((phase, step_idx));

      let result = (step.run)(self.context.clone(), self.shared.clone())
        .instrument(step_span)
        .await;
      match result {
        Ok(output) => outputs.push(output),
        Err(e) => {
          event!(Level::ERROR, workflow = %registry.workflow, %phase, step_name = %step.name, error = %e, "Step failed.");
          return Err(e);
        }
      }
    }

    event!(Level::DEBUG, workflow = %registry.workflow, %phase, steps_run = outputs.len(), "Phase completed.");
    Ok(PhaseOutcome {
      outputs,
      shared: self.shared.clone(),
    })
  }

  /// Undoes what this run did, in strict reverse order:
  ///
  /// 1. cleanups of started after-steps, newest first;
  /// 2. standalone cleanups (no forward step of the same name; they undo the
  ///    caller's primary write), newest registration first, always;
  /// 3. cleanups of started before-steps, newest first.
  ///
  /// A failing cleanup is logged and recorded in the report; the rest still
  /// run. Calling this twice on the same run does nothing the second time.
  #[instrument(name = "HookRun::run_cleanup", skip_all, fields(workflow = %self.registry.workflow))]
  pub async fn run_cleanup(&mut self) -> CleanupReport<Err> {
    let mut report = CleanupReport::new();
    if self.cleaned_up {
      event!(Level::DEBUG, "Cleanup already ran for this run, skipping.");
      return report;
    }
    self.cleaned_up = true;
    self.shared.set_if_absent(INITIAL_CONTEXT_KEY, self.context.clone());

    let registry = self.registry;
    let started = std::mem::take(&mut self.started);
    let plan = registry.compensation_plan(&started);
    event!(Level::INFO, steps_started = started.len(), compensations = plan.len(), "Running compensations.");

    for (cleanup_idx, cleanup) in plan.into_iter().enumerate() {
      let cleanup_span = info_span!(
        "hook_step",
        workflow = %registry.workflow,
        phase = %HookPhase::Cleanup,
        step_name = %cleanup.name,
        step_index = cleanup_idx
      );
      report.attempted.push(cleanup.name.clone());

      let result = (cleanup.run)(self.context.clone(), self.shared.clone())
        .instrument(cleanup_span)
        .await;
      if let Err(e) = result {
        event!(Level::ERROR, step_name = %cleanup.name, error = %e, "Compensation failed; continuing with the rest.");
        report.failures.push(CleanupFailure {
          step_name: cleanup.name.clone(),
          error: e,
        });
      }
    }

    if report.is_clean() {
      event!(Level::INFO, compensated = report.attempted.len(), "Compensation finished.");
    } else {
      event!(Level::WARN, failed = report.failures.len(), "Compensation finished with failures.");
    }
    report
  }
}
