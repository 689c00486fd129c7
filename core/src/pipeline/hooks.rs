// hookline/src/pipeline/hooks.rs

//! Registration of `before`, `after` and `cleanup` steps on a `HookRegistry`.

use tracing::{event, Level};

use crate::core::control::HookPhase;
use crate::core::hook::HookContext;
use crate::error::{HookError, HookResult};
use crate::pipeline::definition::{HookRegistry, RegisteredCleanup, RegisteredHook};

impl<TData, Err, R> HookRegistry<TData, Err, R>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<HookError> + Send + Sync + 'static,
  R: Send + 'static,
{
  /// Appends a step to the before-list and its cleanup (if any) to the
  /// compensations.
  ///
  /// Panics when `hook_ctx` has neither a hook nor a cleanup: registries are
  /// wired at startup, so this is a programming error. Use
  /// [`try_before`](Self::try_before) to get the error instead.
  pub fn before(&mut self, hook_ctx: HookContext<TData, Err, R>) -> &mut Self {
    if let Err(e) = self.register(HookPhase::Before, hook_ctx) {
      panic!("hookline setup error in workflow '{}': {}", self.workflow, e);
    }
    self
  }

  /// Appends a step to the after-list and its cleanup (if any) to the
  /// compensations. Panics like [`before`](Self::before).
  pub fn after(&mut self, hook_ctx: HookContext<TData, Err, R>) -> &mut Self {
    if let Err(e) = self.register(HookPhase::After, hook_ctx) {
      panic!("hookline setup error in workflow '{}': {}", self.workflow, e);
    }
    self
  }

  /// Appends only the compensation of `hook_ctx`; a forward hook on it is
  /// ignored. Panics like [`before`](Self::before) if there is no cleanup.
  pub fn cleanup(&mut self, hook_ctx: HookContext<TData, Err, R>) -> &mut Self {
    if let Err(e) = self.register(HookPhase::Cleanup, hook_ctx) {
      panic!("hookline setup error in workflow '{}': {}", self.workflow, e);
    }
    self
  }

  pub fn try_before(&mut self, hook_ctx: HookContext<TData, Err, R>) -> HookResult<&mut Self> {
    self.register(HookPhase::Before, hook_ctx)?;
    Ok(self)
  }

  pub fn try_after(&mut self, hook_ctx: HookContext<TData, Err, R>) -> HookResult<&mut Self> {
    self.register(HookPhase::After, hook_ctx)?;
    Ok(self)
  }

  pub fn try_cleanup(&mut self, hook_ctx: HookContext<TData, Err, R>) -> HookResult<&mut Self> {
    self.register(HookPhase::Cleanup, hook_ctx)?;
    Ok(self)
  }

  fn register(&mut self, phase: HookPhase, hook_ctx: HookContext<TData, Err, R>) -> HookResult<()> {
    let HookContext { name, hook, cleanup } = hook_ctx;

    let hook = match phase {
      HookPhase::Cleanup => {
        if hook.is_some() {
          event!(Level::WARN, workflow = %self.workflow, step_name = %name, "Forward hook ignored by cleanup registration.");
        }
        None
      }
      _ => hook,
    };

    if hook.is_none() && cleanup.is_none() {
      return Err(HookError::EmptyHook { step_name: name });
    }

    if let Some(run) = hook {
      let steps = match phase {
        HookPhase::Before => &mut self.before,
        _ => &mut self.after,
      };
      if steps.iter().any(|s| s.name == name) {
        event!(Level::DEBUG, workflow = %self.workflow, %phase, step_name = %name, "Step already registered, skipping.");
      } else {
        steps.push(RegisteredHook { name: name.clone(), run });
        event!(Level::DEBUG, workflow = %self.workflow, %phase, step_name = %name, "Step registered.");
      }
    }

    if let Some(run) = cleanup {
      if self.cleanups.iter().any(|c| c.name == name) {
        event!(Level::DEBUG, workflow = %self.workflow, step_name = %name, "Cleanup already registered, skipping.");
      } else {
        event!(Level::DEBUG, workflow = %self.workflow, step_name = %name, "Cleanup registered.");
        self.cleanups.push(RegisteredCleanup { name, run });
      }
    }

    Ok(())
  }
}
