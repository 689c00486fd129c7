// hookline/src/lib.rs

//! Hookline: ordered before/after/cleanup hook pipelines for workflows that
//! span several independent writes with no shared transaction.
//!
//! A workflow is a [`HookRegistry`] wired once at startup with named steps:
//!  - `before` steps run ahead of the caller's own primary write,
//!  - `after` steps run once that write succeeded,
//!  - `cleanup` steps compensate, and only run when the caller says so.
//!
//! Each invocation opens a [`HookRun`] with its own [`SharedState`], so
//! concurrent requests running the same workflow never see each other's
//! intermediate ids. Compensation walks the steps that actually started, in
//! reverse, and keeps going when one compensation fails.

pub mod core;
pub mod error;
pub mod pipeline;

pub use crate::core::context_data::ContextData;
pub use crate::core::control::{CleanupFailure, CleanupReport, HookPhase, PhaseOutcome};
pub use crate::core::hook::{BoxFuture, CleanupFn, HookContext, HookFn};
pub use crate::core::shared_state::{SharedState, INITIAL_CONTEXT_KEY};

pub use crate::pipeline::definition::HookRegistry;
pub use crate::pipeline::execution::HookRun;

pub use crate::error::{HookError, HookResult};

/*
    Caller protocol:
    1. Build the context value for the request and wrap it: `ContextData::new(ctx)`.
    2. `let mut run = registry.begin(ctx_data.clone());`
    3. `run.run_before().await?` (on error: `run.run_cleanup().await`, return the error).
    4. Perform the primary write; stash its id in `run.shared()`.
    5. `run.run_after().await` (on error: `run.run_cleanup().await`, return the error).
*/
