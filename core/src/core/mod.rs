pub mod context_data;
pub mod control;
pub mod hook;
pub mod shared_state;

pub use context_data::ContextData;
pub use control::{CleanupFailure, CleanupReport, HookPhase, PhaseOutcome};
pub use hook::{BoxFuture, CleanupFn, HookContext, HookFn};
pub use shared_state::{SharedState, INITIAL_CONTEXT_KEY};
