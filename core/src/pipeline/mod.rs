// hookline/src/pipeline/mod.rs

//! Defines `HookRegistry<T, Err, R>`: its construction, step registration and
//! per-run execution.

pub mod definition;
pub mod execution;
pub mod hooks;

pub use definition::HookRegistry;
pub use execution::HookRun;
