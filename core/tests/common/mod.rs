// tests/common/mod.rs
#![allow(dead_code)] // Not every test file uses every helper.

use hookline::{ContextData, HookContext, HookError, SharedState};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::Level;

// --- Common Context Struct ---
#[derive(Clone, Debug, Default)]
pub struct TestContext {
  pub label: String,
  pub steps_executed: Vec<String>,
  pub created_id: Option<u32>,
}

// --- Common Error Type for Tests ---
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TestError {
  #[error("hookline error: {0}")]
  Hook(String), // Stored as String for Eq comparison

  #[error("step failed: {0}")]
  Step(String),
}

impl From<HookError> for TestError {
  fn from(he: HookError) -> Self {
    TestError::Hook(format!("{:?}", he))
  }
}

/// External trace shared by steps and compensations of a test.
pub type Trace = Arc<Mutex<Vec<String>>>;

pub fn new_trace() -> Trace {
  Arc::new(Mutex::new(Vec::new()))
}

pub fn traced(trace: &Trace) -> Vec<String> {
  trace.lock().clone()
}

// --- Common Hook Creators ---

/// A step that appends `name` to the trace and to the context.
pub fn tracing_hook(name: &'static str, trace: &Trace) -> HookContext<TestContext, TestError> {
  let trace = trace.clone();
  HookContext::new(name).hook(move |ctx: ContextData<TestContext>, _shared: SharedState| {
    let trace = trace.clone();
    async move {
      trace.lock().push(name.to_string());
      ctx.write().steps_executed.push(name.to_string());
      Ok::<(), TestError>(())
    }
  })
}

/// A step that records itself and fails.
pub fn failing_hook(name: &'static str, trace: &Trace) -> HookContext<TestContext, TestError> {
  let trace = trace.clone();
  HookContext::new(name).hook(move |_ctx: ContextData<TestContext>, _shared: SharedState| {
    let trace = trace.clone();
    async move {
      trace.lock().push(name.to_string());
      Err::<(), TestError>(TestError::Step(format!("{} failed", name)))
    }
  })
}

/// Adds a compensation that appends `undo:<name>` to the trace.
pub fn with_tracing_cleanup(
  hook: HookContext<TestContext, TestError>,
  trace: &Trace,
) -> HookContext<TestContext, TestError> {
  let trace = trace.clone();
  let name = hook.name().to_string();
  hook.cleanup(move |_ctx: ContextData<TestContext>, _shared: SharedState| {
    let trace = trace.clone();
    let name = name.clone();
    async move {
      trace.lock().push(format!("undo:{}", name));
      Ok::<(), TestError>(())
    }
  })
}

/// A compensation-only entry.
pub fn standalone_cleanup(name: &'static str, trace: &Trace) -> HookContext<TestContext, TestError> {
  with_tracing_cleanup(HookContext::new(name), trace)
}

/// A compensation-only entry that fails after recording itself.
pub fn failing_cleanup(name: &'static str, trace: &Trace) -> HookContext<TestContext, TestError> {
  let trace = trace.clone();
  HookContext::new(name).cleanup(move |_ctx: ContextData<TestContext>, _shared: SharedState| {
    let trace = trace.clone();
    async move {
      trace.lock().push(format!("undo:{}", name));
      Err::<(), TestError>(TestError::Step(format!("undo {} failed", name)))
    }
  })
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
