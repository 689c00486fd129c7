// tests/registry_tests.rs
mod common;

use common::*;
use hookline::{ContextData, HookContext, HookError, HookRegistry, SharedState};
use serial_test::serial;

#[tokio::test]
#[serial]
async fn test_registering_same_step_twice_runs_it_once() {
  setup_tracing();
  let trace = new_trace();
  let step = with_tracing_cleanup(tracing_hook("create_profile", &trace), &trace);
  let mut registry = HookRegistry::<TestContext, TestError>::new("idempotent");
  registry
    .after(step.clone())
    .after(step.clone())
    .cleanup(step);

  assert_eq!(registry.after_steps(), vec!["create_profile"]);
  assert_eq!(registry.cleanup_steps(), vec!["create_profile"]);

  let mut run = registry.begin(ContextData::new(TestContext::default()));
  run.run_after().await.unwrap();
  run.run_cleanup().await;
  assert_eq!(traced(&trace), vec!["create_profile", "undo:create_profile"]);
}

#[test]
fn test_empty_hook_is_rejected() {
  let mut registry = HookRegistry::<TestContext, TestError>::new("empty_hook");
  match registry.try_before(HookContext::new("nothing")) {
    Err(HookError::EmptyHook { step_name }) => assert_eq!(step_name, "nothing"),
    Err(other) => panic!("Expected EmptyHook, got {:?}", other),
    Ok(_) => panic!("Expected EmptyHook, got Ok"),
  }
  assert!(registry.before_steps().is_empty());
}

#[test]
#[should_panic(expected = "hookline setup error")]
fn test_infallible_registration_panics_on_empty_hook() {
  let mut registry = HookRegistry::<TestContext, TestError>::new("empty_hook_panics");
  registry.after(HookContext::new("nothing"));
}

#[test]
fn test_cleanup_registration_ignores_forward_hook() {
  let trace = new_trace();
  let mut registry = HookRegistry::<TestContext, TestError>::new("cleanup_only");
  let step = with_tracing_cleanup(tracing_hook("delete_user", &trace), &trace);
  registry.cleanup(step);

  assert!(registry.before_steps().is_empty());
  assert!(registry.after_steps().is_empty());
  assert_eq!(registry.standalone_cleanups(), vec!["delete_user"]);

  match registry.try_cleanup(tracing_hook("hook_only", &trace)) {
    Err(HookError::EmptyHook { step_name }) => assert_eq!(step_name, "hook_only"),
    _ => panic!("Expected EmptyHook for a cleanup registration without a cleanup"),
  }
}

#[test]
fn test_before_with_only_cleanup_becomes_standalone() {
  let trace = new_trace();
  let mut registry = HookRegistry::<TestContext, TestError>::new("before_cleanup_only");
  registry.before(standalone_cleanup("delete_coop", &trace));

  assert!(registry.before_steps().is_empty());
  assert_eq!(registry.standalone_cleanups(), vec!["delete_coop"]);
  let debug = format!("{:?}", registry);
  assert!(debug.contains("before_cleanup_only"));
}

#[test]
fn test_hook_context_reports_its_parts() {
  let hook = HookContext::<TestContext, TestError>::new("inspect_only")
    .hook(|_ctx: ContextData<TestContext>, _shared: SharedState| async move { Ok::<(), TestError>(()) });
  assert_eq!(hook.name(), "inspect_only");
  assert!(hook.has_hook());
  assert!(!hook.has_cleanup());
}
