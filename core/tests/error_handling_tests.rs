// tests/error_handling_tests.rs
mod common;

use common::*;
use hookline::{ContextData, HookContext, HookError, HookRegistry, SharedState};
use serial_test::serial;

#[test]
fn test_anyhow_wrapping_hook_error_is_unwrapped() {
  let inner = anyhow::Error::new(HookError::MissingSharedValue {
    key: "orderId".to_string(),
  });
  match HookError::from(inner) {
    HookError::MissingSharedValue { key } => assert_eq!(key, "orderId"),
    other => panic!("Expected MissingSharedValue, got {:?}", other),
  }

  match HookError::from(anyhow::anyhow!("storage timeout")) {
    HookError::HandlerError { source } => assert_eq!(source.to_string(), "storage timeout"),
    other => panic!("Expected HandlerError, got {:?}", other),
  }
}

// A registry whose error type IS HookError, with steps failing through anyhow.
#[tokio::test]
#[serial]
async fn test_registry_with_hook_error_type() {
  setup_tracing();
  let mut registry = HookRegistry::<TestContext, HookError>::new("hook_error_type");
  registry.before(
    HookContext::new("remote_call").hook(|_ctx: ContextData<TestContext>, _shared: SharedState| async move {
      Err::<(), anyhow::Error>(anyhow::anyhow!("role grant rejected"))
    }),
  );

  let mut run = registry.begin(ContextData::new(TestContext::default()));
  match run.run_before().await {
    Err(HookError::HandlerError { source }) => assert_eq!(source.to_string(), "role grant rejected"),
    other => panic!("Expected HookError::HandlerError, got {:?}", other),
  }
}
