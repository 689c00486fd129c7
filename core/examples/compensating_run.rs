// hookline/examples/compensating_run.rs

use hookline::{ContextData, HookContext, HookError, HookRegistry, SharedState};
use tracing::info;

#[derive(Clone, Debug, Default)]
struct TransferContext {
  amount: u64,
  log: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<(), HookError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  let mut registry = HookRegistry::<TransferContext, HookError>::new("transfer");
  registry
    .before(
      HookContext::new("reserve_funds")
        .hook(|ctx: ContextData<TransferContext>, shared: SharedState| async move {
          let amount = ctx.read().amount;
          shared.set("reservationId", format!("res-{}", amount));
          ctx.write().log.push("reserved".to_string());
          Ok::<(), HookError>(())
        })
        .cleanup(|ctx: ContextData<TransferContext>, shared: SharedState| async move {
          if let Some(id) = shared.get::<String>("reservationId") {
            ctx.write().log.push(format!("released {}", id));
          }
          Ok::<(), HookError>(())
        }),
    )
    .cleanup(
      HookContext::new("delete_transfer").cleanup(|ctx: ContextData<TransferContext>, shared: SharedState| async move {
        if let Some(id) = shared.get::<String>("transferId") {
          ctx.write().log.push(format!("deleted {}", id));
        }
        Ok::<(), HookError>(())
      }),
    )
    .after(
      HookContext::new("notify_bank").hook(|_ctx: ContextData<TransferContext>, _shared: SharedState| async move {
        Err::<(), anyhow::Error>(anyhow::anyhow!("bank unreachable"))
      }),
    );

  let ctx = ContextData::new(TransferContext {
    amount: 250,
    ..Default::default()
  });
  let mut run = registry.begin(ctx.clone());
  run.run_before().await?;

  // The caller's own primary write.
  run.shared().set("transferId", "tr-1".to_string());

  if let Err(e) = run.run_after().await {
    info!(error = %e, "After-phase failed, compensating.");
    let report = run.run_cleanup().await;
    info!(compensated = ?report.compensated(), "Compensation done.");
  }

  // reserved, deleted tr-1, released res-250
  for line in &ctx.read().log {
    info!("- {}", line);
  }
  assert_eq!(ctx.read().log, vec!["reserved", "deleted tr-1", "released res-250"]);
  Ok(())
}
