// app/src/services/coop_service.rs

use super::authz::require_store_member;
use super::backend::Backend;
use super::roll_back;
use crate::errors::Result;
use crate::hooks::keys;
use crate::models::{Coop, CoopImage, CoopStatus};
use crate::workflows::contexts::{CreateCoopHookContext, CreateCoopInput};
use crate::workflows::Workflows;
use chrono::Utc;
use hookline::ContextData;
use serde::Serialize;
use tracing::{info, instrument};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoopOutcome {
  pub coop: Coop,
  pub images: Vec<CoopImage>,
}

/// Copies the source product, creates the co-op on the copy and attaches its
/// images. On failure the images, the co-op and the copy are removed in that
/// order.
#[instrument(name = "service::create_coop", skip(backend, workflows, input), err(Display))]
pub async fn create_coop(
  backend: &Backend,
  workflows: &Workflows,
  store_id: Uuid,
  acting_user_id: Uuid,
  input: CreateCoopInput,
) -> Result<CoopOutcome> {
  require_store_member(backend, acting_user_id, store_id).await?;

  let ctx = ContextData::new(CreateCoopHookContext::new(store_id, acting_user_id, input));
  let mut run = workflows.create_coop.begin(ctx.clone());

  let result: Result<Coop> = async {
    run.run_before().await?;

    let product_id: Uuid = run.shared().require(keys::PRODUCT_ID)?;
    let now = Utc::now();
    let coop = {
      let guard = ctx.read();
      let input = &guard.input;
      Coop {
        id: Uuid::new_v4(),
        store_id,
        product_id,
        title: input.title.trim().to_string(),
        description: input.description.clone(),
        price: input.price,
        max_quantity: input.max_quantity,
        ordered_quantity: 0,
        status: CoopStatus::initial(input.start_at, input.end_at, now),
        start_at: input.start_at,
        end_at: input.end_at,
        created_at: now,
      }
    };
    let coop = backend.coops.insert(coop).await?;
    run.shared().set(keys::COOP_ID, coop.id);
    ctx.write().coop_id = Some(coop.id);

    run.run_after().await?;
    Ok(coop)
  }
  .await;

  let coop = match result {
    Ok(coop) => coop,
    Err(e) => return Err(roll_back(&mut run, e).await),
  };

  let images = ctx.read().images.clone();
  info!(coop_id = %coop.id, status = %coop.status, images = images.len(), "Co-op created.");
  Ok(CoopOutcome { coop, images })
}
