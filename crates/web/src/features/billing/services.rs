use storage::{dto::billing::BillingReport, error::Result, models::Viewer, services::billing};

use crate::state::AppState;

/// Billing report of every competition of the viewer's tenant
pub async fn tenant_billing(state: &AppState, viewer: &Viewer) -> Result<Vec<BillingReport>> {
    let mut shard = state.shards.open(viewer.tenant_id).await?;
    let result = billing::tenant_billing(&state.db, state.locks.as_ref(), &mut shard).await;
    shard.close().await?;
    result
}
