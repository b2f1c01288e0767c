use storage::{
    dto::tenant::{CreateTenantRequest, TenantWithBilling},
    error::Result,
    services::{billing, provisioning},
};

use crate::state::AppState;

/// Register a tenant and provision its shard
pub async fn create_tenant(
    state: &AppState,
    request: &CreateTenantRequest,
) -> Result<TenantWithBilling> {
    provisioning::create_tenant(
        &state.db,
        &state.shards,
        &request.name,
        &request.display_name,
    )
    .await
}

/// One page of tenants with their billing
pub async fn tenants_billing(
    state: &AppState,
    before: Option<i64>,
) -> Result<Vec<TenantWithBilling>> {
    billing::tenants_billing(&state.db, &state.shards, state.locks.as_ref(), before).await
}
