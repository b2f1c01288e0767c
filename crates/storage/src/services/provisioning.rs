use crate::database::Database;
use crate::dto::tenant::{TenantWithBilling, is_valid_tenant_name};
use crate::error::{Result, StorageError};
use crate::models::Tenant;
use crate::repository::TenantRepository;
use crate::shard::ShardGateway;

/// Register a tenant and provision its shard.
///
/// The tenant row is committed before the shard exists; if provisioning fails
/// the row stays behind and later opens of the shard report it unavailable.
pub async fn create_tenant(
    db: &Database,
    shards: &ShardGateway,
    name: &str,
    display_name: &str,
) -> Result<TenantWithBilling> {
    if !is_valid_tenant_name(name) {
        return Err(StorageError::InvalidTenantName(name.to_string()));
    }
    if name == Tenant::ADMIN_NAME {
        return Err(StorageError::ConstraintViolation(format!(
            "duplicate tenant: {}",
            name
        )));
    }

    let now = chrono::Utc::now().timestamp();
    let tenant = TenantRepository::new(db.pool())
        .create(name, display_name, now)
        .await?;

    shards.create(tenant.id).await?;

    tracing::info!(tenant_id = tenant.id, name = %tenant.name, "Tenant provisioned");

    Ok(TenantWithBilling::new(tenant, 0))
}
