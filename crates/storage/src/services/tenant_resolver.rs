use crate::database::Database;
use crate::error::Result;
use crate::models::Tenant;
use crate::repository::TenantRepository;

/// Drop a trailing `:port` from a Host header value.
fn strip_port(host: &str) -> &str {
    match host.rsplit_once(':') {
        Some((name, port)) if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) => name,
        _ => host,
    }
}

/// Tenant name addressed by `host`, e.g. `acme.t.scoreboard.local` -> `acme`.
pub fn tenant_name_from_host<'h>(host: &'h str, base_hostname: &str) -> &'h str {
    let host = strip_port(host);
    host.strip_suffix(base_hostname).unwrap_or(host)
}

/// Resolve the tenant addressed by the request host. `admin` maps to the
/// operator pseudo-tenant without touching the store.
pub async fn resolve_tenant(db: &Database, host: &str, base_hostname: &str) -> Result<Tenant> {
    let name = tenant_name_from_host(host, base_hostname);
    if name == Tenant::ADMIN_NAME {
        return Ok(Tenant::admin());
    }

    TenantRepository::new(db.pool()).find_by_name(name).await
}
