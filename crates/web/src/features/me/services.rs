use axum::http::HeaderMap;
use storage::{
    dto::{me::MeResult, tenant::TenantDetail},
    models::Role,
    repository::PlayerRepository,
    services::tenant_resolver::resolve_tenant,
};

use crate::error::{WebError, WebResult};
use crate::middleware::auth::{authenticate, request_host};
use crate::state::AppState;

/// Describe the caller; an unauthenticated caller is reported, not rejected.
pub async fn me(state: &AppState, headers: &HeaderMap) -> WebResult<MeResult> {
    let host = request_host(headers)?;
    let tenant = resolve_tenant(&state.db, host, &state.base_hostname).await?;
    let tenant = TenantDetail::from(tenant);

    let viewer = match authenticate(state, headers).await {
        Ok(viewer) => viewer,
        Err(WebError::Unauthorized(_)) => return Ok(MeResult::anonymous(tenant)),
        Err(e) => return Err(e),
    };

    if viewer.role != Role::Player {
        return Ok(MeResult {
            tenant,
            me: None,
            role: viewer.role,
            logged_in: true,
        });
    }

    let mut shard = state.shards.open(viewer.tenant_id).await?;
    let player = PlayerRepository::new(shard.conn())
        .find(&viewer.player_id)
        .await;
    shard.close().await?;

    Ok(match player? {
        Some(player) => MeResult {
            tenant,
            me: Some(player.into()),
            role: viewer.role,
            logged_in: true,
        },
        None => MeResult::anonymous(tenant),
    })
}
