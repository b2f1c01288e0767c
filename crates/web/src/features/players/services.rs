use storage::{
    error::Result,
    models::{Player, Viewer},
    repository::PlayerRepository,
    services::players,
};

use crate::state::AppState;

/// List the tenant's players, newest first
pub async fn list_players(state: &AppState, viewer: &Viewer) -> Result<Vec<Player>> {
    let mut shard = state.shards.open(viewer.tenant_id).await?;
    let result = PlayerRepository::new(shard.conn())
        .list(viewer.tenant_id)
        .await;
    shard.close().await?;
    result
}

pub async fn add_players(
    state: &AppState,
    viewer: &Viewer,
    display_names: &[String],
) -> Result<Vec<Player>> {
    let mut shard = state.shards.open(viewer.tenant_id).await?;
    let result = players::add_players(&state.ids, &mut shard, display_names).await;
    shard.close().await?;
    result
}

pub async fn disqualify_player(state: &AppState, viewer: &Viewer, player_id: &str) -> Result<Player> {
    let mut shard = state.shards.open(viewer.tenant_id).await?;
    let result = players::disqualify_player(&mut shard, player_id).await;
    shard.close().await?;
    result
}
