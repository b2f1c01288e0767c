use storage::{
    dto::{player::PlayerProfile, ranking::CompetitionRanking},
    error::Result,
    models::Viewer,
    services::ranking,
};

use crate::state::AppState;

/// Ranking page of a competition; records a visit for the viewer
pub async fn competition_ranking(
    state: &AppState,
    viewer: &Viewer,
    competition_id: &str,
    rank_after: usize,
) -> Result<CompetitionRanking> {
    let mut shard = state.shards.open(viewer.tenant_id).await?;
    let result = ranking::competition_ranking(
        &state.db,
        state.locks.as_ref(),
        &mut shard,
        competition_id,
        &viewer.player_id,
        rank_after,
    )
    .await;
    shard.close().await?;
    result
}

pub async fn player_profile(
    state: &AppState,
    viewer: &Viewer,
    player_id: &str,
) -> Result<PlayerProfile> {
    let mut shard = state.shards.open(viewer.tenant_id).await?;
    let result = ranking::player_profile(
        state.locks.as_ref(),
        &mut shard,
        &viewer.player_id,
        player_id,
    )
    .await;
    shard.close().await?;
    result
}
