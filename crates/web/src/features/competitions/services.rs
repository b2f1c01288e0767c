use storage::{
    error::Result,
    models::{Competition, Viewer},
    repository::CompetitionRepository,
    services::{IngestOutcome, competitions, ingestion, ranking},
};

use crate::state::AppState;

/// List the tenant's competitions, newest first
pub async fn list_competitions(state: &AppState, viewer: &Viewer) -> Result<Vec<Competition>> {
    let mut shard = state.shards.open(viewer.tenant_id).await?;
    let result = CompetitionRepository::new(shard.conn())
        .list(viewer.tenant_id)
        .await;
    shard.close().await?;
    result
}

/// Same listing, for a registered player who is not disqualified
pub async fn list_competitions_for_player(
    state: &AppState,
    viewer: &Viewer,
) -> Result<Vec<Competition>> {
    let mut shard = state.shards.open(viewer.tenant_id).await?;
    let result = match ranking::authorize_player(&mut shard, &viewer.player_id).await {
        Ok(_) => {
            CompetitionRepository::new(shard.conn())
                .list(viewer.tenant_id)
                .await
        }
        Err(e) => Err(e),
    };
    shard.close().await?;
    result
}

pub async fn create_competition(
    state: &AppState,
    viewer: &Viewer,
    title: &str,
) -> Result<Competition> {
    let mut shard = state.shards.open(viewer.tenant_id).await?;
    let result = competitions::add_competition(&state.ids, &mut shard, title).await;
    shard.close().await?;
    result
}

pub async fn finish_competition(
    state: &AppState,
    viewer: &Viewer,
    competition_id: &str,
) -> Result<Competition> {
    let mut shard = state.shards.open(viewer.tenant_id).await?;
    let result = competitions::finish_competition(&mut shard, competition_id).await;
    shard.close().await?;
    result
}

/// Replace the competition's scores with an uploaded CSV sheet
pub async fn ingest_scores(
    state: &AppState,
    viewer: &Viewer,
    competition_id: &str,
    sheet: &[u8],
) -> Result<IngestOutcome> {
    let mut shard = state.shards.open(viewer.tenant_id).await?;
    let result = ingestion::ingest_scores(
        &state.ids,
        state.locks.as_ref(),
        &mut shard,
        competition_id,
        sheet,
    )
    .await;
    shard.close().await?;
    result
}
