use crate::error::Result;
use crate::id_dispenser::IdDispenser;
use crate::models::Competition;
use crate::repository::CompetitionRepository;
use crate::shard::TenantShard;

pub async fn add_competition(
    ids: &IdDispenser,
    shard: &mut TenantShard,
    title: &str,
) -> Result<Competition> {
    let tenant_id = shard.tenant_id();
    let id = ids.dispense().await?;
    let now = chrono::Utc::now().timestamp();

    let competition = CompetitionRepository::new(shard.conn())
        .create(&id, tenant_id, title, now)
        .await?;

    tracing::info!(tenant_id, competition_id = %competition.id, "Competition created");
    Ok(competition)
}

/// Close a competition; its scores are frozen from then on.
pub async fn finish_competition(shard: &mut TenantShard, competition_id: &str) -> Result<Competition> {
    let now = chrono::Utc::now().timestamp();
    let competition = CompetitionRepository::new(shard.conn())
        .finish(competition_id, now)
        .await?;

    tracing::info!(tenant_id = shard.tenant_id(), competition_id, "Competition finished");
    Ok(competition)
}
