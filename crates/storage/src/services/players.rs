use crate::error::Result;
use crate::id_dispenser::IdDispenser;
use crate::models::Player;
use crate::repository::PlayerRepository;
use crate::shard::TenantShard;

/// Register one player per display name, in order.
pub async fn add_players(
    ids: &IdDispenser,
    shard: &mut TenantShard,
    display_names: &[String],
) -> Result<Vec<Player>> {
    let tenant_id = shard.tenant_id();
    let now = chrono::Utc::now().timestamp();
    let mut repo = PlayerRepository::new(shard.conn());

    let mut players = Vec::with_capacity(display_names.len());
    for display_name in display_names {
        let id = ids.dispense().await?;
        players.push(repo.create(&id, tenant_id, display_name, now).await?);
    }

    tracing::info!(tenant_id, count = players.len(), "Players added");
    Ok(players)
}

pub async fn disqualify_player(shard: &mut TenantShard, player_id: &str) -> Result<Player> {
    let now = chrono::Utc::now().timestamp();
    let player = PlayerRepository::new(shard.conn())
        .disqualify(player_id, now)
        .await?;

    tracing::info!(tenant_id = shard.tenant_id(), player_id, "Player disqualified");
    Ok(player)
}
