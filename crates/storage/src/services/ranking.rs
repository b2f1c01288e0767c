//! Competition rankings and player profiles, both served to the player role.

use std::collections::HashSet;

use crate::database::Database;
use crate::dto::player::{PlayerProfile, PlayerScoreDetail};
use crate::dto::ranking::{CompetitionRank, CompetitionRanking, RANKING_PAGE_SIZE};
use crate::error::{Result, StorageError};
use crate::lock::TenantLock;
use crate::models::Player;
use crate::repository::{
    CompetitionRepository, PlayerRepository, PlayerScoreRepository, ScoreEntry,
    VisitHistoryRepository,
};
use crate::shard::TenantShard;

/// The viewing player must be registered in the tenant and not disqualified.
pub async fn authorize_player(shard: &mut TenantShard, player_id: &str) -> Result<Player> {
    let player = PlayerRepository::new(shard.conn())
        .find(player_id)
        .await?
        .ok_or_else(|| StorageError::UnknownViewer(player_id.to_string()))?;

    if player.is_disqualified {
        return Err(StorageError::PlayerDisqualified(player.id));
    }

    Ok(player)
}

/// Rank `entries`, which must be ordered by row_num descending.
///
/// Each player keeps the first (latest) row seen. Ties on score go to the
/// lower row_num. Returns the page starting after `rank_after`.
pub fn rank_scores(entries: Vec<ScoreEntry>, rank_after: usize) -> Vec<CompetitionRank> {
    let mut seen = HashSet::with_capacity(entries.len());
    let mut resolved: Vec<ScoreEntry> = entries
        .into_iter()
        .filter(|entry| seen.insert(entry.player_id.clone()))
        .collect();

    resolved.sort_by(|a, b| b.score.cmp(&a.score).then(a.row_num.cmp(&b.row_num)));

    resolved
        .into_iter()
        .enumerate()
        .skip(rank_after)
        .take(RANKING_PAGE_SIZE)
        .map(|(index, entry)| CompetitionRank {
            rank: index as i64 + 1,
            score: entry.score,
            player_id: entry.player_id,
            player_display_name: entry.player_display_name,
        })
        .collect()
}

/// Ranking page of a competition. Every call records a visit for the viewer.
pub async fn competition_ranking(
    db: &Database,
    locks: &dyn TenantLock,
    shard: &mut TenantShard,
    competition_id: &str,
    viewer_player_id: &str,
    rank_after: usize,
) -> Result<CompetitionRanking> {
    let tenant_id = shard.tenant_id();

    let viewer = authorize_player(shard, viewer_player_id).await?;
    let competition = CompetitionRepository::new(shard.conn())
        .get(competition_id)
        .await?;

    let now = chrono::Utc::now().timestamp();
    VisitHistoryRepository::new(db.pool())
        .record(&viewer.id, tenant_id, &competition.id, now)
        .await?;

    let entries = {
        let _guard = locks.acquire(tenant_id).await?;
        PlayerScoreRepository::new(shard.conn())
            .list_by_row_num_desc(tenant_id, &competition.id)
            .await?
    };

    tracing::debug!(
        tenant_id,
        competition_id,
        rows = entries.len(),
        rank_after,
        "Ranking computed"
    );

    Ok(CompetitionRanking {
        ranks: rank_scores(entries, rank_after),
        competition: competition.into(),
    })
}

/// A player with their authoritative score in each competition, oldest competition first.
pub async fn player_profile(
    locks: &dyn TenantLock,
    shard: &mut TenantShard,
    viewer_player_id: &str,
    player_id: &str,
) -> Result<PlayerProfile> {
    let tenant_id = shard.tenant_id();

    authorize_player(shard, viewer_player_id).await?;
    let player = PlayerRepository::new(shard.conn()).get(player_id).await?;
    let competitions = CompetitionRepository::new(shard.conn())
        .list_oldest_first(tenant_id)
        .await?;

    let mut scores = Vec::new();
    {
        let _guard = locks.acquire(tenant_id).await?;
        let mut repo = PlayerScoreRepository::new(shard.conn());
        for competition in competitions {
            if let Some(latest) = repo
                .latest_for_player(tenant_id, &competition.id, &player.id)
                .await?
            {
                scores.push(PlayerScoreDetail {
                    competition_title: competition.title,
                    score: latest.score,
                });
            }
        }
    }

    Ok(PlayerProfile {
        player: player.into(),
        scores,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(player_id: &str, score: i64, row_num: i64) -> ScoreEntry {
        ScoreEntry {
            player_id: player_id.to_string(),
            player_display_name: player_id.to_uppercase(),
            score,
            row_num,
        }
    }

    fn by_row_num_desc(mut entries: Vec<ScoreEntry>) -> Vec<ScoreEntry> {
        entries.sort_by(|a, b| b.row_num.cmp(&a.row_num));
        entries
    }

    #[test]
    fn test_latest_row_wins() {
        let entries = by_row_num_desc(vec![entry("alice", 90, 1), entry("alice", 10, 2)]);
        let ranks = rank_scores(entries, 0);
        assert_eq!(ranks.len(), 1);
        assert_eq!(ranks[0].score, 10);
    }

    #[test]
    fn test_tie_goes_to_earlier_row() {
        let entries = by_row_num_desc(vec![
            entry("bob", 50, 1),
            entry("alice", 50, 2),
            entry("carol", 70, 3),
        ]);
        let ranks = rank_scores(entries, 0);
        let order: Vec<_> = ranks.iter().map(|r| r.player_id.as_str()).collect();
        assert_eq!(order, ["carol", "bob", "alice"]);
        assert_eq!(ranks[2].rank, 3);
        assert_eq!(ranks[0].player_display_name, "CAROL");
    }

    #[test]
    fn test_pages_concatenate_to_full_order() {
        let entries = by_row_num_desc(
            (0..250)
                .map(|i| entry(&format!("p{}", i), (i % 17) as i64, i as i64 + 1))
                .collect(),
        );
        let full = rank_scores(entries.clone(), 0);
        assert_eq!(full.len(), RANKING_PAGE_SIZE);

        let mut concatenated = Vec::new();
        for rank_after in [0, 100, 200] {
            let page = rank_scores(entries.clone(), rank_after);
            assert!(page.iter().all(|r| r.rank > rank_after as i64));
            concatenated.extend(page);
        }
        assert_eq!(concatenated.len(), 250);
        assert!(concatenated.iter().enumerate().all(|(i, r)| r.rank == i as i64 + 1));
        assert_eq!(concatenated[..100], full[..]);
    }

    #[test]
    fn test_rank_after_past_end_is_empty() {
        let entries = vec![entry("alice", 1, 1)];
        assert!(rank_scores(entries, 1).is_empty());
    }
}
