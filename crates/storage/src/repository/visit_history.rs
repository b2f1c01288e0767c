use sqlx::SqlitePool;

use crate::error::{QueryContext, Result};
use crate::models::VisitSummary;

pub struct VisitHistoryRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> VisitHistoryRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Append one visit. Repeated visits are expected and kept.
    pub async fn record(
        &self,
        player_id: &str,
        tenant_id: i64,
        competition_id: &str,
        now: i64,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO visit_history (player_id, tenant_id, competition_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(player_id)
        .bind(tenant_id)
        .bind(competition_id)
        .bind(now)
        .bind(now)
        .execute(self.pool)
        .await
        .query_context(|| {
            format!(
                "insert visit_history player={} tenant={} competition={}",
                player_id, tenant_id, competition_id
            )
        })?;

        Ok(())
    }

    /// First visit per player for one competition.
    pub async fn first_visits(&self, tenant_id: i64, competition_id: &str) -> Result<Vec<VisitSummary>> {
        let visits = sqlx::query_as::<_, VisitSummary>(
            r#"
            SELECT player_id, MIN(created_at) AS min_created_at
            FROM visit_history
            WHERE tenant_id = ? AND competition_id = ?
            GROUP BY player_id
            "#,
        )
        .bind(tenant_id)
        .bind(competition_id)
        .fetch_all(self.pool)
        .await
        .query_context(|| {
            format!(
                "select first visits tenant={} competition={}",
                tenant_id, competition_id
            )
        })?;

        Ok(visits)
    }
}
