use sqlx::{Connection, FromRow, QueryBuilder, Sqlite, SqliteConnection};

use crate::error::{QueryContext, Result};
use crate::models::PlayerScore;

const PLAYER_SCORE_COLUMNS: usize = 8;

/// A score row joined with the player's display name.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ScoreEntry {
    pub player_id: String,
    pub player_display_name: String,
    pub score: i64,
    pub row_num: i64,
}

pub struct PlayerScoreRepository<'a> {
    conn: &'a mut SqliteConnection,
}

impl<'a> PlayerScoreRepository<'a> {
    pub fn new(conn: &'a mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// Swap the score generation of a competition for `rows` in one transaction.
    pub async fn replace_generation(
        &mut self,
        tenant_id: i64,
        competition_id: &str,
        rows: &[PlayerScore],
    ) -> Result<()> {
        let mut tx = self
            .conn
            .begin()
            .await
            .query_context(|| format!("begin score replacement competition={}", competition_id))?;

        sqlx::query("DELETE FROM player_score WHERE tenant_id = ? AND competition_id = ?")
            .bind(tenant_id)
            .bind(competition_id)
            .execute(&mut *tx)
            .await
            .query_context(|| {
                format!(
                    "delete player_score tenant={} competition={}",
                    tenant_id, competition_id
                )
            })?;

        for chunk in rows.chunks(super::MAX_BINDS_PER_STATEMENT / PLAYER_SCORE_COLUMNS) {
            let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(
                "INSERT INTO player_score (id, tenant_id, player_id, competition_id, score, row_num, created_at, updated_at) ",
            );
            query.push_values(chunk, |mut b, row| {
                b.push_bind(&row.id)
                    .push_bind(row.tenant_id)
                    .push_bind(&row.player_id)
                    .push_bind(&row.competition_id)
                    .push_bind(row.score)
                    .push_bind(row.row_num)
                    .push_bind(row.created_at)
                    .push_bind(row.updated_at);
            });

            query
                .build()
                .execute(&mut *tx)
                .await
                .query_context(|| {
                    format!(
                        "insert {} player_score rows competition={}",
                        chunk.len(),
                        competition_id
                    )
                })?;
        }

        tx.commit()
            .await
            .query_context(|| format!("commit score replacement competition={}", competition_id))?;

        Ok(())
    }

    /// Every row of the current generation, latest sheet position first.
    pub async fn list_by_row_num_desc(
        &mut self,
        tenant_id: i64,
        competition_id: &str,
    ) -> Result<Vec<ScoreEntry>> {
        let entries = sqlx::query_as::<_, ScoreEntry>(
            r#"
            SELECT ps.player_id, p.display_name AS player_display_name, ps.score, ps.row_num
            FROM player_score ps
            INNER JOIN player p ON p.id = ps.player_id
            WHERE ps.tenant_id = ? AND ps.competition_id = ?
            ORDER BY ps.row_num DESC
            "#,
        )
        .bind(tenant_id)
        .bind(competition_id)
        .fetch_all(&mut *self.conn)
        .await
        .query_context(|| {
            format!(
                "select player_score tenant={} competition={}",
                tenant_id, competition_id
            )
        })?;

        Ok(entries)
    }

    pub async fn scored_player_ids(
        &mut self,
        tenant_id: i64,
        competition_id: &str,
    ) -> Result<Vec<String>> {
        let ids: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT DISTINCT player_id
            FROM player_score
            WHERE tenant_id = ? AND competition_id = ?
            "#,
        )
        .bind(tenant_id)
        .bind(competition_id)
        .fetch_all(&mut *self.conn)
        .await
        .query_context(|| {
            format!(
                "select scored players tenant={} competition={}",
                tenant_id, competition_id
            )
        })?;

        Ok(ids.into_iter().map(|(id,)| id).collect())
    }

    /// The authoritative score of a player: the row with the highest row_num.
    pub async fn latest_for_player(
        &mut self,
        tenant_id: i64,
        competition_id: &str,
        player_id: &str,
    ) -> Result<Option<PlayerScore>> {
        sqlx::query_as::<_, PlayerScore>(
            r#"
            SELECT id, tenant_id, player_id, competition_id, score, row_num, created_at, updated_at
            FROM player_score
            WHERE tenant_id = ? AND competition_id = ? AND player_id = ?
            ORDER BY row_num DESC
            LIMIT 1
            "#,
        )
        .bind(tenant_id)
        .bind(competition_id)
        .bind(player_id)
        .fetch_optional(&mut *self.conn)
        .await
        .query_context(|| {
            format!(
                "select latest score player={} competition={}",
                player_id, competition_id
            )
        })
    }

    pub async fn count(&mut self, tenant_id: i64, competition_id: &str) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM player_score WHERE tenant_id = ? AND competition_id = ?",
        )
        .bind(tenant_id)
        .bind(competition_id)
        .fetch_one(&mut *self.conn)
        .await
        .query_context(|| format!("count player_score competition={}", competition_id))?;

        Ok(count)
    }
}
