use sqlx::SqliteConnection;

use crate::error::{QueryContext, Result, StorageError};
use crate::models::Competition;

/// Repository for competitions stored in a tenant shard
pub struct CompetitionRepository<'a> {
    conn: &'a mut SqliteConnection,
}

impl<'a> CompetitionRepository<'a> {
    pub fn new(conn: &'a mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// List competitions, newest first
    pub async fn list(&mut self, tenant_id: i64) -> Result<Vec<Competition>> {
        self.list_ordered(tenant_id, "DESC").await
    }

    /// List competitions in creation order
    pub async fn list_oldest_first(&mut self, tenant_id: i64) -> Result<Vec<Competition>> {
        self.list_ordered(tenant_id, "ASC").await
    }

    async fn list_ordered(&mut self, tenant_id: i64, direction: &str) -> Result<Vec<Competition>> {
        let sql = format!(
            r#"
            SELECT id, tenant_id, title, finished_at, created_at, updated_at
            FROM competition
            WHERE tenant_id = ?
            ORDER BY created_at {direction}, id {direction}
            "#
        );

        let competitions = sqlx::query_as::<_, Competition>(&sql)
            .bind(tenant_id)
            .fetch_all(&mut *self.conn)
            .await
            .query_context(|| format!("list competitions tenant={}", tenant_id))?;

        Ok(competitions)
    }

    /// Get a competition by ID
    pub async fn get(&mut self, id: &str) -> Result<Competition> {
        sqlx::query_as::<_, Competition>(
            r#"
            SELECT id, tenant_id, title, finished_at, created_at, updated_at
            FROM competition
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await
        .query_context(|| format!("select competition id={}", id))?
        .ok_or_else(|| StorageError::CompetitionNotFound(id.to_string()))
    }

    /// Create a new, ongoing competition
    pub async fn create(&mut self, id: &str, tenant_id: i64, title: &str, now: i64) -> Result<Competition> {
        let competition = sqlx::query_as::<_, Competition>(
            r#"
            INSERT INTO competition (id, tenant_id, title, finished_at, created_at, updated_at)
            VALUES (?, ?, ?, NULL, ?, ?)
            RETURNING id, tenant_id, title, finished_at, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(tenant_id)
        .bind(title)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *self.conn)
        .await
        .query_context(|| format!("insert competition id={}", id))?;

        Ok(competition)
    }

    /// Close a competition. The first close wins; later calls keep its timestamp.
    pub async fn finish(&mut self, id: &str, now: i64) -> Result<Competition> {
        let competition = self.get(id).await?;
        if competition.is_finished() {
            return Ok(competition);
        }

        sqlx::query(
            r#"
            UPDATE competition
            SET finished_at = ?, updated_at = ?
            WHERE id = ? AND finished_at IS NULL
            "#,
        )
        .bind(now)
        .bind(now)
        .bind(id)
        .execute(&mut *self.conn)
        .await
        .query_context(|| format!("finish competition id={}", id))?;

        self.get(id).await
    }
}
