use std::collections::HashSet;

use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

use crate::error::{QueryContext, Result, StorageError};
use crate::models::Player;

pub struct PlayerRepository<'a> {
    conn: &'a mut SqliteConnection,
}

impl<'a> PlayerRepository<'a> {
    pub fn new(conn: &'a mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// List the tenant's players, newest first
    pub async fn list(&mut self, tenant_id: i64) -> Result<Vec<Player>> {
        let players = sqlx::query_as::<_, Player>(
            r#"
            SELECT id, tenant_id, display_name, is_disqualified, created_at, updated_at
            FROM player
            WHERE tenant_id = ?
            ORDER BY created_at DESC
            "#,
        )
        .bind(tenant_id)
        .fetch_all(&mut *self.conn)
        .await
        .query_context(|| format!("list players tenant={}", tenant_id))?;

        Ok(players)
    }

    pub async fn find(&mut self, id: &str) -> Result<Option<Player>> {
        sqlx::query_as::<_, Player>(
            r#"
            SELECT id, tenant_id, display_name, is_disqualified, created_at, updated_at
            FROM player
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await
        .query_context(|| format!("select player id={}", id))
    }

    pub async fn get(&mut self, id: &str) -> Result<Player> {
        self.find(id)
            .await?
            .ok_or_else(|| StorageError::PlayerNotFound(id.to_string()))
    }

    pub async fn create(
        &mut self,
        id: &str,
        tenant_id: i64,
        display_name: &str,
        now: i64,
    ) -> Result<Player> {
        let player = sqlx::query_as::<_, Player>(
            r#"
            INSERT INTO player (id, tenant_id, display_name, is_disqualified, created_at, updated_at)
            VALUES (?, ?, ?, FALSE, ?, ?)
            RETURNING id, tenant_id, display_name, is_disqualified, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(tenant_id)
        .bind(display_name)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *self.conn)
        .await
        .query_context(|| format!("insert player id={}", id))?;

        Ok(player)
    }

    /// Mark a player disqualified. Already disqualified players are left as they are.
    pub async fn disqualify(&mut self, id: &str, now: i64) -> Result<Player> {
        sqlx::query(
            r#"
            UPDATE player
            SET is_disqualified = TRUE, updated_at = ?
            WHERE id = ? AND is_disqualified = FALSE
            "#,
        )
        .bind(now)
        .bind(id)
        .execute(&mut *self.conn)
        .await
        .query_context(|| format!("disqualify player id={}", id))?;

        self.get(id).await
    }

    /// The subset of `ids` that exist in this shard.
    pub async fn existing_ids(&mut self, ids: &[&str]) -> Result<HashSet<String>> {
        let mut existing = HashSet::with_capacity(ids.len());

        for chunk in ids.chunks(super::MAX_BINDS_PER_STATEMENT) {
            let mut query: QueryBuilder<Sqlite> =
                QueryBuilder::new("SELECT id FROM player WHERE id IN (");
            let mut separated = query.separated(", ");
            for id in chunk {
                separated.push_bind(*id);
            }
            separated.push_unseparated(")");

            let found: Vec<(String,)> = query
                .build_query_as()
                .fetch_all(&mut *self.conn)
                .await
                .query_context(|| format!("select {} player ids", chunk.len()))?;

            existing.extend(found.into_iter().map(|(id,)| id));
        }

        Ok(existing)
    }
}
