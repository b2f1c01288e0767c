use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::error::{QueryContext, Result, StorageError};
use crate::models::Tenant;

pub struct TenantRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> TenantRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a tenant; the shared store assigns its id.
    pub async fn create(&self, name: &str, display_name: &str, now: i64) -> Result<Tenant> {
        let tenant = sqlx::query_as::<_, Tenant>(
            r#"
            INSERT INTO tenant (name, display_name, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            RETURNING id, name, display_name, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(display_name)
        .bind(now)
        .bind(now)
        .fetch_one(self.pool)
        .await
        .query_context(|| format!("insert tenant {}", name))
        .map_err(|e| {
            if e.is_unique_violation() {
                StorageError::ConstraintViolation(format!("duplicate tenant: {}", name))
            } else {
                e
            }
        })?;

        Ok(tenant)
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Tenant> {
        sqlx::query_as::<_, Tenant>(
            r#"
            SELECT id, name, display_name, created_at, updated_at
            FROM tenant
            WHERE name = ?
            "#,
        )
        .bind(name)
        .fetch_optional(self.pool)
        .await
        .query_context(|| format!("select tenant name={}", name))?
        .ok_or_else(|| StorageError::TenantNotFound(name.to_string()))
    }

    /// Tenants by id descending, optionally only those with `id < before`.
    pub async fn list_before(&self, before: Option<i64>, limit: i64) -> Result<Vec<Tenant>> {
        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT id, name, display_name, created_at, updated_at FROM tenant",
        );

        if let Some(before) = before {
            query.push(" WHERE id < ");
            query.push_bind(before);
        }

        query.push(" ORDER BY id DESC LIMIT ");
        query.push_bind(limit);

        let tenants = query
            .build_query_as::<Tenant>()
            .fetch_all(self.pool)
            .await
            .query_context(|| format!("list tenants before={:?}", before))?;

        Ok(tenants)
    }
}
