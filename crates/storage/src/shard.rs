//! Tenant Store Gateway: one SQLite file per tenant, keyed by tenant id.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use sqlx::{Connection, Executor};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteJournalMode};

use crate::error::{Result, StorageError};

/// Schema applied to every freshly provisioned shard.
pub const DEFAULT_SHARD_SCHEMA: &str = include_str!("../schema/tenant.sql");

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct ShardGateway {
    dir: PathBuf,
    schema: Arc<str>,
}

impl ShardGateway {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_schema(dir, DEFAULT_SHARD_SCHEMA)
    }

    pub fn with_schema(dir: impl Into<PathBuf>, schema: impl Into<Arc<str>>) -> Self {
        Self {
            dir: dir.into(),
            schema: schema.into(),
        }
    }

    /// Load the provisioning script from disk instead of the embedded default.
    pub async fn with_schema_file(dir: impl Into<PathBuf>, schema_file: &Path) -> Result<Self> {
        let schema = tokio::fs::read_to_string(schema_file).await.map_err(|e| {
            StorageError::ProvisioningFailed {
                tenant_id: 0,
                reason: format!("cannot read {}: {}", schema_file.display(), e),
            }
        })?;
        Ok(Self::with_schema(dir, schema))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn shard_path(&self, tenant_id: i64) -> PathBuf {
        self.dir.join(format!("{}.db", tenant_id))
    }

    /// Open an existing shard. Fails with `ShardUnavailable` when it was never provisioned.
    pub async fn open(&self, tenant_id: i64) -> Result<TenantShard> {
        let options = SqliteConnectOptions::new()
            .filename(self.shard_path(tenant_id))
            .create_if_missing(false)
            .busy_timeout(BUSY_TIMEOUT);

        let conn = SqliteConnection::connect_with(&options)
            .await
            .map_err(|source| StorageError::ShardUnavailable { tenant_id, source })?;

        Ok(TenantShard { tenant_id, conn })
    }

    /// Provision an empty shard by applying the schema script.
    ///
    /// Must run right after the tenant row is committed in the shared store. Until it
    /// completes, `open` for this tenant fails with `ShardUnavailable`.
    pub async fn create(&self, tenant_id: i64) -> Result<()> {
        let provisioning_failed = |reason: String| StorageError::ProvisioningFailed { tenant_id, reason };

        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            provisioning_failed(format!("cannot create {}: {}", self.dir.display(), e))
        })?;

        let path = self.shard_path(tenant_id);
        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(BUSY_TIMEOUT);

        let mut conn = SqliteConnection::connect_with(&options)
            .await
            .map_err(|e| provisioning_failed(format!("cannot create {}: {}", path.display(), e)))?;

        let applied = conn.execute(&*self.schema).await;
        let closed = conn.close().await;

        applied.map_err(|e| provisioning_failed(format!("schema script failed: {}", e)))?;
        closed.map_err(|e| provisioning_failed(format!("cannot close {}: {}", path.display(), e)))?;

        tracing::info!(tenant_id, path = %path.display(), "Provisioned tenant shard");
        Ok(())
    }
}

/// An open connection to one tenant's shard.
///
/// Call [`TenantShard::close`] once done; dropping the handle on an error path
/// releases the connection as well.
#[derive(Debug)]
pub struct TenantShard {
    tenant_id: i64,
    conn: SqliteConnection,
}

impl TenantShard {
    pub fn tenant_id(&self) -> i64 {
        self.tenant_id
    }

    pub fn conn(&mut self) -> &mut SqliteConnection {
        &mut self.conn
    }

    pub async fn close(self) -> Result<()> {
        self.conn.close().await?;
        Ok(())
    }
}
