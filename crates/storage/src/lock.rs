//! Per-tenant exclusive locks serializing score replacement against score reads.

use std::fmt;
use std::fs::OpenOptions;
use std::future::Future;
use std::os::unix::fs::OpenOptionsExt;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use nix::fcntl::{Flock, FlockArg};
use tokio::sync::Mutex;

use crate::error::{Result, StorageError};

/// Held lock; dropping it releases the tenant.
pub struct TenantLockGuard {
    tenant_id: i64,
    _held: Box<dyn Send>,
}

impl TenantLockGuard {
    pub fn new(tenant_id: i64, held: impl Send + 'static) -> Self {
        Self {
            tenant_id,
            _held: Box::new(held),
        }
    }

    pub fn tenant_id(&self) -> i64 {
        self.tenant_id
    }
}

impl fmt::Debug for TenantLockGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TenantLockGuard")
            .field("tenant_id", &self.tenant_id)
            .finish_non_exhaustive()
    }
}

#[async_trait]
pub trait TenantLock: Send + Sync {
    /// Wait until the tenant is free. There is no timeout.
    async fn acquire(&self, tenant_id: i64) -> Result<TenantLockGuard>;
}

/// Run `body` while holding the tenant lock. The lock is released when `body`
/// finishes, whether it succeeded or not.
pub async fn with_tenant_lock<T, F, Fut>(lock: &dyn TenantLock, tenant_id: i64, body: F) -> Result<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let guard = lock.acquire(tenant_id).await?;
    let result = body().await;
    drop(guard);
    result
}

/// `flock(2)` on `<dir>/<tenant_id>.lock`, shared by every process using the same directory.
#[derive(Debug, Clone)]
pub struct FileTenantLock {
    dir: PathBuf,
}

impl FileTenantLock {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn lock_path(&self, tenant_id: i64) -> PathBuf {
        self.dir.join(format!("{}.lock", tenant_id))
    }
}

#[async_trait]
impl TenantLock for FileTenantLock {
    async fn acquire(&self, tenant_id: i64) -> Result<TenantLockGuard> {
        let path = self.lock_path(tenant_id);
        let unavailable = move |reason: String| StorageError::LockUnavailable { tenant_id, reason };

        tracing::debug!(tenant_id, path = %path.display(), "Waiting for tenant lock");

        let flock = tokio::task::spawn_blocking(move || {
            let file = OpenOptions::new()
                .create(true)
                .truncate(false)
                .write(true)
                .mode(0o600)
                .open(&path)
                .map_err(|e| format!("cannot open {}: {}", path.display(), e))?;

            Flock::lock(file, FlockArg::LockExclusive)
                .map_err(|(_, errno)| format!("flock {}: {}", path.display(), errno))
        })
        .await
        .map_err(|e| unavailable(e.to_string()))?
        .map_err(unavailable)?;

        Ok(TenantLockGuard::new(tenant_id, flock))
    }
}

/// Process-local locks for single-process deployments.
#[derive(Debug, Default, Clone)]
pub struct InMemoryTenantLock {
    locks: Arc<DashMap<i64, Arc<Mutex<()>>>>,
}

impl InMemoryTenantLock {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TenantLock for InMemoryTenantLock {
    async fn acquire(&self, tenant_id: i64) -> Result<TenantLockGuard> {
        let mutex = self.locks.entry(tenant_id).or_default().value().clone();
        let guard = mutex.lock_owned().await;
        Ok(TenantLockGuard::new(tenant_id, guard))
    }
}
