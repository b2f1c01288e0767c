//! Globally unique, increasing identifiers backed by the shared `id_generator` table.

use std::future::Future;
use std::sync::Arc;

use sqlx::SqlitePool;

use crate::error::{Result, StorageError};

pub const MAX_DISPENSE_ATTEMPTS: usize = 100;

/// Decides whether a failed write may succeed when retried.
pub trait ConflictClassifier: Send + Sync {
    fn is_transient(&self, error: &sqlx::Error) -> bool;
}

/// Treats `SQLITE_BUSY` and `SQLITE_LOCKED` (including extended codes) as transient.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteConflictClassifier;

const SQLITE_BUSY: i32 = 5;
const SQLITE_LOCKED: i32 = 6;

impl ConflictClassifier for SqliteConflictClassifier {
    fn is_transient(&self, error: &sqlx::Error) -> bool {
        let sqlx::Error::Database(db_err) = error else {
            return false;
        };

        db_err
            .code()
            .and_then(|code| code.parse::<i32>().ok())
            .is_some_and(|code| matches!(code & 0xff, SQLITE_BUSY | SQLITE_LOCKED))
    }
}

#[derive(Clone)]
pub struct IdDispenser {
    pool: SqlitePool,
    classifier: Arc<dyn ConflictClassifier>,
    max_attempts: usize,
}

impl IdDispenser {
    pub fn new(pool: SqlitePool) -> Self {
        Self::with_classifier(pool, Arc::new(SqliteConflictClassifier))
    }

    pub fn with_classifier(pool: SqlitePool, classifier: Arc<dyn ConflictClassifier>) -> Self {
        Self {
            pool,
            classifier,
            max_attempts: MAX_DISPENSE_ATTEMPTS,
        }
    }

    /// Allocate the next id, rendered as lowercase hex.
    pub async fn dispense(&self) -> Result<String> {
        let id = retry_on_conflict(self.max_attempts, self.classifier.as_ref(), || async {
            sqlx::query("REPLACE INTO id_generator (stub) VALUES (?)")
                .bind("a")
                .execute(&self.pool)
                .await
                .map(|done| done.last_insert_rowid())
        })
        .await?;

        Ok(format!("{:x}", id))
    }
}

impl std::fmt::Debug for IdDispenser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdDispenser")
            .field("max_attempts", &self.max_attempts)
            .finish_non_exhaustive()
    }
}

/// Run `op` until it succeeds, fails with a non-transient error, or `max_attempts` is reached.
pub(crate) async fn retry_on_conflict<T, F, Fut>(
    max_attempts: usize,
    classifier: &dyn ConflictClassifier,
    mut op: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = sqlx::Result<T>>,
{
    let mut attempt = 0;
    loop {
        attempt += 1;
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if classifier.is_transient(&e) => {
                if attempt >= max_attempts {
                    return Err(StorageError::IdAllocationFailed {
                        attempts: attempt,
                        source: e,
                    });
                }
                tracing::debug!(attempt, error = %e, "Write conflict while dispensing id, retrying");
            }
            Err(e) => {
                return Err(StorageError::Query {
                    context: "dispense id".to_string(),
                    source: e,
                });
            }
        }
    }
}
