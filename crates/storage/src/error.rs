use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{context}: {source}")]
    Query {
        context: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Tenant not found: {0}")]
    TenantNotFound(String),

    #[error("Player not found: {0}")]
    PlayerNotFound(String),

    #[error("Competition not found: {0}")]
    CompetitionNotFound(String),

    /// The authenticated subject has no player record in the tenant.
    #[error("Player is not registered: {0}")]
    UnknownViewer(String),

    #[error("Player is disqualified: {0}")]
    PlayerDisqualified(String),

    #[error("Invalid tenant name: {0}")]
    InvalidTenantName(String),

    #[error("Invalid score sheet: {0}")]
    InvalidFormat(String),

    #[error("Player not found in score sheet: {0}")]
    UnknownPlayer(String),

    #[error("Invalid score at row {row_num}: {value:?}")]
    InvalidScore { row_num: i64, value: String },

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Tenant shard {tenant_id} is unavailable: {source}")]
    ShardUnavailable {
        tenant_id: i64,
        #[source]
        source: sqlx::Error,
    },

    #[error("Failed to provision shard for tenant {tenant_id}: {reason}")]
    ProvisioningFailed { tenant_id: i64, reason: String },

    #[error("Failed to acquire lock for tenant {tenant_id}: {reason}")]
    LockUnavailable { tenant_id: i64, reason: String },

    #[error("Id allocation failed after {attempts} attempts: {source}")]
    IdAllocationFailed {
        attempts: usize,
        #[source]
        source: sqlx::Error,
    },
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn is_unique_violation(&self) -> bool {
        match self {
            StorageError::Database(sqlx::Error::Database(e))
            | StorageError::Query {
                source: sqlx::Error::Database(e),
                ..
            } => e.is_unique_violation(),
            _ => false,
        }
    }

    /// Request-level validation failures (bad input, nothing was written).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            StorageError::InvalidTenantName(_)
                | StorageError::InvalidFormat(_)
                | StorageError::UnknownPlayer(_)
                | StorageError::InvalidScore { .. }
                | StorageError::ConstraintViolation(_)
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StorageError::TenantNotFound(_)
                | StorageError::PlayerNotFound(_)
                | StorageError::CompetitionNotFound(_)
        )
    }
}

/// Attaches the failing operation to a raw sqlx error.
pub trait QueryContext<T> {
    fn query_context<F>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> QueryContext<T> for std::result::Result<T, sqlx::Error> {
    fn query_context<F>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|source| StorageError::Query {
            context: context(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_context_wraps_source() {
        let raw: std::result::Result<(), sqlx::Error> = Err(sqlx::Error::RowNotFound);
        let err = raw
            .query_context(|| "select competition 42".to_string())
            .unwrap_err();

        assert!(matches!(err, StorageError::Query { .. }));
        assert!(err.to_string().starts_with("select competition 42: "));
    }

    #[test]
    fn test_classification() {
        assert!(StorageError::UnknownPlayer("p1".into()).is_validation());
        assert!(StorageError::CompetitionNotFound("c1".into()).is_not_found());
        assert!(!StorageError::PlayerDisqualified("p1".into()).is_not_found());
        assert!(!StorageError::Database(sqlx::Error::RowNotFound).is_unique_violation());
    }
}
