pub mod database;
pub mod dto;
pub mod error;
pub mod id_dispenser;
pub mod lock;
pub mod models;
pub mod repository;
pub mod services;
pub mod shard;

pub use database::Database;
pub use error::{Result, StorageError};
pub use id_dispenser::IdDispenser;
pub use lock::{FileTenantLock, InMemoryTenantLock, TenantLock, TenantLockGuard};
pub use shard::{ShardGateway, TenantShard};
