use std::sync::Arc;

use storage::{Database, IdDispenser, ShardGateway, TenantLock};

use crate::middleware::auth::TokenVerifier;

/// Everything a handler needs, built once in `main`.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub shards: ShardGateway,
    pub locks: Arc<dyn TenantLock>,
    pub ids: IdDispenser,
    pub verifier: Arc<TokenVerifier>,
    pub base_hostname: Arc<str>,
}
