#![allow(dead_code)]

use storage::models::{Competition, Player, Tenant};
use storage::repository::TenantRepository;
use storage::services::{competitions, players, provisioning};
use storage::{Database, IdDispenser, InMemoryTenantLock, ShardGateway, TenantShard};
use tempfile::TempDir;

/// A fresh shared store and shard directory, removed on drop.
pub struct TestEnv {
    pub db: Database,
    pub shards: ShardGateway,
    pub locks: InMemoryTenantLock,
    pub ids: IdDispenser,
    _dir: TempDir,
}

impl TestEnv {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let db = Database::open(dir.path().join("shared.db"))
            .await
            .expect("open shared store");
        db.run_migrations().await.expect("migrations");

        Self {
            shards: ShardGateway::new(dir.path().join("tenant_db")),
            locks: InMemoryTenantLock::new(),
            ids: IdDispenser::new(db.pool().clone()),
            db,
            _dir: dir,
        }
    }

    pub async fn tenant(&self, name: &str) -> Tenant {
        provisioning::create_tenant(&self.db, &self.shards, name, &format!("{} inc", name))
            .await
            .expect("create tenant");
        TenantRepository::new(self.db.pool())
            .find_by_name(name)
            .await
            .expect("find tenant")
    }

    pub async fn shard(&self, tenant: &Tenant) -> TenantShard {
        self.shards.open(tenant.id).await.expect("open shard")
    }

    pub async fn player(&self, shard: &mut TenantShard, display_name: &str) -> Player {
        players::add_players(&self.ids, shard, &[display_name.to_string()])
            .await
            .expect("add player")
            .remove(0)
    }

    pub async fn competition(&self, shard: &mut TenantShard, title: &str) -> Competition {
        competitions::add_competition(&self.ids, shard, title)
            .await
            .expect("add competition")
    }
}

/// CSV body with the mandatory header.
pub fn sheet(rows: &[(&str, i64)]) -> Vec<u8> {
    let mut csv = String::from("player_id,score\n");
    for (player_id, score) in rows {
        csv.push_str(&format!("{},{}\n", player_id, score));
    }
    csv.into_bytes()
}
