mod common;

use common::TestEnv;
use storage::StorageError;
use storage::services::provisioning::create_tenant;
use storage::services::tenant_resolver::resolve_tenant;

const BASE: &str = ".t.scoreboard.local";

#[tokio::test]
async fn test_created_tenant_is_resolvable_and_has_a_shard() {
    let env = TestEnv::new().await;

    let created = create_tenant(&env.db, &env.shards, "acme", "Acme Inc").await.unwrap();
    assert_eq!(created.billing_yen, 0);
    assert_eq!(created.display_name, "Acme Inc");

    let tenant = resolve_tenant(&env.db, "acme.t.scoreboard.local:443", BASE)
        .await
        .unwrap();
    assert_eq!(tenant.id.to_string(), created.id);

    let shard = env.shards.open(tenant.id).await.unwrap();
    shard.close().await.unwrap();
}

#[tokio::test]
async fn test_duplicate_tenant_rejected() {
    let env = TestEnv::new().await;
    create_tenant(&env.db, &env.shards, "acme", "Acme").await.unwrap();

    let err = create_tenant(&env.db, &env.shards, "acme", "Acme again")
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::ConstraintViolation(_)));
    assert!(err.to_string().ends_with("duplicate tenant: acme"));
}

#[tokio::test]
async fn test_invalid_names_rejected() {
    let env = TestEnv::new().await;
    for name in ["Acme", "a", "-acme", "acme-", "ac_me"] {
        let err = create_tenant(&env.db, &env.shards, name, "x").await.unwrap_err();
        assert!(matches!(err, StorageError::InvalidTenantName(_)), "{}", name);
    }
}

#[tokio::test]
async fn test_admin_name_is_reserved() {
    let env = TestEnv::new().await;
    let err = create_tenant(&env.db, &env.shards, "admin", "Operator")
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::ConstraintViolation(_)));
}

#[tokio::test]
async fn test_admin_host_resolves_without_lookup() {
    let env = TestEnv::new().await;
    let tenant = resolve_tenant(&env.db, "admin.t.scoreboard.local", BASE)
        .await
        .unwrap();
    assert!(tenant.is_admin());
    assert_eq!(tenant.id, 0);
}

#[tokio::test]
async fn test_unknown_host_is_not_found() {
    let env = TestEnv::new().await;
    let err = resolve_tenant(&env.db, "ghost.t.scoreboard.local", BASE)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::TenantNotFound(_)));
}

#[tokio::test]
async fn test_dispensed_ids_increase() {
    let env = TestEnv::new().await;
    let a = u64::from_str_radix(&env.ids.dispense().await.unwrap(), 16).unwrap();
    let b = u64::from_str_radix(&env.ids.dispense().await.unwrap(), 16).unwrap();
    assert!(b > a);
}
