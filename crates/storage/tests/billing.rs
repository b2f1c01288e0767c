mod common;

use common::{TestEnv, sheet};
use storage::repository::VisitHistoryRepository;
use storage::services::billing::{billing_report, tenant_billing, tenants_billing};
use storage::services::competitions::finish_competition;
use storage::services::ingestion::ingest_scores;
use storage::services::ranking::competition_ranking;

#[tokio::test]
async fn test_scorer_billed_as_player() {
    let env = TestEnv::new().await;
    let tenant = env.tenant("acme").await;
    let mut shard = env.shard(&tenant).await;
    let alice = env.player(&mut shard, "alice").await;
    let cup = env.competition(&mut shard, "spring-cup").await;

    ingest_scores(&env.ids, &env.locks, &mut shard, &cup.id, &sheet(&[(alice.id.as_str(), 42)]))
        .await
        .unwrap();
    competition_ranking(&env.db, &env.locks, &mut shard, &cup.id, &alice.id, 0)
        .await
        .unwrap();
    finish_competition(&mut shard, &cup.id).await.unwrap();

    let report = billing_report(&env.db, &env.locks, &mut shard, &cup.id)
        .await
        .unwrap();
    assert_eq!(report.competition_title, "spring-cup");
    assert_eq!(report.player_count, 1);
    assert_eq!(report.visitor_count, 0);
    assert_eq!(report.billing_yen, 100);
}

#[tokio::test]
async fn test_visitors_and_late_visits() {
    let env = TestEnv::new().await;
    let tenant = env.tenant("acme").await;
    let mut shard = env.shard(&tenant).await;
    let alice = env.player(&mut shard, "alice").await;
    let bob = env.player(&mut shard, "bob").await;
    let carol = env.player(&mut shard, "carol").await;
    let cup = env.competition(&mut shard, "spring-cup").await;

    ingest_scores(&env.ids, &env.locks, &mut shard, &cup.id, &sheet(&[(alice.id.as_str(), 1)]))
        .await
        .unwrap();
    competition_ranking(&env.db, &env.locks, &mut shard, &cup.id, &bob.id, 0)
        .await
        .unwrap();
    let finished = finish_competition(&mut shard, &cup.id).await.unwrap();
    let finished_at = finished.finished_at.unwrap();

    VisitHistoryRepository::new(env.db.pool())
        .record(&carol.id, tenant.id, &cup.id, finished_at + 60)
        .await
        .unwrap();

    let report = billing_report(&env.db, &env.locks, &mut shard, &cup.id)
        .await
        .unwrap();
    assert_eq!(report.player_count, 1);
    assert_eq!(report.visitor_count, 1);
    assert_eq!(report.billing_player_yen, 100);
    assert_eq!(report.billing_visitor_yen, 10);
    assert_eq!(report.billing_yen, 110);
}

#[tokio::test]
async fn test_unfinished_competition_bills_zero() {
    let env = TestEnv::new().await;
    let tenant = env.tenant("acme").await;
    let mut shard = env.shard(&tenant).await;
    let alice = env.player(&mut shard, "alice").await;
    let cup = env.competition(&mut shard, "spring-cup").await;

    ingest_scores(&env.ids, &env.locks, &mut shard, &cup.id, &sheet(&[(alice.id.as_str(), 7)]))
        .await
        .unwrap();

    let report = billing_report(&env.db, &env.locks, &mut shard, &cup.id)
        .await
        .unwrap();
    assert_eq!(report.competition_id, cup.id);
    assert_eq!(report.player_count, 0);
    assert_eq!(report.billing_yen, 0);
}

#[tokio::test]
async fn test_tenant_billing_covers_every_competition() {
    let env = TestEnv::new().await;
    let tenant = env.tenant("acme").await;
    let mut shard = env.shard(&tenant).await;
    let alice = env.player(&mut shard, "alice").await;
    let spring = env.competition(&mut shard, "spring-cup").await;
    let summer = env.competition(&mut shard, "summer-cup").await;

    for cup in [&spring, &summer] {
        ingest_scores(&env.ids, &env.locks, &mut shard, &cup.id, &sheet(&[(alice.id.as_str(), 1)]))
            .await
            .unwrap();
        finish_competition(&mut shard, &cup.id).await.unwrap();
    }

    let reports = tenant_billing(&env.db, &env.locks, &mut shard).await.unwrap();
    assert_eq!(reports.len(), 2);
    assert!(reports.iter().all(|r| r.billing_yen == 100));
}

#[tokio::test]
async fn test_tenants_billing_pages_by_id_descending() {
    let env = TestEnv::new().await;
    let mut tenants = Vec::new();
    for i in 0..12 {
        tenants.push(env.tenant(&format!("tenant-{}", i)).await);
    }

    let billed = &tenants[11];
    let mut shard = env.shard(billed).await;
    let alice = env.player(&mut shard, "alice").await;
    let cup = env.competition(&mut shard, "spring-cup").await;
    ingest_scores(&env.ids, &env.locks, &mut shard, &cup.id, &sheet(&[(alice.id.as_str(), 1)]))
        .await
        .unwrap();
    finish_competition(&mut shard, &cup.id).await.unwrap();
    shard.close().await.unwrap();

    let first = tenants_billing(&env.db, &env.shards, &env.locks, None).await.unwrap();
    assert_eq!(first.len(), 10);
    assert_eq!(first[0].name, "tenant-11");
    assert_eq!(first[0].billing_yen, 100);
    assert!(first[1..].iter().all(|t| t.billing_yen == 0));

    let cursor: i64 = first[9].id.parse().unwrap();
    let second = tenants_billing(&env.db, &env.shards, &env.locks, Some(cursor))
        .await
        .unwrap();
    let names: Vec<_> = second.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["tenant-1", "tenant-0"]);
}

#[tokio::test]
async fn test_missing_shard_bills_zero() {
    let env = TestEnv::new().await;
    let tenant = env.tenant("acme").await;
    tokio::fs::remove_file(env.shards.shard_path(tenant.id))
        .await
        .unwrap();

    let page = tenants_billing(&env.db, &env.shards, &env.locks, None).await.unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].billing_yen, 0);
}
