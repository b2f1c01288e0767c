mod common;

use common::{TestEnv, sheet};
use storage::StorageError;
use storage::repository::VisitHistoryRepository;
use storage::services::ingestion::ingest_scores;
use storage::services::players::disqualify_player;
use storage::services::ranking::{competition_ranking, player_profile};

#[tokio::test]
async fn test_latest_row_per_player_and_tie_break() {
    let env = TestEnv::new().await;
    let tenant = env.tenant("acme").await;
    let mut shard = env.shard(&tenant).await;
    let alice = env.player(&mut shard, "alice").await;
    let bob = env.player(&mut shard, "bob").await;
    let carol = env.player(&mut shard, "carol").await;
    let cup = env.competition(&mut shard, "spring-cup").await;

    let rows = [
        (alice.id.as_str(), 100),
        (bob.id.as_str(), 50),
        (carol.id.as_str(), 70),
        (alice.id.as_str(), 50),
    ];
    ingest_scores(&env.ids, &env.locks, &mut shard, &cup.id, &sheet(&rows))
        .await
        .unwrap();

    let ranking = competition_ranking(&env.db, &env.locks, &mut shard, &cup.id, &bob.id, 0)
        .await
        .unwrap();
    let order: Vec<(&str, i64, i64)> = ranking
        .ranks
        .iter()
        .map(|r| (r.player_id.as_str(), r.score, r.rank))
        .collect();
    assert_eq!(
        order,
        [
            (carol.id.as_str(), 70, 1),
            (bob.id.as_str(), 50, 2),
            (alice.id.as_str(), 50, 3),
        ]
    );
}

#[tokio::test]
async fn test_ranking_is_repeatable() {
    let env = TestEnv::new().await;
    let tenant = env.tenant("acme").await;
    let mut shard = env.shard(&tenant).await;
    let alice = env.player(&mut shard, "alice").await;
    let bob = env.player(&mut shard, "bob").await;
    let cup = env.competition(&mut shard, "spring-cup").await;
    ingest_scores(
        &env.ids,
        &env.locks,
        &mut shard,
        &cup.id,
        &sheet(&[(alice.id.as_str(), 3), (bob.id.as_str(), 3)]),
    )
    .await
    .unwrap();

    let first = competition_ranking(&env.db, &env.locks, &mut shard, &cup.id, &alice.id, 0)
        .await
        .unwrap();
    let second = competition_ranking(&env.db, &env.locks, &mut shard, &cup.id, &alice.id, 0)
        .await
        .unwrap();
    assert_eq!(first.ranks, second.ranks);
}

#[tokio::test]
async fn test_rank_after_pages() {
    let env = TestEnv::new().await;
    let tenant = env.tenant("acme").await;
    let mut shard = env.shard(&tenant).await;
    let cup = env.competition(&mut shard, "spring-cup").await;

    let mut ids = Vec::new();
    for i in 0..120 {
        ids.push(env.player(&mut shard, &format!("player-{}", i)).await.id);
    }
    let rows: Vec<(&str, i64)> = ids.iter().enumerate().map(|(i, id)| (id.as_str(), i as i64)).collect();
    ingest_scores(&env.ids, &env.locks, &mut shard, &cup.id, &sheet(&rows))
        .await
        .unwrap();

    let first = competition_ranking(&env.db, &env.locks, &mut shard, &cup.id, &ids[0], 0)
        .await
        .unwrap();
    let second = competition_ranking(&env.db, &env.locks, &mut shard, &cup.id, &ids[0], 100)
        .await
        .unwrap();

    assert_eq!(first.ranks.len(), 100);
    assert_eq!(second.ranks.len(), 20);
    assert_eq!(first.ranks[0].score, 119);
    assert_eq!(second.ranks[0].rank, 101);
    assert_eq!(second.ranks[19].score, 0);
}

#[tokio::test]
async fn test_viewer_must_be_registered_and_eligible() {
    let env = TestEnv::new().await;
    let tenant = env.tenant("acme").await;
    let mut shard = env.shard(&tenant).await;
    let alice = env.player(&mut shard, "alice").await;
    let cup = env.competition(&mut shard, "spring-cup").await;

    let err = competition_ranking(&env.db, &env.locks, &mut shard, &cup.id, "stranger", 0)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::UnknownViewer(_)));

    disqualify_player(&mut shard, &alice.id).await.unwrap();
    let err = competition_ranking(&env.db, &env.locks, &mut shard, &cup.id, &alice.id, 0)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::PlayerDisqualified(_)));
}

#[tokio::test]
async fn test_every_view_is_recorded() {
    let env = TestEnv::new().await;
    let tenant = env.tenant("acme").await;
    let mut shard = env.shard(&tenant).await;
    let alice = env.player(&mut shard, "alice").await;
    let cup = env.competition(&mut shard, "spring-cup").await;

    for _ in 0..3 {
        competition_ranking(&env.db, &env.locks, &mut shard, &cup.id, &alice.id, 0)
            .await
            .unwrap();
    }

    let (views,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM visit_history WHERE player_id = ? AND competition_id = ?",
    )
    .bind(&alice.id)
    .bind(&cup.id)
    .fetch_one(env.db.pool())
    .await
    .unwrap();
    assert_eq!(views, 3);

    let first_visits = VisitHistoryRepository::new(env.db.pool())
        .first_visits(tenant.id, &cup.id)
        .await
        .unwrap();
    assert_eq!(first_visits.len(), 1);
}

#[tokio::test]
async fn test_unknown_competition_records_nothing() {
    let env = TestEnv::new().await;
    let tenant = env.tenant("acme").await;
    let mut shard = env.shard(&tenant).await;
    let alice = env.player(&mut shard, "alice").await;

    let err = competition_ranking(&env.db, &env.locks, &mut shard, "missing", &alice.id, 0)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::CompetitionNotFound(_)));

    let (views,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM visit_history")
        .fetch_one(env.db.pool())
        .await
        .unwrap();
    assert_eq!(views, 0);
}

#[tokio::test]
async fn test_player_profile_lists_latest_scores() {
    let env = TestEnv::new().await;
    let tenant = env.tenant("acme").await;
    let mut shard = env.shard(&tenant).await;
    let alice = env.player(&mut shard, "alice").await;
    let bob = env.player(&mut shard, "bob").await;
    let spring = env.competition(&mut shard, "spring-cup").await;
    env.competition(&mut shard, "summer-cup").await;

    ingest_scores(
        &env.ids,
        &env.locks,
        &mut shard,
        &spring.id,
        &sheet(&[(alice.id.as_str(), 5), (alice.id.as_str(), 8)]),
    )
    .await
    .unwrap();

    let profile = player_profile(&env.locks, &mut shard, &bob.id, &alice.id)
        .await
        .unwrap();
    assert_eq!(profile.player.display_name, "alice");
    assert_eq!(profile.scores.len(), 1);
    assert_eq!(profile.scores[0].competition_title, "spring-cup");
    assert_eq!(profile.scores[0].score, 8);

    let err = player_profile(&env.locks, &mut shard, &bob.id, "missing")
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::PlayerNotFound(_)));
}
