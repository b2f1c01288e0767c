mod common;

use common::{TestEnv, sheet};
use storage::StorageError;
use storage::repository::PlayerScoreRepository;
use storage::services::IngestOutcome;
use storage::services::competitions::finish_competition;
use storage::services::ingestion::ingest_scores;
use storage::services::ranking::competition_ranking;

#[tokio::test]
async fn test_upload_then_rank() {
    let env = TestEnv::new().await;
    let tenant = env.tenant("acme").await;
    let mut shard = env.shard(&tenant).await;
    let alice = env.player(&mut shard, "alice").await;
    let cup = env.competition(&mut shard, "spring-cup").await;

    let outcome = ingest_scores(&env.ids, &env.locks, &mut shard, &cup.id, &sheet(&[(alice.id.as_str(), 42)]))
        .await
        .unwrap();
    assert_eq!(outcome, IngestOutcome::Ingested { rows: 1 });

    let ranking = competition_ranking(&env.db, &env.locks, &mut shard, &cup.id, &alice.id, 0)
        .await
        .unwrap();
    assert_eq!(ranking.ranks.len(), 1);
    assert_eq!(ranking.ranks[0].rank, 1);
    assert_eq!(ranking.ranks[0].score, 42);
    assert_eq!(ranking.ranks[0].player_display_name, "alice");
    assert_eq!(ranking.competition.title, "spring-cup");
}

#[tokio::test]
async fn test_unknown_player_leaves_scores_untouched() {
    let env = TestEnv::new().await;
    let tenant = env.tenant("acme").await;
    let mut shard = env.shard(&tenant).await;
    let alice = env.player(&mut shard, "alice").await;
    let cup = env.competition(&mut shard, "spring-cup").await;

    ingest_scores(&env.ids, &env.locks, &mut shard, &cup.id, &sheet(&[(alice.id.as_str(), 10)]))
        .await
        .unwrap();

    let err = ingest_scores(
        &env.ids,
        &env.locks,
        &mut shard,
        &cup.id,
        &sheet(&[(alice.id.as_str(), 99), ("ghost", 1)]),
    )
    .await
    .unwrap_err();
    assert!(matches!(&err, StorageError::UnknownPlayer(id) if id == "ghost"));
    assert!(err.is_validation());

    let latest = PlayerScoreRepository::new(shard.conn())
        .latest_for_player(tenant.id, &cup.id, &alice.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(latest.score, 10);
}

#[tokio::test]
async fn test_non_integer_score_rejected() {
    let env = TestEnv::new().await;
    let tenant = env.tenant("acme").await;
    let mut shard = env.shard(&tenant).await;
    let alice = env.player(&mut shard, "alice").await;
    let cup = env.competition(&mut shard, "spring-cup").await;

    let data = format!("player_id,score\n{},4.5\n", alice.id);
    let err = ingest_scores(&env.ids, &env.locks, &mut shard, &cup.id, data.as_bytes())
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::InvalidScore { row_num: 1, .. }));

    let count = PlayerScoreRepository::new(shard.conn())
        .count(tenant.id, &cup.id)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_second_upload_replaces_first() {
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
        &sheet(&[(alice.id.as_str(), 10), (bob.id.as_str(), 20), (alice.id.as_str(), 30)]),
    )
    .await
    .unwrap();

    let outcome = ingest_scores(&env.ids, &env.locks, &mut shard, &cup.id, &sheet(&[(bob.id.as_str(), 5)]))
        .await
        .unwrap();
    assert_eq!(outcome, IngestOutcome::Ingested { rows: 1 });

    let ranking = competition_ranking(&env.db, &env.locks, &mut shard, &cup.id, &alice.id, 0)
        .await
        .unwrap();
    assert_eq!(ranking.ranks.len(), 1);
    assert_eq!(ranking.ranks[0].player_id, bob.id);
    assert_eq!(ranking.ranks[0].score, 5);
}

#[tokio::test]
async fn test_finished_competition_is_soft_rejected() {
    let env = TestEnv::new().await;
    let tenant = env.tenant("acme").await;
    let mut shard = env.shard(&tenant).await;
    let alice = env.player(&mut shard, "alice").await;
    let cup = env.competition(&mut shard, "spring-cup").await;
    finish_competition(&mut shard, &cup.id).await.unwrap();

    let outcome = ingest_scores(&env.ids, &env.locks, &mut shard, &cup.id, &sheet(&[(alice.id.as_str(), 1)]))
        .await
        .unwrap();
    assert_eq!(outcome, IngestOutcome::CompetitionFinished);
}

#[tokio::test]
async fn test_unknown_competition() {
    let env = TestEnv::new().await;
    let tenant = env.tenant("acme").await;
    let mut shard = env.shard(&tenant).await;

    let err = ingest_scores(&env.ids, &env.locks, &mut shard, "nope", &sheet(&[]))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_bad_header_rejected() {
    let env = TestEnv::new().await;
    let tenant = env.tenant("acme").await;
    let mut shard = env.shard(&tenant).await;
    let cup = env.competition(&mut shard, "spring-cup").await;

    let err = ingest_scores(&env.ids, &env.locks, &mut shard, &cup.id, b"id,points\nx,1\n")
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::InvalidFormat(_)));
}
