use rust_decimal::Decimal;
use storage::error::StorageError;
use storage::models::CategoryStatus;
use storage::repository::category::CategoryRepository;
use storage::repository::judge::JudgeRepository;
use storage::repository::score::ScoreRepository;
use storage::services::lifecycle::{self, CategoryAction::*};

use crate::common::TestDb;

#[tokio::test]
async fn completion_writes_every_total_with_the_status() {
    let t = TestDb::spawn().await;
    let category = t.create_category("Best Robotics").await;
    let id = category.category.category_id;
    t.advance(id, &[Launch]).await;
    let scored = t.submit(&category, "Acme").await;
    let unscored = t.submit(&category, "Globex").await;
    t.advance(id, &[StartJudging]).await;

    let judges = JudgeRepository::new(t.pool());
    let first = judges.invite("one@example.com", None, id).await.unwrap();
    let second = judges.invite("two@example.com", None, id).await.unwrap();

    let impact = category.metrics[0].metric_id;
    let pitch = category.metrics[1].metric_id;
    let scores = ScoreRepository::new(t.pool());
    for (judge, metric, value) in [
        (first.judge.user_id, impact, 8),
        (second.judge.user_id, impact, 6),
        (first.judge.user_id, pitch, 7),
    ] {
        scores
            .upsert(judge, scored.submission_id, metric, value)
            .await
            .unwrap();
    }

    assert_eq!(t.total_score(scored.submission_id).await, None);

    let completed = t.advance(id, &[Complete]).await;

    assert_eq!(completed.status, CategoryStatus::Completed);
    assert_eq!(t.total_score(scored.submission_id).await, Some(Decimal::from(7)));
    assert_eq!(t.total_score(unscored.submission_id).await, Some(Decimal::ZERO));
}

#[tokio::test]
async fn rejected_transition_changes_nothing() {
    let t = TestDb::spawn().await;
    let category = t.create_category("Best Robotics").await;
    let id = category.category.category_id;
    t.advance(id, &[Launch]).await;
    let submission = t.submit(&category, "Acme").await;

    let err = lifecycle::apply(t.pool(), id, Complete).await.unwrap_err();

    assert!(matches!(err, StorageError::InvalidTransition { .. }), "got {err:?}");
    let current = CategoryRepository::new(t.pool()).find_by_id(id).await.unwrap();
    assert_eq!(current.status, CategoryStatus::Launched);
    assert_eq!(t.total_score(submission.submission_id).await, None);
}

#[tokio::test]
async fn reopening_returns_judging_to_launched() {
    let t = TestDb::spawn().await;
    let category = t.create_category("Best Robotics").await;
    let id = category.category.category_id;

    let reopened = t.advance(id, &[Launch, StartJudging, Reopen]).await;

    assert_eq!(reopened.status, CategoryStatus::Launched);
}
