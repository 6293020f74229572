use storage::error::StorageError;
use storage::repository::judge::JudgeRepository;
use storage::repository::score::ScoreRepository;
use storage::services::lifecycle::CategoryAction::{Launch, StartJudging};

use crate::common::TestDb;

mod rescoring {
    use super::*;

    #[tokio::test]
    async fn rescore_overwrites_the_existing_row() {
        let t = TestDb::spawn().await;
        let category = t.create_category("Best Robotics").await;
        let id = category.category.category_id;
        t.advance(id, &[Launch]).await;
        let submission = t.submit(&category, "Acme").await;
        t.advance(id, &[StartJudging]).await;

        let invite = JudgeRepository::new(t.pool())
            .invite("judge@example.com", Some("Judge"), id)
            .await
            .unwrap();
        let judge_id = invite.judge.user_id;
        let metric_id = category.metrics[0].metric_id;

        let scores = ScoreRepository::new(t.pool());
        let first = scores
            .upsert(judge_id, submission.submission_id, metric_id, 4)
            .await
            .unwrap();
        let second = scores
            .upsert(judge_id, submission.submission_id, metric_id, 9)
            .await
            .unwrap();

        assert_eq!(first.score_id, second.score_id);
        assert_eq!(second.value, 9);
        assert_eq!(
            t.count(
                "SELECT COUNT(*) FROM scores WHERE submission_id = $1",
                submission.submission_id
            )
            .await,
            1
        );
    }

    #[tokio::test]
    async fn rescore_through_invite_link_keeps_one_row() {
        let t = TestDb::spawn().await;
        let category = t.create_category("Best Robotics").await;
        let id = category.category.category_id;
        t.advance(id, &[Launch]).await;
        let submission = t.submit(&category, "Acme").await;
        t.advance(id, &[StartJudging]).await;

        let judges = JudgeRepository::new(t.pool());
        let invite = judges.invite("judge@example.com", None, id).await.unwrap();
        let token = invite.assignment.invite_token;
        let metric_id = category.metrics[1].metric_id;

        judges
            .score_via_token(&token, submission.submission_id, metric_id, 3)
            .await
            .unwrap();
        let latest = judges
            .score_via_token(&token, submission.submission_id, metric_id, 8)
            .await
            .unwrap();

        assert_eq!(latest.value, 8);
        assert_eq!(
            t.count(
                "SELECT COUNT(*) FROM scores WHERE submission_id = $1",
                submission.submission_id
            )
            .await,
            1
        );
    }
}

mod rejections {
    use super::*;

    #[tokio::test]
    async fn judge_without_assignment_is_forbidden() {
        let t = TestDb::spawn().await;
        let assigned = t.create_category("Assigned").await;
        let other = t.create_category("Other").await;
        t.advance(assigned.category.category_id, &[Launch]).await;
        t.advance(other.category.category_id, &[Launch]).await;
        let submission = t.submit(&other, "Acme").await;
        t.advance(assigned.category.category_id, &[StartJudging]).await;
        t.advance(other.category.category_id, &[StartJudging]).await;

        let invite = JudgeRepository::new(t.pool())
            .invite("judge@example.com", None, assigned.category.category_id)
            .await
            .unwrap();

        let err = ScoreRepository::new(t.pool())
            .upsert(
                invite.judge.user_id,
                submission.submission_id,
                other.metrics[0].metric_id,
                5,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::Forbidden(_)), "got {err:?}");
        assert_eq!(
            t.count(
                "SELECT COUNT(*) FROM scores WHERE submission_id = $1",
                submission.submission_id
            )
            .await,
            0
        );
    }

    #[tokio::test]
    async fn invite_link_cannot_reach_another_category() {
        let t = TestDb::spawn().await;
        let mine = t.create_category("Mine").await;
        let other = t.create_category("Other").await;
        t.advance(mine.category.category_id, &[Launch, StartJudging]).await;
        t.advance(other.category.category_id, &[Launch]).await;
        let foreign = t.submit(&other, "Acme").await;
        t.advance(other.category.category_id, &[StartJudging]).await;

        let judges = JudgeRepository::new(t.pool());
        let invite = judges
            .invite("judge@example.com", None, mine.category.category_id)
            .await
            .unwrap();

        let err = judges
            .score_via_token(
                &invite.assignment.invite_token,
                foreign.submission_id,
                other.metrics[0].metric_id,
                5,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::NotFound), "got {err:?}");
    }

    #[tokio::test]
    async fn scoring_outside_judging_is_rejected() {
        let t = TestDb::spawn().await;
        let category = t.create_category("Still open").await;
        let id = category.category.category_id;
        t.advance(id, &[Launch]).await;
        let submission = t.submit(&category, "Acme").await;

        let invite = JudgeRepository::new(t.pool())
            .invite("judge@example.com", None, id)
            .await
            .unwrap();

        let err = ScoreRepository::new(t.pool())
            .upsert(
                invite.judge.user_id,
                submission.submission_id,
                category.metrics[0].metric_id,
                5,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::InvalidState { .. }), "got {err:?}");
    }
}
