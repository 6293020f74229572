use std::collections::HashMap;

use rust_decimal::Decimal;
use storage::dto::category::{CreateCategoryRequest, CreateMetricRequest};
use storage::dto::metric::UpdateWeightsRequest;
use storage::error::StorageError;
use storage::models::{CategoryStatus, MetricType};
use storage::repository::category::CategoryRepository;
use storage::repository::judge::JudgeRepository;
use storage::repository::metric::MetricRepository;
use storage::repository::score::ScoreRepository;
use storage::services::lifecycle::CategoryAction::{self, *};
use storage::services::weights::{WeightError, WeightMode};

use crate::common::TestDb;

mod deletion {
    use super::*;

    #[tokio::test]
    async fn completed_category_is_kept() {
        let t = TestDb::spawn().await;
        let category = t.create_category("Best Robotics").await;
        let id = category.category.category_id;
        t.advance(id, &[Launch, StartJudging, Complete]).await;

        let err = CategoryRepository::new(t.pool()).delete(id).await.unwrap_err();

        assert!(matches!(err, StorageError::InvalidState { .. }), "got {err:?}");
        let kept = CategoryRepository::new(t.pool()).find_by_id(id).await.unwrap();
        assert_eq!(kept.status, CategoryStatus::Completed);
    }

    async fn delete_in_state(actions: &[CategoryAction]) {
        let t = TestDb::spawn().await;
        let category = t.create_category("Best Robotics").await;
        let id = category.category.category_id;

        let invite = JudgeRepository::new(t.pool())
            .invite("judge@example.com", None, id)
            .await
            .unwrap();

        if !actions.is_empty() {
            t.advance(id, &[Launch]).await;
            let submission = t.submit(&category, "Acme").await;
            if actions.contains(&StartJudging) {
                t.advance(id, &[StartJudging]).await;
                ScoreRepository::new(t.pool())
                    .upsert(
                        invite.judge.user_id,
                        submission.submission_id,
                        category.metrics[0].metric_id,
                        6,
                    )
                    .await
                    .unwrap();
            }
        }

        CategoryRepository::new(t.pool()).delete(id).await.unwrap();

        let err = CategoryRepository::new(t.pool()).find_by_id(id).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
        for table in ["metrics", "submissions", "judge_assignments"] {
            let remaining = t
                .count(&format!("SELECT COUNT(*) FROM {table} WHERE category_id = $1"), id)
                .await;
            assert_eq!(remaining, 0, "{table} left behind");
        }
        let scores = t
            .count(
                "SELECT COUNT(*) FROM scores WHERE judge_id = $1",
                invite.judge.user_id,
            )
            .await;
        assert_eq!(scores, 0);
        let judge_kept = t
            .count("SELECT COUNT(*) FROM users WHERE user_id = $1", invite.judge.user_id)
            .await;
        assert_eq!(judge_kept, 1);
    }

    #[tokio::test]
    async fn draft_category_cascades() {
        delete_in_state(&[]).await;
    }

    #[tokio::test]
    async fn launched_category_cascades() {
        delete_in_state(&[Launch]).await;
    }

    #[tokio::test]
    async fn judging_category_cascades() {
        delete_in_state(&[Launch, StartJudging]).await;
    }
}

mod weights {
    use super::*;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn overflowing_multipliers_create_nothing() {
        let t = TestDb::spawn().await;
        let huge = d("60000000000000000000000000000");
        let request = CreateCategoryRequest {
            name: "Too heavy".to_string(),
            description: None,
            weight_mode: WeightMode::Multiplier,
            metrics: ["A", "B"]
                .into_iter()
                .map(|name| CreateMetricRequest {
                    name: name.to_string(),
                    description: None,
                    metric_type: MetricType::Numeric,
                    weight: Some(huge),
                })
                .collect(),
        };

        let err = CategoryRepository::new(t.pool()).create(&request).await.unwrap_err();

        assert!(
            matches!(err, StorageError::InvalidWeights(WeightError::OutOfRange)),
            "got {err:?}"
        );
        assert!(CategoryRepository::new(t.pool()).list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn negligible_weight_leaves_stored_weights_alone() {
        let t = TestDb::spawn().await;
        let category = t.create_category("Best Robotics").await;
        let id = category.category.category_id;

        let request = UpdateWeightsRequest {
            mode: WeightMode::Multiplier,
            weights: HashMap::from([
                (category.metrics[0].metric_id, d("0.0000000000000000000000000001")),
                (category.metrics[1].metric_id, d("1000")),
            ]),
        };

        let err = MetricRepository::new(t.pool())
            .update_weights(id, &request)
            .await
            .unwrap_err();

        assert!(
            matches!(err, StorageError::InvalidWeights(WeightError::Negligible(_))),
            "got {err:?}"
        );
        let stored = MetricRepository::new(t.pool())
            .find_by_id(category.metrics[0].metric_id)
            .await
            .unwrap();
        assert_eq!(stored.weight, d("0.6"));
    }
}
