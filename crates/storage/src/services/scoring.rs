use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::dto::category::CategoryResponse;
use crate::dto::results::{CategoryResultsResponse, MetricAverage, RankedSubmission};
use crate::error::{Result, StorageError};
use crate::models::{Metric, Score};
use crate::repository::category::CategoryRepository;
use crate::repository::{metric as metric_tx, score as score_tx, submission as submission_tx};
use crate::services::lifecycle;

pub const MIN_SCORE: i32 = 1;
pub const MAX_SCORE: i32 = 10;

pub fn validate_score_value(value: i32) -> Result<()> {
    if (MIN_SCORE..=MAX_SCORE).contains(&value) {
        Ok(())
    } else {
        Err(StorageError::Validation(format!(
            "Score must be between {MIN_SCORE} and {MAX_SCORE}, got {value}"
        )))
    }
}

/// Every judge's scores of a category, grouped by (submission, metric).
#[derive(Debug, Default)]
pub struct ScoreSheet {
    values: HashMap<(Uuid, Uuid), Vec<i32>>,
    judges: HashMap<Uuid, HashSet<Uuid>>,
}

impl ScoreSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_scores(scores: &[Score]) -> Self {
        let mut sheet = Self::new();
        for score in scores {
            sheet.record(score.judge_id, score.submission_id, score.metric_id, score.value);
        }
        sheet
    }

    pub fn record(&mut self, judge_id: Uuid, submission_id: Uuid, metric_id: Uuid, value: i32) {
        self.values
            .entry((submission_id, metric_id))
            .or_default()
            .push(value);
        self.judges.entry(submission_id).or_default().insert(judge_id);
    }

    pub fn score_count(&self, submission_id: Uuid, metric_id: Uuid) -> usize {
        self.values
            .get(&(submission_id, metric_id))
            .map_or(0, Vec::len)
    }

    /// Number of distinct judges who scored the submission on any metric.
    pub fn judge_count(&self, submission_id: Uuid) -> usize {
        self.judges.get(&submission_id).map_or(0, HashSet::len)
    }

    /// Arithmetic mean across judges, `None` when nobody scored the pair.
    pub fn average(&self, submission_id: Uuid, metric_id: Uuid) -> Option<Decimal> {
        let values = self.values.get(&(submission_id, metric_id))?;
        if values.is_empty() {
            return None;
        }
        let sum: Decimal = values.iter().map(|&v| Decimal::from(v)).sum();
        Some(sum / Decimal::from(values.len()))
    }

    /// Weighted final score of one submission.
    ///
    /// Metrics nobody scored are left out of both the weighted sum and the
    /// weight denominator. A submission with no scores at all gets 0.
    pub fn weighted_total(&self, submission_id: Uuid, metrics: &[Metric]) -> Decimal {
        let mut weighted_sum = Decimal::ZERO;
        let mut total_weight = Decimal::ZERO;

        for metric in metrics {
            if let Some(avg) = self.average(submission_id, metric.metric_id) {
                weighted_sum += avg * metric.weight;
                total_weight += metric.weight;
            }
        }

        if total_weight > Decimal::ZERO {
            weighted_sum / total_weight
        } else {
            Decimal::ZERO
        }
    }
}

/// Compute and write `total_score` for every submission of a category.
///
/// Runs on the caller's transaction: the totals only become visible
/// together with whatever else the caller commits.
pub async fn finalize_totals(conn: &mut PgConnection, category_id: Uuid) -> Result<usize> {
    let metrics = metric_tx::metrics_for_category(&mut *conn, category_id).await?;
    let submission_ids = submission_tx::submission_ids_for_category(&mut *conn, category_id).await?;
    let scores = score_tx::scores_for_category(&mut *conn, category_id).await?;

    let sheet = ScoreSheet::from_scores(&scores);

    for submission_id in &submission_ids {
        let total = sheet.weighted_total(*submission_id, &metrics);
        submission_tx::set_total_score(&mut *conn, *submission_id, total).await?;
    }

    Ok(submission_ids.len())
}

/// Final ranking of a completed category.
pub async fn category_results(pool: &PgPool, category_id: Uuid) -> Result<CategoryResultsResponse> {
    let category = CategoryRepository::new(pool).find_by_id(category_id).await?;
    lifecycle::ensure(category.status, lifecycle::has_results, "viewing results")?;

    let mut conn = pool.acquire().await?;
    let metrics = metric_tx::metrics_for_category(&mut conn, category_id).await?;
    let submissions = submission_tx::ranked_submissions(&mut conn, category_id).await?;
    let scores = score_tx::scores_for_category(&mut conn, category_id).await?;

    let sheet = ScoreSheet::from_scores(&scores);

    let entries = submissions
        .into_iter()
        .enumerate()
        .map(|(index, submission)| {
            let metric_averages = metrics
                .iter()
                .map(|metric| MetricAverage {
                    metric_id: metric.metric_id,
                    name: metric.name.clone(),
                    weight: metric.weight,
                    average: sheet.average(submission.submission_id, metric.metric_id),
                    score_count: sheet.score_count(submission.submission_id, metric.metric_id) as i64,
                })
                .collect();

            RankedSubmission {
                rank: index as i64 + 1,
                submission_id: submission.submission_id,
                company_name: submission.company_name,
                contact_name: submission.contact_name,
                contact_email: submission.contact_email,
                total_score: submission.total_score.unwrap_or(Decimal::ZERO),
                judge_count: sheet.judge_count(submission.submission_id) as i64,
                metrics: metric_averages,
            }
        })
        .collect();

    Ok(CategoryResultsResponse {
        category: CategoryResponse::from(category),
        entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MetricType;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn metric(weight: &str) -> Metric {
        Metric {
            metric_id: Uuid::new_v4(),
            category_id: Uuid::nil(),
            name: "Impact".to_string(),
            description: None,
            metric_type: MetricType::Numeric,
            weight: d(weight),
            sort_order: 0,
        }
    }

    #[test]
    fn test_weighted_scenario_with_raw_multipliers() {
        let m1 = metric("1.5");
        let m2 = metric("1.0");
        let (judge_a, judge_b, s1) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

        let mut sheet = ScoreSheet::new();
        sheet.record(judge_a, s1, m1.metric_id, 8);
        sheet.record(judge_b, s1, m1.metric_id, 6);
        sheet.record(judge_a, s1, m2.metric_id, 7);

        assert_eq!(sheet.weighted_total(s1, &[m1, m2]), d("7.0"));
    }

    #[test]
    fn test_normalized_weights_give_the_same_total() {
        let raw = [metric("3"), metric("1")];
        let normalized: Vec<Metric> = raw
            .iter()
            .zip(["0.75", "0.25"])
            .map(|(m, w)| Metric {
                weight: d(w),
                ..m.clone()
            })
            .collect();
        let (judge, s1) = (Uuid::new_v4(), Uuid::new_v4());

        let mut sheet = ScoreSheet::new();
        sheet.record(judge, s1, raw[0].metric_id, 9);
        sheet.record(judge, s1, raw[1].metric_id, 5);

        // (9 * 3 + 5 * 1) / 4 = 8
        assert_eq!(sheet.weighted_total(s1, &raw), d("8"));
        assert_eq!(sheet.weighted_total(s1, &normalized), d("8"));
    }

    #[test]
    fn test_unscored_metric_is_excluded_not_zero() {
        let m1 = metric("0.5");
        let m2 = metric("0.5");
        let (judge, s1) = (Uuid::new_v4(), Uuid::new_v4());

        let mut sheet = ScoreSheet::new();
        sheet.record(judge, s1, m1.metric_id, 4);

        assert_eq!(sheet.weighted_total(s1, &[m1, m2]), d("4"));
    }

    #[test]
    fn test_submission_without_scores_totals_zero() {
        let sheet = ScoreSheet::new();
        assert_eq!(
            sheet.weighted_total(Uuid::new_v4(), &[metric("1"), metric("2")]),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_scores_of_other_submissions_do_not_leak() {
        let m1 = metric("1");
        let (judge, s1, s2) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

        let mut sheet = ScoreSheet::new();
        sheet.record(judge, s1, m1.metric_id, 10);
        sheet.record(judge, s2, m1.metric_id, 2);

        assert_eq!(sheet.weighted_total(s1, std::slice::from_ref(&m1)), d("10"));
        assert_eq!(sheet.weighted_total(s2, std::slice::from_ref(&m1)), d("2"));
    }

    #[test]
    fn test_average_and_counts() {
        let m1 = metric("1");
        let m2 = metric("1");
        let (judge_a, judge_b, s1) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

        let mut sheet = ScoreSheet::new();
        sheet.record(judge_a, s1, m1.metric_id, 7);
        sheet.record(judge_b, s1, m1.metric_id, 8);
        sheet.record(judge_b, s1, m2.metric_id, 3);

        assert_eq!(sheet.average(s1, m1.metric_id), Some(d("7.5")));
        assert_eq!(sheet.average(s1, Uuid::new_v4()), None);
        assert_eq!(sheet.score_count(s1, m1.metric_id), 2);
        assert_eq!(sheet.judge_count(s1), 2);
    }

    #[test]
    fn test_score_value_bounds() {
        assert!(validate_score_value(1).is_ok());
        assert!(validate_score_value(10).is_ok());
        assert!(matches!(validate_score_value(0), Err(StorageError::Validation(_))));
        assert!(matches!(validate_score_value(11), Err(StorageError::Validation(_))));
    }
}
