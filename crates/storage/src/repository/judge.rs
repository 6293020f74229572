use std::collections::HashMap;

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::dto::category::CategoryResponse;
use crate::dto::judge::{
    AssignedCategory, CategoryJudgeEntry, InviteOutcome, JudgeInfo, JudgePanelResponse,
    JudgeResponse,
};
use crate::dto::metric::MetricResponse;
use crate::error::{Result, StorageError};
use crate::models::{JudgeAssignment, Score, User, UserRole};
use crate::repository::category::CategoryRepository;
use crate::repository::score::ScoreRepository;
use crate::repository::{metric as metric_tx, submission as submission_tx, user as user_tx};
use crate::services::{credentials, lifecycle};

pub struct JudgeRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> JudgeRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Find-or-create the judge and their assignment to a category.
    ///
    /// Repeating the call for the same email and category returns the same
    /// assignment and invite token with `created == false`.
    pub async fn invite(&self, email: &str, name: Option<&str>, category_id: Uuid) -> Result<InviteOutcome> {
        CategoryRepository::new(self.pool).find_by_id(category_id).await?;

        let password_hash = credentials::hash_password(&credentials::throwaway_password())?;

        let mut tx = self.pool.begin().await?;

        let judge = user_tx::find_or_create_judge(&mut tx, email, name, &password_hash).await?;
        let (assignment, created) = find_or_create_assignment(&mut tx, judge.user_id, category_id).await?;

        tx.commit().await?;

        if created {
            tracing::info!(judge_id = %judge.user_id, %category_id, "Assigned judge to category");
        }

        Ok(InviteOutcome {
            judge,
            assignment,
            created,
        })
    }

    /// Assignment and judge behind an invite token
    pub async fn find_by_invite_token(&self, token: &str) -> Result<(JudgeAssignment, User)> {
        let assignment = sqlx::query_as::<_, JudgeAssignment>(
            r#"
            SELECT assignment_id, judge_id, category_id, invite_token, invited_at
            FROM judge_assignments
            WHERE invite_token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        let judge = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, email, name, password_hash, role, created_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(assignment.judge_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok((assignment, judge))
    }

    /// The judging view behind an invite link. Only reachable while the
    /// category is judging.
    pub async fn panel(&self, token: &str) -> Result<JudgePanelResponse> {
        let (assignment, judge) = self.find_by_invite_token(token).await?;

        let category = CategoryRepository::new(self.pool)
            .find_by_id(assignment.category_id)
            .await?;
        if !lifecycle::accepts_scores(category.status) {
            return Err(StorageError::NotFound);
        }

        let mut conn = self.pool.acquire().await?;
        let metrics = metric_tx::metrics_for_category(&mut conn, category.category_id).await?;
        let submissions = submission_tx::details_for_category(&mut conn, category.category_id).await?;
        drop(conn);

        let scores = ScoreRepository::new(self.pool)
            .by_judge_in_category(judge.user_id, category.category_id)
            .await?;

        Ok(JudgePanelResponse {
            judge: JudgeInfo::from(&judge),
            category: CategoryResponse::from(category),
            metrics: metrics.into_iter().map(MetricResponse::from).collect(),
            submissions,
            scores,
        })
    }

    /// Score a submission through an invite link. The judge and the category
    /// both come from the assignment behind the token.
    pub async fn score_via_token(
        &self,
        token: &str,
        submission_id: Uuid,
        metric_id: Uuid,
        value: i32,
    ) -> Result<Score> {
        let (assignment, judge) = self.find_by_invite_token(token).await?;

        ScoreRepository::new(self.pool)
            .upsert_in_category(
                assignment.category_id,
                judge.user_id,
                submission_id,
                metric_id,
                value,
            )
            .await
    }

    /// All judge accounts with the categories they are assigned to
    pub async fn list(&self) -> Result<Vec<JudgeResponse>> {
        let judges = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, email, name, password_hash, role, created_at
            FROM users
            WHERE role = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(UserRole::Judge)
        .fetch_all(self.pool)
        .await?;

        let assignments = sqlx::query_as::<_, AssignedCategory>(
            r#"
            SELECT ja.judge_id, ja.category_id, c.name AS category_name, ja.invited_at
            FROM judge_assignments ja
            INNER JOIN categories c ON c.category_id = ja.category_id
            ORDER BY ja.invited_at DESC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        let mut by_judge: HashMap<Uuid, Vec<AssignedCategory>> = HashMap::new();
        for assignment in assignments {
            by_judge.entry(assignment.judge_id).or_default().push(assignment);
        }

        Ok(judges
            .into_iter()
            .map(|judge| JudgeResponse {
                assignments: by_judge.remove(&judge.user_id).unwrap_or_default(),
                judge_id: judge.user_id,
                email: judge.email,
                name: judge.name,
                created_at: judge.created_at,
            })
            .collect())
    }

    /// Judges assigned to a category with how many scores each has given
    pub async fn list_for_category(&self, category_id: Uuid) -> Result<Vec<CategoryJudgeEntry>> {
        CategoryRepository::new(self.pool).find_by_id(category_id).await?;

        let entries = sqlx::query_as::<_, CategoryJudgeEntry>(
            r#"
            SELECT u.user_id AS judge_id, u.email, u.name, ja.invite_token, ja.invited_at,
                   (SELECT COUNT(*)
                    FROM scores sc
                    INNER JOIN submissions s ON s.submission_id = sc.submission_id
                    WHERE sc.judge_id = u.user_id AND s.category_id = ja.category_id) AS scores_submitted
            FROM judge_assignments ja
            INNER JOIN users u ON u.user_id = ja.judge_id
            WHERE ja.category_id = $1
            ORDER BY ja.invited_at ASC
            "#,
        )
        .bind(category_id)
        .fetch_all(self.pool)
        .await?;

        Ok(entries)
    }
}

/// Insert the (judge, category) assignment unless it exists; the flag tells
/// whether this call created it.
async fn find_or_create_assignment(
    conn: &mut PgConnection,
    judge_id: Uuid,
    category_id: Uuid,
) -> Result<(JudgeAssignment, bool)> {
    let inserted = sqlx::query_as::<_, JudgeAssignment>(
        r#"
        INSERT INTO judge_assignments (judge_id, category_id, invite_token)
        VALUES ($1, $2, $3)
        ON CONFLICT (judge_id, category_id) DO NOTHING
        RETURNING assignment_id, judge_id, category_id, invite_token, invited_at
        "#,
    )
    .bind(judge_id)
    .bind(category_id)
    .bind(credentials::generate_token())
    .fetch_optional(&mut *conn)
    .await?;

    if let Some(assignment) = inserted {
        return Ok((assignment, true));
    }

    let existing = sqlx::query_as::<_, JudgeAssignment>(
        r#"
        SELECT assignment_id, judge_id, category_id, invite_token, invited_at
        FROM judge_assignments
        WHERE judge_id = $1 AND category_id = $2
        "#,
    )
    .bind(judge_id)
    .bind(category_id)
    .fetch_one(&mut *conn)
    .await?;

    Ok((existing, false))
}
