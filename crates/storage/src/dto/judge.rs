use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::dto::category::CategoryResponse;
use crate::dto::metric::MetricResponse;
use crate::dto::submission::SubmissionDetail;
use crate::models::{JudgeAssignment, Score, User};

/// Request payload for inviting a judge to a category
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct InviteJudgeRequest {
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: String,

    #[validate(length(max = 255))]
    pub name: Option<String>,

    pub category_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InviteJudgeResponse {
    pub assignment: JudgeAssignment,
    pub invite_link: String,
    /// True when the judge already held an assignment for the category
    pub already_invited: bool,
    /// Absent for re-invites, which send no email
    pub email_sent: Option<bool>,
}

/// Result of the find-or-create invite step, before any email goes out
#[derive(Debug, Clone)]
pub struct InviteOutcome {
    pub judge: User,
    pub assignment: JudgeAssignment,
    pub created: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JudgeInfo {
    pub judge_id: Uuid,
    pub email: String,
    pub name: Option<String>,
}

/// Judge with the categories they are assigned to
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JudgeResponse {
    pub judge_id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub created_at: NaiveDateTime,
    pub assignments: Vec<AssignedCategory>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AssignedCategory {
    #[serde(skip)]
    pub judge_id: Uuid,
    pub category_id: Uuid,
    pub category_name: String,
    pub invited_at: NaiveDateTime,
}

/// Judge assigned to one category, with scoring progress
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CategoryJudgeEntry {
    pub judge_id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub invite_token: String,
    pub invited_at: NaiveDateTime,
    pub scores_submitted: i64,
}

/// Everything a judge needs to score a category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JudgePanelResponse {
    pub judge: JudgeInfo,
    pub category: CategoryResponse,
    pub metrics: Vec<MetricResponse>,
    pub submissions: Vec<SubmissionDetail>,
    /// Scores this judge has already given
    pub scores: Vec<Score>,
}

impl From<&User> for JudgeInfo {
    fn from(user: &User) -> Self {
        Self {
            judge_id: user.user_id,
            email: user.email.clone(),
            name: user.name.clone(),
        }
    }
}
