use sqlx::PgPool;
use storage::{
    dto::judge::{InviteJudgeRequest, InviteJudgeResponse, JudgeResponse},
    error::Result,
    repository::{category::CategoryRepository, judge::JudgeRepository},
};

use crate::email;
use crate::state::AppState;

/// Assign a judge to a category and email the invite link.
///
/// Only a newly created assignment sends an email. A failed delivery is
/// reported through `email_sent` and leaves the assignment in place.
pub async fn invite_judge(state: &AppState, request: &InviteJudgeRequest) -> Result<InviteJudgeResponse> {
    let pool = state.db.pool();

    let category = CategoryRepository::new(pool).find_by_id(request.category_id).await?;
    let outcome = JudgeRepository::new(pool)
        .invite(&request.email, request.name.as_deref(), category.category_id)
        .await?;

    let invite_link = state.config.invite_link(&outcome.assignment.invite_token);

    let email_sent = if outcome.created {
        let message = email::judge_invitation(
            &outcome.judge.email,
            outcome.judge.name.as_deref(),
            &category.name,
            &invite_link,
        );
        let delivery = state.mailer.send(message).await;
        if delivery.simulated {
            tracing::info!(invite_link = %invite_link, "Invitation email simulated");
        } else if !delivery.success {
            tracing::warn!(
                judge_id = %outcome.judge.user_id,
                category_id = %category.category_id,
                "Invitation email was not delivered"
            );
        }
        Some(delivery.success)
    } else {
        None
    };

    Ok(InviteJudgeResponse {
        assignment: outcome.assignment,
        invite_link,
        already_invited: !outcome.created,
        email_sent,
    })
}

pub async fn list_judges(pool: &PgPool) -> Result<Vec<JudgeResponse>> {
    JudgeRepository::new(pool).list().await
}
