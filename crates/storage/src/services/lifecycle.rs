use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{Category, CategoryStatus};
use crate::repository::category as category_tx;
use crate::services::scoring;

/// Organizer actions that move a category between states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CategoryAction {
    Launch,
    StartJudging,
    Reopen,
    Complete,
}

impl CategoryAction {
    pub const ALL: [CategoryAction; 4] = [
        CategoryAction::Launch,
        CategoryAction::StartJudging,
        CategoryAction::Reopen,
        CategoryAction::Complete,
    ];
}

impl fmt::Display for CategoryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CategoryAction::Launch => "launch",
            CategoryAction::StartJudging => "start judging",
            CategoryAction::Reopen => "reopen",
            CategoryAction::Complete => "complete",
        };
        f.write_str(s)
    }
}

/// Resolve the state reached by applying `action` in state `from`.
///
/// DRAFT -> LAUNCHED -> JUDGING -> COMPLETED, plus JUDGING -> LAUNCHED.
/// COMPLETED is terminal.
pub fn transition(from: CategoryStatus, action: CategoryAction) -> Result<CategoryStatus> {
    use CategoryAction::*;
    use CategoryStatus::*;

    match (from, action) {
        (Draft, Launch) => Ok(Launched),
        (Launched, StartJudging) => Ok(Judging),
        (Judging, Reopen) => Ok(Launched),
        (Judging, Complete) => Ok(Completed),
        _ => Err(StorageError::InvalidTransition { from, action }),
    }
}

/// Fail with `InvalidState` unless `allowed` holds for `status`.
pub fn ensure(
    status: CategoryStatus,
    allowed: impl FnOnce(CategoryStatus) -> bool,
    operation: &'static str,
) -> Result<()> {
    if allowed(status) {
        Ok(())
    } else {
        Err(StorageError::InvalidState { status, operation })
    }
}

pub fn accepts_submissions(status: CategoryStatus) -> bool {
    status == CategoryStatus::Launched
}

pub fn accepts_scores(status: CategoryStatus) -> bool {
    status == CategoryStatus::Judging
}

pub fn is_editable(status: CategoryStatus) -> bool {
    status != CategoryStatus::Completed
}

pub fn is_deletable(status: CategoryStatus) -> bool {
    status != CategoryStatus::Completed
}

/// Metric definitions are frozen once the submission link is live.
pub fn allows_metric_changes(status: CategoryStatus) -> bool {
    status == CategoryStatus::Draft
}

pub fn has_results(status: CategoryStatus) -> bool {
    status == CategoryStatus::Completed
}

/// Apply an organizer action to a category.
///
/// The category row is locked for the duration of the transaction, so two
/// concurrent actions on the same category serialize. Completing a category
/// computes and writes every submission's total in the same transaction as
/// the status flip.
pub async fn apply(pool: &PgPool, category_id: Uuid, action: CategoryAction) -> Result<Category> {
    let mut tx = pool.begin().await?;

    let category = category_tx::lock_for_update(&mut tx, category_id).await?;
    let next = transition(category.status, action)?;

    if action == CategoryAction::Complete {
        let scored = scoring::finalize_totals(&mut tx, category_id).await?;
        tracing::info!(%category_id, submissions = scored, "Computed final scores");
    }

    let updated = category_tx::set_status(&mut tx, category_id, next).await?;
    tx.commit().await?;

    tracing::info!(
        %category_id,
        from = %category.status,
        to = %updated.status,
        "Category status changed"
    );

    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legal_transitions() {
        assert_eq!(
            transition(CategoryStatus::Draft, CategoryAction::Launch).unwrap(),
            CategoryStatus::Launched
        );
        assert_eq!(
            transition(CategoryStatus::Launched, CategoryAction::StartJudging).unwrap(),
            CategoryStatus::Judging
        );
        assert_eq!(
            transition(CategoryStatus::Judging, CategoryAction::Reopen).unwrap(),
            CategoryStatus::Launched
        );
        assert_eq!(
            transition(CategoryStatus::Judging, CategoryAction::Complete).unwrap(),
            CategoryStatus::Completed
        );
    }

    #[test]
    fn test_only_four_transitions_are_reachable() {
        let legal: Vec<_> = CategoryStatus::ALL
            .iter()
            .flat_map(|&from| CategoryAction::ALL.iter().map(move |&action| (from, action)))
            .filter(|&(from, action)| transition(from, action).is_ok())
            .collect();

        assert_eq!(legal.len(), 4);
    }

    #[test]
    fn test_completed_is_terminal() {
        for action in CategoryAction::ALL {
            let err = transition(CategoryStatus::Completed, action).unwrap_err();
            assert!(matches!(
                err,
                StorageError::InvalidTransition {
                    from: CategoryStatus::Completed,
                    ..
                }
            ));
        }
    }

    #[test]
    fn test_cannot_skip_judging() {
        assert!(transition(CategoryStatus::Launched, CategoryAction::Complete).is_err());
        assert!(transition(CategoryStatus::Draft, CategoryAction::StartJudging).is_err());
        assert!(transition(CategoryStatus::Draft, CategoryAction::Complete).is_err());
    }

    #[test]
    fn test_operation_gates() {
        assert!(accepts_submissions(CategoryStatus::Launched));
        assert!(!accepts_submissions(CategoryStatus::Judging));
        assert!(accepts_scores(CategoryStatus::Judging));
        assert!(!accepts_scores(CategoryStatus::Launched));
        assert!(is_deletable(CategoryStatus::Judging));
        assert!(!is_deletable(CategoryStatus::Completed));
        assert!(allows_metric_changes(CategoryStatus::Draft));
        assert!(!allows_metric_changes(CategoryStatus::Launched));
    }

    #[test]
    fn test_ensure_reports_status_and_operation() {
        let err = ensure(CategoryStatus::Completed, is_deletable, "deleting").unwrap_err();
        match err {
            StorageError::InvalidState { status, operation } => {
                assert_eq!(status, CategoryStatus::Completed);
                assert_eq!(operation, "deleting");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
