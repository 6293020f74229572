use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Lifecycle state of an award category.
///
/// Stored as the `category_status` Postgres enum. Which transitions are
/// legal between these states lives in [`crate::services::lifecycle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "category_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CategoryStatus {
    Draft,
    Launched,
    Judging,
    Completed,
}

impl CategoryStatus {
    pub const ALL: [CategoryStatus; 4] = [
        CategoryStatus::Draft,
        CategoryStatus::Launched,
        CategoryStatus::Judging,
        CategoryStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryStatus::Draft => "DRAFT",
            CategoryStatus::Launched => "LAUNCHED",
            CategoryStatus::Judging => "JUDGING",
            CategoryStatus::Completed => "COMPLETED",
        }
    }
}

impl fmt::Display for CategoryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Category {
    pub category_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub status: CategoryStatus,
    pub share_token: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
