use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{MetricValue, Submission};

/// Request payload for a public submission through a share link
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateSubmissionRequest {
    #[validate(length(min = 1, max = 64))]
    pub share_token: String,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Company name must be between 1 and 255 characters"
    ))]
    pub company_name: String,

    #[validate(email(message = "Contact email must be a valid email address"))]
    pub contact_email: String,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Contact name must be between 1 and 255 characters"
    ))]
    pub contact_name: String,

    pub metric_values: Vec<MetricValueInput>,
}

/// Raw form value for one metric
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MetricValueInput {
    pub metric_id: Uuid,
    pub value: String,
}

/// Submission with its metric values
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmissionDetail {
    #[serde(flatten)]
    pub submission: Submission,
    pub metric_values: Vec<MetricValue>,
}

/// Submission row in the organizer-wide listing
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct SubmissionListEntry {
    pub submission_id: Uuid,
    pub category_id: Uuid,
    pub category_name: String,
    pub company_name: String,
    pub contact_email: String,
    pub contact_name: String,
    pub total_score: Option<Decimal>,
    pub created_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(email: &str, company: &str) -> CreateSubmissionRequest {
        CreateSubmissionRequest {
            share_token: "0f3b6c1d2e4a4b5c8d9e0f1a2b3c4d5e".to_string(),
            company_name: company.to_string(),
            contact_email: email.to_string(),
            contact_name: "Ada Lovelace".to_string(),
            metric_values: Vec::new(),
        }
    }

    #[test]
    fn test_valid_submission_request() {
        assert!(request("ada@example.com", "Analytical Engines").validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_email() {
        let errors = request("not-an-email", "Analytical Engines")
            .validate()
            .unwrap_err();
        assert!(errors.field_errors().contains_key("contact_email"));
    }

    #[test]
    fn test_rejects_empty_company() {
        let errors = request("ada@example.com", "").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("company_name"));
    }
}
