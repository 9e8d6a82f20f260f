use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{ApprovalStatus, QuizMode, UserRole};

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, max = 128))]
    pub password: String,

    pub role: UserRole,

    #[validate(length(max = 32))]
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, max = 128))]
    pub password: String,

    #[validate(length(max = 32))]
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestionRequest {
    #[validate(length(min = 1, max = 5000))]
    pub text: String,

    #[validate(url)]
    pub image: Option<String>,

    #[validate(length(min = 1), nested)]
    pub options: Vec<QuestionOptionInput>,

    #[validate(length(min = 1))]
    pub category_id: String,

    #[validate(range(min = 1, max = 1000))]
    pub default_score: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOptionInput {
    #[validate(length(min = 1, max = 1000))]
    pub text: String,

    #[validate(url)]
    pub image: Option<String>,

    #[serde(default)]
    pub is_correct: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionListQuery {
    pub category_id: Option<String>,
}

/// Mode-dependent checks (criteria, question ids) live in the quiz composer.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuizRequest {
    #[validate(length(max = 200))]
    pub title: Option<String>,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    #[validate(range(min = 1, max = 1440))]
    pub duration: Option<i32>,

    pub mode: Option<QuizMode>,

    pub questions: Option<Vec<String>>,

    pub criteria: Option<Vec<CriterionInput>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriterionInput {
    pub category_id: Option<String>,
    pub count: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleQuizActiveRequest {
    pub is_active: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SetQuizPaidRequest {
    #[validate(length(min = 1))]
    pub quiz_id: String,
    pub is_paid: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAttemptRequest {
    pub quiz_id: Option<String>,
    pub answers: Option<Vec<AnswerInput>>,
    pub started_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerInput {
    pub question_id: String,
    #[serde(default)]
    pub selected_option_id: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReviewCoachRequest {
    #[validate(length(min = 1))]
    pub user_id: String,

    pub status: ApprovalStatus,

    #[validate(length(max = 1000))]
    pub rejection_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpsertSystemConfigRequest {
    #[validate(length(min = 1, max = 100))]
    pub key: String,

    #[serde(default)]
    pub value: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MarketplaceQuery {
    #[validate(range(min = 1, max = 1_000_000))]
    pub page: Option<u64>,

    #[validate(range(min = 1, max = 100))]
    pub limit: Option<u64>,

    #[validate(length(max = 200))]
    pub search: Option<String>,
}

impl Default for MarketplaceQuery {
    fn default() -> Self {
        Self {
            page: Some(1),
            limit: Some(10),
            search: None,
        }
    }
}

impl MarketplaceQuery {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(10).clamp(1, 100)
    }

    pub fn offset(&self) -> u64 {
        (self.page() - 1).saturating_mul(self.limit())
    }

    pub fn search(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
