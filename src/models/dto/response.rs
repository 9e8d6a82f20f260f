use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{
    ApprovalStatus, Attempt, Question, QuestionOption, Quiz, QuizMode, User, UserRole,
};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub status: ApprovalStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coaching_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        UserDto {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            status: user.status,
            coaching_id: user.coaching_id,
            rejection_reason: user.rejection_reason,
            phone_number: user.phone_number,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserDto,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalStatusResponse {
    pub role: UserRole,
    pub status: ApprovalStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
}

impl From<&User> for ApprovalStatusResponse {
    fn from(user: &User) -> Self {
        ApprovalStatusResponse {
            role: user.role,
            status: user.status,
            rejection_reason: user.rejection_reason.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReviewCoachResponse {
    pub message: String,
    pub user: UserDto,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    pub question_count: u64,
}

/// Quiz as served to an attempt: correctness flags are stripped.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizForAttempt {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_by: String,
    pub mode: QuizMode,
    pub duration: i32,
    pub total_marks: i32,
    pub is_active: bool,
    pub is_paid: bool,
    pub questions: Vec<QuestionForAttempt>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionForAttempt {
    pub id: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub options: Vec<OptionForAttempt>,
    pub score: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct OptionForAttempt {
    pub id: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl From<&QuestionOption> for OptionForAttempt {
    fn from(option: &QuestionOption) -> Self {
        OptionForAttempt {
            id: option.id.clone(),
            text: option.text.clone(),
            image: option.image.clone(),
        }
    }
}

impl QuizForAttempt {
    /// Expands the quiz's question refs in quiz order; refs whose question
    /// document is missing are skipped.
    pub fn expand(quiz: Quiz, questions: &[Question]) -> Self {
        let expanded = quiz
            .questions
            .iter()
            .filter_map(|qref| {
                questions
                    .iter()
                    .find(|q| q.id == qref.question_id)
                    .map(|q| QuestionForAttempt {
                        id: q.id.clone(),
                        text: q.text.clone(),
                        image: q.image.clone(),
                        options: q.options.iter().map(OptionForAttempt::from).collect(),
                        score: qref.score,
                    })
            })
            .collect();

        QuizForAttempt {
            id: quiz.id,
            title: quiz.title,
            description: quiz.description,
            created_by: quiz.created_by,
            mode: quiz.mode,
            duration: quiz.duration,
            total_marks: quiz.total_marks,
            is_active: quiz.is_active,
            is_paid: quiz.is_paid,
            questions: expanded,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QuizUpdatedResponse {
    pub message: String,
    pub quiz: Quiz,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketplacePage {
    pub quizzes: Vec<Quiz>,
    pub has_more: bool,
    pub total: u64,
    pub current_page: u64,
}

#[derive(Debug, Serialize)]
pub struct StudentAttempts {
    pub student: UserDto,
    pub attempts: Vec<Attempt>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CoachStats {
    pub student_count: u64,
    pub quiz_count: u64,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlatformStats {
    pub coach_count: u64,
    pub question_count: u64,
    pub total_usage: i64,
    pub revenue_share: f64,
}
