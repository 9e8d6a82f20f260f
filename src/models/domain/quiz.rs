use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_DURATION_MINUTES: i32 = 60;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_by: String,
    pub mode: QuizMode,
    pub questions: Vec<QuizQuestionRef>, // Fixed at creation
    pub duration: i32,                   // Minutes
    pub total_marks: i32,
    pub is_active: bool,
    pub is_paid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuizMode {
    Manual,
    Random,
}

/// Question reference with its score copied at creation time.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestionRef {
    pub question_id: String,
    pub score: i32,
}

impl Quiz {
    pub fn new(
        title: &str,
        description: Option<String>,
        created_by: &str,
        mode: QuizMode,
        questions: Vec<QuizQuestionRef>,
        duration: Option<i32>,
    ) -> Self {
        let total_marks = questions
            .iter()
            .fold(0i32, |total, q| total.saturating_add(q.score));

        Quiz {
            id: Uuid::new_v4().to_string(),
            title: title.trim().to_string(),
            description,
            created_by: created_by.to_string(),
            mode,
            questions,
            duration: duration.unwrap_or(DEFAULT_DURATION_MINUTES),
            total_marks,
            is_active: true,
            is_paid: false,
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
        }
    }

    /// Score recorded for a question when the quiz was composed.
    pub fn score_for(&self, question_id: &str) -> Option<i32> {
        self.questions
            .iter()
            .find(|q| q.question_id == question_id)
            .map(|q| q.score)
    }

    pub fn question_ids(&self) -> Vec<String> {
        self.questions.iter().map(|q| q.question_id.clone()).collect()
    }
}
