use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub options: Vec<QuestionOption>,
    pub category_id: String,
    pub created_by: String,
    pub default_score: i32,
    #[serde(default)]
    pub usage_count: i64, // Incremented once per graded answer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOption {
    pub id: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub is_correct: bool,
}

impl QuestionOption {
    pub fn new(text: &str, image: Option<String>, is_correct: bool) -> Self {
        QuestionOption {
            id: Uuid::new_v4().to_string(),
            text: text.to_string(),
            image,
            is_correct,
        }
    }
}

impl Question {
    pub fn new(
        text: &str,
        image: Option<String>,
        options: Vec<QuestionOption>,
        category_id: &str,
        created_by: &str,
        default_score: i32,
    ) -> Self {
        Question {
            id: Uuid::new_v4().to_string(),
            text: text.to_string(),
            image,
            options,
            category_id: category_id.to_string(),
            created_by: created_by.to_string(),
            default_score,
            usage_count: 0,
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
        }
    }

    /// First option flagged correct. Exactly one is expected but not enforced.
    pub fn correct_option(&self) -> Option<&QuestionOption> {
        self.options.iter().find(|opt| opt.is_correct)
    }
}
