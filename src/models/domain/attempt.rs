use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attempt {
    pub id: String,
    pub student_id: String,
    pub quiz_id: String,
    pub answers: Vec<AttemptAnswer>,
    pub score: i32,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptAnswer {
    pub question_id: String,
    pub selected_option_id: String,
}

impl Attempt {
    pub fn new(
        student_id: &str,
        quiz_id: &str,
        answers: Vec<AttemptAnswer>,
        score: i32,
        started_at: Option<DateTime<Utc>>,
    ) -> Self {
        let completed_at = Utc::now();

        Attempt {
            id: Uuid::new_v4().to_string(),
            student_id: student_id.to_string(),
            quiz_id: quiz_id.to_string(),
            answers,
            score,
            started_at: started_at.unwrap_or(completed_at),
            completed_at,
            created_at: Some(completed_at),
        }
    }
}
