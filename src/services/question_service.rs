use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Question, QuestionOption},
        dto::request::CreateQuestionRequest,
    },
    repositories::{CategoryRepository, QuestionRepository},
};

const DEFAULT_QUESTION_SCORE: i32 = 1;

pub struct QuestionService {
    questions: Arc<dyn QuestionRepository>,
    categories: Arc<dyn CategoryRepository>,
}

impl QuestionService {
    pub fn new(questions: Arc<dyn QuestionRepository>, categories: Arc<dyn CategoryRepository>) -> Self {
        Self {
            questions,
            categories,
        }
    }

    pub async fn create_question(
        &self,
        request: CreateQuestionRequest,
        coach_id: &str,
    ) -> AppResult<Question> {
        request.validate()?;

        self.categories
            .find_owned(&request.category_id, coach_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Category with id '{}' not found", request.category_id))
            })?;

        let options = request
            .options
            .into_iter()
            .map(|o| QuestionOption::new(&o.text, o.image, o.is_correct))
            .collect();

        let question = Question::new(
            &request.text,
            request.image,
            options,
            &request.category_id,
            coach_id,
            request.default_score.unwrap_or(DEFAULT_QUESTION_SCORE),
        );

        let question = self.questions.create(question).await?;
        log::info!(
            "Coach {} added question {} to category {}",
            coach_id,
            question.id,
            question.category_id
        );
        Ok(question)
    }

    pub async fn list_questions(
        &self,
        coach_id: &str,
        category_id: Option<&str>,
    ) -> AppResult<Vec<Question>> {
        self.questions.list_by_creator(coach_id, category_id).await
    }
}
